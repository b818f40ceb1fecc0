//! # Folio CLI
//!
//! Usage:
//!   folio report.json
//!   echo '{ ... }' | folio --json
//!   folio --example > report.json

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use folio::{LayoutInfo, Report, ReportEditor};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Flow report blocks into fixed-size pages", long_about = None)]
struct Cli {
    /// Report JSON file (stdin if not specified)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the layout as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Compact JSON output (no pretty printing)
    #[arg(long, requires = "json")]
    compact: bool,

    /// Print a sample report and exit
    #[arg(long)]
    example: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if cli.example {
        print!("{}", example_report_json());
        return;
    }

    if let Err(e) = run(&cli) {
        eprintln!("✗ {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let input = match &cli.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let editor = ReportEditor::from_report(Report::from_json(&input)?)?;
    let info = editor.layout_info();

    if cli.json {
        let out = if cli.compact {
            serde_json::to_string(&info)?
        } else {
            serde_json::to_string_pretty(&info)?
        };
        println!("{out}");
    } else {
        print_summary(&info);
    }
    Ok(())
}

fn print_summary(info: &LayoutInfo) {
    println!(
        "{} page(s), budget {:.0}, first page reserves {:.0}",
        info.pages.len(),
        info.content_budget,
        info.first_page_reserved
    );
    for page in &info.pages {
        let marker = if page.overflow { "  (overflow)" } else { "" };
        println!(
            "page {}: {} block(s), {:.0} used{marker}",
            page.page_number,
            page.blocks.len(),
            page.used_height
        );
        for block in &page.blocks {
            println!(
                "  {:<6} {:<8} {:>6.1}",
                block.id.as_str(),
                block.kind.name(),
                block.height
            );
        }
    }
}

fn example_report_json() -> &'static str {
    r##"{
  "title": "Brand Visibility Report: Q3",
  "config": {
    "size": "a4",
    "margin": { "top": 48, "right": 48, "bottom": 48, "left": 48 },
    "titleHeight": 96
  },
  "blocks": [
    {
      "id": "b1",
      "type": "section",
      "content": {
        "title": "Executive Summary",
        "body": "Visibility across tracked assistants rose steadily through the quarter, led by gains in product comparison queries."
      }
    },
    {
      "id": "b2",
      "type": "stat",
      "content": { "value": "38%", "label": "Share of voice" }
    },
    {
      "id": "b3",
      "type": "text",
      "content": {
        "title": "Methodology",
        "body": "Each week we issued a fixed panel of prompts to every monitored model and recorded whether the brand was mentioned, where it ranked, and which sources were cited alongside it."
      },
      "style": { "fontSize": 13, "lineHeight": 1.7 }
    },
    {
      "id": "b4",
      "type": "image",
      "content": { "imageUrl": "charts/mentions-by-week.png", "caption": "Mentions by week" }
    },
    {
      "id": "b5",
      "type": "quote",
      "content": {
        "quote": "The brands that win in AI answers are the ones with the clearest, most consistent public documentation.",
        "attribution": "Head of Research"
      }
    }
  ]
}
"##
}
