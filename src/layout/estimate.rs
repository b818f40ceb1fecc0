//! # Height Estimation
//!
//! A deterministic stand-in for real text shaping. Each block kind has a
//! small cost function: a fixed overhead, a number of wrapped lines derived
//! from character counts, and the block's bottom margin. The constants live
//! in [`HeightModel`] so the whole table can be tuned in one place.

use crate::model::{Block, BlockKind};
use crate::style::BlockStyle;

/// The constants behind the per-kind height estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightModel {
    /// Fixed overhead of a section header (rule + padding).
    pub section_header: f64,
    /// Characters per wrapped line of a section title.
    pub title_chars_per_line: usize,
    /// Characters per wrapped line of body and caption text.
    pub body_chars_per_line: usize,
    /// Characters per wrapped line of quote text (set larger, so fewer fit).
    pub quote_chars_per_line: usize,
    /// Title line height relative to a body line.
    pub title_scale: f64,
    /// Value and label sharing one baseline.
    pub stat_height: f64,
    /// The attribution line under a quote.
    pub attribution_height: f64,
    /// An image with a reference.
    pub image_height: f64,
    /// The empty drop-zone shown while no image is set.
    pub placeholder_height: f64,
}

impl Default for HeightModel {
    fn default() -> Self {
        Self {
            section_header: 24.0,
            title_chars_per_line: 50,
            body_chars_per_line: 70,
            quote_chars_per_line: 60,
            title_scale: 1.5,
            stat_height: 72.0,
            attribution_height: 24.0,
            image_height: 240.0,
            placeholder_height: 120.0,
        }
    }
}

impl HeightModel {
    /// Estimated rendered height of `block` set in `style`.
    pub fn estimate(&self, block: &Block, style: &BlockStyle) -> f64 {
        let line = style.line_box();
        let c = &block.content;

        let body = match block.kind {
            BlockKind::Section => {
                let title_lines = wrapped_lines(c.title.as_deref(), self.title_chars_per_line);
                let body_lines = wrapped_lines(c.body.as_deref(), self.body_chars_per_line);
                self.section_header
                    + title_lines as f64 * self.title_scale * line
                    + body_lines as f64 * line
            }
            BlockKind::Text => {
                let title = if has_text(c.title.as_deref()) {
                    self.title_scale * line
                } else {
                    0.0
                };
                let body_lines = wrapped_lines(c.body.as_deref(), self.body_chars_per_line);
                title + body_lines as f64 * line
            }
            BlockKind::Stat => self.stat_height,
            BlockKind::Quote => {
                let lines = wrapped_lines(c.quote.as_deref(), self.quote_chars_per_line);
                lines as f64 * line + self.attribution_height
            }
            BlockKind::Image => {
                let frame = if has_text(c.image_url.as_deref()) {
                    self.image_height
                } else {
                    self.placeholder_height
                };
                let caption_lines = wrapped_lines(c.caption.as_deref(), self.body_chars_per_line);
                frame + caption_lines as f64 * line
            }
        };

        (body + style.margin_bottom).max(0.0)
    }
}

/// Estimate with the default [`HeightModel`].
pub fn estimate_height(block: &Block, style: &BlockStyle) -> f64 {
    HeightModel::default().estimate(block, style)
}

/// `ceil(chars / per_line)`, zero for missing or empty text.
fn wrapped_lines(text: Option<&str>, per_line: usize) -> usize {
    let len = text.map(|t| t.chars().count()).unwrap_or(0);
    len.div_ceil(per_line.max(1))
}

fn has_text(text: Option<&str>) -> bool {
    text.is_some_and(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockContent, BlockId};

    fn block(kind: BlockKind, content: BlockContent) -> Block {
        Block::new(BlockId::new("b1"), kind).with_content(content)
    }

    fn text(body: &str) -> Block {
        block(
            BlockKind::Text,
            BlockContent {
                body: Some(body.to_string()),
                ..Default::default()
            },
        )
    }

    const STYLE: BlockStyle = BlockStyle::new(16.0, 1.5, 56.0);

    #[test]
    fn text_one_line_plus_margin() {
        // 70 chars is exactly one line: 16 * 1.5 + 56
        assert_eq!(estimate_height(&text(&"x".repeat(70)), &STYLE), 80.0);
    }

    #[test]
    fn text_wraps_on_the_71st_char() {
        assert_eq!(estimate_height(&text(&"x".repeat(71)), &STYLE), 104.0);
    }

    #[test]
    fn text_title_adds_one_scaled_line() {
        let b = block(
            BlockKind::Text,
            BlockContent {
                title: Some("Heading".to_string()),
                body: Some("x".repeat(70)),
                ..Default::default()
            },
        );
        assert_eq!(estimate_height(&b, &STYLE), 80.0 + 36.0);
    }

    #[test]
    fn empty_text_is_just_margin() {
        assert_eq!(estimate_height(&text(""), &STYLE), 56.0);
    }

    #[test]
    fn section_counts_title_and_body_lines() {
        let b = block(
            BlockKind::Section,
            BlockContent {
                title: Some("t".repeat(51)),
                body: Some("b".repeat(140)),
                ..Default::default()
            },
        );
        let style = BlockStyle::new(10.0, 1.0, 0.0);
        // 24 + 2 * 15 + 2 * 10
        assert_eq!(estimate_height(&b, &style), 74.0);
    }

    #[test]
    fn stat_is_fixed() {
        let short = block(BlockKind::Stat, BlockContent::default_for(BlockKind::Stat));
        let long = block(
            BlockKind::Stat,
            BlockContent {
                value: Some("1,234,567".to_string()),
                label: Some("x".repeat(500)),
                ..Default::default()
            },
        );
        assert_eq!(estimate_height(&short, &STYLE), 72.0 + 56.0);
        assert_eq!(estimate_height(&long, &STYLE), 72.0 + 56.0);
    }

    #[test]
    fn quote_lines_plus_attribution() {
        let b = block(
            BlockKind::Quote,
            BlockContent {
                quote: Some("q".repeat(61)),
                ..Default::default()
            },
        );
        let style = BlockStyle::new(20.0, 1.0, 10.0);
        assert_eq!(estimate_height(&b, &style), 2.0 * 20.0 + 24.0 + 10.0);
    }

    #[test]
    fn image_reference_selects_frame_height() {
        let style = BlockStyle::new(14.0, 1.0, 0.0);
        let placeholder = block(BlockKind::Image, BlockContent::default());
        let with_image = block(
            BlockKind::Image,
            BlockContent {
                image_url: Some("chart.png".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(estimate_height(&placeholder, &style), 120.0);
        assert_eq!(estimate_height(&with_image, &style), 240.0);
    }

    #[test]
    fn estimates_are_stable() {
        let b = text(&"stable ".repeat(40));
        let first = estimate_height(&b, &STYLE);
        for _ in 0..10 {
            assert_eq!(estimate_height(&b, &STYLE), first);
        }
    }

    #[test]
    fn estimates_grow_with_style_parameters() {
        let b = text(&"x".repeat(100));
        let base = estimate_height(&b, &STYLE);
        let bigger_font = BlockStyle::new(18.0, 1.5, 56.0);
        let looser = BlockStyle::new(16.0, 1.8, 56.0);
        let wider_gap = BlockStyle::new(16.0, 1.5, 60.0);
        assert!(estimate_height(&b, &bigger_font) > base);
        assert!(estimate_height(&b, &looser) > base);
        assert!(estimate_height(&b, &wider_gap) > base);
    }

    #[test]
    fn multibyte_text_counts_chars_not_bytes() {
        // 70 two-byte chars is still one line
        assert_eq!(estimate_height(&text(&"é".repeat(70)), &STYLE), 80.0);
    }
}
