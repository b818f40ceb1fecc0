//! # Report Model
//!
//! The input representation for the pagination engine. A report is a flat,
//! ordered list of typed content blocks plus the page configuration they are
//! flowed into. There is no tree and no stored position: list order is
//! document order.
//!
//! Pages are not part of the model. They are derived by the layout engine on
//! demand and never edited directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::style::StyleOverride;

/// Stable, unique identifier of a block.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The sequence number of a generated id (`"b12"` -> `12`).
    pub(crate) fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix('b')?.parse().ok()
    }

    pub(crate) fn generated(seq: u64) -> Self {
        Self(format!("b{seq}"))
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The closed set of block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// A titled section opener with a short description.
    Section,
    /// Free-form paragraph text with an optional heading.
    Text,
    /// An image (or placeholder) with a caption.
    Image,
    /// A single headline metric: value over label.
    Stat,
    /// A pull quote with attribution.
    Quote,
}

impl BlockKind {
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Section,
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Stat,
        BlockKind::Quote,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Section => "section",
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::Stat => "stat",
            BlockKind::Quote => "quote",
        }
    }
}

/// The payload of a block. Which fields are meaningful depends on the
/// block kind; the others stay unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockContent {
    /// Section/text heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Section/text body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Image reference (URL or data URI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Stat headline, e.g. "42%".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
}

impl BlockContent {
    /// The content a freshly inserted block of this kind starts with.
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Section => Self {
                title: Some("New Section".to_string()),
                body: Some("Add a description for this section.".to_string()),
                ..Default::default()
            },
            BlockKind::Text => Self {
                body: Some("Start writing...".to_string()),
                ..Default::default()
            },
            BlockKind::Image => Self {
                caption: Some("Image caption".to_string()),
                ..Default::default()
            },
            BlockKind::Stat => Self {
                value: Some("0".to_string()),
                label: Some("Metric".to_string()),
                ..Default::default()
            },
            BlockKind::Quote => Self {
                quote: Some("Add a quote.".to_string()),
                attribution: Some("Source".to_string()),
                ..Default::default()
            },
        }
    }

    /// Shallow merge: every field set in `patch` replaces the current value.
    pub fn merge(&mut self, patch: ContentPatch) {
        let ContentPatch {
            title,
            body,
            image_url,
            caption,
            value,
            label,
            quote,
            attribution,
        } = patch;
        merge_field(&mut self.title, title);
        merge_field(&mut self.body, body);
        merge_field(&mut self.image_url, image_url);
        merge_field(&mut self.caption, caption);
        merge_field(&mut self.value, value);
        merge_field(&mut self.label, label);
        merge_field(&mut self.quote, quote);
        merge_field(&mut self.attribution, attribution);
    }
}

fn merge_field(slot: &mut Option<String>, incoming: Option<String>) {
    if incoming.is_some() {
        *slot = incoming;
    }
}

/// A partial content edit. Only the fields that are set are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub attribution: Option<String>,
}

impl ContentPatch {
    pub fn title(s: &str) -> Self {
        Self {
            title: Some(s.to_string()),
            ..Default::default()
        }
    }

    pub fn body(s: &str) -> Self {
        Self {
            body: Some(s.to_string()),
            ..Default::default()
        }
    }

}

/// An atomic, typed unit of report content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: BlockId,

    #[serde(rename = "type")]
    pub kind: BlockKind,

    #[serde(default)]
    pub content: BlockContent,

    /// Per-block style override. `None` means the kind default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleOverride>,
}

impl Block {
    /// A block of the given kind with its default content and no override.
    pub fn new(id: BlockId, kind: BlockKind) -> Self {
        Self {
            id,
            kind,
            content: BlockContent::default_for(kind),
            style: None,
        }
    }

    pub fn with_content(mut self, content: BlockContent) -> Self {
        self.content = content;
        self
    }

    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style = Some(style);
        self
    }
}

/// A complete report ready for pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Report title, rendered in the reserved region of the first page.
    #[serde(default)]
    pub title: Option<String>,

    /// Page geometry the blocks are flowed into.
    #[serde(default)]
    pub config: PageConfig,

    /// The blocks, in document order.
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Report {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Configuration for a page: size, margins and the first-page title region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Page size. Defaults to A4.
    #[serde(default)]
    pub size: PageSize,

    /// Page margins in layout units.
    #[serde(default = "default_margin")]
    pub margin: Edges,

    /// Height reserved on the first page for the report title/header.
    #[serde(default = "default_title_height")]
    pub title_height: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: default_margin(),
            title_height: default_title_height(),
        }
    }
}

fn default_margin() -> Edges {
    Edges::uniform(48.0) // half an inch
}

fn default_title_height() -> f64 {
    96.0
}

impl PageConfig {
    /// Cumulative block height allowed on one page.
    pub fn content_budget(&self) -> f64 {
        let (_, h) = self.size.dimensions();
        (h - self.margin.vertical()).max(0.0)
    }

    /// Height already taken on page 1 before the first block.
    pub fn first_page_reserved(&self) -> f64 {
        self.title_height.max(0.0)
    }
}

/// Standard page sizes in layout units (CSS px at 96 dpi).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in layout units.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (794.0, 1123.0),
            PageSize::Letter => (816.0, 1056.0),
            PageSize::Legal => (816.0, 1344.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Edge values (top, right, bottom, left) used for page margins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}
