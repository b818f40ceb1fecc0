//! # Folio
//!
//! A report pagination engine.
//!
//! A report is an ordered list of typed content blocks (sections, text,
//! images, stats, quotes), each styleable on its own. Folio flows those
//! blocks into fixed-size pages and keeps the flow consistent while the
//! report is edited: blocks are added, removed, reordered and restyled, one
//! at a time or as a multi-block selection.
//!
//! Nothing is measured with a real text shaper. Each block's height is
//! estimated from its character counts and style by a small deterministic
//! cost function, so the same report always produces the same pages.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON / editor events)
//!       ↓
//!   [model]      - Blocks, content, page configuration
//!       ↓
//!   [style]      - Kind defaults, per-block overrides, clamping
//!       ↓
//!   [store]      - Ordered block list and its edit operations
//!   [selection]  - Which blocks batch operations target
//!   [editor]     - One session tying the above together
//!       ↓
//!   [layout]     - Height estimation and page flow
//! ```

pub mod editor;
pub mod error;
pub mod layout;
pub mod model;
pub mod selection;
pub mod store;
pub mod style;

pub use editor::ReportEditor;
pub use error::{FolioError, Result};
pub use layout::{paginate, LayoutInfo, Page, Paginator};
pub use model::{Block, BlockContent, BlockId, BlockKind, ContentPatch, PageConfig, Report};
pub use selection::Selection;
pub use store::{BlockStore, Direction};
pub use style::{BlockStyle, StyleOverride, StylePatch};

/// Lay out a report described as JSON and return its page metadata.
///
/// This is the primary entry point for tools that only need the layout.
pub fn paginate_json(json: &str) -> Result<LayoutInfo> {
    let report = Report::from_json(json)?;
    let editor = ReportEditor::from_report(report)?;
    Ok(editor.layout_info())
}
