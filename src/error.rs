//! Structured error types for the Folio pagination engine.
//!
//! Most editing outcomes are not errors: moving the first block up, deleting
//! an id that is already gone, or batch-restyling a partially stale selection
//! all succeed as no-ops. The variants here cover the cases a caller must
//! actually react to.

use thiserror::Error;

use crate::model::BlockId;

/// Result type alias for Folio operations.
pub type Result<T> = std::result::Result<T, FolioError>;

/// The unified error type returned by all public Folio API functions.
#[derive(Error, Debug)]
pub enum FolioError {
    /// A single-target operation referenced a block that does not exist.
    #[error("Block not found: {0}")]
    NotFound(BlockId),

    /// A block list contained the same id twice.
    #[error("Duplicate block id: {0}")]
    DuplicateId(BlockId),

    /// A style field was outside its domain. Store operations clamp instead
    /// of returning this; it is produced by strict validation only.
    #[error("Invalid value {value} for style field `{field}`")]
    InvalidStyleValue { field: &'static str, value: f64 },

    /// JSON input failed to parse as a valid report document.
    #[error("Failed to parse report: {source}{}", hint_suffix(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {hint}")
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the report schema. Check block types and field names.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        FolioError::Parse { source: e, hint }
    }
}
