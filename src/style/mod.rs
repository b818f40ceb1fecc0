//! # Style System
//!
//! Every block is typeset from three numbers: font size, line-height
//! multiplier and the gap below it. Each block kind has a default set of
//! these; a block may override any of them individually.
//!
//! Styles arrive from sliders and steppers in the editor UI, so values that
//! fall outside their domain are clamped rather than rejected.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::model::{Block, BlockKind};

/// Smallest font size a block may be set in.
pub const MIN_FONT_SIZE: f64 = 1.0;
/// Smallest line-height multiplier (solid leading).
pub const MIN_LINE_HEIGHT: f64 = 1.0;
/// Smallest bottom margin.
pub const MIN_MARGIN_BOTTOM: f64 = 0.0;

/// A fully resolved style: what the estimator and the renderer work with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockStyle {
    /// Font size in layout units (px).
    pub font_size: f64,
    /// Line height as a multiplier of font size.
    pub line_height: f64,
    /// Space below the block in layout units.
    pub margin_bottom: f64,
}

impl BlockStyle {
    pub const fn new(font_size: f64, line_height: f64, margin_bottom: f64) -> Self {
        Self {
            font_size,
            line_height,
            margin_bottom,
        }
    }

    /// The default style for a block kind.
    pub fn default_for(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Section => Self::new(16.0, 1.6, 32.0),
            BlockKind::Text => Self::new(14.0, 1.6, 16.0),
            BlockKind::Image => Self::new(14.0, 1.4, 24.0),
            BlockKind::Stat => Self::new(14.0, 1.2, 16.0),
            BlockKind::Quote => Self::new(18.0, 1.5, 24.0),
        }
    }

    /// Height of one line of body text.
    pub fn line_box(&self) -> f64 {
        self.line_height * self.font_size
    }

    /// Resolve a block's effective style: its override merged over the
    /// kind's default.
    pub fn resolve(block: &Block) -> Self {
        let base = Self::default_for(block.kind);
        match &block.style {
            Some(over) => over.apply_to(base),
            None => base,
        }
    }
}

/// A per-block style override. Unset fields fall back to the kind default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<f64>,
}

impl StyleOverride {
    fn apply_to(&self, base: BlockStyle) -> BlockStyle {
        BlockStyle {
            font_size: self.font_size.unwrap_or(base.font_size),
            line_height: self.line_height.unwrap_or(base.line_height),
            margin_bottom: self.margin_bottom.unwrap_or(base.margin_bottom),
        }
    }

    /// The same override with every set value clamped into its domain.
    pub fn clamped(&self) -> Self {
        let mut out = Self::default();
        out.merge(&StylePatch {
            font_size: self.font_size,
            line_height: self.line_height,
            margin_bottom: self.margin_bottom,
        });
        out
    }

    /// Shallow-merge a patch into this override, clamping each incoming
    /// value into its domain.
    pub fn merge(&mut self, patch: &StylePatch) {
        let patch = patch.clamped();
        if patch.font_size.is_some() {
            self.font_size = patch.font_size;
        }
        if patch.line_height.is_some() {
            self.line_height = patch.line_height;
        }
        if patch.margin_bottom.is_some() {
            self.margin_bottom = patch.margin_bottom;
        }
    }
}

/// A partial style change, as produced by one editor control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StylePatch {
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub line_height: Option<f64>,
    #[serde(default)]
    pub margin_bottom: Option<f64>,
}

impl StylePatch {
    pub fn font_size(v: f64) -> Self {
        Self {
            font_size: Some(v),
            ..Default::default()
        }
    }

    pub fn line_height(v: f64) -> Self {
        Self {
            line_height: Some(v),
            ..Default::default()
        }
    }

    pub fn margin_bottom(v: f64) -> Self {
        Self {
            margin_bottom: Some(v),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.font_size.is_none() && self.line_height.is_none() && self.margin_bottom.is_none()
    }

    /// Strict check: the first out-of-domain field, if any.
    pub fn validate(&self) -> Result<()> {
        for (field, value, min) in self.fields() {
            if let Some(v) = value {
                if !v.is_finite() || v < min {
                    return Err(FolioError::InvalidStyleValue { field, value: v });
                }
            }
        }
        Ok(())
    }

    /// The same patch with every value clamped into its domain.
    pub fn clamped(&self) -> Self {
        Self {
            font_size: self.font_size.map(|v| clamp_field("fontSize", v, MIN_FONT_SIZE)),
            line_height: self
                .line_height
                .map(|v| clamp_field("lineHeight", v, MIN_LINE_HEIGHT)),
            margin_bottom: self
                .margin_bottom
                .map(|v| clamp_field("marginBottom", v, MIN_MARGIN_BOTTOM)),
        }
    }

    fn fields(&self) -> [(&'static str, Option<f64>, f64); 3] {
        [
            ("fontSize", self.font_size, MIN_FONT_SIZE),
            ("lineHeight", self.line_height, MIN_LINE_HEIGHT),
            ("marginBottom", self.margin_bottom, MIN_MARGIN_BOTTOM),
        ]
    }
}

fn clamp_field(field: &str, value: f64, min: f64) -> f64 {
    // NaN compares false against everything, so it lands on the bound too.
    let clamped = if value >= min && value.is_finite() {
        value
    } else if value == f64::INFINITY {
        f64::MAX
    } else {
        min
    };
    if clamped != value {
        log::warn!("clamped {field} from {value} to {clamped}");
    }
    clamped
}
