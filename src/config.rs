//! Picker configuration consumed by the selection engine.
//!
//! Hosts usually embed this in their own settings file; every field has a
//! default so partial JSON is accepted.

use serde::{Deserialize, Serialize};

use crate::constants::{ALPHA_SYNC_TOLERANCE, FALLBACK_COLOR, HSV_SYNC_TOLERANCE};
use crate::error::Result;
use crate::parse::parse_color_string;

/// How far an external value must move before it overrides the internal
/// shadow in controlled mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncTolerance {
    /// Hue (degrees), saturation and value (percent).
    pub hsv: f64,
    pub alpha: f64,
}

impl Default for SyncTolerance {
    fn default() -> Self {
        Self {
            hsv: HSV_SYNC_TOLERANCE,
            alpha: ALPHA_SYNC_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Whether alpha can be changed from the alpha slider, alpha field or
    /// alpha drag region. When false, alpha is pinned.
    pub show_alpha: bool,
    /// Initial color of an uncontrolled picker, and the fallback when a
    /// controlled value does not parse.
    pub default_color: String,
    /// Preset colors, in display order. Any supported grammar.
    pub swatches: Vec<String>,
    pub tolerance: SyncTolerance,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            show_alpha: cfg!(feature = "alpha"),
            default_color: FALLBACK_COLOR.to_string(),
            swatches: Vec::new(),
            tolerance: SyncTolerance::default(),
        }
    }
}

impl PickerConfig {
    /// Decode a configuration from JSON.
    ///
    /// Unparseable colors are kept (they behave as "no change" at use time)
    /// but logged.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.warn_invalid_colors();
        Ok(config)
    }

    pub fn with_swatches<I, S>(mut self, swatches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.swatches = swatches.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_alpha(mut self, show_alpha: bool) -> Self {
        self.show_alpha = show_alpha;
        self
    }

    pub fn with_default_color(mut self, color: impl Into<String>) -> Self {
        self.default_color = color.into();
        self
    }

    fn warn_invalid_colors(&self) {
        if parse_color_string(&self.default_color).is_none() {
            tracing::warn!(
                color = %self.default_color,
                "Default color does not parse, using {FALLBACK_COLOR}"
            );
        }
        for (index, swatch) in self.swatches.iter().enumerate() {
            if parse_color_string(swatch).is_none() {
                tracing::warn!(index, color = %swatch, "Swatch color does not parse");
            }
        }
    }
}
