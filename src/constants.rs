//! Defaults and limits shared by the selection engine.

/// Color used when neither the supplied value nor the configured default parses.
pub const FALLBACK_COLOR: &str = "#808080";

/// Upper bound of the hue axis, in degrees.
pub const HUE_MAX: f64 = 360.0;

/// Upper bound of saturation and value, in percent.
pub const PERCENT_MAX: f64 = 100.0;

/// Upper bound of an RGB channel.
pub const CHANNEL_MAX: f64 = 255.0;

/// Decimal places kept for alpha in HSVA and in serialized output.
pub const ALPHA_DECIMALS: i32 = 2;

/// Hue, saturation, or value must move by more than this before an external
/// value overrides the internal shadow.
pub const HSV_SYNC_TOLERANCE: f64 = 1.0;

/// Alpha must move by more than this before an external value overrides the
/// internal shadow.
pub const ALPHA_SYNC_TOLERANCE: f64 = 0.01;

/// Absorbs float noise when comparing a difference against a tolerance.
pub(crate) const TOLERANCE_EPSILON: f64 = 1e-9;
