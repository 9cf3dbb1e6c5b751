//! `Rgba` and `Hsva`, the two color representations of the engine.
//!
//! Both are immutable `Copy` values whose constructors clamp into range, so an
//! instance is always valid. `Rgba` is the exchange format; `Hsva` is the
//! working representation of the selection because its axes line up with the
//! palette and sliders.

use std::fmt;

use crate::constants::{ALPHA_DECIMALS, CHANNEL_MAX, HUE_MAX, PERCENT_MAX};
use crate::math;

/// Clamp `value` into `[min, max]`, mapping NaN to `nan_to`.
fn clamp_or(value: f64, min: f64, max: f64, nan_to: f64) -> f64 {
    if value.is_nan() {
        nan_to
    } else {
        value.clamp(min, max)
    }
}

fn round_alpha(a: f64) -> f64 {
    let scale = 10f64.powi(ALPHA_DECIMALS);
    (a * scale).round() / scale
}

/// RGB channels 0–255 with alpha in 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    r: u8,
    g: u8,
    b: u8,
    a: f64,
}

impl Rgba {
    /// Create from 0–255 channels. Alpha is clamped to 0.0–1.0; NaN becomes opaque.
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self {
            r,
            g,
            b,
            a: clamp_or(a, 0.0, 1.0, 1.0),
        }
    }

    /// Create from unchecked numbers, clamping each channel to 0–255 and alpha
    /// to 0.0–1.0. NaN maps to the lower bound.
    pub fn clamped(r: f64, g: f64, b: f64, a: f64) -> Self {
        let channel = |c: f64| clamp_or(c, 0.0, CHANNEL_MAX, 0.0).round() as u8;
        Self {
            r: channel(r),
            g: channel(g),
            b: channel(b),
            a: clamp_or(a, 0.0, 1.0, 0.0),
        }
    }

    /// Create from 0.0–1.0 components.
    pub fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self::clamped(r * CHANNEL_MAX, g * CHANNEL_MAX, b * CHANNEL_MAX, a)
    }

    pub fn r(&self) -> u8 {
        self.r
    }

    pub fn g(&self) -> u8 {
        self.g
    }

    pub fn b(&self) -> u8 {
        self.b
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    /// Canonical `rgba(R, G, B, A)` string with alpha fixed to 2 decimals.
    pub fn to_css(&self) -> String {
        self.to_string()
    }

    /// Format as uppercase hex (no `#` prefix).
    ///
    /// Returns 6 chars (RRGGBB) when alpha rounds to 255, 8 chars (RRGGBBAA)
    /// otherwise.
    pub fn to_hex(&self) -> String {
        let a = (self.a * CHANNEL_MAX).round() as u8;
        if a == u8::MAX {
            format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, a)
        }
    }

    pub fn to_hsva(&self) -> Hsva {
        math::rgba_to_hsva(*self)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {:.prec$})",
            self.r,
            self.g,
            self.b,
            self.a,
            prec = ALPHA_DECIMALS as usize
        )
    }
}

/// Hue in degrees (0–360), saturation and value in percent (0–100), alpha
/// in 0.0–1.0.
///
/// Hue, saturation and value always hold whole numbers; alpha holds two
/// decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsva {
    h: f64,
    s: f64,
    v: f64,
    a: f64,
}

impl Hsva {
    /// The HSVA clamp: bounds every field, rounds hue/saturation/value to
    /// integers and alpha to two decimals.
    ///
    /// NaN maps to the lower bound, except alpha which becomes opaque.
    /// Applying it to an already clamped value is a no-op.
    pub fn new(h: f64, s: f64, v: f64, a: f64) -> Self {
        Self {
            h: clamp_or(h, 0.0, HUE_MAX, 0.0).round(),
            s: clamp_or(s, 0.0, PERCENT_MAX, 0.0).round(),
            v: clamp_or(v, 0.0, PERCENT_MAX, 0.0).round(),
            a: round_alpha(clamp_or(a, 0.0, 1.0, 1.0)),
        }
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn v(&self) -> f64 {
        self.v
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    /// True when hue carries no information (zero saturation or zero value).
    pub fn is_achromatic(&self) -> bool {
        self.s == 0.0 || self.v == 0.0
    }

    pub fn to_rgba(&self) -> Rgba {
        math::hsva_to_rgba(*self)
    }

    /// Canonical output string of this color.
    pub fn to_css(&self) -> String {
        self.to_rgba().to_css()
    }
}

impl Default for Hsva {
    fn default() -> Self {
        Self::new(0.0, 0.0, 50.0, 1.0)
    }
}
