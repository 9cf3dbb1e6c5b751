//! Color math: HSV sector decomposition and its inverse.
//!
//! The tuple helpers work on unrounded floats; the typed wrappers apply the
//! integer rounding of [`Rgba`] and [`Hsva`].

use crate::color::{Hsva, Rgba};
use crate::constants::{CHANNEL_MAX, HUE_MAX, PERCENT_MAX};

/// HSV → RGB. Hue in degrees, saturation, value and the result in 0.0–1.0.
pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let h6 = h / 60.0;
    let i = h6.floor();
    let f = h6 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (i as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// RGB → HSV. Inputs 0.0–1.0. Returns hue in unrounded degrees, saturation
/// and value in 0.0–1.0. Achromatic input yields hue 0.
pub(crate) fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return (0.0, 0.0, max);
    }

    let s = delta / max;
    let sector = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (sector * 60.0, s, max)
}

fn to_channel(unit: f64) -> u8 {
    (unit * CHANNEL_MAX).round().clamp(0.0, CHANNEL_MAX) as u8
}

/// Converts HSVA to RGBA, rounding each channel to the nearest integer.
///
/// Alpha passes through unchanged. Hue 360 lands in the same sector as hue 0.
pub fn hsva_to_rgba(hsva: Hsva) -> Rgba {
    let (r, g, b) = hsv_to_rgb(
        hsva.h(),
        hsva.s() / PERCENT_MAX,
        hsva.v() / PERCENT_MAX,
    );
    Rgba::new(to_channel(r), to_channel(g), to_channel(b), hsva.a())
}

/// Converts RGBA to HSVA with integer hue, saturation and value.
///
/// A hue that rounds up to 360 is folded back to 0.
pub fn rgba_to_hsva(rgba: Rgba) -> Hsva {
    let (h, s, v) = rgb_to_hsv(
        f64::from(rgba.r()) / CHANNEL_MAX,
        f64::from(rgba.g()) / CHANNEL_MAX,
        f64::from(rgba.b()) / CHANNEL_MAX,
    );
    let mut hue = h.round();
    if hue < 0.0 {
        hue += HUE_MAX;
    }
    Hsva::new(
        hue % HUE_MAX,
        (s * PERCENT_MAX).round(),
        (v * PERCENT_MAX).round(),
        rgba.a(),
    )
}
