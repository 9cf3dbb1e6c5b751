//! Color string parsing.
//!
//! Three grammars are tried in order: functional `rgb()`/`rgba()`, long hex
//! (6 or 8 digits) and short hex (3 or 4 digits). The first grammar whose
//! shape matches decides the outcome; a matched but invalid value is rejected,
//! never clamped.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::color::Rgba;
use crate::error::ColorParseError;

static FUNCTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(-?(?:\d+(?:\.\d*)?|\.\d+))\s*)?\)$",
    )
    .expect("Failed to compile functional color regex")
});

static LONG_HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#?([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})([0-9a-f]{2})?$")
        .expect("Failed to compile long hex regex")
});

static SHORT_HEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^#?([0-9a-f])([0-9a-f])([0-9a-f])([0-9a-f])?$")
        .expect("Failed to compile short hex regex")
});

type Grammar = fn(&str) -> Option<Result<Rgba, ColorParseError>>;

const GRAMMARS: [Grammar; 3] = [parse_functional, parse_long_hex, parse_short_hex];

/// Parse `rgb(R, G, B)` / `rgba(R, G, B, A)`.
///
/// Returns `None` when the text is not functional notation at all.
pub fn parse_functional(text: &str) -> Option<Result<Rgba, ColorParseError>> {
    let caps = FUNCTIONAL.captures(text)?;
    Some(functional_from_captures(&caps))
}

fn functional_from_captures(caps: &Captures<'_>) -> Result<Rgba, ColorParseError> {
    let channel = |i: usize| -> Result<u8, ColorParseError> {
        let raw = &caps[i];
        let value: u32 = raw
            .parse()
            .map_err(|_| ColorParseError::InvalidNumber(raw.to_string()))?;
        u8::try_from(value).map_err(|_| ColorParseError::ChannelOutOfRange(value))
    };

    let r = channel(1)?;
    let g = channel(2)?;
    let b = channel(3)?;

    let a = match caps.get(4) {
        Some(m) => {
            let raw = m.as_str();
            let a: f64 = raw
                .parse()
                .map_err(|_| ColorParseError::InvalidNumber(raw.to_string()))?;
            if !(0.0..=1.0).contains(&a) {
                return Err(ColorParseError::AlphaOutOfRange(raw.to_string()));
            }
            a
        }
        None => 1.0,
    };

    Ok(Rgba::new(r, g, b, a))
}

fn hex_byte(digits: &str) -> Result<u8, ColorParseError> {
    u8::from_str_radix(digits, 16).map_err(|_| ColorParseError::InvalidHex)
}

fn hex_from_bytes(
    r: &str,
    g: &str,
    b: &str,
    a: Option<&str>,
) -> Result<Rgba, ColorParseError> {
    let alpha = match a {
        Some(a) => f64::from(hex_byte(a)?) / 255.0,
        None => 1.0,
    };
    Ok(Rgba::new(hex_byte(r)?, hex_byte(g)?, hex_byte(b)?, alpha))
}

/// Parse `#RRGGBB` / `#RRGGBBAA` (the `#` is optional).
pub fn parse_long_hex(text: &str) -> Option<Result<Rgba, ColorParseError>> {
    let caps = LONG_HEX.captures(text)?;
    Some(hex_from_bytes(
        &caps[1],
        &caps[2],
        &caps[3],
        caps.get(4).map(|m| m.as_str()),
    ))
}

/// Parse `#RGB` / `#RGBA` (the `#` is optional). Each digit is doubled.
pub fn parse_short_hex(text: &str) -> Option<Result<Rgba, ColorParseError>> {
    let caps = SHORT_HEX.captures(text)?;
    let double = |i: usize| caps.get(i).map(|m| m.as_str().repeat(2));
    let r = double(1)?;
    let g = double(2)?;
    let b = double(3)?;
    let a = double(4);
    Some(hex_from_bytes(&r, &g, &b, a.as_deref()))
}

/// Parse a color string, reporting why it failed.
pub fn parse_color(text: &str) -> Result<Rgba, ColorParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ColorParseError::Empty);
    }
    GRAMMARS
        .iter()
        .find_map(|grammar| grammar(text))
        .unwrap_or(Err(ColorParseError::NoMatch))
}

/// Parse a color string, or `None` when it is not a supported color.
///
/// Callers treat `None` as "no change".
pub fn parse_color_string(text: &str) -> Option<Rgba> {
    match parse_color(text) {
        Ok(rgba) => Some(rgba),
        Err(err) => {
            tracing::trace!(input = text, %err, "Rejected color string");
            None
        }
    }
}

/// Canonical form of `text`: the `rgba(...)` serialization when it parses,
/// otherwise the text itself.
pub fn canonicalize(text: &str) -> String {
    parse_color_string(text)
        .map(|rgba| rgba.to_css())
        .unwrap_or_else(|| text.to_string())
}
