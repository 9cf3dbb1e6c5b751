//! # floem-chroma
//!
//! The color selection engine behind an HSVA color picker for
//! [Floem](https://github.com/lapce/floem).
//!
//! - [`Rgba`] / [`Hsva`] with clamping constructors and converters
//!   ([`hsva_to_rgba`], [`rgba_to_hsva`]).
//! - [`parse_color_string`] for `rgb()`/`rgba()`, long hex and short hex.
//! - [`ColorSelection`], the interactive state: palette, hue and alpha drags,
//!   numeric fields, swatches, and controlled/uncontrolled reconciliation.
//! - [`SignalBinding`] to drive a controlled selection from an `RwSignal<String>`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem_chroma::{Bounds, ColorSelection, DragRegion, PickerConfig, Point};
//!
//! let mut selection = ColorSelection::uncontrolled(PickerConfig::default())
//!     .with_on_change(|rgba| println!("{rgba}"));
//! let mut drag = selection
//!     .begin_drag(DragRegion::Palette, Bounds::sized(200.0, 100.0), Point::new(100.0, 50.0))
//!     .unwrap();
//! drag.move_to(Point::new(150.0, 20.0));
//! drag.end();
//! ```

mod binding;
mod clipboard;
mod color;
mod config;
mod constants;
mod drag;
mod error;
#[cfg(all(feature = "eyedropper", target_os = "macos"))]
mod eyedropper;
mod math;
mod parse;
mod selection;

pub use binding::SignalBinding;
pub use clipboard::copy_text;
pub use color::{Hsva, Rgba};
pub use config::{PickerConfig, SyncTolerance};
pub use constants::{ALPHA_SYNC_TOLERANCE, FALLBACK_COLOR, HSV_SYNC_TOLERANCE};
pub use drag::{Bounds, DragRegion, DragSession, Point, PointerButton};
pub use error::{ColorParseError, Error, Result};
pub use math::{hsva_to_rgba, rgba_to_hsva};
pub use parse::{
    canonicalize, parse_color, parse_color_string, parse_functional, parse_long_hex,
    parse_short_hex,
};
pub use selection::{Channel, ColorSelection, HsvaPatch, Source};
