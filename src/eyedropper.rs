//! macOS screen color sampler.
//!
//! Uses `NSColorSampler` via Objective-C FFI. macOS shows a magnifier overlay,
//! the user clicks a pixel, and the handler receives the color converted to
//! sRGB. Cancelling (Esc) delivers nothing.

use std::cell::Cell;

use block2::RcBlock;
use objc2::rc::{Allocated, Id};
use objc2::runtime::{AnyClass, AnyObject};
use objc2::{msg_send, msg_send_id};

use crate::color::Rgba;

type PickHandler = Cell<Option<Box<dyn FnOnce(Rgba)>>>;

/// Read sRGB components out of an `NSColor`, or `None` if it cannot be
/// converted.
///
/// # Safety
/// `color` must point to a live `NSColor`.
unsafe fn srgb_components(color: *mut AnyObject) -> Option<Rgba> {
    let color_space = AnyClass::get("NSColorSpace")?;
    let (mut r, mut g, mut b, mut a) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
    unsafe {
        let srgb: *const AnyObject = msg_send![color_space, sRGBColorSpace];
        if srgb.is_null() {
            return None;
        }
        let converted: *const AnyObject = msg_send![&*color, colorUsingColorSpace: &*srgb];
        if converted.is_null() {
            return None;
        }
        let _: () = msg_send![
            &*converted,
            getRed: &mut r,
            green: &mut g,
            blue: &mut b,
            alpha: &mut a
        ];
    }
    Some(Rgba::from_unit(r, g, b, a))
}

/// Open the system sampler and call `on_pick` with the chosen color.
///
/// Must be called from the main thread (Floem event handlers satisfy this).
pub(crate) fn sample_color(on_pick: impl FnOnce(Rgba) + 'static) {
    let Some(cls) = AnyClass::get("NSColorSampler") else {
        tracing::warn!("NSColorSampler unavailable, eyedropper disabled");
        return;
    };

    let sampler: Allocated<AnyObject> = unsafe { msg_send_id![cls, alloc] };
    let sampler: Id<AnyObject> = unsafe { msg_send_id![sampler, init] };

    let handler: PickHandler = Cell::new(Some(Box::new(on_pick)));
    let block = RcBlock::new(move |color: *mut AnyObject| {
        if color.is_null() {
            tracing::debug!("Eyedropper cancelled");
            return;
        }
        // SAFETY: the sampler hands us a live NSColor for the duration of the call.
        let Some(rgba) = (unsafe { srgb_components(color) }) else {
            tracing::warn!("Sampled color could not be converted to sRGB");
            return;
        };
        if let Some(on_pick) = handler.take() {
            on_pick(rgba);
        }
    });

    unsafe {
        let _: () = msg_send![&*sampler, showSamplerWithSelectionHandler: &*block];
    }
}
