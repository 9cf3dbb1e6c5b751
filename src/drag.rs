//! Pointer-drag regions and the scoped drag guard.
//!
//! A drag maps a pointer position inside a region's bounding box to a partial
//! HSVA update. Positions outside the box are clamped to its edges so drags that
//! leave the element keep tracking.

use crate::constants::{ALPHA_DECIMALS, HUE_MAX, PERCENT_MAX};
use crate::selection::{ColorSelection, HsvaPatch};

/// Pointer position in the host's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Bounding box of a drag region, in the same space as [`Point`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds anchored at the origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Fractions (0.0–1.0) of `point` along each axis, clamped to the box.
    ///
    /// A degenerate axis yields `None` for that axis.
    fn fractions(&self, point: Point) -> (Option<f64>, Option<f64>) {
        let axis = |pos: f64, origin: f64, len: f64| {
            (len > 0.0 && pos.is_finite()).then(|| (pos - origin).clamp(0.0, len) / len)
        };
        (
            axis(point.x, self.x, self.width),
            axis(point.y, self.y, self.height),
        )
    }
}

/// Interactive regions that can capture a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragRegion {
    /// 2D saturation (x) by value (y) at the current hue.
    Palette,
    Hue,
    Alpha,
}

impl DragRegion {
    /// Partial HSVA for a pointer at `point` within `bounds`.
    ///
    /// `None` when the region has no usable extent or the pointer is not finite.
    pub fn patch_at(self, bounds: &Bounds, point: Point) -> Option<HsvaPatch> {
        let (fx, fy) = bounds.fractions(point);
        let fx = fx?;
        match self {
            DragRegion::Palette => {
                let fy = fy?;
                Some(HsvaPatch::saturation_value(
                    (fx * PERCENT_MAX).round(),
                    (PERCENT_MAX - fy * PERCENT_MAX).round(),
                ))
            }
            DragRegion::Hue => Some(HsvaPatch::hue((fx * HUE_MAX).round())),
            DragRegion::Alpha => {
                let scale = 10f64.powi(ALPHA_DECIMALS);
                Some(HsvaPatch::alpha((fx * scale).round() / scale))
            }
        }
    }
}

/// Pointer button of a press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Auxiliary,
}

/// Scoped drag returned by [`ColorSelection::begin_drag`].
///
/// The drag ends exactly once: on [`end`](Self::end) or when the session is
/// dropped, whichever comes first.
pub struct DragSession<'a> {
    selection: &'a mut ColorSelection,
}

impl<'a> DragSession<'a> {
    pub(crate) fn new(selection: &'a mut ColorSelection) -> Self {
        Self { selection }
    }

    /// Track a pointer move. Returns true if a change notification was emitted.
    pub fn move_to(&mut self, point: Point) -> bool {
        self.selection.pointer_move(point)
    }

    pub fn region(&self) -> Option<DragRegion> {
        self.selection.drag_target()
    }

    pub fn selection(&self) -> &ColorSelection {
        &*self.selection
    }

    /// Release the pointer.
    pub fn end(self) {
        drop(self);
    }
}

impl Drop for DragSession<'_> {
    fn drop(&mut self) {
        self.selection.pointer_up();
    }
}
