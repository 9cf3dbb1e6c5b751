//! Interactive color selection.
//!
//! [`ColorSelection`] owns the current color as HSVA and mutates it from three
//! drag regions (palette, hue, alpha), slider change events, numeric RGBA
//! field edits and swatches. Every update goes through the same clamp-and-apply
//! path, and a change callback fires only when the serialized output differs
//! from the last known value.
//!
//! In controlled mode an external value is authoritative: it is watched through
//! [`ColorSelection::set_external_value`] and overrides the internal shadow when
//! it moves beyond the configured tolerance.

use std::fmt;

use tracing::{debug, trace};

use crate::color::{Hsva, Rgba};
use crate::config::PickerConfig;
use crate::constants::{FALLBACK_COLOR, HUE_MAX, TOLERANCE_EPSILON};
use crate::drag::{Bounds, DragRegion, DragSession, Point, PointerButton};
use crate::parse::{canonicalize, parse_color_string};

/// Partial HSVA update; `None` fields keep the current value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HsvaPatch {
    pub h: Option<f64>,
    pub s: Option<f64>,
    pub v: Option<f64>,
    pub a: Option<f64>,
}

impl HsvaPatch {
    pub fn hue(h: f64) -> Self {
        Self {
            h: Some(h),
            ..Self::default()
        }
    }

    pub fn alpha(a: f64) -> Self {
        Self {
            a: Some(a),
            ..Self::default()
        }
    }

    pub fn saturation_value(s: f64, v: f64) -> Self {
        Self {
            s: Some(s),
            v: Some(v),
            ..Self::default()
        }
    }

    /// Overlay this patch on `base` and clamp the result.
    pub fn merge_into(self, base: Hsva) -> Hsva {
        Hsva::new(
            self.h.unwrap_or(base.h()),
            self.s.unwrap_or(base.s()),
            self.v.unwrap_or(base.v()),
            self.a.unwrap_or(base.a()),
        )
    }
}

/// Numeric RGBA input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

/// Who owns the color value.
///
/// Fixed at construction: a controlled selection never becomes uncontrolled.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Owned by the caller. `value` is the last external string seen.
    External { value: String },
    /// Owned by the selection. `shadow` is the last emitted output.
    Internal { shadow: String },
}

impl Source {
    pub fn is_controlled(&self) -> bool {
        matches!(self, Source::External { .. })
    }

    /// The string a new output is compared against before notifying.
    fn reference(&self) -> String {
        match self {
            Source::External { value } => canonicalize(value),
            Source::Internal { shadow } => shadow.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ActiveDrag {
    region: DragRegion,
    bounds: Bounds,
}

type ChangeCallback = Box<dyn FnMut(&str)>;

pub struct ColorSelection {
    current: Hsva,
    source: Source,
    drag: Option<ActiveDrag>,
    popover_open: bool,
    config: PickerConfig,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for ColorSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorSelection")
            .field("current", &self.current)
            .field("source", &self.source)
            .field("drag", &self.drag)
            .field("popover_open", &self.popover_open)
            .finish_non_exhaustive()
    }
}

/// First parseable of `value`, the configured default and the crate fallback.
fn initial_color(value: Option<&str>, config: &PickerConfig) -> Hsva {
    value
        .and_then(parse_color_string)
        .or_else(|| parse_color_string(&config.default_color))
        .or_else(|| parse_color_string(FALLBACK_COLOR))
        .map(|rgba| rgba.to_hsva())
        .unwrap_or_default()
}

impl ColorSelection {
    /// A selection that owns its value, starting from `config.default_color`.
    pub fn uncontrolled(config: PickerConfig) -> Self {
        let current = initial_color(None, &config);
        let shadow = current.to_css();
        Self::with_source(current, Source::Internal { shadow }, config)
    }

    /// A selection driven by an external value.
    ///
    /// An unparseable `value` falls back to the configured default color.
    pub fn controlled(value: impl Into<String>, config: PickerConfig) -> Self {
        let value = value.into();
        let current = initial_color(Some(&value), &config);
        Self::with_source(current, Source::External { value }, config)
    }

    fn with_source(current: Hsva, source: Source, config: PickerConfig) -> Self {
        debug!(
            controlled = source.is_controlled(),
            color = %current.to_css(),
            "Color selection created"
        );
        Self {
            current,
            source,
            drag: None,
            popover_open: false,
            config,
            on_change: None,
        }
    }

    /// Register the change callback, replacing any previous one.
    pub fn set_on_change(&mut self, on_change: impl FnMut(&str) + 'static) {
        self.on_change = Some(Box::new(on_change));
    }

    pub fn with_on_change(mut self, on_change: impl FnMut(&str) + 'static) -> Self {
        self.set_on_change(on_change);
        self
    }

    pub fn hsva(&self) -> Hsva {
        self.current
    }

    pub fn rgba(&self) -> Rgba {
        self.current.to_rgba()
    }

    /// Canonical `rgba(R, G, B, A)` output of the current color.
    pub fn output(&self) -> String {
        self.current.to_css()
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn is_controlled(&self) -> bool {
        self.source.is_controlled()
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn swatches(&self) -> &[String] {
        &self.config.swatches
    }

    pub fn drag_target(&self) -> Option<DragRegion> {
        self.drag.map(|drag| drag.region)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // ── Update path ────────────────────────────────────────────────────

    /// Make `next` current and notify if its output differs from the reference.
    ///
    /// Returns true when the change callback was invoked.
    fn commit(&mut self, next: Hsva) -> bool {
        self.current = next;
        let output = next.to_css();
        if output == self.source.reference() {
            trace!(%output, "Output unchanged, not notifying");
            return false;
        }
        if let Source::Internal { shadow } = &mut self.source {
            shadow.clone_from(&output);
        }
        trace!(%output, "Color changed");
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&output);
        }
        true
    }

    /// Merge a partial update into the current color.
    pub fn apply_patch(&mut self, patch: HsvaPatch) -> bool {
        let next = patch.merge_into(self.current);
        self.commit(next)
    }

    /// Achromatic colors carry no hue; keep the current one instead of 0.
    fn hold_hue(&self, hsva: Hsva) -> Hsva {
        if hsva.is_achromatic() {
            Hsva::new(self.current.h(), hsva.s(), hsva.v(), hsva.a())
        } else {
            hsva
        }
    }

    fn absorb_rgba(&mut self, rgba: Rgba) -> bool {
        let next = self.hold_hue(rgba.to_hsva());
        self.commit(next)
    }

    /// Replace the color with `rgba`.
    pub fn set_rgba(&mut self, rgba: Rgba) -> bool {
        self.absorb_rgba(rgba)
    }

    // ── Direct inputs ──────────────────────────────────────────────────

    /// Numeric field edit. The value is clamped to the channel's range.
    ///
    /// RGB edits go through RGBA and back to HSVA. Alpha edits are ignored when
    /// alpha is hidden.
    pub fn set_channel(&mut self, channel: Channel, value: f64) -> bool {
        let rgba = self.current.to_rgba();
        let (r, g, b) = (
            f64::from(rgba.r()),
            f64::from(rgba.g()),
            f64::from(rgba.b()),
        );
        let edited = match channel {
            Channel::Red => Rgba::clamped(value, g, b, rgba.a()),
            Channel::Green => Rgba::clamped(r, value, b, rgba.a()),
            Channel::Blue => Rgba::clamped(r, g, value, rgba.a()),
            Channel::Alpha => {
                if !self.config.show_alpha {
                    debug!("Alpha field edit ignored, alpha is hidden");
                    return false;
                }
                // Only alpha moves, so skip the lossy RGB round trip.
                let a = Rgba::clamped(r, g, b, value).a();
                return self.apply_patch(HsvaPatch::alpha(a));
            }
        };
        if edited == rgba {
            return false;
        }
        self.absorb_rgba(edited)
    }

    /// Hue slider change event.
    pub fn set_hue(&mut self, hue: f64) -> bool {
        self.apply_patch(HsvaPatch::hue(hue))
    }

    /// Alpha slider change event. Ignored when alpha is hidden.
    pub fn set_alpha(&mut self, alpha: f64) -> bool {
        if !self.config.show_alpha {
            debug!("Alpha slider change ignored, alpha is hidden");
            return false;
        }
        self.apply_patch(HsvaPatch::alpha(alpha))
    }

    pub fn set_saturation_value(&mut self, saturation: f64, value: f64) -> bool {
        self.apply_patch(HsvaPatch::saturation_value(saturation, value))
    }

    /// Apply a color string. Unparseable text changes nothing.
    pub fn select_color_str(&mut self, text: &str) -> bool {
        match parse_color_string(text) {
            Some(rgba) => self.absorb_rgba(rgba),
            None => {
                debug!(color = text, "Ignoring unparseable color");
                false
            }
        }
    }

    /// Apply the swatch at `index`.
    pub fn select_swatch(&mut self, index: usize) -> bool {
        let Some(swatch) = self.config.swatches.get(index).cloned() else {
            debug!(index, "No swatch at index");
            return false;
        };
        self.select_color_str(&swatch)
    }

    // ── Pointer drags ──────────────────────────────────────────────────

    /// Pointer pressed over `region`. Starts a drag and applies the position
    /// under the pointer so a tap selects a value.
    ///
    /// Returns true if a drag started. Only the primary button drags, and the
    /// alpha region refuses drags while alpha is hidden.
    pub fn pointer_down(
        &mut self,
        region: DragRegion,
        bounds: Bounds,
        point: Point,
        button: PointerButton,
    ) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        if region == DragRegion::Alpha && !self.config.show_alpha {
            debug!("Alpha drag refused, alpha is hidden");
            return false;
        }
        if let Some(previous) = self.drag.replace(ActiveDrag { region, bounds }) {
            debug!(from = ?previous.region, to = ?region, "Drag target replaced");
        } else {
            debug!(?region, "Drag started");
        }
        self.update_from_pointer(point);
        true
    }

    /// Pointer moved anywhere. Returns true if a change notification fired.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.update_from_pointer(point)
    }

    /// Pointer released anywhere. Ends the drag; returns false if no drag was
    /// active, so repeated releases are harmless.
    pub fn pointer_up(&mut self) -> bool {
        match self.drag.take() {
            Some(drag) => {
                debug!(region = ?drag.region, "Drag ended");
                true
            }
            None => false,
        }
    }

    /// Start a scoped drag. The returned session ends the drag when dropped.
    pub fn begin_drag(
        &mut self,
        region: DragRegion,
        bounds: Bounds,
        point: Point,
    ) -> Option<DragSession<'_>> {
        if self.pointer_down(region, bounds, point, PointerButton::Primary) {
            Some(DragSession::new(self))
        } else {
            None
        }
    }

    /// The dragged region was laid out again mid-drag.
    pub fn set_drag_bounds(&mut self, bounds: Bounds) {
        if let Some(drag) = self.drag.as_mut() {
            drag.bounds = bounds;
        }
    }

    fn update_from_pointer(&mut self, point: Point) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        match drag.region.patch_at(&drag.bounds, point) {
            Some(patch) => self.apply_patch(patch),
            None => false,
        }
    }

    // ── Popover ────────────────────────────────────────────────────────

    pub fn is_popover_open(&self) -> bool {
        self.popover_open
    }

    pub fn open_popover(&mut self) {
        self.popover_open = true;
    }

    /// Hide the interactive surface. An active drag ends; the color is kept.
    pub fn close_popover(&mut self) {
        self.popover_open = false;
        self.pointer_up();
    }

    /// Returns the new open state.
    pub fn toggle_popover(&mut self) -> bool {
        if self.popover_open {
            self.close_popover();
        } else {
            self.open_popover();
        }
        self.popover_open
    }

    // ── Controlled reconciliation ──────────────────────────────────────

    /// Observe a new external value.
    ///
    /// Overrides the current color when the parsed value differs by more than
    /// the configured tolerance. Unparseable values keep the current color.
    /// Never notifies. Returns true if the current color was overridden.
    pub fn set_external_value(&mut self, value: &str) -> bool {
        let Source::External { value: known } = &mut self.source else {
            debug!("External value ignored by uncontrolled selection");
            return false;
        };
        if known.as_str() == value {
            return false;
        }
        *known = value.to_string();

        let Some(rgba) = parse_color_string(value) else {
            debug!(value, "External value does not parse, keeping current color");
            return false;
        };
        let incoming = self.hold_hue(rgba.to_hsva());
        if !self.differs_beyond_tolerance(&incoming) {
            trace!(value, "External value within tolerance of current color");
            return false;
        }
        debug!(value, "External value overrides current color");
        self.current = incoming;
        true
    }

    fn differs_beyond_tolerance(&self, other: &Hsva) -> bool {
        let tolerance = self.config.tolerance;
        let beyond = |delta: f64, limit: f64| delta - limit > TOLERANCE_EPSILON;
        let linear = |a: f64, b: f64| (a - b).abs();
        // Hue is circular: 0 and 360 name the same color.
        let circular = |a: f64, b: f64| {
            let delta = (a - b).abs() % HUE_MAX;
            delta.min(HUE_MAX - delta)
        };
        let current = &self.current;
        beyond(circular(current.h(), other.h()), tolerance.hsv)
            || beyond(linear(current.s(), other.s()), tolerance.hsv)
            || beyond(linear(current.v(), other.v()), tolerance.hsv)
            || beyond(linear(current.a(), other.a()), tolerance.alpha)
    }
}

impl Drop for ColorSelection {
    fn drop(&mut self) {
        if let Some(drag) = self.drag.take() {
            debug!(region = ?drag.region, "Selection dropped mid-drag, drag released");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recorder() -> (Rc<RefCell<Vec<String>>>, impl FnMut(&str) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        (log, move |s: &str| sink.borrow_mut().push(s.to_string()))
    }

    fn palette() -> Bounds {
        Bounds::sized(200.0, 100.0)
    }

    #[test]
    fn uncontrolled_starts_from_default_color() {
        let sel = ColorSelection::uncontrolled(PickerConfig::default().with_default_color("#f00"));
        assert!(!sel.is_controlled());
        assert_eq!(sel.output(), "rgba(255, 0, 0, 1.00)");
    }

    #[test]
    fn unparseable_defaults_fall_back_to_gray() {
        let sel = ColorSelection::controlled(
            "garbage",
            PickerConfig::default().with_default_color("also garbage"),
        );
        assert!(sel.is_controlled());
        assert_eq!(sel.rgba(), Rgba::new(128, 128, 128, 1.0));
    }

    #[test]
    fn tap_on_palette_center_selects_half_saturation_and_value() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default());
        assert!(sel.pointer_down(
            DragRegion::Palette,
            palette(),
            Point::new(100.0, 50.0),
            PointerButton::Primary,
        ));
        assert_eq!(sel.hsva().s(), 50.0);
        assert_eq!(sel.hsva().v(), 50.0);
        assert_eq!(sel.drag_target(), Some(DragRegion::Palette));
    }

    #[test]
    fn identical_outputs_notify_once() {
        let (log, on_change) = recorder();
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default()).with_on_change(on_change);
        sel.pointer_down(
            DragRegion::Palette,
            palette(),
            Point::new(100.0, 50.0),
            PointerButton::Primary,
        );
        assert!(!sel.pointer_move(Point::new(100.4, 50.2)));
        assert_eq!(*log.borrow(), vec!["rgba(128, 64, 64, 1.00)".to_string()]);
    }

    #[test]
    fn update_matching_initial_color_does_not_notify() {
        let (log, on_change) = recorder();
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default()).with_on_change(on_change);
        assert!(!sel.select_color_str("rgb(128,128,128)"));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn drag_tracks_outside_bounds_until_release() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default().with_default_color("#f00"));
        let bounds = Bounds::new(50.0, 0.0, 360.0, 16.0);
        sel.pointer_down(DragRegion::Hue, bounds, Point::new(170.0, 8.0), PointerButton::Primary);
        assert_eq!(sel.hsva().h(), 120.0);
        sel.pointer_move(Point::new(2000.0, 300.0));
        assert_eq!(sel.hsva().h(), 360.0);
        assert_eq!(sel.rgba(), Rgba::new(255, 0, 0, 1.0));

        assert!(sel.pointer_up());
        assert!(!sel.pointer_up());
        assert!(!sel.pointer_move(Point::new(50.0, 8.0)));
        assert_eq!(sel.hsva().h(), 360.0);
    }

    #[test]
    fn only_primary_button_starts_a_drag() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default());
        assert!(!sel.pointer_down(
            DragRegion::Palette,
            palette(),
            Point::new(0.0, 0.0),
            PointerButton::Secondary,
        ));
        assert_eq!(sel.drag_target(), None);
        assert_eq!(sel.rgba(), Rgba::new(128, 128, 128, 1.0));
    }

    #[test]
    fn new_press_replaces_drag_target() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default().with_alpha(true));
        sel.pointer_down(DragRegion::Palette, palette(), Point::new(0.0, 0.0), PointerButton::Primary);
        sel.pointer_down(
            DragRegion::Alpha,
            Bounds::sized(100.0, 16.0),
            Point::new(25.0, 0.0),
            PointerButton::Primary,
        );
        assert_eq!(sel.drag_target(), Some(DragRegion::Alpha));
        assert_eq!(sel.hsva().a(), 0.25);
    }

    #[test]
    fn drag_session_ends_on_drop() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default().with_default_color("#f00"));
        {
            let mut session = sel
                .begin_drag(DragRegion::Hue, Bounds::sized(360.0, 16.0), Point::new(120.0, 0.0))
                .unwrap();
            assert_eq!(session.region(), Some(DragRegion::Hue));
            session.move_to(Point::new(240.0, 0.0));
            assert_eq!(session.selection().hsva().h(), 240.0);
        }
        assert!(!sel.is_dragging());
        assert_eq!(sel.rgba(), Rgba::new(0, 0, 255, 1.0));
    }

    #[test]
    fn drag_session_end_releases_once() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default());
        let session = sel
            .begin_drag(DragRegion::Palette, palette(), Point::new(10.0, 10.0))
            .unwrap();
        session.end();
        assert!(!sel.is_dragging());
        assert!(!sel.pointer_up());
    }

    #[test]
    fn numeric_rgb_edits_clamp_and_convert() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default().with_default_color("#f00"));
        assert!(sel.set_channel(Channel::Green, 300.0));
        assert_eq!(sel.rgba(), Rgba::new(255, 255, 0, 1.0));
        assert_eq!(sel.hsva(), Hsva::new(60.0, 100.0, 100.0, 1.0));

        sel.set_channel(Channel::Red, -5.0);
        assert_eq!(sel.rgba(), Rgba::new(0, 255, 0, 1.0));
        assert!(!sel.set_channel(Channel::Red, 0.0));
    }

    #[test]
    fn numeric_alpha_edits_clamp() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default().with_alpha(true));
        sel.set_channel(Channel::Alpha, 1.5);
        assert_eq!(sel.hsva().a(), 1.0);
        sel.set_channel(Channel::Alpha, -0.5);
        assert_eq!(sel.hsva().a(), 0.0);
        sel.set_channel(Channel::Alpha, 0.456);
        assert_eq!(sel.output(), "rgba(128, 128, 128, 0.46)");
    }

    #[test]
    fn slider_changes_clamp() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default().with_alpha(true));
        sel.set_hue(361.0);
        assert_eq!(sel.hsva().h(), 360.0);
        sel.set_hue(-10.0);
        assert_eq!(sel.hsva().h(), 0.0);
        sel.set_saturation_value(150.0, -1.0);
        assert_eq!((sel.hsva().s(), sel.hsva().v()), (100.0, 0.0));
        sel.set_alpha(2.0);
        assert_eq!(sel.hsva().a(), 1.0);
    }

    #[test]
    fn hidden_alpha_is_pinned_for_pointer_and_fields() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default().with_alpha(false));
        assert!(!sel.pointer_down(
            DragRegion::Alpha,
            Bounds::sized(100.0, 16.0),
            Point::new(0.0, 0.0),
            PointerButton::Primary,
        ));
        assert!(!sel.set_alpha(0.2));
        assert!(!sel.set_channel(Channel::Alpha, 0.2));
        assert_eq!(sel.hsva().a(), 1.0);

        // Swatches still carry their own alpha.
        assert!(sel.select_color_str("#f008"));
        assert_eq!(sel.output(), "rgba(255, 0, 0, 0.53)");
    }

    #[test]
    fn achromatic_colors_keep_the_current_hue() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default());
        sel.select_color_str("rgb(74, 144, 226)");
        assert_eq!(sel.hsva().h(), 212.0);

        sel.select_color_str("#808080");
        assert_eq!(sel.hsva(), Hsva::new(212.0, 0.0, 50.0, 1.0));

        sel.set_saturation_value(100.0, 50.0);
        assert_eq!(sel.rgba(), Rgba::new(0, 60, 128, 1.0));
    }

    #[test]
    fn swatches_apply_by_index() {
        let config = PickerConfig::default().with_swatches(["#00f", "nope"]);
        let (log, on_change) = recorder();
        let mut sel = ColorSelection::uncontrolled(config).with_on_change(on_change);
        assert_eq!(sel.swatches().len(), 2);
        assert!(sel.select_swatch(0));
        assert_eq!(sel.rgba(), Rgba::new(0, 0, 255, 1.0));
        assert!(!sel.select_swatch(1));
        assert!(!sel.select_swatch(7));
        assert_eq!(sel.rgba(), Rgba::new(0, 0, 255, 1.0));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn closing_popover_ends_drag_but_keeps_color() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default());
        assert!(sel.toggle_popover());
        sel.pointer_down(DragRegion::Palette, palette(), Point::new(100.0, 50.0), PointerButton::Primary);
        let color = sel.hsva();
        assert!(!sel.toggle_popover());
        assert!(!sel.is_popover_open());
        assert!(!sel.is_dragging());
        assert_eq!(sel.hsva(), color);
    }

    #[test]
    fn external_value_overrides_drag_shadow() {
        let mut sel = ColorSelection::controlled("rgba(0,0,0,1)", PickerConfig::default());
        sel.pointer_down(DragRegion::Palette, palette(), Point::new(100.0, 50.0), PointerButton::Primary);
        sel.pointer_up();
        assert_eq!(sel.rgba(), Rgba::new(128, 64, 64, 1.0));

        assert!(sel.set_external_value("rgba(255,255,255,1)"));
        assert_eq!(sel.rgba(), Rgba::new(255, 255, 255, 1.0));
    }

    #[test]
    fn controlled_notifications_compare_against_external_value() {
        let (log, on_change) = recorder();
        let mut sel =
            ColorSelection::controlled("rgba(0,0,0,1)", PickerConfig::default()).with_on_change(on_change);
        let center = Point::new(100.0, 50.0);

        assert!(sel.pointer_down(DragRegion::Palette, palette(), center, PointerButton::Primary));
        // The caller has not adopted the new value yet, so it is reported again.
        assert!(sel.pointer_move(center));
        assert_eq!(log.borrow().len(), 2);

        assert!(!sel.set_external_value("rgba(128, 64, 64, 1)"));
        assert!(!sel.pointer_move(center));
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn external_changes_within_tolerance_are_ignored() {
        let mut sel = ColorSelection::controlled("rgb(128,64,64)", PickerConfig::default());
        assert_eq!(sel.hsva(), Hsva::new(0.0, 50.0, 50.0, 1.0));

        assert!(!sel.set_external_value("rgb(130,64,64)"));
        assert_eq!(sel.hsva(), Hsva::new(0.0, 50.0, 50.0, 1.0));
        assert!(!sel.set_external_value("rgba(128,64,64,0.99)"));
        assert_eq!(sel.hsva().a(), 1.0);

        assert!(sel.set_external_value("rgb(133,64,64)"));
        assert_eq!(sel.hsva(), Hsva::new(0.0, 52.0, 52.0, 1.0));
        assert!(sel.set_external_value("rgba(133,64,64,0.98)"));
        assert_eq!(sel.hsva().a(), 0.98);
    }

    #[test]
    fn echoed_hue_at_right_edge_keeps_thumb_in_place() {
        let (log, on_change) = recorder();
        let mut sel =
            ColorSelection::controlled("#f00", PickerConfig::default()).with_on_change(on_change);
        let hue = Bounds::sized(360.0, 16.0);
        sel.pointer_down(DragRegion::Hue, hue, Point::new(400.0, 8.0), PointerButton::Primary);
        assert_eq!(sel.hsva().h(), 360.0);

        let echo = sel.output();
        assert_eq!(echo, "rgba(255, 0, 0, 1.00)");
        assert!(!sel.set_external_value(&echo));
        assert_eq!(sel.hsva(), Hsva::new(360.0, 100.0, 100.0, 1.0));
        assert!(!sel.pointer_move(Point::new(400.0, 8.0)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn hue_tolerance_wraps_around() {
        let mut sel = ColorSelection::controlled("#f00", PickerConfig::default());
        sel.set_hue(359.0);
        // 1 degree away across the wrap point.
        assert!(!sel.set_external_value("rgb(255,0,0)"));
        assert_eq!(sel.hsva().h(), 359.0);
        // hsv(3, 100, 100)
        assert!(sel.set_external_value("rgb(255,13,0)"));
        assert_eq!(sel.hsva().h(), 3.0);
    }

    #[test]
    fn malformed_external_value_keeps_last_good_color() {
        let (log, on_change) = recorder();
        let mut sel =
            ColorSelection::controlled("#00f", PickerConfig::default()).with_on_change(on_change);
        assert!(!sel.set_external_value("definitely not a color"));
        assert_eq!(sel.rgba(), Rgba::new(0, 0, 255, 1.0));
        assert!(log.borrow().is_empty());
        assert_eq!(
            sel.source(),
            &Source::External {
                value: "definitely not a color".to_string()
            }
        );
    }

    #[test]
    fn uncontrolled_ignores_external_values() {
        let mut sel = ColorSelection::uncontrolled(PickerConfig::default());
        assert!(!sel.set_external_value("#fff"));
        assert_eq!(sel.rgba(), Rgba::new(128, 128, 128, 1.0));
    }
}
