//! Controlled binding between a Floem `RwSignal<String>` and a
//! [`ColorSelection`].
//!
//! The signal is the external value: an effect forwards every signal change to
//! [`ColorSelection::set_external_value`], and outputs emitted by the selection
//! are written back into the signal once the selection is no longer borrowed.

use std::cell::RefCell;
use std::rc::Rc;

use floem_reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};

use crate::color::{Hsva, Rgba};
use crate::config::PickerConfig;
use crate::selection::ColorSelection;

/// Shared handle to a signal-bound selection. Cheap to clone into event
/// handlers.
#[derive(Clone)]
pub struct SignalBinding {
    selection: Rc<RefCell<ColorSelection>>,
    value: RwSignal<String>,
    outbox: Rc<RefCell<Option<String>>>,
}

impl SignalBinding {
    pub fn new(value: RwSignal<String>, config: PickerConfig) -> Self {
        let outbox = Rc::new(RefCell::new(None));
        let sink = outbox.clone();
        let selection = ColorSelection::controlled(value.get_untracked(), config)
            .with_on_change(move |output| {
                *sink.borrow_mut() = Some(output.to_string());
            });
        let selection = Rc::new(RefCell::new(selection));

        // External value -> selection
        let watched = selection.clone();
        create_effect(move |_| {
            let external = value.get();
            match watched.try_borrow_mut() {
                Ok(mut sel) => {
                    sel.set_external_value(&external);
                }
                Err(_) => {
                    tracing::warn!(
                        value = %external,
                        "Color signal changed during a selection update, ignored"
                    );
                }
            }
        });

        Self {
            selection,
            value,
            outbox,
        }
    }

    /// Run `f` against the selection, then publish its latest output, if any,
    /// to the signal.
    pub fn update<R>(&self, f: impl FnOnce(&mut ColorSelection) -> R) -> R {
        let result = f(&mut self.selection.borrow_mut());
        let emitted = self.outbox.borrow_mut().take();
        if let Some(output) = emitted {
            if self.value.get_untracked() != output {
                self.value.set(output);
            }
        }
        result
    }

    /// Read-only access to the selection.
    pub fn with<R>(&self, f: impl FnOnce(&ColorSelection) -> R) -> R {
        f(&self.selection.borrow())
    }

    pub fn hsva(&self) -> Hsva {
        self.with(ColorSelection::hsva)
    }

    pub fn rgba(&self) -> Rgba {
        self.with(ColorSelection::rgba)
    }

    pub fn signal(&self) -> RwSignal<String> {
        self.value
    }

    /// Open the macOS screen sampler; the picked color is applied like a
    /// swatch.
    #[cfg(all(feature = "eyedropper", target_os = "macos"))]
    pub fn sample_screen(&self) {
        let binding = self.clone();
        crate::eyedropper::sample_color(move |rgba| {
            binding.update(|sel| sel.set_rgba(rgba));
        });
    }
}
