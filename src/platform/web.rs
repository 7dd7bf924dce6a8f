//! Browser platform: animation-frame scheduling and DOM focus inspection

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, HtmlInputElement, KeyboardEvent, Window};

use crate::input::{FocusClass, FocusTarget, KeyPress, classify_focus};
use crate::session::{FrameHandle, Scheduler};

/// Slot holding the per-frame closure; filled once the session exists
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame`-backed scheduler
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Shared slot the host fills with the frame closure
    pub fn callback_slot(&self) -> FrameCallback {
        self.callback.clone()
    }
}

impl Scheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        let slot = self.callback.borrow();
        let closure = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref())
        {
            Ok(id) => Some(FrameHandle(id)),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(e) = self.window.cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

/// Describe a DOM element for the keyboard gate
pub fn focus_target(element: &Element) -> FocusTarget {
    let input_type = element
        .dyn_ref::<HtmlInputElement>()
        .map(|input| input.type_())
        .or_else(|| element.get_attribute("type"));
    FocusTarget {
        tag_name: element.tag_name(),
        input_type,
        role: element.get_attribute("role"),
        content_editable: element
            .dyn_ref::<HtmlElement>()
            .is_some_and(|el| el.is_content_editable()),
    }
}

/// Classify whatever the key event was aimed at
pub fn classify_event_target(event: &KeyboardEvent, window: &Window) -> FocusClass {
    let element = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .or_else(|| window.document().and_then(|d| d.active_element()));
    match element {
        Some(el) => classify_focus(&focus_target(&el)),
        None => FocusClass::Other,
    }
}

/// Convert a DOM key event for the gate
pub fn key_press(event: &KeyboardEvent, window: &Window) -> KeyPress {
    KeyPress {
        key: event.key(),
        code: event.code(),
        is_composing: event.is_composing(),
        focus: classify_event_target(event, window),
    }
}
