//! Browser callback handles (WASM only)
//!
//! Each handle owns its JS closure. Dropping the handle unschedules the
//! callback before the closure is freed.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

type FrameSlot = RefCell<Option<Closure<dyn FnMut(f64)>>>;

/// A self-rescheduling `requestAnimationFrame` loop
pub struct AnimationFrame {
    window: Window,
    id: Rc<Cell<Option<i32>>>,
    slot: Rc<FrameSlot>,
}

impl AnimationFrame {
    /// Call `frame(timestamp_ms)` every animation frame until dropped
    pub fn start(mut frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let id = Rc::new(Cell::new(None));
        let slot: Rc<FrameSlot> = Rc::new(RefCell::new(None));

        let weak: Weak<FrameSlot> = Rc::downgrade(&slot);
        let loop_window = window.clone();
        let loop_id = id.clone();
        let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            frame(time);
            // Handle gone means the loop was cancelled mid-frame
            let Some(slot) = weak.upgrade() else {
                return;
            };
            if let Some(callback) = slot.borrow().as_ref() {
                match loop_window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(next) => loop_id.set(Some(next)),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        });

        let first = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        id.set(Some(first));
        *slot.borrow_mut() = Some(callback);
        Ok(Self { window, id, slot })
    }
}

impl Drop for AnimationFrame {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.slot.borrow_mut().take();
    }
}

/// An event listener removed on drop
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}
