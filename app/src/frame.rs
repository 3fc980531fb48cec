//! `requestAnimationFrame` driven loop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Calls `tick` once per animation frame until stopped.
///
/// The loop releases its closure on the first frame after [`stop`](Self::stop).
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn start(mut tick: impl FnMut() + 'static) -> Self {
        let running = Rc::new(Cell::new(true));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let next = callback.clone();
        let alive = running.clone();
        *callback.borrow_mut() = Some(Closure::new(move || {
            if !alive.get() {
                // Drop our own closure; the cycle ends here
                next.borrow_mut().take();
                return;
            }
            tick();
            if let Some(closure) = next.borrow().as_ref() {
                request_frame(closure);
            }
        }));

        if let Some(closure) = callback.borrow().as_ref() {
            request_frame(closure);
        }

        Self { running }
    }

    pub fn stop(&self) {
        self.running.set(false);
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request_frame(closure: &Closure<dyn FnMut()>) {
    if let Some(window) = web_sys::window()
        && let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref())
    {
        tracing::warn!(error = ?e, "requestAnimationFrame failed");
    }
}
