//! Document-wide listeners that belong to no single section.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::bootstrap::{
    KEYBOARD_NAV_CLASS, NO_ANIMATION_CLASS, PRINT_MODE_CLASS, is_animation_error,
    is_keyboard_navigation,
};
use gloo_timers::callback::Timeout;
use tokio::sync::broadcast::error::RecvError;
use wasm_bindgen_futures::spawn_local as spawn;

use crate::gsap;
use crate::lazy::LazyLoader;
use crate::utils::{self, listen, toggle_body_class};

/// Quiet period after the last resize before scroll triggers are measured
/// again.
const RESIZE_SETTLE_MS: u32 = 250;

/// Install the page-wide listeners. `started_ms` is the `Date.now()` taken
/// at startup, used to report load time.
pub fn install(loader: LazyLoader, started_ms: f64) {
    let (Some(window), Some(document)) = (web_sys::window(), utils::document()) else {
        return;
    };

    listen(&document, "keydown", |event: web_sys::KeyboardEvent| {
        if is_keyboard_navigation(&event.key()) {
            toggle_body_class(KEYBOARD_NAV_CLASS, true);
        }
    });
    listen(&document, "mousedown", |_: web_sys::Event| {
        toggle_body_class(KEYBOARD_NAV_CLASS, false);
    });

    listen(&window, "beforeprint", |_: web_sys::Event| {
        toggle_body_class(PRINT_MODE_CLASS, true);
    });
    listen(&window, "afterprint", |_: web_sys::Event| {
        toggle_body_class(PRINT_MODE_CLASS, false);
    });

    listen(&document, "visibilitychange", |_: web_sys::Event| {
        let hidden = utils::document().map(|d| d.hidden()).unwrap_or(false);
        if hidden {
            gsap::pause_all();
        } else {
            gsap::resume_all();
        }
    });

    listen(&window, "error", |event: web_sys::ErrorEvent| {
        let message = event.message();
        if is_animation_error(&message) {
            tracing::warn!(%message, "Animation library failed, disabling animations");
            toggle_body_class(NO_ANIMATION_CLASS, true);
        }
    });

    let mut loaded = loader.subscribe();
    spawn(async move {
        loop {
            match loaded.recv().await {
                Ok(image) => tracing::debug!(src = %image.src, "Image loaded"),
                Err(RecvError::Lagged(skipped)) => tracing::debug!(skipped, "Image log lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    listen(&window, "load", move |_: web_sys::Event| {
        let elapsed_ms = js_sys::Date::now() - started_ms;
        match loader.stats() {
            Some(stats) => tracing::info!(
                elapsed_ms,
                images = stats.total,
                loaded = stats.loaded,
                progress = stats.progress,
                "Portfolio loaded"
            ),
            None => tracing::info!(elapsed_ms, "Portfolio loaded"),
        }
    });

    if !gsap::is_available() {
        tracing::warn!("GSAP not found, animations fall back to static styles");
        toggle_body_class(NO_ANIMATION_CLASS, true);
        return;
    }
    if !gsap::register_plugins() {
        tracing::warn!("ScrollTrigger not found, section reveals disabled");
        return;
    }

    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
    listen(&window, "resize", move |_: web_sys::Event| {
        *pending.borrow_mut() = Some(Timeout::new(RESIZE_SETTLE_MS, gsap::refresh_scroll_triggers));
    });
}
