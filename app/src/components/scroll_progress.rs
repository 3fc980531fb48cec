//! Smooth scrolling: progress bar, in-page links, section snapping, wheel
//! easing and keyboard section navigation.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use folio_core::bootstrap::BOOT_ORDER;
use folio_core::scroll::{
    ScrollIntent, ScrollMetrics, WHEEL_RELEASE_MS, WHEEL_SCROLL_SECS, WheelScroll, anchor_target,
    current_section, target_section,
};
use folio_types::formatting::format_percent;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;

use crate::boot::use_boot_gate;
use crate::gsap;
use crate::utils::{self, listen, listen_active, prefers_reduced_motion, scroll_to_element, set_style};

fn metrics() -> Option<ScrollMetrics> {
    let window = web_sys::window()?;
    let root = window.document()?.document_element()?;
    Some(ScrollMetrics {
        scroll_y: window.scroll_y().ok()?,
        scroll_height: root.scroll_height() as f64,
        viewport_height: window.inner_height().ok()?.as_f64()?,
    })
}

fn sections() -> Vec<web_sys::HtmlElement> {
    BOOT_ORDER
        .iter()
        .filter_map(|section| section.anchor())
        .filter_map(utils::html_element_by_id)
        .collect()
}

fn is_editable(target: Option<web_sys::EventTarget>) -> bool {
    let Some(element) = target.and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok()) else {
        return false;
    };
    matches!(
        element.tag_name().to_ascii_lowercase().as_str(),
        "input" | "textarea" | "select" | "button"
    ) || element.is_content_editable()
}

fn navigate(event: &web_sys::KeyboardEvent) {
    if event.default_prevented() || event.alt_key() || event.ctrl_key() || event.meta_key() {
        return;
    }
    let Some(intent) = ScrollIntent::from_key(&event.key()) else {
        return;
    };
    if is_editable(event.target()) {
        return;
    }
    let Some(m) = metrics() else { return };
    let sections = sections();
    let offsets: Vec<f64> = sections.iter().map(|s| s.offset_top() as f64).collect();
    let current = current_section(&offsets, m.scroll_y, m.viewport_height).unwrap_or(0);
    if let Some(target) = target_section(intent, current, sections.len()).and_then(|i| sections.get(i)) {
        event.prevent_default();
        scroll_to_element(target);
    }
}

/// Route clicks on `a[href^="#"]` through [`scroll_to_element`].
fn follow_anchor(event: &web_sys::MouseEvent) {
    if event.default_prevented() || event.button() != 0 || event.ctrl_key() || event.meta_key() || event.shift_key() {
        return;
    }
    let Some(link) = event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest("a[href^=\"#\"]").ok().flatten())
    else {
        return;
    };
    let Some(href) = link.get_attribute("href") else { return };
    let Some(target) = anchor_target(&href).and_then(utils::element_by_id) else {
        return;
    };
    event.prevent_default();
    scroll_to_element(&target);
}

fn enable_snapping(sections: &[web_sys::HtmlElement]) {
    let Some(root) = utils::document().and_then(|d| d.document_element()) else {
        return;
    };
    set_style(&root, "scroll-snap-type", "y mandatory");
    for section in sections {
        let style = section.style();
        let _ = style.set_property("scroll-snap-align", "start");
        let _ = style.set_property("scroll-snap-stop", "always");
    }
}

fn in_modal(event: &web_sys::WheelEvent) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        .and_then(|el| el.closest(".modal").ok().flatten())
        .is_some()
}

/// Replace native wheel steps with an eased scroll. Pinch-zoom and wheel
/// input inside the project modal stay native.
fn ease_wheel(window: &web_sys::Window) {
    if let Some(root) = utils::document().and_then(|d| d.document_element()) {
        set_style(&root, "scroll-behavior", "auto");
    }
    let wheel = Rc::new(RefCell::new(WheelScroll::default()));
    let release: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

    listen_active(window, "wheel", move |event: web_sys::WheelEvent| {
        if event.ctrl_key() || in_modal(&event) {
            return;
        }
        let scroll_y = web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
        let target = wheel.borrow_mut().begin(scroll_y, event.delta_y());
        let Some(target) = target else { return };
        event.prevent_default();

        let finished = wheel.clone();
        gsap::scroll_window_to(target, WHEEL_SCROLL_SECS, "power2.out", move || {
            finished.borrow_mut().release();
        });
        let expired = wheel.clone();
        // Replacing the handle cancels the previous timer
        *release.borrow_mut() = Some(Timeout::new(WHEEL_RELEASE_MS, move || {
            expired.borrow_mut().release();
        }));
    });
}

#[component]
pub fn ScrollProgress() -> Element {
    let gate = use_boot_gate();
    let mut progress = use_signal(|| 0.0_f64);

    use_effect(move || {
        if !gate.is_ready() {
            return;
        }
        let Some(window) = web_sys::window() else { return };
        listen(&window, "scroll", move |_: web_sys::Event| {
            if let Some(m) = metrics() {
                let _ = progress.try_write().map(|mut w| *w = m.progress_percent());
            }
        });
        listen(&window, "keydown", move |event: web_sys::KeyboardEvent| navigate(&event));

        if let Some(document) = utils::document() {
            listen(&document, "click", move |event: web_sys::MouseEvent| follow_anchor(&event));
        }
        enable_snapping(&sections());
        if !prefers_reduced_motion() {
            ease_wheel(&window);
        }
    });

    let width = format_percent(progress());

    rsx! {
        div {
            class: "scroll-progress",
            role: "progressbar",
            aria_label: "Page scroll progress",
            aria_valuemin: "0",
            aria_valuemax: "100",
            aria_valuenow: "{progress().round()}",
            style: "width: {width}",
        }
    }
}
