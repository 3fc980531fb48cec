//! Custom cursor: eased ring, leading dot, morph on hover targets.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use folio_core::bootstrap::Section;
use folio_core::cursor::{CursorMorph, CursorState, MorphTarget};
use folio_types::formatting::format_px;
use wasm_bindgen::JsCast;

use crate::boot::use_boot_gate;
use crate::frame::FrameLoop;
use crate::gsap::{self, Tween};
use crate::utils::{self, listen, media_matches, prefers_reduced_motion, set_style, toggle_body_class};

const RING_ID: &str = "cursor-ring";
const DOT_ID: &str = "cursor-dot";
const HOVER_TARGETS: &str = "a, button, .project-card";

fn morph_for(target: &web_sys::Element) -> CursorMorph {
    if target.closest(HOVER_TARGETS).ok().flatten().is_some() {
        return CursorMorph::Hover;
    }
    CursorMorph::for_tag(&target.tag_name()).unwrap_or_default()
}

fn translate((x, y): (f64, f64)) -> String {
    format!("{} {}", format_px(x), format_px(y))
}

fn animate_morph(ring: &web_sys::Element, dot: &web_sys::Element, target: MorphTarget) {
    gsap::to(
        ring,
        Tween::new()
            .num("scaleX", target.ring_scale_x)
            .num("scaleY", target.ring_scale_y)
            .text("borderWidth", &format_px(target.ring_border_px))
            .duration(0.3)
            .ease("power2.out"),
    );
    gsap::to(dot, Tween::new().num("scale", target.dot_scale).duration(0.3));
}

fn start_cursor(state: Rc<RefCell<CursorState>>) -> Option<FrameLoop> {
    let document = utils::document()?;
    let ring = document.get_element_by_id(RING_ID)?;
    let dot = document.get_element_by_id(DOT_ID)?;
    toggle_body_class("custom-cursor", true);

    let moved = state.clone();
    listen(&document, "mousemove", move |event: web_sys::MouseEvent| {
        if let Ok(mut cursor) = moved.try_borrow_mut() {
            cursor.pointer_moved(event.client_x() as f64, event.client_y() as f64);
        }
    });

    let left = state.clone();
    let root = document.document_element()?;
    listen(&root, "mouseleave", move |_: web_sys::Event| {
        if let Ok(mut cursor) = left.try_borrow_mut() {
            cursor.pointer_left();
        }
    });

    let hovered = state.clone();
    let (morph_ring, morph_dot) = (ring.clone(), dot.clone());
    listen(&document, "mouseover", move |event: web_sys::Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
            return;
        };
        let morph = morph_for(&target);
        let animate = hovered
            .try_borrow_mut()
            .ok()
            .and_then(|mut cursor| cursor.morph_to(morph, prefers_reduced_motion()));
        if let Some(target) = animate {
            animate_morph(&morph_ring, &morph_dot, target);
        }
    });

    Some(FrameLoop::start(move || {
        let Ok(mut cursor) = state.try_borrow_mut() else {
            return;
        };
        cursor.step();
        let opacity = if cursor.visible { "1" } else { "0" };
        let (dot_x, dot_y) = cursor.dot();
        // `translate` is independent of the `transform` GSAP scales
        set_style(&ring, "translate", &translate(cursor.ring));
        set_style(&dot, "translate", &translate((dot_x, dot_y)));
        set_style(&ring, "opacity", opacity);
        set_style(&dot, "opacity", opacity);
    }))
}

#[component]
pub fn Cursor() -> Element {
    let gate = use_boot_gate();
    let enabled = use_hook(|| media_matches("(hover: hover)"));
    let frames = use_hook(|| Rc::new(RefCell::new(None::<FrameLoop>)));

    let started = frames.clone();
    use_effect(move || {
        if !gate.is_ready() || !enabled {
            return;
        }
        gate.started(Section::Cursor);
        let state = Rc::new(RefCell::new(CursorState::default()));
        *started.borrow_mut() = start_cursor(state);
    });

    use_drop(move || {
        if let Some(frames) = frames.borrow_mut().take() {
            frames.stop();
        }
        toggle_body_class("custom-cursor", false);
    });

    if !enabled {
        return rsx! {};
    }

    rsx! {
        div { id: RING_ID, class: "cursor", aria_hidden: "true" }
        div { id: DOT_ID, class: "cursor-dot", aria_hidden: "true" }
    }
}
