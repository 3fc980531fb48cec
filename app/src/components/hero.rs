//! Hero section: particle trail, parallax layers, headline reveal and the
//! scroll indicator.

use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use folio_core::bootstrap::Section;
use folio_core::hero::{PARALLAX_LAYERS, headline_words, indicator_opacity, normalized_pointer, parallax_offset};
use folio_core::ParticleField;
use folio_types::formatting::format_opacity;
use folio_types::SiteConfig;
use rand::rngs::ThreadRng;
use wasm_bindgen::JsCast;

use crate::boot::use_boot_gate;
use crate::frame::FrameLoop;
use crate::gsap::{self, Tween};
use crate::hosts::DomParticleSurface;
use crate::utils::{self, listen, prefers_reduced_motion, scroll_to_element};

const HEADLINE: &str = "Building thoughtful things for the web";
const PARTICLE_CONTAINER_ID: &str = "particles-container";

type Field = ParticleField<DomParticleSurface, ThreadRng>;

/// Particle field plus the frame loop stepping it.
#[derive(Default)]
struct Trail {
    field: Option<Field>,
    frames: Option<FrameLoop>,
}

type SharedTrail = Rc<RefCell<Trail>>;

fn start_trail(trail: &SharedTrail, config: &SiteConfig) {
    let Some(document) = utils::document() else { return };
    let Some(container) = document.get_element_by_id(PARTICLE_CONTAINER_ID) else {
        tracing::warn!("Particle container missing, trail disabled");
        return;
    };
    let surface = DomParticleSurface::new(document, container);
    let field = ParticleField::new(surface, rand::rng(), config.particles.clone());

    let stepper = trail.clone();
    let frames = FrameLoop::start(move || {
        if let Ok(mut trail) = stepper.try_borrow_mut()
            && let Some(field) = trail.field.as_mut()
        {
            field.step();
        }
    });

    let mut trail = trail.borrow_mut();
    trail.field = Some(field);
    trail.frames = Some(frames);
}

fn reveal_headline() {
    let Some(document) = utils::document() else { return };
    let Ok(words) = document.query_selector_all(".hero-title .word") else {
        return;
    };
    for (i, node) in (0..words.length()).filter_map(|i| words.item(i)).enumerate() {
        if let Ok(word) = node.dyn_into::<web_sys::Element>() {
            gsap::from(
                &word,
                Tween::new()
                    .num("y", 100.0)
                    .num("opacity", 0.0)
                    .duration(1.2)
                    .delay(0.5 + i as f64 * 0.1)
                    .ease("power3.out"),
            );
        }
    }
    if let Some(visual) = document.query_selector(".hero-visual").ok().flatten() {
        gsap::to(
            &visual,
            Tween::new()
                .num("y", -10.0)
                .duration(3.0)
                .num("repeat", -1.0)
                .flag("yoyo", true)
                .ease("sine.inOut"),
        );
    }
}

fn move_layers(pointer: (f64, f64)) {
    for index in 0..PARALLAX_LAYERS {
        if let Some(layer) = utils::element_by_id(&format!("parallax-{index}")) {
            let (x, y) = parallax_offset(index, pointer);
            gsap::to(
                &layer,
                Tween::new().num("x", x).num("y", y).duration(0.5).ease("power2.out"),
            );
        }
    }
}

#[component]
pub fn Hero() -> Element {
    let config = use_context::<SiteConfig>();
    let gate = use_boot_gate();
    let trail: SharedTrail = use_hook(|| Rc::new(RefCell::new(Trail::default())));
    let mut indicator = use_signal(|| 1.0_f64);

    let effect_trail = trail.clone();
    use_effect(move || {
        if !gate.is_ready() {
            return;
        }
        gate.started(Section::Hero);
        start_trail(&effect_trail, &config);
        if !prefers_reduced_motion() {
            reveal_headline();
        }

        if let Some(window) = web_sys::window() {
            let resized = effect_trail.clone();
            listen(&window, "resize", move |_: web_sys::Event| {
                if let Ok(mut trail) = resized.try_borrow_mut()
                    && let Some(field) = trail.field.as_mut()
                {
                    field.handle_resize();
                }
            });
            listen(&window, "scroll", move |_: web_sys::Event| {
                let scroll_y = web_sys::window().and_then(|w| w.scroll_y().ok()).unwrap_or(0.0);
                let _ = indicator.try_write().map(|mut w| *w = indicator_opacity(scroll_y));
            });
        }
    });

    let dropped = trail.clone();
    use_drop(move || {
        if let Ok(mut trail) = dropped.try_borrow_mut() {
            if let Some(frames) = trail.frames.take() {
                frames.stop();
            }
            if let Some(mut field) = trail.field.take() {
                field.destroy();
            }
        }
    });

    let moved = trail.clone();
    let on_move = move |evt: MouseEvent| {
        let point = evt.client_coordinates();
        if let Ok(mut trail) = moved.try_borrow_mut()
            && let Some(field) = trail.field.as_mut()
        {
            field.create_particle(point.x, point.y);
        }
        if let Some(hero) = utils::element_by_id("hero") {
            let rect = hero.get_bounding_client_rect();
            let pointer = normalized_pointer(
                (point.x, point.y),
                (rect.left(), rect.top()),
                (rect.width(), rect.height()),
            );
            move_layers(pointer);
        }
    };

    let opacity = format_opacity(indicator());

    rsx! {
        section {
            id: "hero",
            class: "hero",
            onmousemove: on_move,
            onmouseleave: move |_| move_layers((0.0, 0.0)),
            div { id: PARTICLE_CONTAINER_ID, class: "particles-container", aria_hidden: "true" }
            for index in 0..PARALLAX_LAYERS {
                div {
                    key: "{index}",
                    id: "parallax-{index}",
                    class: "parallax-layer parallax-layer-{index}",
                    aria_hidden: "true",
                }
            }
            div { class: "hero-content",
                h1 { class: "hero-title",
                    for (i, word) in headline_words(HEADLINE).into_iter().enumerate() {
                        span { key: "{i}", class: "word", "{word} " }
                    }
                }
                p { class: "hero-subtitle", "Developer, designer and occasional tinkerer." }
                a { class: "btn btn-primary", href: "#projects", "View my work" }
            }
            div { class: "hero-visual", aria_hidden: "true" }
            button {
                class: "scroll-indicator",
                r#type: "button",
                aria_label: "Scroll to about section",
                style: "opacity: {opacity}",
                onclick: move |_| {
                    if let Some(about) = utils::element_by_id("about") {
                        scroll_to_element(&about);
                    }
                },
                span { class: "scroll-arrow" }
            }
        }
    }
}
