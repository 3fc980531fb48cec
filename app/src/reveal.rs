//! Plays the scroll-triggered section entrances described in
//! `folio_core::reveal`. Without ScrollTrigger every element keeps its
//! natural state.

use folio_core::bootstrap::Section;
use folio_core::reveal::{Drift, Reveal, TOGGLE_ACTIONS, section_reveals};
use wasm_bindgen::JsCast;

use crate::gsap::{self, ScrollTrigger, Tween};
use crate::utils;

fn matches(root: &web_sys::Element, selector: &str) -> Vec<web_sys::Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        tracing::warn!(selector, "Invalid reveal selector");
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

fn play(root: &web_sys::Element, reveal: &Reveal) {
    let trigger = reveal
        .trigger
        .and_then(|selector| root.query_selector(selector).ok().flatten())
        .unwrap_or_else(|| root.clone());

    for (i, target) in matches(root, reveal.targets).iter().enumerate() {
        let tween = reveal
            .from
            .iter()
            .fold(Tween::new(), |tween, &(key, value)| tween.num(key, value))
            .duration(reveal.duration)
            .delay(reveal.delay_for(i))
            .ease(reveal.ease)
            .scroll_trigger(
                ScrollTrigger::new(&trigger)
                    .start(reveal.start)
                    .toggle_actions(TOGGLE_ACTIONS),
            );
        gsap::from(target, tween);
    }
}

/// Bind every entrance animation of `section` to its scroll position.
pub fn bind_section(section: Section) {
    if !gsap::scroll_triggers_available() {
        return;
    }
    let Some(root) = section.anchor().and_then(utils::element_by_id) else {
        return;
    };
    let reveals = section_reveals(section);
    for reveal in reveals {
        play(&root, reveal);
    }
    tracing::debug!(?section, reveals = reveals.len(), "Scroll reveals bound");
}

/// Scrub `drift` against the scroll position of `section`.
pub fn bind_drift(section: Section, drift: &Drift) {
    if !gsap::scroll_triggers_available() {
        return;
    }
    let Some(root) = section.anchor().and_then(utils::element_by_id) else {
        return;
    };
    for target in matches(&root, drift.targets) {
        gsap::to(
            &target,
            Tween::new().num("y", drift.y).scroll_trigger(
                ScrollTrigger::new(&root)
                    .start(drift.start)
                    .end(drift.end)
                    .scrub(drift.scrub),
            ),
        );
    }
}
