//! Light/dark theme switch.

use dioxus::prelude::*;
use folio_core::bootstrap::Section;
use folio_core::theme::ThemeChange;
use folio_core::ThemeController;
use folio_types::{SiteConfig, Theme};
use serde::Serialize;

use crate::boot::use_boot_gate;
use crate::gsap::{self, Tween};
use crate::hosts::LocalStore;
use crate::utils::{self, dispatch_custom, listen, prefers_reduced_motion};

const OVERLAY_ID: &str = "theme-transition";
const ICON_ID: &str = "theme-toggle-icon";

#[derive(Serialize)]
struct ThemeDetail {
    theme: Theme,
}

fn write_theme(theme: Theme) {
    if let Some(document) = utils::document() {
        if let Some(root) = document.document_element() {
            let _ = root.set_attribute("data-theme", theme.as_str());
        }
        dispatch_custom(&document, "themechange", &ThemeDetail { theme });
    }
}

/// Apply a change to the document, running the overlay transition when asked.
fn apply(change: &ThemeChange, secs: f64) {
    let theme = change.theme;
    let overlay = utils::element_by_id(OVERLAY_ID);
    match overlay.filter(|_| change.animate) {
        Some(overlay) => {
            if let Some(icon) = utils::element_by_id(ICON_ID) {
                gsap::to(&icon, Tween::new().num("rotation", 360.0).duration(secs * 2.0));
                gsap::set(&icon, Tween::new().num("rotation", 0.0).delay(secs * 2.0));
            }
            let fade_back = overlay.clone();
            gsap::to(
                &overlay,
                Tween::new().num("opacity", 1.0).duration(secs).on_complete(move || {
                    write_theme(theme);
                    gsap::to(&fade_back, Tween::new().num("opacity", 0.0).duration(secs));
                }),
            );
        }
        None => write_theme(theme),
    }
}

#[component]
pub fn ThemeToggle() -> Element {
    let config = use_context::<SiteConfig>();
    let gate = use_boot_gate();
    let secs = config.theme.transition_secs;
    let mut controller = use_signal(|| ThemeController::new(LocalStore::open(), config.theme.storage_key.clone()));
    let mut label = use_signal(|| controller.peek().initial().aria_label());

    // Initial theme goes on before the preloader lifts
    use_hook(move || apply(&controller.peek().initial(), secs));

    use_effect(move || {
        if !gate.is_ready() {
            return;
        }
        gate.started(Section::Theme);
        let Some(query) = web_sys::window().and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        else {
            return;
        };
        listen(&query, "change", move |_: web_sys::Event| {
            let prefers_dark = utils::media_matches("(prefers-color-scheme: dark)");
            let change = controller.write().system_changed(prefers_dark, prefers_reduced_motion());
            if let Some(change) = change {
                tracing::debug!(theme = %change.theme, "Following system color scheme");
                label.set(change.aria_label());
                apply(&change, secs);
            }
        });
    });

    rsx! {
        button {
            class: "theme-toggle",
            r#type: "button",
            aria_label: "{label}",
            onclick: move |_| {
                let change = controller.write().toggle(prefers_reduced_motion());
                label.set(change.aria_label());
                apply(&change, secs);
            },
            span { id: ICON_ID, class: "theme-toggle-icon", aria_hidden: "true" }
        }
        div { id: OVERLAY_ID, class: "theme-transition", aria_hidden: "true" }
    }
}
