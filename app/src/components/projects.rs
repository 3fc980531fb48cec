//! Project cards and the detail modal.

use dioxus::prelude::*;
use folio_core::bootstrap::Section;
use folio_core::projects::{ModalState, PROJECTS};

use crate::boot::use_boot_gate;
use crate::lazy::LazyLoader;
use crate::reveal;
use crate::utils::{self, listen, prefers_reduced_motion};

const MODAL_IMAGE_ID: &str = "modal-image";

fn lock_scroll(locked: bool) {
    if let Some(body) = utils::body() {
        let _ = body
            .style()
            .set_property("overflow", if locked { "hidden" } else { "" });
    }
}

#[component]
pub fn Projects() -> Element {
    let gate = use_boot_gate();
    let loader = use_context::<LazyLoader>();
    let mut modal = use_signal(ModalState::default);

    // The modal image is inserted on open, after the initial scan
    use_effect(move || {
        if modal.read().is_open() {
            loader.observe_new_images(&[MODAL_IMAGE_ID]);
        }
    });

    use_effect(move || {
        if !gate.is_ready() {
            return;
        }
        gate.started(Section::Projects);

        if let Some(window) = web_sys::window() {
            listen(&window, "keydown", move |event: web_sys::KeyboardEvent| {
                let closed = modal.try_write().map(|mut m| m.handle_key(&event.key())).unwrap_or(false);
                if closed {
                    lock_scroll(false);
                }
            });
        }

        if !prefers_reduced_motion() {
            reveal::bind_section(Section::Projects);
        }
    });

    let mut open = move |index: usize| {
        let project = modal.write().open(index);
        tracing::debug!(title = project.title, "Opening project modal");
        lock_scroll(true);
    };
    let mut close = move || {
        modal.write().close();
        lock_scroll(false);
    };

    let current = modal.read().current();

    rsx! {
        section { id: "projects", class: "projects",
            div { class: "container",
                h2 { class: "section-title", "Projects" }
                div { class: "projects-grid",
                    for (index, project) in PROJECTS.iter().enumerate() {
                        article {
                            key: "{index}",
                            class: "project-card",
                            tabindex: "0",
                            onclick: move |_| open(index),
                            onkeydown: move |evt: KeyboardEvent| {
                                if evt.key() == Key::Enter {
                                    open(index);
                                }
                            },
                            img {
                                class: "project-image",
                                src: project.image,
                                alt: project.title,
                                loading: "lazy",
                            }
                            div { class: "project-info",
                                h3 { class: "project-title", "{project.title}" }
                                button { class: "project-link", r#type: "button", "View details" }
                            }
                        }
                    }
                }
            }
            if let Some(project) = current {
                div {
                    class: "modal active",
                    role: "dialog",
                    aria_modal: "true",
                    aria_label: project.title,
                    onclick: move |_| close(),
                    div {
                        class: "modal-content",
                        onclick: move |evt| evt.stop_propagation(),
                        button {
                            class: "modal-close",
                            r#type: "button",
                            aria_label: "Close",
                            onclick: move |_| close(),
                            "×"
                        }
                        img {
                            id: MODAL_IMAGE_ID,
                            class: "modal-image",
                            src: project.image,
                            alt: project.title,
                            loading: "lazy",
                        }
                        h3 { class: "modal-title", "{project.title}" }
                        p { class: "modal-description", "{project.description}" }
                        div { class: "modal-links",
                            a {
                                class: "btn btn-primary",
                                href: project.live_href(),
                                target: "_blank",
                                rel: "noopener",
                                "Live Demo"
                            }
                            a {
                                class: "btn btn-secondary",
                                href: project.code_href(),
                                target: "_blank",
                                rel: "noopener",
                                "Source Code"
                            }
                        }
                    }
                }
            }
        }
    }
}
