use dioxus::prelude::*;
use folio_core::bootstrap::Section;
use folio_core::reveal::AVATAR_DRIFT;

use crate::boot::use_boot_gate;
use crate::lazy::LazyLoader;
use crate::reveal;
use crate::utils::prefers_reduced_motion;

const SKILLS: [&str; 8] = [
    "Rust",
    "TypeScript",
    "WebAssembly",
    "HTML & CSS",
    "Accessibility",
    "UI Animation",
    "PostgreSQL",
    "Design Systems",
];

#[component]
pub fn About() -> Element {
    let gate = use_boot_gate();
    let loader = use_context::<LazyLoader>();

    // Runs once after mount; reads no signals
    use_effect(move || {
        loader.create_placeholder("about-avatar");
        loader.progressive_load(
            "about-photo",
            "assets/images/workspace-low.jpg",
            Some("assets/images/workspace.jpg"),
        );
    });

    use_effect(move || {
        if !gate.is_ready() {
            return;
        }
        gate.started(Section::About);
        if !prefers_reduced_motion() {
            reveal::bind_section(Section::About);
            reveal::bind_drift(Section::About, &AVATAR_DRIFT);
        }
    });

    rsx! {
        section { id: "about", class: "about",
            div { class: "container",
                h2 { class: "section-title", "About Me" }
                div { class: "about-grid",
                    div { class: "about-media",
                        img {
                            id: "about-avatar",
                            class: "about-avatar",
                            src: "assets/images/avatar.jpg",
                            alt: "Portrait",
                            loading: "lazy",
                            width: "280",
                            height: "280",
                        }
                        img {
                            id: "about-photo",
                            class: "about-photo",
                            alt: "Workspace",
                            width: "480",
                            height: "320",
                        }
                    }
                    div { class: "about-text",
                        p {
                            "I build fast, accessible interfaces and the tooling behind them. "
                            "Most of my work sits where careful engineering meets visual detail."
                        }
                        ul { class: "skills", aria_label: "Skills",
                            for skill in SKILLS {
                                li { key: "{skill}", class: "skill-tag", "{skill}" }
                            }
                        }
                    }
                }
                div { class: "about-video",
                    video {
                        class: "lazy-video",
                        "data-src": "assets/video/showreel.mp4",
                        controls: true,
                        muted: true,
                        preload: "none",
                        width: "640",
                        height: "360",
                    }
                }
            }
        }
    }
}
