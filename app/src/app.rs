use dioxus::prelude::*;
use folio_core::bootstrap::BOOT_ORDER;

use crate::boot::BootGate;
use crate::components::{About, Contact, Cursor, Hero, LoadingScreen, Projects, ScrollProgress, ThemeToggle};
use crate::lazy::LazyLoader;
use crate::page;

#[component]
pub fn App() -> Element {
    let config = use_context_provider(crate::site_config);
    use_context_provider(BootGate::new);
    let loader = use_context_provider(|| LazyLoader::new(config.observer.clone()));
    let started_ms = use_hook(js_sys::Date::now);

    // The lazy loader scans the mounted document before anything else runs
    let boot_loader = loader.clone();
    let critical = config.critical_images.clone();
    use_effect(move || {
        boot_loader.initialize(&critical);
        page::install(boot_loader.clone(), started_ms);
    });

    use_drop(move || loader.destroy());

    let anchors = BOOT_ORDER.iter().filter_map(|section| section.anchor());

    rsx! {
        LoadingScreen {}
        ScrollProgress {}
        header { class: "site-header",
            nav { class: "nav", aria_label: "Main",
                a { class: "nav-logo", href: "#hero", "Portfolio" }
                ul { class: "nav-links",
                    for anchor in anchors {
                        li { key: "{anchor}",
                            a { href: "#{anchor}", class: "nav-link", "{anchor}" }
                        }
                    }
                }
            }
            ThemeToggle {}
        }
        main {
            Hero {}
            About {}
            Projects {}
            Contact {}
        }
        footer { class: "site-footer",
            p { "Built with Rust and WebAssembly." }
        }
        Cursor {}
    }
}
