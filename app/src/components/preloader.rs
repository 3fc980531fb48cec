//! Loading screen with the typewriter label.

use dioxus::prelude::*;
use folio_core::preloader::PreloadPhase;
use folio_core::Preloader;
use folio_types::SiteConfig;
use gloo_timers::future::TimeoutFuture;

use crate::boot::use_boot_gate;
use crate::utils::prefers_reduced_motion;

fn millis(duration: std::time::Duration) -> u32 {
    duration.as_millis().min(u32::MAX as u128) as u32
}

#[component]
pub fn LoadingScreen() -> Element {
    let config = use_context::<SiteConfig>();
    let mut gate = use_boot_gate();
    let reduced_motion = use_hook(prefers_reduced_motion);
    let mut preloader = use_signal(|| {
        let mut preloader = Preloader::new(&config.preloader);
        preloader.on_complete(move || gate.open());
        if reduced_motion {
            preloader.typewriter_mut().finish();
        }
        preloader
    });

    use_hook(move || {
        if !reduced_motion {
            let interval = millis(preloader.peek().char_interval());
            spawn(async move {
                loop {
                    TimeoutFuture::new(interval).await;
                    if preloader.peek().phase() == PreloadPhase::Done
                        || !preloader.write().typewriter_mut().tick()
                    {
                        break;
                    }
                }
            });
        }

        let (gate_ms, fade_ms) = {
            let p = preloader.peek();
            (millis(p.gate()), millis(p.fade_out()))
        };
        spawn(async move {
            TimeoutFuture::new(gate_ms).await;
            preloader.write().gate_elapsed();
            TimeoutFuture::new(fade_ms).await;
            preloader.write().complete();
        });
    });

    let state = preloader.read();
    let class = match state.phase() {
        PreloadPhase::Typing => "preloader",
        PreloadPhase::FadingOut => "preloader loaded",
        PreloadPhase::Done => "preloader loaded hidden",
    };

    rsx! {
        div { class: "{class}", id: "preloader", aria_hidden: "{state.phase() == PreloadPhase::Done}",
            div { class: "preloader-content",
                div { class: "preloader-spinner" }
                p { class: "preloader-text", "{state.typewriter().text()}" }
            }
        }
    }
}
