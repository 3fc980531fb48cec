mod app;
mod boot;
mod components;
mod frame;
mod gsap;
mod hosts;
mod lazy;
mod page;
mod reveal;
mod utils;

use std::sync::OnceLock;

use dioxus_logger::tracing::Level;
use folio_types::SiteConfig;

const SITE_TOML: &str = include_str!("../../Folio.toml");

static SITE_CONFIG: OnceLock<SiteConfig> = OnceLock::new();

/// Site configuration parsed at startup.
pub fn site_config() -> SiteConfig {
    SITE_CONFIG.get().cloned().unwrap_or_default()
}

fn log_level(config: &SiteConfig) -> Level {
    if cfg!(debug_assertions) {
        return Level::DEBUG;
    }
    config.log_level.parse().unwrap_or(Level::INFO)
}

fn main() {
    // Parse before the logger exists; report the failure once it does
    let parsed = folio_core::load_site_config(SITE_TOML);
    let config = parsed.as_ref().cloned().unwrap_or_default();

    if let Err(e) = dioxus_logger::init(log_level(&config)) {
        web_sys::console::error_1(&format!("Failed to initialize logger: {e}").into());
    }
    if let Err(e) = &parsed {
        tracing::warn!(error = %e, "Invalid Folio.toml, using defaults");
    }

    let _ = SITE_CONFIG.set(config);
    dioxus::launch(app::App);
}
