//! Shared types for Folio.
//!
//! Everything here is plain serde data so it can cross the boundary between
//! the platform-free engines in `folio-core` and the web frontend.

pub mod formatting;

mod config;
mod media;
mod theme;

pub use config::{
    ContactConfig, ObserverConfig, ParticleConfig, PreloaderConfig, SiteConfig, ThemeConfig,
};
pub use media::{LoadState, LoadStats, MediaKind};
pub use theme::Theme;
