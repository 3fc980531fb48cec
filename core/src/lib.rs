pub mod bootstrap;
pub mod config;
pub mod contact;
pub mod cursor;
pub mod error;
pub mod hero;
pub mod observer;
pub mod particles;
pub mod preloader;
pub mod projects;
pub mod reveal;
pub mod scroll;
pub mod theme;

// Re-exports for convenience
pub use config::load_site_config;
pub use error::{FolioError, Result};
pub use observer::{ElementId, MediaHost, ObserverEvent, ResourceObserver};
pub use particles::{ParticleField, ParticleSurface};
pub use preloader::Preloader;
pub use theme::{PreferenceStore, ThemeController};
