//! `web-sys` implementations of the core host ports.

mod media;
mod particles;
mod storage;

pub use media::DomMediaHost;
pub use particles::DomParticleSurface;
pub use storage::LocalStore;
