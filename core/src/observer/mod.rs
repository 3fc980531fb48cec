//! Deferred media loading
//!
//! ```text
//!   scan ──► Pending ──(intersection)──► Loading ──► Loaded ─► imageloaded
//!                                            │
//!                                            └─────► Error (terminal, warn)
//! ```
//!
//! Without intersection support the scan goes straight to `Loading`.

mod host;
mod resource_observer;

#[cfg(test)]
mod observer_tests;

pub use host::{
    ElementId, EventReceiver, EventSender, FetchOutcome, FetchPurpose, IntersectionEntry,
    MediaHost, ObserverEvent, WatchOptions, event_channel,
};
pub use resource_observer::{ImageLoaded, ResourceObserver};
