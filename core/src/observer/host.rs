//! Host port for the resource observer.
//!
//! The observer never touches the document directly. The web frontend
//! implements [`MediaHost`] over `web-sys`; tests implement it in memory.
//! Anything asynchronous (intersection callbacks, fetch completion, native
//! media events) comes back as an [`ObserverEvent`] on the channel returned
//! by [`event_channel`].

use folio_types::MediaKind;
use tokio::sync::mpsc;

/// Stable handle for a deferred element.
///
/// Hosts hand these out when scanning and map them back to real elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

/// Options for one observation instance.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchOptions {
    pub root_margin: String,
    pub threshold: f64,
}

/// Why an image fetch was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchPurpose {
    /// Regular lazy load of the element's own source.
    Lazy,
    /// First, low quality pass of a progressive load.
    ProgressiveLow,
    /// Second, full quality pass of a progressive load.
    ProgressiveHigh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded,
    Failed,
}

/// One entry of an intersection callback batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub id: ElementId,
    pub is_intersecting: bool,
}

/// Everything the host reports back to the observer.
#[derive(Debug, Clone, PartialEq)]
pub enum ObserverEvent {
    Intersection {
        kind: MediaKind,
        entries: Vec<IntersectionEntry>,
    },
    ImageFetched {
        id: ElementId,
        purpose: FetchPurpose,
        outcome: FetchOutcome,
    },
    MediaSettled {
        id: ElementId,
        outcome: FetchOutcome,
    },
}

pub type EventSender = mpsc::UnboundedSender<ObserverEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<ObserverEvent>;

/// Channel carrying host callbacks into the observer.
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Document operations the observer needs.
pub trait MediaHost {
    /// Whether the environment provides intersection observation.
    fn intersection_supported(&self) -> bool;

    /// Find deferred elements of one kind currently in the document.
    fn scan(&mut self, kind: MediaKind) -> Vec<ElementId>;

    /// Number of elements currently carrying the deferred-image marker.
    fn deferred_image_count(&self) -> usize;

    /// Whether `id` is an image carrying the deferred marker.
    fn is_deferred_image(&self, id: ElementId) -> bool;

    fn connect(&mut self, kind: MediaKind, options: &WatchOptions);
    fn observe(&mut self, kind: MediaKind, id: ElementId);
    fn unobserve(&mut self, kind: MediaKind, id: ElementId);
    fn disconnect(&mut self, kind: MediaKind);

    /// Current `src` of an image element.
    fn image_source(&self, id: ElementId) -> Option<String>;

    /// Start an out-of-band fetch/decode. Completion is reported as
    /// [`ObserverEvent::ImageFetched`] with the same `purpose`.
    fn fetch_image(&mut self, id: ElementId, src: &str, purpose: FetchPurpose);

    /// Read and remove the element's `data-src` attribute.
    fn take_deferred_source(&mut self, id: ElementId) -> Option<String>;

    /// Assign a live source to a video/iframe and report its native
    /// load/error as [`ObserverEvent::MediaSettled`].
    fn attach_media_source(&mut self, id: ElementId, src: &str);

    fn set_image_source(&mut self, id: ElementId, src: &str);

    fn add_class(&mut self, id: ElementId, class: &str);
    fn remove_class(&mut self, id: ElementId, class: &str);

    /// Live reduced-motion preference. Queried on every use.
    fn prefers_reduced_motion(&self) -> bool;

    /// Opacity 0 → 1 over `secs`.
    fn fade_in(&mut self, id: ElementId, secs: f64);

    /// Set a blur filter in pixels, animated over `secs` when given.
    fn set_blur(&mut self, id: ElementId, px: f64, secs: Option<f64>);

    /// Dispatch the `imageloaded` event on the element.
    fn dispatch_loaded(&mut self, id: ElementId, src: &str);

    fn insert_placeholder(&mut self, id: ElementId);
    fn remove_placeholder(&mut self, id: ElementId);

    /// Emit a `<link rel="preload" as="image">` hint.
    fn preload_hint(&mut self, src: &str);
}
