//! Lazy loading state machine.
//!
//! Tracks every deferred element the observer has seen and drives it
//! through `pending → loading → loaded | error`. Terminal elements are never
//! observed again.

use folio_types::{LoadState, LoadStats, MediaKind, ObserverConfig};
use hashbrown::{HashMap, HashSet};
use tokio::sync::broadcast;

use super::host::{
    ElementId, FetchOutcome, FetchPurpose, IntersectionEntry, MediaHost, ObserverEvent,
    WatchOptions,
};

const LOADED_CHANNEL_CAPACITY: usize = 64;
const PROGRESSIVE_BLUR_PX: f64 = 2.0;

/// Payload of the `imageloaded` completion signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoaded {
    pub id: ElementId,
    pub src: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MediaEntry {
    kind: MediaKind,
    state: LoadState,
}

#[derive(Debug, Clone)]
struct ProgressivePlan {
    low: String,
    high: Option<String>,
}

pub struct ResourceObserver<H: MediaHost> {
    host: H,
    config: ObserverConfig,
    entries: HashMap<ElementId, MediaEntry>,
    /// Images whose load resolved; suppresses duplicate fetches.
    loaded: HashSet<ElementId>,
    /// Kinds with a live observation instance.
    watching: HashSet<MediaKind>,
    progressive: HashMap<ElementId, ProgressivePlan>,
    placeholders: HashSet<ElementId>,
    destroyed: bool,
    notifier: broadcast::Sender<ImageLoaded>,
}

impl<H: MediaHost> ResourceObserver<H> {
    pub fn new(host: H, config: ObserverConfig) -> Self {
        let (notifier, _) = broadcast::channel(LOADED_CHANNEL_CAPACITY);
        Self {
            host,
            config,
            entries: HashMap::new(),
            loaded: HashSet::new(),
            watching: HashSet::new(),
            progressive: HashMap::new(),
            placeholders: HashSet::new(),
            destroyed: false,
            notifier,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Subscribe to `imageloaded` completions.
    pub fn subscribe(&self) -> broadcast::Receiver<ImageLoaded> {
        self.notifier.subscribe()
    }

    /// Scan the document and start watching deferred media.
    ///
    /// Without intersection support every deferred element is loaded right
    /// away instead.
    pub fn initialize(&mut self) {
        let images = self.host.scan(MediaKind::Image);
        let media = self.host.scan(MediaKind::Embed);

        if !self.host.intersection_supported() {
            tracing::info!(
                images = images.len(),
                media = media.len(),
                "Intersection observation unavailable, loading all deferred media"
            );
            for id in images {
                self.track(id, MediaKind::Image, LoadState::Unobserved);
                self.load_image(id);
            }
            for id in media {
                self.track(id, MediaKind::Embed, LoadState::Unobserved);
                self.load_media(id);
            }
            return;
        }

        self.connect(MediaKind::Image, self.config.image_margin_px);
        for id in images {
            self.watch(MediaKind::Image, id);
        }

        self.connect(MediaKind::Embed, self.config.media_margin_px);
        for id in media {
            self.watch(MediaKind::Embed, id);
        }

        tracing::debug!(entries = self.entries.len(), "Resource observer initialized");
    }

    fn connect(&mut self, kind: MediaKind, margin_px: u32) {
        let options = WatchOptions {
            root_margin: ObserverConfig::root_margin(margin_px),
            threshold: self.config.threshold,
        };
        self.host.connect(kind, &options);
        self.watching.insert(kind);
    }

    fn track(&mut self, id: ElementId, kind: MediaKind, state: LoadState) {
        self.entries.insert(id, MediaEntry { kind, state });
    }

    /// Start watching one element. Already tracked elements are left alone so
    /// an element never ends up with two observations.
    fn watch(&mut self, kind: MediaKind, id: ElementId) {
        if let Some(entry) = self.entries.get(&id)
            && entry.state != LoadState::Unobserved
        {
            return;
        }
        self.track(id, kind, LoadState::Pending);
        self.host.observe(kind, id);
    }

    /// Move a tracked (or newly seen) element into `state` and tag it with
    /// the matching class.
    fn enter(&mut self, id: ElementId, kind: MediaKind, state: LoadState) {
        self.entries
            .entry(id)
            .or_insert(MediaEntry {
                kind,
                state: LoadState::Unobserved,
            })
            .state = state;
        if let Some(class) = state.css_class() {
            self.host.add_class(id, class);
        }
    }

    /// Load an image now. No-op for images already loaded or in flight.
    pub fn load_image(&mut self, id: ElementId) {
        if self.loaded.contains(&id) || self.state(id) == LoadState::Loading {
            return;
        }
        let Some(src) = self.host.image_source(id).filter(|src| !src.is_empty()) else {
            tracing::warn!(id = id.0, "Deferred image has no source");
            self.enter(id, MediaKind::Image, LoadState::Error);
            return;
        };

        self.enter(id, MediaKind::Image, LoadState::Loading);
        self.host.fetch_image(id, &src, FetchPurpose::Lazy);
    }

    /// Swap `data-src` into the live source of a video/iframe.
    pub fn load_media(&mut self, id: ElementId) {
        let Some(src) = self.host.take_deferred_source(id) else {
            return;
        };
        self.host.attach_media_source(id, &src);
        self.enter(id, MediaKind::Embed, LoadState::Loading);
    }

    /// Add late-inserted images to the watched set.
    ///
    /// Ignored when image observation is not running (no support, or after
    /// [`destroy`](Self::destroy)). Elements without the deferred marker are
    /// skipped silently.
    pub fn observe_new_images(&mut self, ids: &[ElementId]) {
        if !self.watching.contains(&MediaKind::Image) {
            return;
        }
        for &id in ids {
            if self.host.is_deferred_image(id) {
                self.watch(MediaKind::Image, id);
            }
        }
    }

    /// Route one host event.
    pub fn handle(&mut self, event: ObserverEvent) {
        match event {
            ObserverEvent::Intersection { kind, entries } => self.on_intersection(kind, &entries),
            ObserverEvent::ImageFetched {
                id,
                purpose: FetchPurpose::Lazy,
                outcome,
            } => self.on_image_settled(id, outcome),
            ObserverEvent::ImageFetched {
                id,
                purpose,
                outcome,
            } => self.on_progressive_fetched(id, purpose, outcome),
            ObserverEvent::MediaSettled { id, outcome } => self.on_media_settled(id, outcome),
        }
    }

    fn on_intersection(&mut self, kind: MediaKind, entries: &[IntersectionEntry]) {
        if !self.watching.contains(&kind) {
            return;
        }
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if self.state(entry.id) == LoadState::Pending {
                match kind {
                    MediaKind::Image => self.load_image(entry.id),
                    MediaKind::Embed => self.load_media(entry.id),
                }
            }
            self.host.unobserve(kind, entry.id);
        }
    }

    fn on_image_settled(&mut self, id: ElementId, outcome: FetchOutcome) {
        if self.state(id) != LoadState::Loading {
            tracing::debug!(id = id.0, "Ignoring fetch result for image not in flight");
            return;
        }
        let src = self.host.image_source(id).unwrap_or_default();

        match outcome {
            FetchOutcome::Loaded => {
                if !self.host.prefers_reduced_motion() {
                    self.host.fade_in(id, self.config.fade_in_secs);
                }
                if !self.destroyed {
                    self.loaded.insert(id);
                }
                self.enter(id, MediaKind::Image, LoadState::Loaded);
                self.host.dispatch_loaded(id, &src);
                if self.placeholders.remove(&id) {
                    self.host.remove_placeholder(id);
                }
                // No subscribers is fine
                let _ = self.notifier.send(ImageLoaded { id, src });
            }
            FetchOutcome::Failed => {
                self.enter(id, MediaKind::Image, LoadState::Error);
                tracing::warn!(src = %src, "Failed to load image");
            }
        }
    }

    fn on_media_settled(&mut self, id: ElementId, outcome: FetchOutcome) {
        if self.state(id) != LoadState::Loading {
            return;
        }
        match outcome {
            FetchOutcome::Loaded => {
                self.host.remove_class(id, "loading");
                self.enter(id, MediaKind::Embed, LoadState::Loaded);
            }
            FetchOutcome::Failed => {
                self.enter(id, MediaKind::Embed, LoadState::Error);
                tracing::warn!(id = id.0, "Failed to load media");
            }
        }
    }

    /// Load `low` first (blurred), then `high`, then remove the blur.
    pub fn progressive_load(&mut self, id: ElementId, low: &str, high: Option<&str>) {
        self.progressive.insert(
            id,
            ProgressivePlan {
                low: low.to_string(),
                high: high.map(str::to_string),
            },
        );
        self.host.fetch_image(id, low, FetchPurpose::ProgressiveLow);
    }

    fn on_progressive_fetched(&mut self, id: ElementId, purpose: FetchPurpose, outcome: FetchOutcome) {
        if outcome == FetchOutcome::Failed {
            // Matches the lazy path: no retry, keep whatever is showing
            tracing::warn!(id = id.0, ?purpose, "Progressive image pass failed");
            self.progressive.remove(&id);
            return;
        }
        match purpose {
            FetchPurpose::ProgressiveLow => {
                let Some(plan) = self.progressive.get(&id).cloned() else {
                    return;
                };
                self.host.set_image_source(id, &plan.low);
                self.host.set_blur(id, PROGRESSIVE_BLUR_PX, None);
                match plan.high {
                    Some(high) => self.host.fetch_image(id, &high, FetchPurpose::ProgressiveHigh),
                    None => {
                        self.progressive.remove(&id);
                    }
                }
            }
            FetchPurpose::ProgressiveHigh => {
                let Some(plan) = self.progressive.remove(&id) else {
                    return;
                };
                if let Some(high) = plan.high {
                    self.host.set_image_source(id, &high);
                }
                let secs = (!self.host.prefers_reduced_motion()).then_some(self.config.unblur_secs);
                self.host.set_blur(id, 0.0, secs);
            }
            FetchPurpose::Lazy => {}
        }
    }

    /// Show a shimmer placeholder until the image's `imageloaded`.
    pub fn create_placeholder(&mut self, id: ElementId) {
        if self.loaded.contains(&id) || !self.placeholders.insert(id) {
            return;
        }
        self.host.insert_placeholder(id);
    }

    /// Hint the browser to fetch critical images immediately.
    pub fn preload_critical<S: AsRef<str>>(&mut self, srcs: &[S]) {
        for src in srcs {
            self.host.preload_hint(src.as_ref());
        }
    }

    pub fn state(&self, id: ElementId) -> LoadState {
        self.entries
            .get(&id)
            .map(|e| e.state)
            .unwrap_or(LoadState::Unobserved)
    }

    pub fn is_loaded(&self, id: ElementId) -> bool {
        self.loaded.contains(&id)
    }

    /// Progress against the images currently marked deferred.
    pub fn stats(&self) -> LoadStats {
        LoadStats::new(self.host.deferred_image_count(), self.loaded.len())
    }

    /// Stop all observation and forget loaded images.
    ///
    /// Fetches already in flight still settle their element's classes.
    pub fn destroy(&mut self) {
        for kind in self.watching.drain() {
            self.host.disconnect(kind);
        }
        self.loaded.clear();
        self.destroyed = true;
    }
}
