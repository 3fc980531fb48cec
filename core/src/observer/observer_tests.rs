//! Tests for the resource observer
//!
//! Drives the observer through an in-memory host that records every document
//! operation.

use std::collections::{BTreeMap, BTreeSet};

use folio_types::{LoadState, LoadStats, MediaKind, ObserverConfig};

use super::host::{
    ElementId, FetchOutcome, FetchPurpose, IntersectionEntry, MediaHost, ObserverEvent,
    WatchOptions, event_channel,
};
use super::resource_observer::{ImageLoaded, ResourceObserver};

#[derive(Default)]
struct FakeHost {
    supported: bool,
    reduced_motion: bool,
    images: Vec<ElementId>,
    media: Vec<ElementId>,
    /// Images still carrying `loading="lazy"`
    deferred_images: BTreeSet<ElementId>,
    sources: BTreeMap<ElementId, String>,
    data_src: BTreeMap<ElementId, String>,
    connected: Vec<(MediaKind, WatchOptions)>,
    observed: BTreeMap<MediaKind, BTreeSet<ElementId>>,
    disconnected: Vec<MediaKind>,
    fetches: Vec<(ElementId, String, FetchPurpose)>,
    attached: Vec<(ElementId, String)>,
    classes: BTreeMap<ElementId, BTreeSet<String>>,
    fades: Vec<(ElementId, f64)>,
    blurs: Vec<(ElementId, f64, Option<f64>)>,
    dispatched: Vec<(ElementId, String)>,
    placeholders: BTreeSet<ElementId>,
    preloads: Vec<String>,
}

impl FakeHost {
    fn with_images(count: u32) -> Self {
        let mut host = FakeHost {
            supported: true,
            ..Default::default()
        };
        for n in 0..count {
            host.add_image(n);
        }
        host
    }

    fn add_image(&mut self, n: u32) -> ElementId {
        let id = ElementId(n);
        self.images.push(id);
        self.deferred_images.insert(id);
        self.sources.insert(id, format!("img/{n}.jpg"));
        id
    }

    fn add_media(&mut self, n: u32) -> ElementId {
        let id = ElementId(n);
        self.media.push(id);
        self.data_src.insert(id, format!("video/{n}.mp4"));
        id
    }

    fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.classes.get(&id).is_some_and(|c| c.contains(class))
    }

    fn is_observed(&self, kind: MediaKind, id: ElementId) -> bool {
        self.observed.get(&kind).is_some_and(|s| s.contains(&id))
    }

    fn fetch_count(&self, id: ElementId) -> usize {
        self.fetches.iter().filter(|(f, _, _)| *f == id).count()
    }
}

impl MediaHost for FakeHost {
    fn intersection_supported(&self) -> bool {
        self.supported
    }

    fn scan(&mut self, kind: MediaKind) -> Vec<ElementId> {
        match kind {
            MediaKind::Image => self.images.clone(),
            MediaKind::Embed => self.media.clone(),
        }
    }

    fn deferred_image_count(&self) -> usize {
        self.deferred_images.len()
    }

    fn is_deferred_image(&self, id: ElementId) -> bool {
        self.deferred_images.contains(&id)
    }

    fn connect(&mut self, kind: MediaKind, options: &WatchOptions) {
        self.connected.push((kind, options.clone()));
    }

    fn observe(&mut self, kind: MediaKind, id: ElementId) {
        self.observed.entry(kind).or_default().insert(id);
    }

    fn unobserve(&mut self, kind: MediaKind, id: ElementId) {
        self.observed.entry(kind).or_default().remove(&id);
    }

    fn disconnect(&mut self, kind: MediaKind) {
        self.disconnected.push(kind);
        self.observed.remove(&kind);
    }

    fn image_source(&self, id: ElementId) -> Option<String> {
        self.sources.get(&id).cloned()
    }

    fn fetch_image(&mut self, id: ElementId, src: &str, purpose: FetchPurpose) {
        self.fetches.push((id, src.to_string(), purpose));
    }

    fn take_deferred_source(&mut self, id: ElementId) -> Option<String> {
        self.data_src.remove(&id)
    }

    fn attach_media_source(&mut self, id: ElementId, src: &str) {
        self.attached.push((id, src.to_string()));
    }

    fn set_image_source(&mut self, id: ElementId, src: &str) {
        self.sources.insert(id, src.to_string());
    }

    fn add_class(&mut self, id: ElementId, class: &str) {
        self.classes.entry(id).or_default().insert(class.to_string());
    }

    fn remove_class(&mut self, id: ElementId, class: &str) {
        self.classes.entry(id).or_default().remove(class);
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn fade_in(&mut self, id: ElementId, secs: f64) {
        self.fades.push((id, secs));
    }

    fn set_blur(&mut self, id: ElementId, px: f64, secs: Option<f64>) {
        self.blurs.push((id, px, secs));
    }

    fn dispatch_loaded(&mut self, id: ElementId, src: &str) {
        self.dispatched.push((id, src.to_string()));
    }

    fn insert_placeholder(&mut self, id: ElementId) {
        self.placeholders.insert(id);
    }

    fn remove_placeholder(&mut self, id: ElementId) {
        self.placeholders.remove(&id);
    }

    fn preload_hint(&mut self, src: &str) {
        self.preloads.push(src.to_string());
    }
}

fn make_observer(host: FakeHost) -> ResourceObserver<FakeHost> {
    let mut observer = ResourceObserver::new(host, ObserverConfig::default());
    observer.initialize();
    observer
}

fn intersect(kind: MediaKind, ids: &[ElementId]) -> ObserverEvent {
    ObserverEvent::Intersection {
        kind,
        entries: ids
            .iter()
            .map(|&id| IntersectionEntry {
                id,
                is_intersecting: true,
            })
            .collect(),
    }
}

fn fetched(id: ElementId, outcome: FetchOutcome) -> ObserverEvent {
    ObserverEvent::ImageFetched {
        id,
        purpose: FetchPurpose::Lazy,
        outcome,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Observation setup
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_initialize_connects_with_separate_margins() {
    let mut host = FakeHost::with_images(2);
    host.add_media(10);
    let observer = make_observer(host);

    let connected = &observer.host().connected;
    assert_eq!(connected.len(), 2);
    assert_eq!(connected[0].0, MediaKind::Image);
    assert_eq!(connected[0].1.root_margin, "50px 0px");
    assert_eq!(connected[0].1.threshold, 0.01);
    assert_eq!(connected[1].0, MediaKind::Embed);
    assert_eq!(connected[1].1.root_margin, "100px 0px");

    assert!(observer.host().is_observed(MediaKind::Image, ElementId(0)));
    assert!(observer.host().is_observed(MediaKind::Embed, ElementId(10)));
    assert_eq!(observer.state(ElementId(1)), LoadState::Pending);
}

#[test]
fn test_non_intersecting_images_are_not_fetched() {
    let mut observer = make_observer(FakeHost::with_images(3));

    observer.handle(ObserverEvent::Intersection {
        kind: MediaKind::Image,
        entries: vec![IntersectionEntry {
            id: ElementId(0),
            is_intersecting: false,
        }],
    });

    assert!(observer.host().fetches.is_empty());
    assert!(observer.host().is_observed(MediaKind::Image, ElementId(0)));
}

#[test]
fn test_one_of_three_intersects() {
    let mut observer = make_observer(FakeHost::with_images(3));
    let target = ElementId(1);

    observer.handle(intersect(MediaKind::Image, &[target]));
    assert_eq!(observer.state(target), LoadState::Loading);
    assert!(observer.host().has_class(target, "loading"));
    assert!(!observer.host().is_observed(MediaKind::Image, target));

    observer.handle(fetched(target, FetchOutcome::Loaded));
    assert_eq!(observer.state(target), LoadState::Loaded);
    assert!(observer.host().has_class(target, "loaded"));
    assert_eq!(observer.host().fetches.len(), 1);

    assert_eq!(observer.state(ElementId(0)), LoadState::Pending);
    assert_eq!(observer.state(ElementId(2)), LoadState::Pending);
    assert_eq!(observer.host().dispatched, vec![(target, "img/1.jpg".to_string())]);
}

#[test]
fn test_reentry_and_repeat_load_do_not_refetch() {
    let mut observer = make_observer(FakeHost::with_images(1));
    let id = ElementId(0);

    observer.handle(intersect(MediaKind::Image, &[id]));
    // Still in flight
    observer.load_image(id);
    observer.handle(fetched(id, FetchOutcome::Loaded));
    observer.handle(intersect(MediaKind::Image, &[id]));
    observer.load_image(id);

    assert_eq!(observer.host().fetch_count(id), 1);
    assert!(observer.is_loaded(id));
}

// ─────────────────────────────────────────────────────────────────────────────
// Load outcomes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_fade_in_skipped_under_reduced_motion() {
    let mut host = FakeHost::with_images(2);
    host.reduced_motion = true;
    let mut observer = make_observer(host);

    observer.handle(intersect(MediaKind::Image, &[ElementId(0)]));
    observer.handle(fetched(ElementId(0), FetchOutcome::Loaded));
    assert!(observer.host().fades.is_empty());

    // Preference is live, not a snapshot
    observer.host_mut().reduced_motion = false;
    observer.handle(intersect(MediaKind::Image, &[ElementId(1)]));
    observer.handle(fetched(ElementId(1), FetchOutcome::Loaded));
    assert_eq!(observer.host().fades, vec![(ElementId(1), 0.6)]);
}

#[test]
fn test_failed_image_is_terminal() {
    let mut observer = make_observer(FakeHost::with_images(1));
    let id = ElementId(0);

    observer.handle(intersect(MediaKind::Image, &[id]));
    observer.handle(fetched(id, FetchOutcome::Failed));

    assert_eq!(observer.state(id), LoadState::Error);
    assert!(observer.host().has_class(id, "error"));
    assert!(!observer.is_loaded(id));
    assert!(observer.host().dispatched.is_empty());

    observer.handle(intersect(MediaKind::Image, &[id]));
    assert_eq!(observer.host().fetch_count(id), 1);
}

#[test]
fn test_image_without_source_is_marked_error() {
    let mut host = FakeHost::with_images(2);
    host.sources.clear();
    host.sources.insert(ElementId(1), String::new());
    let mut observer = make_observer(host);

    observer.handle(intersect(MediaKind::Image, &[ElementId(0), ElementId(1)]));

    for id in [ElementId(0), ElementId(1)] {
        assert_eq!(observer.state(id), LoadState::Error);
        assert!(observer.host().has_class(id, "error"));
        assert!(!observer.host().has_class(id, "loading"));
        assert!(!observer.host().is_observed(MediaKind::Image, id));
        assert_eq!(observer.host().fetch_count(id), 0);
    }
}

#[test]
fn test_stale_fetch_result_is_ignored() {
    let mut observer = make_observer(FakeHost::with_images(1));
    observer.handle(fetched(ElementId(0), FetchOutcome::Loaded));
    assert_eq!(observer.state(ElementId(0)), LoadState::Pending);
    assert!(observer.host().classes.is_empty());
}

#[test]
fn test_completion_signal_reaches_subscribers() {
    let mut observer = make_observer(FakeHost::with_images(1));
    let mut rx = observer.subscribe();

    observer.handle(intersect(MediaKind::Image, &[ElementId(0)]));
    observer.handle(fetched(ElementId(0), FetchOutcome::Loaded));

    assert_eq!(
        rx.try_recv().unwrap(),
        ImageLoaded {
            id: ElementId(0),
            src: "img/0.jpg".to_string()
        }
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Rich media
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_media_swaps_deferred_source() {
    let mut host = FakeHost::with_images(0);
    let id = host.add_media(5);
    let mut observer = make_observer(host);

    observer.handle(intersect(MediaKind::Embed, &[id]));
    assert_eq!(observer.host().attached, vec![(id, "video/5.mp4".to_string())]);
    assert!(observer.host().data_src.is_empty());
    assert!(observer.host().has_class(id, "loading"));
    assert!(!observer.host().is_observed(MediaKind::Embed, id));

    observer.handle(ObserverEvent::MediaSettled {
        id,
        outcome: FetchOutcome::Loaded,
    });
    assert!(!observer.host().has_class(id, "loading"));
    assert!(observer.host().has_class(id, "loaded"));
    assert_eq!(observer.state(id), LoadState::Loaded);
}

#[test]
fn test_media_without_deferred_source_is_noop() {
    let mut host = FakeHost::with_images(0);
    let id = host.add_media(5);
    host.data_src.clear();
    let mut observer = make_observer(host);

    observer.load_media(id);
    assert!(observer.host().attached.is_empty());
    assert!(observer.host().classes.is_empty());
}

#[test]
fn test_media_error_adds_class() {
    let mut host = FakeHost::with_images(0);
    let id = host.add_media(5);
    let mut observer = make_observer(host);

    observer.load_media(id);
    observer.handle(ObserverEvent::MediaSettled {
        id,
        outcome: FetchOutcome::Failed,
    });
    assert!(observer.host().has_class(id, "error"));
    assert_eq!(observer.state(id), LoadState::Error);
}

// ─────────────────────────────────────────────────────────────────────────────
// Fallback, late images, stats, teardown
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_without_intersection_support_everything_loads_eagerly() {
    let mut host = FakeHost::with_images(3);
    host.supported = false;
    host.add_media(10);
    host.add_media(11);
    let observer = make_observer(host);

    let host = observer.host();
    assert!(host.connected.is_empty());
    assert!(host.observed.is_empty());
    assert_eq!(host.fetches.len(), 3);
    assert_eq!(host.attached.len(), 2);
    for n in 0..3 {
        assert_eq!(observer.state(ElementId(n)), LoadState::Loading);
    }
}

#[test]
fn test_eager_failures_are_independent() {
    let mut host = FakeHost::with_images(2);
    host.supported = false;
    let mut observer = make_observer(host);

    observer.handle(fetched(ElementId(0), FetchOutcome::Failed));
    observer.handle(fetched(ElementId(1), FetchOutcome::Loaded));
    assert_eq!(observer.state(ElementId(0)), LoadState::Error);
    assert_eq!(observer.state(ElementId(1)), LoadState::Loaded);
}

#[test]
fn test_observe_new_images_skips_unmarked() {
    let mut observer = make_observer(FakeHost::with_images(1));
    let late = observer.host_mut().add_image(7);
    let unmarked = ElementId(8);

    observer.observe_new_images(&[late, unmarked]);
    assert!(observer.host().is_observed(MediaKind::Image, late));
    assert!(!observer.host().is_observed(MediaKind::Image, unmarked));
    assert_eq!(observer.state(late), LoadState::Pending);
    assert_eq!(observer.state(unmarked), LoadState::Unobserved);
}

#[test]
fn test_observe_new_images_ignored_without_observer() {
    let mut host = FakeHost::with_images(0);
    host.supported = false;
    let mut observer = make_observer(host);
    let late = observer.host_mut().add_image(3);

    observer.observe_new_images(&[late]);
    assert!(observer.host().observed.is_empty());
}

#[test]
fn test_stats() {
    let observer = make_observer(FakeHost::with_images(0));
    assert_eq!(
        observer.stats(),
        LoadStats {
            total: 0,
            loaded: 0,
            progress: 100
        }
    );

    let mut observer = make_observer(FakeHost::with_images(4));
    observer.handle(intersect(MediaKind::Image, &[ElementId(2)]));
    observer.handle(fetched(ElementId(2), FetchOutcome::Loaded));
    assert_eq!(observer.stats(), LoadStats::new(4, 1));
    assert_eq!(observer.stats().progress, 25);
}

#[test]
fn test_destroy_stops_automatic_loads() {
    let mut host = FakeHost::with_images(2);
    host.add_media(10);
    let mut observer = make_observer(host);

    observer.handle(intersect(MediaKind::Image, &[ElementId(0)]));
    observer.handle(fetched(ElementId(0), FetchOutcome::Loaded));
    observer.destroy();

    let mut disconnected = observer.host().disconnected.clone();
    disconnected.sort();
    assert_eq!(disconnected, vec![MediaKind::Image, MediaKind::Embed]);
    assert_eq!(observer.stats().loaded, 0);

    observer.handle(intersect(MediaKind::Image, &[ElementId(1)]));
    observer.handle(intersect(MediaKind::Embed, &[ElementId(10)]));
    assert_eq!(observer.host().fetches.len(), 1);
    assert!(observer.host().attached.is_empty());
}

#[test]
fn test_in_flight_fetch_settles_after_destroy() {
    let mut observer = make_observer(FakeHost::with_images(1));
    observer.handle(intersect(MediaKind::Image, &[ElementId(0)]));
    observer.destroy();
    observer.handle(fetched(ElementId(0), FetchOutcome::Loaded));

    assert!(observer.host().has_class(ElementId(0), "loaded"));
    assert_eq!(observer.stats().loaded, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Progressive loads, placeholders, preload hints
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_progressive_load_sequence() {
    let mut observer = make_observer(FakeHost::with_images(0));
    let id = ElementId(3);

    observer.progressive_load(id, "low.jpg", Some("high.jpg"));
    assert_eq!(
        observer.host().fetches,
        vec![(id, "low.jpg".to_string(), FetchPurpose::ProgressiveLow)]
    );

    observer.handle(ObserverEvent::ImageFetched {
        id,
        purpose: FetchPurpose::ProgressiveLow,
        outcome: FetchOutcome::Loaded,
    });
    assert_eq!(observer.host().sources.get(&id).map(String::as_str), Some("low.jpg"));
    assert_eq!(observer.host().blurs, vec![(id, 2.0, None)]);
    assert_eq!(observer.host().fetches.len(), 2);

    observer.handle(ObserverEvent::ImageFetched {
        id,
        purpose: FetchPurpose::ProgressiveHigh,
        outcome: FetchOutcome::Loaded,
    });
    assert_eq!(observer.host().sources.get(&id).map(String::as_str), Some("high.jpg"));
    assert_eq!(observer.host().blurs.last(), Some(&(id, 0.0, Some(0.5))));
}

#[test]
fn test_progressive_low_failure_stops() {
    let mut observer = make_observer(FakeHost::with_images(0));
    let id = ElementId(3);

    observer.progressive_load(id, "low.jpg", Some("high.jpg"));
    observer.handle(ObserverEvent::ImageFetched {
        id,
        purpose: FetchPurpose::ProgressiveLow,
        outcome: FetchOutcome::Failed,
    });
    assert_eq!(observer.host().fetches.len(), 1);
    assert!(observer.host().blurs.is_empty());
}

#[test]
fn test_placeholder_removed_on_load() {
    let mut observer = make_observer(FakeHost::with_images(1));
    let id = ElementId(0);

    observer.create_placeholder(id);
    assert!(observer.host().placeholders.contains(&id));

    observer.handle(intersect(MediaKind::Image, &[id]));
    observer.handle(fetched(id, FetchOutcome::Loaded));
    assert!(observer.host().placeholders.is_empty());
}

#[test]
fn test_preload_critical() {
    let mut observer = make_observer(FakeHost::with_images(0));
    observer.preload_critical(&["assets/images/avatar.jpg"]);
    assert_eq!(observer.host().preloads, vec!["assets/images/avatar.jpg"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Event channel
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_events_drain_through_channel() {
    let mut observer = make_observer(FakeHost::with_images(2));
    let (tx, mut rx) = event_channel();

    tx.send(intersect(MediaKind::Image, &[ElementId(0), ElementId(1)]))
        .unwrap();
    tx.send(fetched(ElementId(1), FetchOutcome::Loaded)).unwrap();
    tx.send(fetched(ElementId(0), FetchOutcome::Failed)).unwrap();
    drop(tx);

    while let Some(event) = rx.recv().await {
        observer.handle(event);
    }

    // Completions may arrive in any order
    assert_eq!(observer.state(ElementId(0)), LoadState::Error);
    assert_eq!(observer.state(ElementId(1)), LoadState::Loaded);
    assert_eq!(observer.stats(), LoadStats::new(2, 1));
}
