//! Browser driver for the resource observer.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::observer::{ElementId, ImageLoaded, ResourceObserver, event_channel};
use folio_types::{LoadStats, ObserverConfig};
use tokio::sync::broadcast;
use wasm_bindgen_futures::spawn_local as spawn;

use crate::hosts::DomMediaHost;
use crate::utils;

type SharedObserver = Rc<RefCell<ResourceObserver<DomMediaHost>>>;

/// Shared handle to the page's [`ResourceObserver`].
///
/// Host callbacks are drained on a local task, so the observer is only ever
/// borrowed from the event loop, never re-entrantly from a DOM callback.
#[derive(Clone)]
pub struct LazyLoader {
    observer: SharedObserver,
}

impl LazyLoader {
    pub fn new(config: ObserverConfig) -> Self {
        let (tx, mut rx) = event_channel();
        let observer: SharedObserver = Rc::new(RefCell::new(ResourceObserver::new(
            DomMediaHost::new(tx),
            config,
        )));

        let driver = observer.clone();
        spawn(async move {
            while let Some(event) = rx.recv().await {
                match driver.try_borrow_mut() {
                    Ok(mut observer) => observer.handle(event),
                    Err(_) => tracing::warn!(?event, "Resource observer busy, event dropped"),
                }
            }
        });

        Self { observer }
    }

    /// Scan the mounted document. Call once the sections are rendered.
    pub fn initialize(&self, critical_images: &[String]) {
        if let Ok(mut observer) = self.observer.try_borrow_mut() {
            observer.preload_critical(critical_images);
            observer.initialize();
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ImageLoaded> {
        self.observer.borrow().subscribe()
    }

    fn register(&self, dom_id: &str) -> Option<ElementId> {
        let element = utils::element_by_id(dom_id)?;
        let mut observer = self.observer.try_borrow_mut().ok()?;
        Some(observer.host_mut().register(element))
    }

    /// Shimmer placeholder for the image with DOM id `dom_id`.
    pub fn create_placeholder(&self, dom_id: &str) {
        if let Some(id) = self.register(dom_id)
            && let Ok(mut observer) = self.observer.try_borrow_mut()
        {
            observer.create_placeholder(id);
        }
    }

    pub fn progressive_load(&self, dom_id: &str, low: &str, high: Option<&str>) {
        if let Some(id) = self.register(dom_id)
            && let Ok(mut observer) = self.observer.try_borrow_mut()
        {
            observer.progressive_load(id, low, high);
        }
    }

    /// Watch images inserted after [`initialize`](Self::initialize).
    pub fn observe_new_images(&self, dom_ids: &[&str]) {
        let ids: Vec<ElementId> = dom_ids.iter().filter_map(|id| self.register(id)).collect();
        if let Ok(mut observer) = self.observer.try_borrow_mut() {
            observer.observe_new_images(&ids);
        }
    }

    /// `None` while the observer is mid-update.
    pub fn stats(&self) -> Option<LoadStats> {
        match self.observer.try_borrow() {
            Ok(observer) => Some(observer.stats()),
            Err(_) => {
                tracing::debug!("Resource observer busy, stats unavailable");
                None
            }
        }
    }

    pub fn destroy(&self) {
        if let Ok(mut observer) = self.observer.try_borrow_mut() {
            observer.destroy();
        }
    }
}
