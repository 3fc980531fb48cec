use std::collections::HashMap;

use folio_core::observer::{
    ElementId, EventSender, FetchOutcome, FetchPurpose, IntersectionEntry, MediaHost,
    ObserverEvent, WatchOptions,
};
use folio_types::MediaKind;
use folio_types::formatting::format_px;
use serde::Serialize;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::gsap::{self, Tween};
use crate::utils::{self, dispatch_custom, set_style};

const ID_ATTR: &str = "data-lazy-id";
const DEFERRED_IMAGES: &str = r#"img[loading="lazy"]"#;
const DEFERRED_MEDIA: &str = "video[data-src], iframe[data-src]";
const PLACEHOLDER_CLASS: &str = "image-placeholder";

type IntersectionCallback = Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>;

#[derive(Serialize)]
struct LoadedDetail<'a> {
    src: &'a str,
}

struct Watcher {
    observer: web_sys::IntersectionObserver,
    // Held so the JS callback stays valid while observing
    _callback: IntersectionCallback,
}

/// [`MediaHost`] over the live document.
///
/// Elements are tagged with `data-lazy-id` the first time they are seen so
/// intersection callbacks can be mapped back to an [`ElementId`].
pub struct DomMediaHost {
    events: EventSender,
    elements: HashMap<ElementId, web_sys::Element>,
    watchers: HashMap<MediaKind, Watcher>,
    placeholders: HashMap<ElementId, web_sys::Element>,
    next_id: u32,
}

impl DomMediaHost {
    pub fn new(events: EventSender) -> Self {
        Self {
            events,
            elements: HashMap::new(),
            watchers: HashMap::new(),
            placeholders: HashMap::new(),
            next_id: 0,
        }
    }

    /// Id for `element`, tagging it on first sight.
    pub fn register(&mut self, element: web_sys::Element) -> ElementId {
        if let Some(id) = read_id(&element)
            && self.elements.contains_key(&id)
        {
            return id;
        }
        let id = ElementId(self.next_id);
        self.next_id += 1;
        let _ = element.set_attribute(ID_ATTR, &id.0.to_string());
        self.elements.insert(id, element);
        id
    }

    fn send(&self, event: ObserverEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("Observer event dropped, loader is gone");
        }
    }
}

fn read_id(element: &web_sys::Element) -> Option<ElementId> {
    element
        .get_attribute(ID_ATTR)
        .and_then(|raw| raw.parse().ok())
        .map(ElementId)
}

fn query_all(selector: &str) -> Vec<web_sys::Element> {
    let Some(list) = utils::document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

/// Report one native load/error of a media element, whichever fires first.
fn listen_once(element: &web_sys::Element, event: &str, id: ElementId, outcome: FetchOutcome, tx: EventSender) {
    let options = web_sys::AddEventListenerOptions::new();
    options.set_once(true);
    let callback = Closure::once_into_js(move || {
        let _ = tx.send(ObserverEvent::MediaSettled { id, outcome });
    });
    let _ = element.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        callback.unchecked_ref(),
        &options,
    );
}

impl MediaHost for DomMediaHost {
    fn intersection_supported(&self) -> bool {
        web_sys::window()
            .map(|w| js_sys::Reflect::has(&w, &JsValue::from_str("IntersectionObserver")).unwrap_or(false))
            .unwrap_or(false)
    }

    fn scan(&mut self, kind: MediaKind) -> Vec<ElementId> {
        let selector = match kind {
            MediaKind::Image => DEFERRED_IMAGES,
            MediaKind::Embed => DEFERRED_MEDIA,
        };
        query_all(selector)
            .into_iter()
            .map(|element| self.register(element))
            .collect()
    }

    fn deferred_image_count(&self) -> usize {
        query_all(DEFERRED_IMAGES).len()
    }

    fn is_deferred_image(&self, id: ElementId) -> bool {
        self.elements
            .get(&id)
            .is_some_and(|el| el.matches(DEFERRED_IMAGES).unwrap_or(false))
    }

    fn connect(&mut self, kind: MediaKind, options: &WatchOptions) {
        let tx = self.events.clone();
        let callback: IntersectionCallback = Closure::new(
            move |entries: js_sys::Array, _observer: web_sys::IntersectionObserver| {
                let entries = entries
                    .iter()
                    .filter_map(|e| e.dyn_into::<web_sys::IntersectionObserverEntry>().ok())
                    .filter_map(|e| {
                        read_id(&e.target()).map(|id| IntersectionEntry {
                            id,
                            is_intersecting: e.is_intersecting(),
                        })
                    })
                    .collect();
                let _ = tx.send(ObserverEvent::Intersection { kind, entries });
            },
        );

        let init = web_sys::IntersectionObserverInit::new();
        init.set_root_margin(&options.root_margin);
        init.set_threshold(&JsValue::from_f64(options.threshold));

        match web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                if let Some(previous) = self.watchers.insert(
                    kind,
                    Watcher {
                        observer,
                        _callback: callback,
                    },
                ) {
                    previous.observer.disconnect();
                }
            }
            Err(e) => tracing::warn!(error = ?e, ?kind, "Failed to create IntersectionObserver"),
        }
    }

    fn observe(&mut self, kind: MediaKind, id: ElementId) {
        if let (Some(watcher), Some(element)) = (self.watchers.get(&kind), self.elements.get(&id)) {
            watcher.observer.observe(element);
        }
    }

    fn unobserve(&mut self, kind: MediaKind, id: ElementId) {
        if let (Some(watcher), Some(element)) = (self.watchers.get(&kind), self.elements.get(&id)) {
            watcher.observer.unobserve(element);
        }
    }

    fn disconnect(&mut self, kind: MediaKind) {
        if let Some(watcher) = self.watchers.remove(&kind) {
            watcher.observer.disconnect();
        }
    }

    fn image_source(&self, id: ElementId) -> Option<String> {
        let element = self.elements.get(&id)?;
        element
            .dyn_ref::<web_sys::HtmlImageElement>()
            .map(|img| img.src())
            .or_else(|| element.get_attribute("src"))
            .filter(|src| !src.is_empty())
    }

    fn fetch_image(&mut self, id: ElementId, src: &str, purpose: FetchPurpose) {
        let Ok(image) = web_sys::HtmlImageElement::new() else {
            self.send(ObserverEvent::ImageFetched {
                id,
                purpose,
                outcome: FetchOutcome::Failed,
            });
            return;
        };

        let tx = self.events.clone();
        let onload = Closure::once_into_js(move || {
            let _ = tx.send(ObserverEvent::ImageFetched {
                id,
                purpose,
                outcome: FetchOutcome::Loaded,
            });
        });
        let tx = self.events.clone();
        let onerror = Closure::once_into_js(move || {
            let _ = tx.send(ObserverEvent::ImageFetched {
                id,
                purpose,
                outcome: FetchOutcome::Failed,
            });
        });

        image.set_onload(Some(onload.unchecked_ref()));
        image.set_onerror(Some(onerror.unchecked_ref()));
        image.set_src(src);
    }

    fn take_deferred_source(&mut self, id: ElementId) -> Option<String> {
        let element = self.elements.get(&id)?;
        let src = element.get_attribute("data-src")?;
        let _ = element.remove_attribute("data-src");
        Some(src)
    }

    fn attach_media_source(&mut self, id: ElementId, src: &str) {
        let Some(element) = self.elements.get(&id) else {
            return;
        };
        // Videos never fire `load`; their first frame is the equivalent
        let ready = if element.tag_name().eq_ignore_ascii_case("video") {
            "loadeddata"
        } else {
            "load"
        };
        listen_once(element, ready, id, FetchOutcome::Loaded, self.events.clone());
        listen_once(element, "error", id, FetchOutcome::Failed, self.events.clone());
        let _ = element.set_attribute("src", src);
    }

    fn set_image_source(&mut self, id: ElementId, src: &str) {
        if let Some(element) = self.elements.get(&id) {
            let _ = element.set_attribute("src", src);
        }
    }

    fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get(&id) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get(&id) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn prefers_reduced_motion(&self) -> bool {
        utils::prefers_reduced_motion()
    }

    fn fade_in(&mut self, id: ElementId, secs: f64) {
        if let Some(element) = self.elements.get(&id) {
            gsap::set(element, Tween::new().num("opacity", 0.0));
            gsap::to(
                element,
                Tween::new().num("opacity", 1.0).duration(secs).ease("power2.out"),
            );
        }
    }

    fn set_blur(&mut self, id: ElementId, px: f64, secs: Option<f64>) {
        let Some(element) = self.elements.get(&id) else {
            return;
        };
        let filter = format!("blur({})", format_px(px));
        match secs {
            Some(secs) => gsap::to(element, Tween::new().text("filter", &filter).duration(secs)),
            None => set_style(element, "filter", &filter),
        }
    }

    fn dispatch_loaded(&mut self, id: ElementId, src: &str) {
        if let Some(element) = self.elements.get(&id) {
            dispatch_custom(element, "imageloaded", &LoadedDetail { src });
        }
    }

    fn insert_placeholder(&mut self, id: ElementId) {
        let Some(element) = self.elements.get(&id) else {
            return;
        };
        let (Some(document), Some(parent)) = (utils::document(), element.parent_node()) else {
            return;
        };
        let Ok(placeholder) = document.create_element("div") else {
            return;
        };
        placeholder.set_class_name(PLACEHOLDER_CLASS);
        let _ = placeholder.set_attribute("aria-hidden", "true");
        if let Some(img) = element.dyn_ref::<web_sys::HtmlElement>() {
            set_style(&placeholder, "width", &format_px(img.offset_width() as f64));
            set_style(&placeholder, "height", &format_px(img.offset_height() as f64));
        }
        let anchor: &web_sys::Node = element;
        let _ = parent.insert_before(&placeholder, Some(anchor));
        self.placeholders.insert(id, placeholder);
    }

    fn remove_placeholder(&mut self, id: ElementId) {
        if let Some(placeholder) = self.placeholders.remove(&id) {
            placeholder.remove();
        }
    }

    fn preload_hint(&mut self, src: &str) {
        let Some(document) = utils::document() else {
            return;
        };
        let (Some(head), Ok(link)) = (document.head(), document.create_element("link")) else {
            return;
        };
        let _ = link.set_attribute("rel", "preload");
        let _ = link.set_attribute("as", "image");
        let _ = link.set_attribute("href", src);
        let _ = head.append_child(&link);
    }
}
