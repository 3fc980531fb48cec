use folio_core::particles::ParticleSurface;
use folio_types::formatting::format_px;
use wasm_bindgen::JsCast;

use crate::gsap::{self, Tween};
use crate::utils::set_style;

const PARTICLE_CLASS: &str = "particle";

/// [`ParticleSurface`] drawing `div.particle` children into the hero's
/// particle container.
///
/// Position is written to `left`/`top` so GSAP can own `transform` for the
/// fade-out scale. A handle is `None` when the element could not be created.
pub struct DomParticleSurface {
    document: web_sys::Document,
    container: web_sys::Element,
}

impl DomParticleSurface {
    pub fn new(document: web_sys::Document, container: web_sys::Element) -> Self {
        Self {
            document,
            container,
        }
    }
}

impl ParticleSurface for DomParticleSurface {
    type Handle = Option<web_sys::Element>;

    fn origin(&self) -> (f64, f64) {
        let rect = self.container.get_bounding_client_rect();
        (rect.left(), rect.top())
    }

    fn spawn(&mut self, x: f64, y: f64, size: f64) -> Self::Handle {
        let element = self.document.create_element("div").ok()?;
        element.set_class_name(PARTICLE_CLASS);
        set_style(&element, "width", &format_px(size));
        set_style(&element, "height", &format_px(size));
        set_style(&element, "left", &format_px(x));
        set_style(&element, "top", &format_px(y));
        self.container.append_child(&element).ok()?;
        Some(element)
    }

    fn fade_out(&mut self, handle: &Self::Handle, secs: f64) {
        let Some(element) = handle else { return };
        let target = element.clone();
        gsap::to(
            element,
            Tween::new()
                .num("opacity", 0.0)
                .num("scale", 0.0)
                .duration(secs)
                .ease("power2.out")
                .on_complete(move || {
                    // Resize or eviction may have detached it already
                    if target.is_connected() {
                        target.remove();
                    }
                }),
        );
    }

    fn translate(&mut self, handle: &Self::Handle, x: f64, y: f64) {
        if let Some(element) = handle {
            set_style(element, "left", &format_px(x));
            set_style(element, "top", &format_px(y));
        }
    }

    fn detach(&mut self, handle: &Self::Handle) {
        if let Some(element) = handle
            && element.is_connected()
        {
            gsap::kill_tweens_of(element);
            element.remove();
        }
    }

    fn release(&mut self) {
        let Ok(leftovers) = self.container.query_selector_all(".particle") else {
            return;
        };
        for node in (0..leftovers.length()).filter_map(|i| leftovers.item(i)) {
            if let Ok(element) = node.dyn_into::<web_sys::Element>() {
                gsap::kill_tweens_of(&element);
                element.remove();
            }
        }
    }
}
