//! Small DOM helpers shared by components and hosts.

use wasm_bindgen::JsCast;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;

/// Set `obj[key] = value`, ignoring failures.
pub fn js_set(obj: &js_sys::Object, key: &str, value: &JsValue) {
    let _ = js_sys::Reflect::set(obj, &JsValue::from_str(key), value);
}

pub fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

pub fn body() -> Option<web_sys::HtmlElement> {
    document()?.body()
}

/// Evaluate a media query right now.
pub fn media_matches(query: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(query).ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// Live reduced-motion preference; never cached.
pub fn prefers_reduced_motion() -> bool {
    media_matches("(prefers-reduced-motion: reduce)")
}

pub fn element_by_id(id: &str) -> Option<web_sys::Element> {
    document()?.get_element_by_id(id)
}

pub fn html_element_by_id(id: &str) -> Option<web_sys::HtmlElement> {
    element_by_id(id)?.dyn_into().ok()
}

/// Set one inline style property, ignoring failures.
pub fn set_style(element: &web_sys::Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() {
        let _ = html.style().set_property(property, value);
    }
}

pub fn toggle_body_class(class: &str, on: bool) {
    if let Some(body) = body() {
        let list = body.class_list();
        let _ = if on {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
    }
}

/// Attach a listener for the lifetime of the page.
pub fn listen<E, F>(target: &web_sys::EventTarget, event: &str, handler: F)
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// [`listen`] with `passive: false`, for handlers that call
/// `prevent_default` on scroll-blocking events such as `wheel`.
pub fn listen_active<E, F>(target: &web_sys::EventTarget, event: &str, handler: F)
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(false);
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let _ = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    );
    closure.forget();
}

/// Dispatch a `CustomEvent` carrying a serializable `detail`.
pub fn dispatch_custom<T: serde::Serialize>(target: &web_sys::EventTarget, name: &str, detail: &T) {
    let init = web_sys::CustomEventInit::new();
    init.set_detail(&serde_wasm_bindgen::to_value(detail).unwrap_or(JsValue::NULL));
    if let Ok(event) = web_sys::CustomEvent::new_with_event_init_dict(name, &init) {
        let _ = target.dispatch_event(&event);
    }
}

/// Smooth scroll to an element, instant under reduced motion.
pub fn scroll_to_element(element: &web_sys::Element) {
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(if prefers_reduced_motion() {
        web_sys::ScrollBehavior::Instant
    } else {
        web_sys::ScrollBehavior::Smooth
    });
    options.set_block(web_sys::ScrollLogicalPosition::Start);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}
