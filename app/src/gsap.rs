//! Thin wrappers over the page's global `gsap` object.
//!
//! GSAP is loaded from a `<script>` tag and may be missing. Every call
//! degrades to setting the final state directly (and running the completion
//! callback on a timer) when it is.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::utils::js_set;

// ─────────────────────────────────────────────────────────────────────────────
// Tween Variables
// ─────────────────────────────────────────────────────────────────────────────

/// Builder for a GSAP vars object.
pub struct Tween {
    vars: js_sys::Object,
    duration_ms: u32,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Tween {
    pub fn new() -> Self {
        Self {
            vars: js_sys::Object::new(),
            duration_ms: 0,
            on_complete: None,
        }
    }

    pub fn num(self, key: &str, value: f64) -> Self {
        js_set(&self.vars, key, &JsValue::from_f64(value));
        self
    }

    pub fn text(self, key: &str, value: &str) -> Self {
        js_set(&self.vars, key, &JsValue::from_str(value));
        self
    }

    pub fn flag(self, key: &str, value: bool) -> Self {
        js_set(&self.vars, key, &JsValue::from_bool(value));
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration_ms = (secs.max(0.0) * 1000.0) as u32;
        self.num("duration", secs)
    }

    pub fn delay(self, secs: f64) -> Self {
        self.num("delay", secs)
    }

    pub fn ease(self, ease: &str) -> Self {
        self.text("ease", ease)
    }

    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    /// Bind the tween to a ScrollTrigger instead of playing it right away.
    pub fn scroll_trigger(self, trigger: ScrollTrigger) -> Self {
        js_set(&self.vars, "scrollTrigger", &trigger.vars);
        self
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for a `scrollTrigger` vars object.
pub struct ScrollTrigger {
    vars: js_sys::Object,
}

impl ScrollTrigger {
    pub fn new(trigger: &web_sys::Element) -> Self {
        let vars = js_sys::Object::new();
        js_set(&vars, "trigger", trigger);
        Self { vars }
    }

    pub fn start(self, position: &str) -> Self {
        js_set(&self.vars, "start", &JsValue::from_str(position));
        self
    }

    pub fn end(self, position: &str) -> Self {
        js_set(&self.vars, "end", &JsValue::from_str(position));
        self
    }

    pub fn toggle_actions(self, actions: &str) -> Self {
        js_set(&self.vars, "toggleActions", &JsValue::from_str(actions));
        self
    }

    /// Tie progress to the scroll position, lagging by `secs`.
    pub fn scrub(self, secs: f64) -> Self {
        js_set(&self.vars, "scrub", &JsValue::from_f64(secs));
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// GSAP Lookup
// ─────────────────────────────────────────────────────────────────────────────

fn gsap() -> Option<JsValue> {
    global("gsap")
}

fn global(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;
    (!value.is_undefined() && !value.is_null()).then_some(value)
}

fn method(target: &JsValue, name: &str) -> Option<js_sys::Function> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
}

pub fn is_available() -> bool {
    gsap().is_some()
}

/// Register the `ScrollTrigger` and `ScrollToPlugin` globals with GSAP.
///
/// Returns whether scroll-triggered tweens will work.
pub fn register_plugins() -> bool {
    let Some(gsap) = gsap() else { return false };
    let Some(register) = method(&gsap, "registerPlugin") else {
        return false;
    };
    let mut triggers = false;
    for name in ["ScrollTrigger", "ScrollToPlugin"] {
        match global(name) {
            Some(plugin) => match register.call1(&gsap, &plugin) {
                Ok(_) => triggers |= name == "ScrollTrigger",
                Err(e) => tracing::warn!(error = ?e, plugin = name, "GSAP plugin registration failed"),
            },
            None => tracing::debug!(plugin = name, "GSAP plugin not loaded"),
        }
    }
    triggers
}

/// Whether tweens carrying a `scrollTrigger` will wait for the scroll
/// position instead of playing at once.
pub fn scroll_triggers_available() -> bool {
    gsap().is_some() && global("ScrollTrigger").is_some()
}

/// Recompute every ScrollTrigger's start and end after layout changes.
pub fn refresh_scroll_triggers() {
    if let Some(plugin) = global("ScrollTrigger")
        && let Some(func) = method(&plugin, "refresh")
    {
        let _ = func.call0(&plugin);
    }
}

/// Copy numeric/string vars straight onto the element's inline style.
fn apply_directly(target: &web_sys::Element, vars: &js_sys::Object) {
    let Some(html) = target.dyn_ref::<web_sys::HtmlElement>() else {
        return;
    };
    let style = html.style();
    for key in js_sys::Object::keys(vars).iter() {
        let Some(key) = key.as_string() else { continue };
        let Ok(value) = js_sys::Reflect::get(vars, &JsValue::from_str(&key)) else {
            continue;
        };
        let css = match key.as_str() {
            "duration" | "delay" | "ease" | "stagger" => continue,
            "x" => ("transform", format!("translateX({}px)", value.as_f64().unwrap_or(0.0))),
            "y" => ("transform", format!("translateY({}px)", value.as_f64().unwrap_or(0.0))),
            "scale" => ("transform", format!("scale({})", value.as_f64().unwrap_or(1.0))),
            "opacity" => ("opacity", value.as_f64().unwrap_or(1.0).to_string()),
            "filter" => ("filter", value.as_string().unwrap_or_default()),
            _ => continue,
        };
        let _ = style.set_property(css.0, &css.1);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tween Calls
// ─────────────────────────────────────────────────────────────────────────────

fn call(name: &str, target: &web_sys::Element, tween: Tween) {
    let Tween {
        vars,
        duration_ms,
        on_complete,
    } = tween;

    match gsap().and_then(|g| method(&g, name).map(|f| (g, f))) {
        Some((gsap, func)) => {
            if let Some(f) = on_complete {
                js_set(&vars, "onComplete", &Closure::once_into_js(f));
            }
            if let Err(e) = func.call2(&gsap, target, &vars) {
                tracing::warn!(error = ?e, tween = name, "GSAP call failed");
            }
        }
        None => {
            apply_directly(target, &vars);
            if let Some(f) = on_complete {
                Timeout::new(duration_ms, f).forget();
            }
        }
    }
}

/// `gsap.to(target, vars)`.
pub fn to(target: &web_sys::Element, tween: Tween) {
    call("to", target, tween);
}

/// `gsap.from(target, vars)`. Without GSAP the element is left at its
/// natural state.
pub fn from(target: &web_sys::Element, tween: Tween) {
    if is_available() {
        call("from", target, tween);
    } else if let Some(f) = tween.on_complete {
        f();
    }
}

/// `gsap.set(target, vars)`.
pub fn set(target: &web_sys::Element, tween: Tween) {
    call("set", target, tween);
}

/// Animate the window scroll offset to `y`.
///
/// Needs `ScrollToPlugin`; without it the browser's native smooth scroll
/// runs and `on_complete` fires after `secs`.
pub fn scroll_window_to(y: f64, secs: f64, ease: &str, on_complete: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else { return };

    if let Some(gsap) = gsap()
        && global("ScrollToPlugin").is_some()
        && let Some(func) = method(&gsap, "to")
    {
        let scroll_to = js_sys::Object::new();
        js_set(&scroll_to, "y", &JsValue::from_f64(y));
        js_set(&scroll_to, "autoKill", &JsValue::TRUE);
        let vars = Tween::new().duration(secs).ease(ease).vars;
        js_set(&vars, "scrollTo", &scroll_to);
        js_set(&vars, "onComplete", &Closure::once_into_js(on_complete));
        if let Err(e) = func.call2(&gsap, &window, &vars) {
            tracing::warn!(error = ?e, "GSAP window scroll failed");
        }
        return;
    }

    let options = web_sys::ScrollToOptions::new();
    options.set_top(y);
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
    Timeout::new((secs.max(0.0) * 1000.0) as u32, on_complete).forget();
}

pub fn kill_tweens_of(target: &web_sys::Element) {
    if let Some(gsap) = gsap()
        && let Some(func) = method(&gsap, "killTweensOf")
    {
        let _ = func.call1(&gsap, target);
    }
}

fn global_timeline(name: &str) {
    if let Some(gsap) = gsap()
        && let Ok(timeline) = js_sys::Reflect::get(&gsap, &JsValue::from_str("globalTimeline"))
        && let Some(func) = method(&timeline, name)
    {
        let _ = func.call0(&timeline);
    }
}

/// Pause every running animation (page hidden).
pub fn pause_all() {
    global_timeline("pause");
}

pub fn resume_all() {
    global_timeline("resume");
}
