//! Scroll-triggered entrance animations for the content sections.
//!
//! Each [`Reveal`] describes a `gsap.from` tween bound to a ScrollTrigger.
//! The app resolves the selectors inside the section root and plays them.

use crate::bootstrap::Section;

/// ScrollTrigger `toggleActions` shared by every reveal: play on enter,
/// reverse when scrolled back above the start.
pub const TOGGLE_ACTIONS: &str = "play none none reverse";

/// One staggered entrance animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    /// Animated elements, relative to the section root.
    pub targets: &'static str,
    /// Element whose position starts the tween; the section root when `None`.
    pub trigger: Option<&'static str>,
    /// ScrollTrigger `start`, e.g. `"top 80%"`.
    pub start: &'static str,
    /// Values the elements animate from.
    pub from: &'static [(&'static str, f64)],
    pub duration: f64,
    /// Delay added per element, in document order.
    pub stagger: f64,
    pub ease: &'static str,
}

impl Reveal {
    /// Delay of the `index`th matched element.
    pub fn delay_for(&self, index: usize) -> f64 {
        self.stagger * index as f64
    }
}

/// Scroll-linked vertical drift (`scrub`), played across the section's
/// whole pass through the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    pub targets: &'static str,
    pub y: f64,
    pub start: &'static str,
    pub end: &'static str,
    /// Seconds the tween lags behind the scroll position.
    pub scrub: f64,
}

const TITLE: Reveal = Reveal {
    targets: ".section-title",
    trigger: Some(".section-title"),
    start: "top 80%",
    from: &[("opacity", 0.0), ("y", 50.0), ("scale", 0.9)],
    duration: 0.8,
    stagger: 0.0,
    ease: "power2.out",
};

const ABOUT: [Reveal; 4] = [
    TITLE,
    Reveal {
        targets: ".about-avatar",
        trigger: None,
        start: "top 80%",
        from: &[("opacity", 0.0), ("scale", 0.8), ("x", -100.0), ("rotation", -10.0)],
        duration: 1.2,
        stagger: 0.0,
        ease: "back.out(1.7)",
    },
    Reveal {
        targets: ".about-text",
        trigger: None,
        start: "top 70%",
        from: &[("opacity", 0.0), ("y", 50.0), ("scale", 0.9)],
        duration: 0.8,
        stagger: 0.2,
        ease: "power2.out",
    },
    Reveal {
        targets: ".skill-tag",
        trigger: Some(".skills"),
        start: "top 80%",
        from: &[("opacity", 0.0), ("scale", 0.0), ("rotation", 180.0)],
        duration: 0.6,
        stagger: 0.1,
        ease: "back.out(1.7)",
    },
];

const PROJECTS: [Reveal; 2] = [
    TITLE,
    Reveal {
        targets: ".project-card",
        trigger: Some(".projects-grid"),
        start: "top 80%",
        from: &[("opacity", 0.0), ("y", 100.0), ("scale", 0.8), ("rotation", 5.0)],
        duration: 0.8,
        stagger: 0.15,
        ease: "back.out(1.7)",
    },
];

const CONTACT: [Reveal; 3] = [
    TITLE,
    Reveal {
        targets: ".form-group",
        trigger: Some(".contact-form"),
        start: "top 80%",
        from: &[("opacity", 0.0), ("y", 30.0), ("scale", 0.95)],
        duration: 0.6,
        stagger: 0.1,
        ease: "power2.out",
    },
    Reveal {
        targets: "button[type=\"submit\"]",
        trigger: Some("button[type=\"submit\"]"),
        start: "top 90%",
        from: &[("opacity", 0.0), ("y", 20.0), ("scale", 0.9)],
        duration: 0.6,
        stagger: 0.0,
        ease: "back.out(1.7)",
    },
];

/// Entrance animations of a section, in play order.
pub fn section_reveals(section: Section) -> &'static [Reveal] {
    match section {
        Section::About => &ABOUT,
        Section::Projects => &PROJECTS,
        Section::Contact => &CONTACT,
        Section::Theme | Section::Hero | Section::Cursor => &[],
    }
}

/// The avatar floats upward as the about section scrolls past.
pub const AVATAR_DRIFT: Drift = Drift {
    targets: ".about-avatar",
    y: -50.0,
    start: "top bottom",
    end: "bottom top",
    scrub: 1.0,
};
