//! Custom cursor follow and morph targets.

const RING_EASE: f64 = 0.1;
const DOT_LEAD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMorph {
    #[default]
    Default,
    /// Links, buttons, project cards
    Hover,
    /// Headings and body text
    Text,
    /// Form inputs
    Input,
}

/// Scale and border targets for one morph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphTarget {
    pub ring_scale_x: f64,
    pub ring_scale_y: f64,
    pub ring_border_px: f64,
    pub dot_scale: f64,
}

impl CursorMorph {
    pub fn target(self) -> MorphTarget {
        match self {
            CursorMorph::Hover => MorphTarget {
                ring_scale_x: 1.5,
                ring_scale_y: 1.5,
                ring_border_px: 1.0,
                dot_scale: 0.5,
            },
            CursorMorph::Text => MorphTarget {
                ring_scale_x: 0.8,
                ring_scale_y: 0.8,
                ring_border_px: 1.0,
                dot_scale: 1.2,
            },
            CursorMorph::Input => MorphTarget {
                ring_scale_x: 0.3,
                ring_scale_y: 1.2,
                ring_border_px: 2.0,
                dot_scale: 0.0,
            },
            CursorMorph::Default => MorphTarget {
                ring_scale_x: 1.0,
                ring_scale_y: 1.0,
                ring_border_px: 2.0,
                dot_scale: 1.0,
            },
        }
    }

    /// Morph for an element tag under the pointer, if it has one.
    pub fn for_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "a" | "button" => Some(CursorMorph::Hover),
            "input" | "textarea" => Some(CursorMorph::Input),
            "h1" | "h2" | "h3" | "p" | "span" => Some(CursorMorph::Text),
            _ => None,
        }
    }
}

/// Pointer-following ring and dot.
#[derive(Debug, Clone, Default)]
pub struct CursorState {
    pub mouse: (f64, f64),
    pub ring: (f64, f64),
    pub visible: bool,
    pub morph: CursorMorph,
}

impl CursorState {
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.mouse = (x, y);
        self.visible = true;
    }

    pub fn pointer_left(&mut self) {
        self.visible = false;
    }

    /// Ease the ring toward the pointer by one frame.
    pub fn step(&mut self) {
        self.ring.0 += (self.mouse.0 - self.ring.0) * RING_EASE;
        self.ring.1 += (self.mouse.1 - self.ring.1) * RING_EASE;
    }

    /// The dot leads the ring toward the pointer.
    pub fn dot(&self) -> (f64, f64) {
        (
            self.ring.0 + (self.mouse.0 - self.ring.0) * DOT_LEAD,
            self.ring.1 + (self.mouse.1 - self.ring.1) * DOT_LEAD,
        )
    }

    /// Switch morph. Returns the target to animate to, or `None` when
    /// nothing should move.
    pub fn morph_to(&mut self, morph: CursorMorph, reduced_motion: bool) -> Option<MorphTarget> {
        if reduced_motion || morph == self.morph {
            return None;
        }
        self.morph = morph;
        Some(morph.target())
    }
}
