//! Scroll progress and section navigation.

/// Page scroll geometry at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    /// Percentage scrolled, clamped to `[0, 100]`. A page that cannot
    /// scroll reports 0.
    pub fn progress_percent(&self) -> f64 {
        let range = self.scroll_height - self.viewport_height;
        if range <= 0.0 {
            return 0.0;
        }
        (self.scroll_y / range * 100.0).clamp(0.0, 100.0)
    }
}

/// Keyboard navigation intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollIntent {
    Next,
    Previous,
    Top,
    Bottom,
}

impl ScrollIntent {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "PageDown" | "ArrowDown" | " " => Some(ScrollIntent::Next),
            "PageUp" | "ArrowUp" => Some(ScrollIntent::Previous),
            "Home" => Some(ScrollIntent::Top),
            "End" => Some(ScrollIntent::Bottom),
            _ => None,
        }
    }
}

/// Index of the section containing the viewport midpoint.
///
/// `offsets` are the section tops in document order.
pub fn current_section(offsets: &[f64], scroll_y: f64, viewport_height: f64) -> Option<usize> {
    if offsets.is_empty() {
        return None;
    }
    let midpoint = scroll_y + viewport_height / 2.0;
    Some(offsets.iter().rposition(|&top| top <= midpoint).unwrap_or(0))
}

/// Section index to scroll to for an intent.
pub fn target_section(intent: ScrollIntent, current: usize, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let last = count - 1;
    let target = match intent {
        ScrollIntent::Next => (current + 1).min(last),
        ScrollIntent::Previous => current.saturating_sub(1),
        ScrollIntent::Top => 0,
        ScrollIntent::Bottom => last,
    };
    Some(target)
}

/// Section id an in-page link points at (`"#about"` → `"about"`).
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Share of the wheel delta turned into animated scroll distance.
pub const WHEEL_FACTOR: f64 = 0.5;
/// Animated wheel scroll length in seconds.
pub const WHEEL_SCROLL_SECS: f64 = 0.8;
/// A wheel scroll stops swallowing input after this long even if its
/// animation is still running.
pub const WHEEL_RELEASE_MS: u32 = 100;

/// Wheel-driven smooth scrolling.
///
/// One animated scroll runs at a time. Wheel samples that arrive while it
/// runs are left to the browser.
#[derive(Debug, Default)]
pub struct WheelScroll {
    scrolling: bool,
}

impl WheelScroll {
    /// Scroll offset to animate to for a wheel sample, or `None` while a
    /// scroll is already running.
    pub fn begin(&mut self, scroll_y: f64, delta_y: f64) -> Option<f64> {
        if self.scrolling {
            return None;
        }
        self.scrolling = true;
        Some((scroll_y + delta_y * WHEEL_FACTOR).max(0.0))
    }

    /// Animation finished or the release timer fired.
    pub fn release(&mut self) {
        self.scrolling = false;
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }
}
