//! Page bootstrap order and page-wide behavior flags.

/// Page modules, in the order they are constructed once the preloader
/// gate opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Theme,
    Hero,
    About,
    Projects,
    Contact,
    Cursor,
}

pub const BOOT_ORDER: [Section; 6] = [
    Section::Theme,
    Section::Hero,
    Section::About,
    Section::Projects,
    Section::Contact,
    Section::Cursor,
];

impl Section {
    /// Anchor id for sections that have one.
    pub fn anchor(self) -> Option<&'static str> {
        match self {
            Section::Hero => Some("hero"),
            Section::About => Some("about"),
            Section::Projects => Some("projects"),
            Section::Contact => Some("contact"),
            Section::Theme | Section::Cursor => None,
        }
    }
}

/// Body class that disables scripted animation.
pub const NO_ANIMATION_CLASS: &str = "no-js-animations";
pub const KEYBOARD_NAV_CLASS: &str = "keyboard-navigation";
pub const PRINT_MODE_CLASS: &str = "print-mode";

/// Whether a window error message came from the animation library.
pub fn is_animation_error(message: &str) -> bool {
    message.contains("gsap") || message.contains("ScrollTrigger")
}

/// Whether a key press should turn on focus indicators.
pub fn is_keyboard_navigation(key: &str) -> bool {
    key == "Tab"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_order_starts_with_theme_and_ends_with_cursor() {
        assert_eq!(BOOT_ORDER.first(), Some(&Section::Theme));
        assert_eq!(BOOT_ORDER.last(), Some(&Section::Cursor));
        let anchors: Vec<_> = BOOT_ORDER.iter().filter_map(|s| s.anchor()).collect();
        assert_eq!(anchors, vec!["hero", "about", "projects", "contact"]);
    }

    #[test]
    fn test_animation_error_detection() {
        assert!(is_animation_error("gsap is not defined"));
        assert!(is_animation_error("ScrollTrigger: missing trigger"));
        assert!(!is_animation_error("TypeError: x is undefined"));
    }
}
