//! Theme preference handling.
//!
//! The controller owns the current theme and persists every change through a
//! [`PreferenceStore`]. Applying the theme to the document is the caller's
//! job; each change is described by a [`ThemeChange`].

use folio_types::Theme;
use hashbrown::HashMap;

/// String key/value persistence (browser `localStorage` in the app).
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, used when browser storage is unavailable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// What the document needs to do for a theme change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeChange {
    pub previous: Theme,
    pub theme: Theme,
    /// Run the overlay transition instead of switching instantly.
    pub animate: bool,
}

impl ThemeChange {
    /// Label for the toggle button after this change.
    pub fn aria_label(&self) -> String {
        format!("Switch to {} theme", self.theme.opposite())
    }
}

pub struct ThemeController<S: PreferenceStore> {
    store: S,
    key: String,
    current: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Start from the stored preference, or light when there is none or it
    /// is unreadable.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let current = match store.get(&key) {
            Some(value) => value.parse().unwrap_or_else(|bad: String| {
                tracing::warn!(value = %bad, "Ignoring unknown stored theme");
                Theme::default()
            }),
            None => Theme::default(),
        };
        Self {
            store,
            key,
            current,
        }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_stored_preference(&self) -> bool {
        self.store.get(&self.key).is_some()
    }

    /// Change for the initial render. Not persisted, never animated.
    pub fn initial(&self) -> ThemeChange {
        ThemeChange {
            previous: self.current,
            theme: self.current,
            animate: false,
        }
    }

    /// Set and persist a theme. Animation is dropped under reduced motion.
    pub fn set(&mut self, theme: Theme, animate: bool, reduced_motion: bool) -> ThemeChange {
        let previous = self.current;
        self.current = theme;
        self.store.set(&self.key, theme.as_str());
        ThemeChange {
            previous,
            theme,
            animate: animate && !reduced_motion,
        }
    }

    pub fn toggle(&mut self, reduced_motion: bool) -> ThemeChange {
        self.set(self.current.opposite(), true, reduced_motion)
    }

    /// Follow an OS color scheme change, unless the user picked a theme.
    pub fn system_changed(&mut self, prefers_dark: bool, reduced_motion: bool) -> Option<ThemeChange> {
        if self.has_stored_preference() {
            return None;
        }
        let theme = if prefers_dark { Theme::Dark } else { Theme::Light };
        Some(self.set(theme, true, reduced_motion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "portfolio-theme";

    fn store_with(value: &str) -> MemoryStore {
        let mut store = MemoryStore::default();
        store.set(KEY, value);
        store
    }

    #[test]
    fn test_memory_store_keeps_latest_value() {
        let mut store = store_with("dark");
        store.set(KEY, "light");
        assert_eq!(store.get(KEY).as_deref(), Some("light"));
        assert_eq!(store.get("other"), None);
    }

    #[test]
    fn test_defaults_to_light() {
        let controller = ThemeController::new(MemoryStore::default(), KEY);
        assert_eq!(controller.current(), Theme::Light);
        assert!(!controller.has_stored_preference());
    }

    #[test]
    fn test_reads_stored_theme() {
        let controller = ThemeController::new(store_with("dark"), KEY);
        assert_eq!(controller.current(), Theme::Dark);
        assert!(!controller.initial().animate);
    }

    #[test]
    fn test_unknown_stored_value_falls_back() {
        let controller = ThemeController::new(store_with("solarized"), KEY);
        assert_eq!(controller.current(), Theme::Light);
    }

    #[test]
    fn test_toggle_persists_and_animates() {
        let mut controller = ThemeController::new(MemoryStore::default(), KEY);
        let change = controller.toggle(false);

        assert_eq!(change.previous, Theme::Light);
        assert_eq!(change.theme, Theme::Dark);
        assert!(change.animate);
        assert_eq!(change.aria_label(), "Switch to light theme");
        assert_eq!(controller.store().get(KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_reduced_motion_disables_animation() {
        let mut controller = ThemeController::new(MemoryStore::default(), KEY);
        assert!(!controller.toggle(true).animate);
    }

    #[test]
    fn test_system_change_only_without_preference() {
        let mut controller = ThemeController::new(MemoryStore::default(), KEY);
        let change = controller.system_changed(true, false).unwrap();
        assert_eq!(change.theme, Theme::Dark);

        // The first change stored a preference, so later OS changes are ignored
        assert!(controller.system_changed(false, false).is_none());
        assert_eq!(controller.current(), Theme::Dark);
    }
}
