use serde::{Deserialize, Serialize};

/// Which observation instance watches an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// `img[loading="lazy"]`
    Image,
    /// `video[data-src]` / `iframe[data-src]`
    Embed,
}

/// Load state of a deferred media element.
///
/// `Loaded` and `Error` are terminal: an element in either state is never
/// observed again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Unobserved,
    Pending,
    Loading,
    Loaded,
    Error,
}

impl LoadState {
    /// CSS class the element carries in this state, if any.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            LoadState::Loading => Some("loading"),
            LoadState::Loaded => Some("loaded"),
            LoadState::Error => Some("error"),
            LoadState::Unobserved | LoadState::Pending => None,
        }
    }
}

/// Lazy image loading progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub total: usize,
    pub loaded: usize,
    /// Rounded percentage; 100 when there is nothing to load.
    pub progress: u32,
}

impl LoadStats {
    pub fn new(total: usize, loaded: usize) -> Self {
        let progress = if total > 0 {
            ((loaded as f64 / total as f64) * 100.0).round() as u32
        } else {
            100
        };
        Self {
            total,
            loaded,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_empty_is_complete() {
        assert_eq!(
            LoadStats::new(0, 0),
            LoadStats {
                total: 0,
                loaded: 0,
                progress: 100
            }
        );
    }

    #[test]
    fn test_stats_rounds() {
        assert_eq!(LoadStats::new(3, 1).progress, 33);
        assert_eq!(LoadStats::new(3, 2).progress, 67);
        assert_eq!(LoadStats::new(4, 4).progress, 100);
    }

    #[test]
    fn test_state_classes() {
        assert_eq!(LoadState::Loading.css_class(), Some("loading"));
        assert_eq!(LoadState::Error.css_class(), Some("error"));
        assert_eq!(LoadState::Pending.css_class(), None);
    }
}
