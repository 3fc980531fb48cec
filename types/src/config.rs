//! Site configuration.
//!
//! Loaded once at startup from the embedded `Folio.toml`. Every field has a
//! default so a partial (or empty) file is valid.

use serde::{Deserialize, Serialize};

/// Top-level site configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// `tracing` level name for the console logger.
    pub log_level: String,
    /// Images requested with `<link rel="preload">` before anything else.
    pub critical_images: Vec<String>,
    pub observer: ObserverConfig,
    pub particles: ParticleConfig,
    pub preloader: PreloaderConfig,
    pub theme: ThemeConfig,
    pub contact: ContactConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            critical_images: vec!["assets/images/avatar.jpg".to_string()],
            observer: ObserverConfig::default(),
            particles: ParticleConfig::default(),
            preloader: PreloaderConfig::default(),
            theme: ThemeConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

/// Intersection margins and fade timing for lazy media.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Vertical pre-roll for images, in pixels.
    pub image_margin_px: u32,
    /// Vertical pre-roll for video/iframe embeds, in pixels.
    pub media_margin_px: u32,
    /// Intersection ratio that counts as visible.
    pub threshold: f64,
    pub fade_in_secs: f64,
    /// Duration of the blur removal in progressive loads.
    pub unblur_secs: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            image_margin_px: 50,
            media_margin_px: 100,
            threshold: 0.01,
            fade_in_secs: 0.6,
            unblur_secs: 0.5,
        }
    }
}

impl ObserverConfig {
    /// `rootMargin` string for an intersection observer.
    pub fn root_margin(margin_px: u32) -> String {
        format!("{margin_px}px 0px")
    }
}

/// Cursor particle trail tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub capacity: usize,
    /// Life lost per animation frame; life starts at 1.
    pub decay_per_frame: f64,
    /// Duration of the fade/scale-to-zero tween.
    pub fade_secs: f64,
    pub min_size_px: f64,
    pub max_size_px: f64,
    /// Velocity is drawn from `[-max_speed, max_speed)` on each axis.
    pub max_speed: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            capacity: 20,
            decay_per_frame: 0.01,
            fade_secs: 2.0,
            min_size_px: 2.0,
            max_size_px: 6.0,
            max_speed: 1.0,
        }
    }
}

/// Loading screen timings, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    pub label: String,
    pub char_interval_ms: u32,
    pub gate_ms: u32,
    pub fade_out_ms: u32,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            label: "Loading portfolio...".to_string(),
            char_interval_ms: 100,
            gate_ms: 2500,
            fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Key of the theme preference in browser storage.
    pub storage_key: String,
    pub transition_secs: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "portfolio-theme".to_string(),
            transition_secs: 0.3,
        }
    }
}

/// Simulated contact form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub submit_delay_ms: u32,
    /// Probability in `[0, 1]` that a submission fails.
    pub failure_rate: f64,
    /// Delay before the submit button returns to its normal state.
    pub reset_delay_ms: u32,
    pub success_message_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
            failure_rate: 0.1,
            reset_delay_ms: 3000,
            success_message_ms: 5000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.particles.capacity, 20);
        assert_eq!(config.theme.storage_key, "portfolio-theme");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: SiteConfig = toml::from_str(
            r#"
            [observer]
            image_margin_px = 80
            "#,
        )
        .unwrap();
        assert_eq!(config.observer.image_margin_px, 80);
        assert_eq!(config.observer.media_margin_px, 100);
        assert_eq!(config.preloader.gate_ms, 2500);
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut config = SiteConfig::default();
        config.contact.failure_rate = 0.5;
        let text = toml::to_string(&config).unwrap();
        let back: SiteConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_root_margin() {
        assert_eq!(ObserverConfig::root_margin(50), "50px 0px");
    }
}
