//! Site configuration loading.

use folio_types::SiteConfig;

use crate::error::{FolioError, Result};

/// Parse and validate a TOML site configuration.
pub fn load_site_config(text: &str) -> Result<SiteConfig> {
    let config: SiteConfig = toml::from_str(text)?;
    validate(&config)?;
    Ok(config)
}

fn invalid(field: &'static str, reason: impl Into<String>) -> FolioError {
    FolioError::ConfigValue {
        field,
        reason: reason.into(),
    }
}

fn validate(config: &SiteConfig) -> Result<()> {
    let particles = &config.particles;
    if particles.capacity == 0 {
        return Err(invalid("particles.capacity", "must be at least 1"));
    }
    if !(particles.decay_per_frame > 0.0 && particles.decay_per_frame <= 1.0) {
        return Err(invalid("particles.decay_per_frame", "must be in (0, 1]"));
    }
    if !(particles.min_size_px > 0.0 && particles.min_size_px < particles.max_size_px) {
        return Err(invalid(
            "particles.min_size_px",
            "must be positive and below max_size_px",
        ));
    }
    if particles.max_speed <= 0.0 {
        return Err(invalid("particles.max_speed", "must be positive"));
    }
    if !(0.0..=1.0).contains(&config.observer.threshold) {
        return Err(invalid("observer.threshold", "must be in [0, 1]"));
    }
    if !(0.0..=1.0).contains(&config.contact.failure_rate) {
        return Err(invalid("contact.failure_rate", "must be in [0, 1]"));
    }
    if config.theme.storage_key.is_empty() {
        return Err(invalid("theme.storage_key", "must not be empty"));
    }
    Ok(())
}
