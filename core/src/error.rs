use thiserror::Error;

pub type Result<T, E = FolioError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("failed to parse site config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid site config: `{field}` {reason}")]
    ConfigValue { field: &'static str, reason: String },
}
