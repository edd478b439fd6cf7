use thiserror::Error;

/// Errors raised while reading or writing persisted content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content record has neither `blocks` nor `html`")]
    MissingContent,

    #[error("unknown content kind `{0}`")]
    UnknownKind(String),

    #[error("title is required")]
    EmptyTitle,

    #[error("entry not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid entry JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid site config: {0}")]
    ConfigRead(#[from] toml::de::Error),

    #[error("could not serialize site config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl From<std::io::Error> for ContentError {
    fn from(e: std::io::Error) -> Self {
        ContentError::Storage(e.to_string())
    }
}
