use thiserror::Error;

/// Server-side failures. Server functions turn these into `ServerFnError`
/// with the display text as message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing OpenAI or Azure OpenAI credentials")]
    MissingCredentials,

    #[error("HTML content is required")]
    EmptyContent,

    #[error("uploaded file is empty")]
    EmptyUpload,

    #[error("invalid asset path `{0}`")]
    InvalidAssetPath(String),

    #[error("unknown entry kind `{0}`")]
    UnknownKind(String),

    #[error("AI provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Content(#[from] content::ContentError),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_errors_keep_their_message() {
        let err = ApiError::from(content::ContentError::NotFound("abc".into()));
        assert!(matches!(err, ApiError::Content(content::ContentError::NotFound(_))));
        assert_eq!(err.to_string(), "entry not found: abc");
    }

    #[test]
    fn provider_errors_show_status_and_body() {
        let err = ApiError::Provider { status: 429, body: "slow down".into() };
        assert_eq!(err.to_string(), "AI provider returned 429: slow down");
    }
}
