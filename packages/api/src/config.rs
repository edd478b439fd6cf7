//! Server configuration from environment variables.
//!
//! Built once when the server starts and handed to server functions through
//! an `axum::Extension`, so handlers never touch the environment.

use std::path::PathBuf;

pub const DEFAULT_AZURE_DEPLOYMENT: &str = "gpt-5.2-chat";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-08-01-preview";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Chat-completion provider used by the AI fix endpoints.
#[derive(Clone, PartialEq)]
pub enum AiProvider {
    Azure {
        api_key: String,
        endpoint: String,
        deployment: String,
        api_version: String,
    },
    OpenAi {
        api_key: String,
        model: String,
    },
}

impl AiProvider {
    pub fn model(&self) -> &str {
        match self {
            AiProvider::Azure { deployment, .. } => deployment,
            AiProvider::OpenAi { model, .. } => model,
        }
    }
}

impl std::fmt::Debug for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys stay out of logs.
        match self {
            AiProvider::Azure {
                endpoint,
                deployment,
                api_version,
                ..
            } => f
                .debug_struct("Azure")
                .field("endpoint", endpoint)
                .field("deployment", deployment)
                .field("api_version", api_version)
                .finish_non_exhaustive(),
            AiProvider::OpenAi { model, .. } => f
                .debug_struct("OpenAi")
                .field("model", model)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Root of the content store (entries and `site.toml`).
    pub data_dir: PathBuf,
    /// Where uploaded files are written.
    pub upload_dir: PathBuf,
    /// URL prefix under which `upload_dir` is served.
    pub public_upload_base: String,
    pub ai: Option<AiProvider>,
    /// Reused for every AI request.
    #[cfg(feature = "server")]
    pub http: reqwest::Client,
}

impl ServerConfig {
    /// Load from the process environment, reading `.env` first.
    #[cfg(feature = "server")]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let azure = match (var("AZURE_OPENAI_API_KEY"), var("AZURE_OPENAI_ENDPOINT")) {
            (Some(api_key), Some(endpoint)) => Some(AiProvider::Azure {
                api_key,
                endpoint,
                deployment: var("AZURE_OPENAI_DEPLOYMENT")
                    .or_else(|| var("AZURE_DEPLOYMENT_NAME"))
                    .unwrap_or_else(|| DEFAULT_AZURE_DEPLOYMENT.to_string()),
                api_version: var("AZURE_OPENAI_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_AZURE_API_VERSION.to_string()),
            }),
            _ => None,
        };
        let ai = azure.or_else(|| {
            var("OPENAI_API_KEY").map(|api_key| AiProvider::OpenAi {
                api_key,
                model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            })
        });

        let public_upload_base = var("PORTFOLIO_UPLOAD_URL")
            .map(|base| base.trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| "/uploads".to_string());

        Self {
            data_dir: var("PORTFOLIO_DATA_DIR").unwrap_or_else(|| "./data".to_string()).into(),
            upload_dir: var("PORTFOLIO_UPLOAD_DIR").unwrap_or_else(|| "./uploads".to_string()).into(),
            public_upload_base,
            ai,
            #[cfg(feature = "server")]
            http: crate::ai::http_client(),
        }
    }

    /// Public URL of an uploaded file.
    pub fn upload_url(&self, path: &str) -> String {
        format!("{}/{}", self.public_upload_base, path)
    }
}
