//! # AI content fixing
//!
//! Sends editor HTML to a chat-completion model with a mode-specific system
//! prompt and returns the rewritten HTML.
//!
//! | Mode | Endpoint | Prompt |
//! |------|----------|--------|
//! | [`FixMode::Blog`] | `/api/ai/fix-blog` | Technical blog editor: fix grammar, wrap code, keep images. |
//! | [`FixMode::EnrichWork`] | `/api/ai/enrich-work` | Portfolio editor: expand a project description into sections. |
//!
//! Both providers speak the OpenAI chat-completions wire format; Azure only
//! differs in URL and auth header.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FixMode {
    Blog,
    EnrichWork { title: String },
}

/// Response body of both fix endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixResponse {
    pub fixed_html: String,
}

const BLOG_PROMPT: &str = r#"You are an expert technical blog editor.
Your task is to clean up and format the provided HTML content from a rich-text editor.

Rules:
1. CODE BLOCKS: Identify text that looks like code (e.g., imports, function definitions, console commands) and wrap it in <pre><code class="language-xyz">...</code></pre>.
2. FORMATTING: Fix grammar, spelling, and punctuation. Improve paragraph structure.
3. IMAGES: You MUST preserve all <img> tags exactly as they are. Do not remove or alter `src`, `alt`, or `class` attributes.
4. STRUCTURE: Use proper HTML tags (h1, h2, p, ul, ol).
5. RETURN ONLY HTML: Do not include markdown fences or explanation. Return the raw HTML string."#;

const UNTITLED_PROJECT: &str = "Untitled Project";

fn work_prompt(title: &str) -> String {
    format!(
        r#"You are an expert technical portfolio editor and career coach.
Your task is to take a raw, potentially brief or unstructured project description for a project titled "{title}" and transform it into a professional, compelling, and well-structured portfolio entry.

Goal:
Enrich the content to highlight technical depth, problem-solving skills, and professional value, specifically for "{title}".

Rules:
1. Tone: Professional, confident, and technical. Avoid overly flowery language.
2. Structure:
    - Use <h2> tags for section headers.
    - Use <ul> and <li> for structured points and <strong> for key terms.
    - Sections: <h2>Overview</h2> (a compelling summary of "{title}"), <h2>Key Features</h2> (a bulleted list), <h2>Technical Stack</h2> (a detailed breakdown), and optionally <h2>Challenges & Solutions</h2>.
3. Enhancement: Expand on vague terms, infer standard technical practices where appropriate, and fix grammar, spelling, and punctuation. Start with a short text introduction rather than an abrupt heading.
4. Images: If the input HTML contains <img> tags, you MUST include every one of them in the output at appropriate locations.
5. Language: Keep the output in the SAME language as the input.
6. Format: Return ONLY valid HTML. Do not include markdown code fences."#
    )
}

impl FixMode {
    pub fn endpoint(&self) -> &'static str {
        match self {
            FixMode::Blog => "/api/ai/fix-blog",
            FixMode::EnrichWork { .. } => "/api/ai/enrich-work",
        }
    }

    pub fn system_prompt(&self) -> String {
        match self {
            FixMode::Blog => BLOG_PROMPT.to_string(),
            FixMode::EnrichWork { title } => {
                let title = title.trim();
                work_prompt(if title.is_empty() { UNTITLED_PROJECT } else { title })
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    /// Azure selects the model by deployment URL and ignores this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub messages: Vec<ChatMessage>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatReply,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, or empty.
    pub fn first_content(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or("")
    }
}

pub fn build_messages(mode: &FixMode, html: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".into(),
            content: mode.system_prompt(),
        },
        ChatMessage {
            role: "user".into(),
            content: html.to_string(),
        },
    ]
}

/// Remove a leading "```html" fence and a trailing "```" fence if the model
/// added them anyway.
pub fn strip_code_fences(reply: &str) -> String {
    let mut out = reply;
    if let Some(rest) = out.strip_prefix("```html") {
        out = rest.trim_start();
    }
    if let Some(rest) = out.strip_suffix("```") {
        out = rest.trim_end();
    }
    out.to_string()
}

/// Upper bound on one chat-completion round trip.
pub const AI_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(120);

/// The shared HTTP client for provider calls, built once at startup.
#[cfg(feature = "server")]
pub fn http_client() -> reqwest::Client {
    http_client_with_timeout(AI_REQUEST_TIMEOUT)
}

#[cfg(feature = "server")]
fn http_client_with_timeout(timeout: std::time::Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not configure AI HTTP client, using defaults");
            reqwest::Client::new()
        })
}

#[cfg(feature = "server")]
pub async fn complete(
    client: &reqwest::Client,
    provider: Option<&crate::config::AiProvider>,
    mode: &FixMode,
    html: &str,
) -> Result<String, crate::error::ApiError> {
    use crate::config::AiProvider;
    use crate::error::ApiError;

    if html.trim().is_empty() {
        return Err(ApiError::EmptyContent);
    }
    let provider = provider.ok_or(ApiError::MissingCredentials)?;

    let messages = build_messages(mode, html);
    let request = match provider {
        AiProvider::Azure {
            api_key,
            endpoint,
            deployment,
            api_version,
        } => {
            let url = format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                endpoint.trim_end_matches('/'),
                deployment,
                api_version
            );
            client
                .post(url)
                .header("api-key", api_key)
                .json(&ChatRequest { model: None, messages })
        }
        AiProvider::OpenAi { api_key, model } => client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&ChatRequest {
                model: Some(model.clone()),
                messages,
            }),
    };

    tracing::info!(endpoint = mode.endpoint(), model = provider.model(), "requesting AI fix");
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Provider {
            status: status.as_u16(),
            body,
        });
    }
    let reply: ChatResponse = response.json().await?;
    Ok(strip_code_fences(reply.first_content()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fences_are_stripped() {
        assert_eq!(strip_code_fences("```html\n<p>x</p>\n```"), "<p>x</p>");
        assert_eq!(strip_code_fences("<p>x</p>"), "<p>x</p>");
        assert_eq!(strip_code_fences("<p>x</p>\n```"), "<p>x</p>");
        // Inner fences stay
        assert_eq!(strip_code_fences("<pre>```</pre><p/>"), "<pre>```</pre><p/>");
    }

    #[test]
    fn work_prompt_names_the_project() {
        let prompt = FixMode::EnrichWork { title: "Ray Tracer".into() }.system_prompt();
        assert!(prompt.contains("\"Ray Tracer\""));
        let untitled = FixMode::EnrichWork { title: "  ".into() }.system_prompt();
        assert!(untitled.contains(UNTITLED_PROJECT));
    }

    #[test]
    fn messages_are_system_then_user() {
        let messages = build_messages(&FixMode::Blog, "<p>hi</p>");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert!(messages[0].content.contains("blog editor"));
        assert_eq!(messages[1].content, "<p>hi</p>");
    }

    #[test]
    fn endpoints_per_mode() {
        assert_eq!(FixMode::Blog.endpoint(), "/api/ai/fix-blog");
        assert_eq!(
            FixMode::EnrichWork { title: String::new() }.endpoint(),
            "/api/ai/enrich-work"
        );
    }

    #[test]
    fn response_shapes() {
        let r: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":"<p>ok</p>"}}]}"#)
                .unwrap();
        assert_eq!(r.first_content(), "<p>ok</p>");
        let empty: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(empty.first_content(), "");

        let body = serde_json::to_value(FixResponse { fixed_html: "<p/>".into() }).unwrap();
        assert_eq!(body["fixedHtml"], "<p/>");
    }
}

#[cfg(all(test, feature = "server"))]
mod server_tests {
    use std::time::Duration;

    use super::*;
    use crate::config::AiProvider;
    use crate::error::ApiError;

    #[tokio::test]
    async fn missing_provider_fails_before_any_request() {
        let client = http_client();
        let err = complete(&client, None, &FixMode::Blog, "<p>x</p>").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingCredentials));
        let err = complete(&client, None, &FixMode::Blog, "   ").await.unwrap_err();
        assert!(matches!(err, ApiError::EmptyContent));
    }

    #[tokio::test]
    async fn stalled_provider_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let stall = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let provider = AiProvider::Azure {
            api_key: "k".into(),
            endpoint: format!("http://{addr}"),
            deployment: "d".into(),
            api_version: "v".into(),
        };
        let client = http_client_with_timeout(Duration::from_millis(200));
        let err = complete(&client, Some(&provider), &FixMode::Blog, "<p>x</p>")
            .await
            .unwrap_err();
        match err {
            ApiError::Http(e) => assert!(e.is_timeout()),
            other => panic!("unexpected {other:?}"),
        }
        stall.abort();
    }
}
