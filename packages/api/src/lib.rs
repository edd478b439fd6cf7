//! # API crate — shared fullstack server functions for the portfolio site
//!
//! Defines every Dioxus server function the web frontend calls, plus the
//! supporting modules they depend on.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`ai`] | — | Fix modes, system prompts, chat wire types; the provider call is `server`-only |
//! | [`assets`] | — | Upload naming and classification; file writes are `server`-only |
//! | [`config`] | — | [`ServerConfig`] from environment variables |
//! | `error` | `server` | [`ApiError`](error::ApiError) |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that simply
//! forwards the call over HTTP. Server variants receive the shared [`ServerConfig`]
//! from the `axum::Extension` layer installed by the web binary.
//!
//! - **Entries**: `list_entries`, `list_published`, `get_entry`, `get_published`, `save_entry`, `delete_entry`
//! - **Site settings**: `get_site_config`, `save_site_config`
//! - **Uploads**: `delete_asset`. Files themselves go through the plain multipart
//!   route in [`assets::upload_router`].
//! - **AI**: `fix_blog`, `enrich_work`

use dioxus::prelude::*;

pub mod ai;
pub mod assets;
pub mod config;
#[cfg(feature = "server")]
pub mod error;

pub use ai::{FixMode, FixResponse};
pub use assets::{AssetInfo, AssetKind, MAX_UPLOAD_BYTES, UPLOAD_FIELD, UPLOAD_ROUTE};
pub use config::ServerConfig;
pub use content::{Entry, EntryDraft, EntryKind, SiteConfig};

#[cfg(feature = "server")]
type SharedConfig = axum::Extension<std::sync::Arc<ServerConfig>>;

#[cfg(feature = "server")]
fn repository(server: &ServerConfig) -> content::Repository<content::FileStore> {
    content::Repository::new(content::FileStore::new(server.data_dir.clone()))
}

#[cfg(feature = "server")]
fn server_error(e: impl Into<error::ApiError>) -> ServerFnError {
    ServerFnError::new(e.into().to_string())
}

#[cfg(feature = "server")]
fn parse_kind(kind: &str) -> Result<EntryKind, ServerFnError> {
    EntryKind::from_segment(kind).ok_or_else(|| server_error(error::ApiError::UnknownKind(kind.to_string())))
}

/// Every entry of every kind, drafts included.
#[cfg(feature = "server")]
#[get("/api/entries", server: SharedConfig)]
pub async fn list_entries() -> Result<Vec<Entry>, ServerFnError> {
    Ok(repository(&server).list(None).await)
}

#[cfg(not(feature = "server"))]
#[get("/api/entries")]
pub async fn list_entries() -> Result<Vec<Entry>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Published entries of one kind, newest first.
#[cfg(feature = "server")]
#[get("/api/published/:kind", server: SharedConfig)]
pub async fn list_published(kind: String) -> Result<Vec<Entry>, ServerFnError> {
    let kind = parse_kind(&kind)?;
    Ok(repository(&server).list_published(kind).await)
}

#[cfg(not(feature = "server"))]
#[get("/api/published/:kind")]
pub async fn list_published(kind: String) -> Result<Vec<Entry>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Any entry by id (admin editing).
#[cfg(feature = "server")]
#[get("/api/entries/:id", server: SharedConfig)]
pub async fn get_entry(id: String) -> Result<Entry, ServerFnError> {
    repository(&server)
        .get(&id)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/entries/:id")]
pub async fn get_entry(id: String) -> Result<Entry, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// A published entry by kind and slug. Drafts and missing entries are `None`.
#[cfg(feature = "server")]
#[get("/api/published/:kind/:slug", server: SharedConfig)]
pub async fn get_published(kind: String, slug: String) -> Result<Option<Entry>, ServerFnError> {
    let kind = parse_kind(&kind)?;
    Ok(repository(&server)
        .get_by_slug(kind, &slug)
        .await
        .ok()
        .filter(|e| e.published))
}

#[cfg(not(feature = "server"))]
#[get("/api/published/:kind/:slug")]
pub async fn get_published(kind: String, slug: String) -> Result<Option<Entry>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create or update an entry.
#[cfg(feature = "server")]
#[post("/api/entries", server: SharedConfig)]
pub async fn save_entry(draft: EntryDraft) -> Result<Entry, ServerFnError> {
    repository(&server)
        .save(draft, chrono::Utc::now())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "save failed");
            server_error(e)
        })
}

#[cfg(not(feature = "server"))]
#[post("/api/entries")]
pub async fn save_entry(draft: EntryDraft) -> Result<Entry, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/entries/delete", server: SharedConfig)]
pub async fn delete_entry(id: String) -> Result<(), ServerFnError> {
    repository(&server)
        .delete(&id)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/entries/delete")]
pub async fn delete_entry(id: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/site", server: SharedConfig)]
pub async fn get_site_config() -> Result<SiteConfig, ServerFnError> {
    Ok(repository(&server).get_config().await)
}

#[cfg(not(feature = "server"))]
#[get("/api/site")]
pub async fn get_site_config() -> Result<SiteConfig, ServerFnError> {
    Ok(SiteConfig::default())
}

#[cfg(feature = "server")]
#[post("/api/site", server: SharedConfig)]
pub async fn save_site_config(site: SiteConfig) -> Result<(), ServerFnError> {
    repository(&server)
        .set_config(&site)
        .await
        .map_err(server_error)?;
    tracing::info!("saved site config");
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/site")]
pub async fn save_site_config(site: SiteConfig) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/uploads/delete", server: SharedConfig)]
pub async fn delete_asset(path: String) -> Result<(), ServerFnError> {
    assets::remove_upload(&server, &path)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/uploads/delete")]
pub async fn delete_asset(path: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
async fn run_fix(server: &ServerConfig, mode: FixMode, html: &str) -> Result<FixResponse, ServerFnError> {
    match ai::complete(&server.http, server.ai.as_ref(), &mode, html).await {
        Ok(fixed_html) => Ok(FixResponse { fixed_html }),
        Err(e) => {
            tracing::error!(endpoint = mode.endpoint(), error = %e, "AI fix failed");
            Err(server_error(e))
        }
    }
}

/// Clean up blog HTML: grammar, code blocks, structure. Images are kept.
#[cfg(feature = "server")]
#[post("/api/ai/fix-blog", server: SharedConfig)]
pub async fn fix_blog(html: String) -> Result<FixResponse, ServerFnError> {
    run_fix(&server, FixMode::Blog, &html).await
}

#[cfg(not(feature = "server"))]
#[post("/api/ai/fix-blog")]
pub async fn fix_blog(html: String) -> Result<FixResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Expand a work description into a structured portfolio entry.
#[cfg(feature = "server")]
#[post("/api/ai/enrich-work", server: SharedConfig)]
pub async fn enrich_work(html: String, title: String) -> Result<FixResponse, ServerFnError> {
    run_fix(&server, FixMode::EnrichWork { title }, &html).await
}

#[cfg(not(feature = "server"))]
#[post("/api/ai/enrich-work")]
pub async fn enrich_work(html: String, title: String) -> Result<FixResponse, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
