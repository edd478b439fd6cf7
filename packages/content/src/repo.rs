//! # Repository — entries and site config over an abstract key/value store
//!
//! [`Repository`] holds the site's content logic: slugs, publish timestamps,
//! listing order. All reads and writes go through the [`ContentStore`] trait,
//! so the same logic works against an in-memory store (tests, previews) or the
//! filesystem store the server uses.
//!
//! ## Keys
//!
//! | Key | Contents |
//! |-----|----------|
//! | `entries/<id>.json` | One [`Entry`] as JSON. |
//! | `site.toml` | The [`SiteConfig`]. |
//!
//! ## Read path
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`list`](Repository::list) | Every entry (optionally of one kind), most recently updated first. Unreadable records are skipped with a warning. |
//! | [`list_published`](Repository::list_published) | Published entries of one kind, newest `published_at` first. |
//! | [`get`](Repository::get) / [`get_by_slug`](Repository::get_by_slug) | Single entry lookup. |
//! | [`get_config`](Repository::get_config) | Reads `site.toml`, falling back to [`SiteConfig::default`]. |
//!
//! ## Write path
//!
//! [`save`](Repository::save) creates or replaces an entry from an
//! [`EntryDraft`]. Writes are last-write-wins; there is no conflict detection.

use chrono::{DateTime, Utc};

use crate::config::SiteConfig;
use crate::editor::new_block_id;
use crate::entry::{slugify, Entry, EntryDraft, EntryKind};
use crate::error::ContentError;

const ENTRY_PREFIX: &str = "entries/";

/// Async trait for a flat key/value blob store.
pub trait ContentStore: Send + Sync {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<Vec<u8>>> + Send;
    fn put(
        &self,
        key: &str,
        data: Vec<u8>,
    ) -> impl std::future::Future<Output = Result<(), ContentError>> + Send;
    /// Returns whether a value was removed.
    fn delete(&self, key: &str) -> impl std::future::Future<Output = Result<bool, ContentError>> + Send;
    /// Every key starting with `prefix`, in no particular order.
    fn keys(&self, prefix: &str) -> impl std::future::Future<Output = Vec<String>> + Send;
}

fn entry_key(id: &str) -> String {
    format!("{ENTRY_PREFIX}{id}.json")
}

/// Site content backed by a ContentStore.
pub struct Repository<S: ContentStore> {
    store: S,
}

impl<S: ContentStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn read_entry(&self, key: &str) -> Option<Entry> {
        let raw = self.store.get(key).await?;
        match serde_json::from_slice::<Entry>(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(key, error = %e, "skipping unreadable entry");
                None
            }
        }
    }

    /// All entries, optionally restricted to one kind.
    pub async fn list(&self, kind: Option<EntryKind>) -> Vec<Entry> {
        let mut entries = Vec::new();
        for key in self.store.keys(ENTRY_PREFIX).await {
            if !key.ends_with(".json") {
                continue;
            }
            if let Some(entry) = self.read_entry(&key).await {
                if kind.map_or(true, |k| k == entry.kind) {
                    entries.push(entry);
                }
            }
        }
        entries.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        entries
    }

    /// Published entries of `kind`, newest first.
    pub async fn list_published(&self, kind: EntryKind) -> Vec<Entry> {
        let mut entries: Vec<Entry> = self
            .list(Some(kind))
            .await
            .into_iter()
            .filter(|e| e.published)
            .collect();
        entries.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        entries
    }

    pub async fn get(&self, id: &str) -> Result<Entry, ContentError> {
        self.read_entry(&entry_key(id))
            .await
            .ok_or_else(|| ContentError::NotFound(id.to_string()))
    }

    pub async fn get_by_slug(&self, kind: EntryKind, slug: &str) -> Result<Entry, ContentError> {
        self.list(Some(kind))
            .await
            .into_iter()
            .find(|e| e.slug == slug)
            .ok_or_else(|| ContentError::NotFound(format!("{kind}/{slug}")))
    }

    /// Create or replace an entry. `now` stamps `updated_at`, and
    /// `published_at` when the entry becomes published.
    pub async fn save(&self, draft: EntryDraft, now: DateTime<Utc>) -> Result<Entry, ContentError> {
        let title = draft.title.trim().to_string();
        if title.is_empty() {
            return Err(ContentError::EmptyTitle);
        }

        let existing = match draft.id.as_deref() {
            Some(id) => self.read_entry(&entry_key(id)).await,
            None => None,
        };
        let id = draft.id.clone().unwrap_or_else(new_block_id);

        let requested = if draft.slug.trim().is_empty() {
            slugify(&title)
        } else {
            slugify(&draft.slug)
        };
        let base = if requested.is_empty() { id.clone() } else { requested };
        let slug = self.unique_slug(draft.kind, &base, &id).await;

        let published_at = match (draft.published, existing.as_ref().and_then(|e| e.published_at)) {
            (false, _) => None,
            (true, Some(at)) => Some(at),
            (true, None) => Some(now),
        };

        let entry = Entry {
            id,
            kind: draft.kind,
            slug,
            title,
            excerpt: draft.excerpt.trim().to_string(),
            tags: draft.tags,
            published: draft.published,
            thumbnail: draft.thumbnail.filter(|t| !t.trim().is_empty()),
            content: draft.content,
            published_at,
            updated_at: Some(now),
        };

        let json = serde_json::to_vec_pretty(&entry)?;
        self.store.put(&entry_key(&entry.id), json).await?;
        tracing::info!(id = %entry.id, kind = %entry.kind, slug = %entry.slug, "saved entry");
        Ok(entry)
    }

    /// `base`, or `base-2`, `base-3`, ... if another entry of the same kind
    /// already uses it.
    async fn unique_slug(&self, kind: EntryKind, base: &str, own_id: &str) -> String {
        let taken: Vec<String> = self
            .list(Some(kind))
            .await
            .into_iter()
            .filter(|e| e.id != own_id)
            .map(|e| e.slug)
            .collect();
        if !taken.iter().any(|s| s == base) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}-{n}");
            if !taken.contains(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), ContentError> {
        if self.store.delete(&entry_key(id)).await? {
            tracing::info!(id, "deleted entry");
            Ok(())
        } else {
            Err(ContentError::NotFound(id.to_string()))
        }
    }

    /// Read `site.toml`. Falls back to defaults if absent or malformed.
    pub async fn get_config(&self) -> SiteConfig {
        let Some(raw) = self.store.get(SiteConfig::filename()).await else {
            return SiteConfig::default();
        };
        let Ok(text) = String::from_utf8(raw) else {
            return SiteConfig::default();
        };
        SiteConfig::from_toml(&text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "site.toml is malformed; using defaults");
            SiteConfig::default()
        })
    }

    pub async fn set_config(&self, config: &SiteConfig) -> Result<(), ContentError> {
        let text = config.to_toml()?;
        self.store
            .put(SiteConfig::filename(), text.into_bytes())
            .await
    }
}
