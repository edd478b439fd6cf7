use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::ContentError;
use crate::repo::ContentStore;

/// In-memory ContentStore for tests and previews.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.values.lock().unwrap().get(key).cloned()
    }

    async fn put(&self, key: &str, data: Vec<u8>) -> Result<(), ContentError> {
        self.values.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, ContentError> {
        Ok(self.values.lock().unwrap().remove(key).is_some())
    }

    async fn keys(&self, prefix: &str) -> Vec<String> {
        self.values
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockType};
    use crate::config::SiteConfig;
    use crate::document::DocumentContent;
    use crate::entry::{EntryDraft, EntryKind};
    use crate::repo::Repository;
    use chrono::{TimeZone, Utc};

    fn draft(kind: EntryKind, title: &str) -> EntryDraft {
        EntryDraft {
            title: title.to_string(),
            ..EntryDraft::new(kind)
        }
    }

    fn at(day: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_save_and_read_entry() {
        let repo = Repository::new(MemoryStore::new());

        // Initially empty
        assert!(repo.list(None).await.is_empty());

        let saved = repo
            .save(draft(EntryKind::Blog, "  Hello World  "), at(1))
            .await
            .unwrap();
        assert_eq!(saved.title, "Hello World");
        assert_eq!(saved.slug, "hello-world");
        assert_eq!(saved.updated_at, Some(at(1)));
        assert!(saved.published_at.is_none());

        let loaded = repo.get(&saved.id).await.unwrap();
        assert_eq!(loaded, saved);
        let by_slug = repo.get_by_slug(EntryKind::Blog, "hello-world").await.unwrap();
        assert_eq!(by_slug.id, saved.id);
        assert!(repo.get_by_slug(EntryKind::Work, "hello-world").await.is_err());
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let repo = Repository::new(MemoryStore::new());
        let err = repo.save(draft(EntryKind::Work, "   "), at(1)).await.unwrap_err();
        assert!(matches!(err, ContentError::EmptyTitle));
        assert!(repo.list(None).await.is_empty());
    }

    #[tokio::test]
    async fn test_content_survives_storage() {
        let repo = Repository::new(MemoryStore::new());
        let mut d = draft(EntryKind::Work, "Cube");
        d.content = DocumentContent::Blocks(vec![Block::empty("b1".into(), BlockType::Divider)]);
        let saved = repo.save(d, at(1)).await.unwrap();
        let loaded = repo.get(&saved.id).await.unwrap();
        assert_eq!(loaded.content.blocks().unwrap()[0].kind, BlockType::Divider);

        let mut d = EntryDraft::from(&loaded);
        d.content = DocumentContent::from_html("<p>a</p><three-js-block height=\"400\"></three-js-block>");
        repo.save(d, at(2)).await.unwrap();
        let html = repo.get(&saved.id).await.unwrap().content.html().unwrap();
        assert_eq!(html, "<p>a</p><three-js-block height=\"400\"></three-js-block>");
    }

    #[tokio::test]
    async fn test_publish_timestamp_lifecycle() {
        let repo = Repository::new(MemoryStore::new());
        let mut d = draft(EntryKind::Blog, "Post");
        d.published = true;
        let first = repo.save(d, at(1)).await.unwrap();
        assert_eq!(first.published_at, Some(at(1)));

        // Re-saving a published entry keeps its publish date
        let second = repo.save(EntryDraft::from(&first), at(3)).await.unwrap();
        assert_eq!(second.published_at, Some(at(1)));
        assert_eq!(second.updated_at, Some(at(3)));

        // Unpublishing clears it
        let mut d = EntryDraft::from(&second);
        d.published = false;
        let third = repo.save(d, at(4)).await.unwrap();
        assert!(third.published_at.is_none());
    }

    #[tokio::test]
    async fn test_list_published_newest_first() {
        let repo = Repository::new(MemoryStore::new());
        for (title, day, published) in [("Old", 1, true), ("Hidden", 2, false), ("New", 3, true)] {
            let mut d = draft(EntryKind::Blog, title);
            d.published = published;
            repo.save(d, at(day)).await.unwrap();
        }
        repo.save(draft(EntryKind::Work, "Other kind"), at(5)).await.unwrap();

        let titles: Vec<String> = repo
            .list_published(EntryKind::Blog)
            .await
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, ["New", "Old"]);
        assert_eq!(repo.list(Some(EntryKind::Blog)).await.len(), 3);
        assert_eq!(repo.list(None).await.len(), 4);
    }

    #[tokio::test]
    async fn test_slugs_are_unique_per_kind() {
        let repo = Repository::new(MemoryStore::new());
        let a = repo.save(draft(EntryKind::Blog, "Same"), at(1)).await.unwrap();
        let b = repo.save(draft(EntryKind::Blog, "Same"), at(2)).await.unwrap();
        let c = repo.save(draft(EntryKind::Work, "Same"), at(3)).await.unwrap();
        assert_eq!(a.slug, "same");
        assert_eq!(b.slug, "same-2");
        assert_eq!(c.slug, "same");

        // Re-saving keeps its own slug
        let again = repo.save(EntryDraft::from(&a), at(4)).await.unwrap();
        assert_eq!(again.slug, "same");
    }

    #[tokio::test]
    async fn test_explicit_slug_and_symbol_titles() {
        let repo = Repository::new(MemoryStore::new());
        let mut d = draft(EntryKind::Page, "About me");
        d.slug = "Introduction".into();
        assert_eq!(repo.save(d, at(1)).await.unwrap().slug, "introduction");

        let only_symbols = repo.save(draft(EntryKind::Page, "!!!"), at(1)).await.unwrap();
        assert_eq!(only_symbols.slug, only_symbols.id);
    }

    #[tokio::test]
    async fn test_delete_entry() {
        let repo = Repository::new(MemoryStore::new());
        let first = repo.save(draft(EntryKind::Blog, "First"), at(1)).await.unwrap();
        repo.save(draft(EntryKind::Blog, "Second"), at(2)).await.unwrap();

        repo.delete(&first.id).await.unwrap();
        let entries = repo.list(None).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Second");
        assert!(matches!(repo.delete(&first.id).await, Err(ContentError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unreadable_records_are_skipped() {
        let store = MemoryStore::new();
        store.put("entries/bad.json", b"{not json".to_vec()).await.unwrap();
        let repo = Repository::new(store);
        repo.save(draft(EntryKind::Blog, "Good"), at(1)).await.unwrap();
        assert_eq!(repo.list(None).await.len(), 1);
        assert!(repo.get("bad").await.is_err());
    }

    #[tokio::test]
    async fn test_config_roundtrip() {
        let repo = Repository::new(MemoryStore::new());

        // Default config when nothing is stored
        assert_eq!(repo.get_config().await, SiteConfig::default());

        let mut config = SiteConfig::default();
        config.site.owner = "Jane".into();
        repo.set_config(&config).await.unwrap();

        let loaded = repo.get_config().await;
        assert_eq!(loaded.site.owner, "Jane");
    }
}
