//! # Site entries
//!
//! Every piece of editable site content is an [`Entry`]: blog posts, portfolio
//! works, and standalone pages (introduction, resume, contact). These types are
//! `Serialize + Deserialize` so they cross the server/client boundary through
//! Dioxus server functions unchanged.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Entry`] | A stored entry as read back from the repository. |
//! | [`EntryDraft`] | What an editor submits: no timestamps, optional id. |
//! | [`EntryKind`] | Blog, work or page; also the URL segment for each. |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::DocumentContent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blog,
    Work,
    Page,
}

impl EntryKind {
    pub const ALL: [EntryKind; 3] = [EntryKind::Blog, EntryKind::Work, EntryKind::Page];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Blog => "blog",
            EntryKind::Work => "work",
            EntryKind::Page => "page",
        }
    }

    pub fn from_segment(s: &str) -> Option<Self> {
        match s {
            "blog" => Some(EntryKind::Blog),
            "work" | "works" => Some(EntryKind::Work),
            "page" | "pages" => Some(EntryKind::Page),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryKind::Blog => "Blog posts",
            EntryKind::Work => "Works",
            EntryKind::Page => "Pages",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub kind: EntryKind,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    /// Uploaded cover image URL (works use it in listings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub content: DocumentContent,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An entry as submitted from an editor form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// `None` creates a new entry.
    pub id: Option<String>,
    pub kind: EntryKind,
    pub title: String,
    /// Explicit slug; derived from the title when blank.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub content: DocumentContent,
}

impl EntryDraft {
    pub fn new(kind: EntryKind) -> Self {
        Self {
            id: None,
            kind,
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            tags: Vec::new(),
            published: false,
            thumbnail: None,
            content: DocumentContent::default(),
        }
    }
}

impl From<&Entry> for EntryDraft {
    fn from(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id.clone()),
            kind: entry.kind,
            title: entry.title.clone(),
            slug: entry.slug.clone(),
            excerpt: entry.excerpt.clone(),
            tags: entry.tags.clone(),
            published: entry.published,
            thumbnail: entry.thumbnail.clone(),
            content: entry.content.clone(),
        }
    }
}

/// URL slug from a title: lowercase ASCII alphanumerics separated by single
/// dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Split a comma-separated tag field into trimmed, non-empty tags.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  --Rust & WebGL 2024--  "), "rust-webgl-2024");
        assert_eq!(slugify("한국어 Title"), "title");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn tags_are_trimmed() {
        assert_eq!(parse_tags(" rust, ,web ,3d"), vec!["rust", "web", "3d"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn kind_segments() {
        assert_eq!(EntryKind::from_segment("works"), Some(EntryKind::Work));
        assert_eq!(EntryKind::from_segment("blog"), Some(EntryKind::Blog));
        assert_eq!(EntryKind::from_segment("x"), None);
        for kind in EntryKind::ALL {
            assert_eq!(EntryKind::from_segment(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn entry_reads_records_with_legacy_content() {
        let json = r#"{
            "id": "1", "kind": "blog", "slug": "a", "title": "A",
            "content": {"blocks": [{"id": "b", "type": "p", "text": "x"}]}
        }"#;
        let entry: Entry = serde_json::from_str(json).unwrap();
        assert!(entry.content.blocks().is_some());
        assert!(!entry.published);
        assert!(entry.published_at.is_none());
    }
}
