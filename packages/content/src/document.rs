//! # Persisted content field
//!
//! An entry's content is either a block sequence or a rich HTML document.
//! Records are written with an explicit discriminant:
//!
//! ```json
//! { "kind": "blocks", "schemaVersion": 2, "blocks": [ ... ] }
//! { "kind": "html",   "schemaVersion": 2, "html": "<p>...</p>" }
//! ```
//!
//! Older records carry no `kind` and are told apart by which key is present
//! (`{ "blocks": [...] }` or `{ "html": "..." }`). Both forms deserialize; only
//! the explicit form is ever written.

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::error::ContentError;
use crate::rich::RichDocument;

pub const SCHEMA_VERSION: u32 = 2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredContent", into = "StoredContent")]
pub enum DocumentContent {
    Blocks(Vec<Block>),
    Html(RichDocument),
}

/// Which renderer a reader must use for a piece of content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RendererKind {
    Blocks,
    Interactive,
}

impl Default for DocumentContent {
    fn default() -> Self {
        DocumentContent::Html(RichDocument::default())
    }
}

impl DocumentContent {
    pub fn from_html(html: &str) -> Self {
        DocumentContent::Html(RichDocument::parse(html))
    }

    pub fn renderer(&self) -> RendererKind {
        match self {
            DocumentContent::Blocks(_) => RendererKind::Blocks,
            DocumentContent::Html(_) => RendererKind::Interactive,
        }
    }

    /// The stored HTML string, for rich content.
    pub fn html(&self) -> Option<String> {
        match self {
            DocumentContent::Html(doc) => Some(doc.to_html()),
            DocumentContent::Blocks(_) => None,
        }
    }

    pub fn blocks(&self) -> Option<&[Block]> {
        match self {
            DocumentContent::Blocks(blocks) => Some(blocks),
            DocumentContent::Html(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            DocumentContent::Blocks(blocks) => blocks.is_empty(),
            DocumentContent::Html(doc) => doc.is_empty(),
        }
    }

    /// Parse a JSON record in either the explicit or the legacy form.
    pub fn from_json(json: &str) -> Result<Self, ContentError> {
        let stored: StoredContent = serde_json::from_str(json)?;
        Self::try_from(stored)
    }
}

/// On-disk shape, covering both the explicit and the legacy records.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schema_version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    blocks: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    html: Option<String>,
}

impl TryFrom<StoredContent> for DocumentContent {
    type Error = ContentError;

    fn try_from(stored: StoredContent) -> Result<Self, Self::Error> {
        match stored.kind.as_deref() {
            Some("blocks") => Ok(DocumentContent::Blocks(stored.blocks.unwrap_or_default())),
            Some("html") => Ok(DocumentContent::from_html(stored.html.as_deref().unwrap_or(""))),
            Some(other) => Err(ContentError::UnknownKind(other.to_string())),
            None => match (stored.blocks, stored.html) {
                (Some(blocks), _) => Ok(DocumentContent::Blocks(blocks)),
                (None, Some(html)) => Ok(DocumentContent::from_html(&html)),
                // A fresh draft is saved as `{}`
                (None, None) if stored.schema_version.is_none() => Ok(DocumentContent::default()),
                (None, None) => Err(ContentError::MissingContent),
            },
        }
    }
}

impl From<DocumentContent> for StoredContent {
    fn from(content: DocumentContent) -> Self {
        match content {
            DocumentContent::Blocks(blocks) => StoredContent {
                kind: Some("blocks".into()),
                schema_version: Some(SCHEMA_VERSION),
                blocks: Some(blocks),
                html: None,
            },
            DocumentContent::Html(doc) => StoredContent {
                kind: Some("html".into()),
                schema_version: Some(SCHEMA_VERSION),
                blocks: None,
                html: Some(doc.to_html()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockType;
    use crate::rich::RichNode;

    #[test]
    fn legacy_blocks_record_selects_block_renderer() {
        let content =
            DocumentContent::from_json(r#"{"blocks":[{"id":"1","type":"p","text":"Hi"}]}"#).unwrap();
        assert_eq!(content.renderer(), RendererKind::Blocks);
        assert_eq!(content.blocks().unwrap()[0].kind, BlockType::Paragraph);
    }

    #[test]
    fn legacy_html_record_selects_interactive_renderer() {
        let content = DocumentContent::from_json(r#"{"html":"<p>Hi</p>"}"#).unwrap();
        assert_eq!(content.renderer(), RendererKind::Interactive);
        assert_eq!(content.html().as_deref(), Some("<p>Hi</p>"));
    }

    #[test]
    fn writes_explicit_discriminant() {
        let content = DocumentContent::from_html("<p>x</p><three-js-block height=\"320\"></three-js-block>");
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["kind"], "html");
        assert_eq!(json["schemaVersion"], SCHEMA_VERSION);
        assert!(json.get("blocks").is_none());

        let back: DocumentContent = serde_json::from_value(json).unwrap();
        match back {
            DocumentContent::Html(doc) => {
                assert_eq!(doc.nodes[1], RichNode::Scene { height: Some(320) })
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn explicit_kind_wins_over_key_presence() {
        let content =
            DocumentContent::from_json(r#"{"kind":"html","html":"<p/>","blocks":[]}"#).unwrap();
        assert_eq!(content.renderer(), RendererKind::Interactive);
    }

    #[test]
    fn rejects_unknown_kind_and_missing_payload() {
        assert!(matches!(
            DocumentContent::from_json(r#"{"kind":"markdown"}"#),
            Err(ContentError::UnknownKind(k)) if k == "markdown"
        ));
        assert!(matches!(
            DocumentContent::from_json(r#"{"schemaVersion":2}"#),
            Err(ContentError::MissingContent)
        ));
    }

    #[test]
    fn empty_legacy_record_is_empty_html() {
        let content = DocumentContent::from_json("{}").unwrap();
        assert!(content.is_empty());
        assert_eq!(content.renderer(), RendererKind::Interactive);
    }
}
