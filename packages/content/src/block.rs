//! # Block model
//!
//! The legacy structured content representation: a document is an ordered
//! `Vec<Block>`. Order in the vector is document order; the only nesting is
//! list containers holding their items in `children`.
//!
//! Block types travel as short strings (`"h1"`, `"p"`, `"ul"`, ...). A type
//! string this version does not know is kept as [`BlockType::Other`] so that
//! loading and re-saving a record never loses data written by a newer schema.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    BulletList,
    NumberedList,
    Image,
    Code,
    Divider,
    Other(String),
}

impl BlockType {
    /// Types offered by the block editor's "add" toolbar.
    pub const ADDABLE: [BlockType; 8] = [
        BlockType::Paragraph,
        BlockType::Heading2,
        BlockType::Heading3,
        BlockType::BulletList,
        BlockType::NumberedList,
        BlockType::Image,
        BlockType::Code,
        BlockType::Divider,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Heading1 => "h1",
            BlockType::Heading2 => "h2",
            BlockType::Heading3 => "h3",
            BlockType::Paragraph => "p",
            BlockType::BulletList => "ul",
            BlockType::NumberedList => "ol",
            BlockType::Image => "image",
            BlockType::Code => "code",
            BlockType::Divider => "divider",
            BlockType::Other(s) => s,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BlockType::Heading1 => "Heading 1",
            BlockType::Heading2 => "Heading",
            BlockType::Heading3 => "Subheading",
            BlockType::Paragraph => "Paragraph",
            BlockType::BulletList => "Bullet list",
            BlockType::NumberedList => "Numbered list",
            BlockType::Image => "Image",
            BlockType::Code => "Code",
            BlockType::Divider => "Divider",
            BlockType::Other(s) => s,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, BlockType::BulletList | BlockType::NumberedList)
    }

    /// Does this type carry its payload in `text`?
    pub fn has_text(&self) -> bool {
        matches!(
            self,
            BlockType::Heading1
                | BlockType::Heading2
                | BlockType::Heading3
                | BlockType::Paragraph
                | BlockType::Code
        )
    }
}

impl From<String> for BlockType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "h1" => BlockType::Heading1,
            "h2" => BlockType::Heading2,
            "h3" => BlockType::Heading3,
            "p" => BlockType::Paragraph,
            "ul" => BlockType::BulletList,
            "ol" => BlockType::NumberedList,
            "image" => BlockType::Image,
            "code" => BlockType::Code,
            "divider" => BlockType::Divider,
            _ => BlockType::Other(s),
        }
    }
}

impl From<BlockType> for String {
    fn from(t: BlockType) -> Self {
        match t {
            BlockType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

/// One structural unit of a block document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Stable identity, unchanged by reordering.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// List items; only meaningful for list containers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Block>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<String>,
}

impl Block {
    /// A block with the given id and an empty payload for its type.
    pub fn empty(id: String, kind: BlockType) -> Self {
        let text = if kind.has_text() { Some(String::new()) } else { None };
        Self {
            id,
            kind,
            text,
            src: None,
            alt: None,
            caption: None,
            children: Vec::new(),
            marks: Vec::new(),
        }
    }

    /// A list item child.
    pub fn item(id: String, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::empty(id, BlockType::Paragraph)
        }
    }

    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// List items joined one per line, the form the editor shows them in.
    pub fn items_as_lines(&self) -> String {
        self.children
            .iter()
            .map(|c| c.text_or_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A partial payload merged into an existing block. `None` fields are left
/// untouched; the block's id and type are never changed by a patch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockPatch {
    pub text: Option<String>,
    pub src: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
    /// Replace list items, one string per item.
    pub items: Option<Vec<String>>,
}

impl BlockPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), ..Self::default() }
    }

    pub fn src(src: impl Into<String>) -> Self {
        Self { src: Some(src.into()), ..Self::default() }
    }

    pub fn caption(caption: impl Into<String>) -> Self {
        Self { caption: Some(caption.into()), ..Self::default() }
    }

    pub fn items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: Some(items.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_use_short_wire_names() {
        let block = Block::empty("a".into(), BlockType::BulletList);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "ul");
        assert!(json.get("text").is_none());
        assert!(json.get("children").is_none());
    }

    #[test]
    fn unknown_types_survive_a_load_save_cycle() {
        let json = r#"{"id":"x","type":"callout","text":"hi"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind, BlockType::Other("callout".into()));
        let back = serde_json::to_value(&block).unwrap();
        assert_eq!(back["type"], "callout");
        assert_eq!(back["text"], "hi");
    }

    #[test]
    fn empty_payload_depends_on_type() {
        assert_eq!(Block::empty("p".into(), BlockType::Paragraph).text.as_deref(), Some(""));
        assert_eq!(Block::empty("i".into(), BlockType::Image).text, None);
    }

    #[test]
    fn list_items_render_as_lines() {
        let mut list = Block::empty("l".into(), BlockType::NumberedList);
        list.children = vec![Block::item("1".into(), "one"), Block::item("2".into(), "two")];
        assert_eq!(list.items_as_lines(), "one\ntwo");
    }
}
