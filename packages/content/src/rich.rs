//! # Rich document tree
//!
//! Rich content is stored as one HTML string, produced by the WYSIWYG editor.
//! Two custom elements in that string stand for live components:
//!
//! ```html
//! <three-js-block height="300"></three-js-block>
//! <html-snippet html="&lt;div&gt;...&lt;/div&gt;"></html-snippet>
//! ```
//!
//! [`RichDocument::parse`] splits the string into typed [`RichNode`]s once,
//! so renderers match on variants instead of pattern-matching markup every
//! time. [`RichDocument::to_html`] writes the exact same vocabulary back.
//! Everything that is not a marker stays as opaque [`RichNode::Markup`].

use std::sync::LazyLock;

use regex::Regex;

use crate::markup::{decode_entities, encode_attribute};

pub const SCENE_TAG: &str = "three-js-block";
pub const SNIPPET_TAG: &str = "html-snippet";
pub const DEFAULT_SCENE_HEIGHT: u32 = 300;

// Opening marker tag. The name ends at whitespace, `/` or `>`, so
// `<html-snippet-x>` is not a marker. Attribute values may be quoted with
// either quote style and may contain `>` inside quotes.
static MARKER_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<\s*(three-js-block|html-snippet)((?:\s(?:[^>"']|"[^"]*"|'[^']*')*)?/?)>"#)
        .expect("MARKER_OPEN_RE is valid")
});

static SCENE_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*<\s*/\s*three-js-block\s*>").expect("SCENE_CLOSE_RE is valid")
});

static SNIPPET_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*<\s*/\s*html-snippet\s*>").expect("SNIPPET_CLOSE_RE is valid")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("ATTR_RE is valid")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RichNode {
    /// Ordinary HTML, kept verbatim.
    Markup(String),
    /// Interactive 3D scene; `None` means the default height.
    Scene { height: Option<u32> },
    /// Author-supplied HTML widget, already entity-decoded.
    Snippet { html: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RichDocument {
    pub nodes: Vec<RichNode>,
}

/// Cheap check for marker presence, used to pick the fast render path.
pub fn has_markers(html: &str) -> bool {
    html.contains(SCENE_TAG) || html.contains(SNIPPET_TAG)
}

impl RichDocument {
    pub fn new(nodes: Vec<RichNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|n| matches!(n, RichNode::Markup(m) if m.trim().is_empty()))
    }

    /// Split stored HTML into nodes in document order.
    pub fn parse(html: &str) -> Self {
        if !has_markers(html) {
            return if html.is_empty() {
                Self::default()
            } else {
                Self::new(vec![RichNode::Markup(html.to_string())])
            };
        }

        let mut nodes = Vec::new();
        let mut cursor = 0;

        while let Some(caps) = MARKER_OPEN_RE.captures_at(html, cursor) {
            let whole = caps.get(0).map_or(cursor..cursor, |m| m.range());
            if whole.start > cursor {
                nodes.push(RichNode::Markup(html[cursor..whole.start].to_string()));
            }

            let name = caps.get(1).map_or("", |m| m.as_str()).to_ascii_lowercase();
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            let close_re = if name == SCENE_TAG { &SCENE_CLOSE_RE } else { &SNIPPET_CLOSE_RE };

            cursor = whole.end;
            if let Some(close) = close_re.find(&html[cursor..]) {
                cursor += close.end();
            }

            if name == SCENE_TAG {
                let height = attribute(attrs, "height").and_then(|h| parse_height(&h));
                nodes.push(RichNode::Scene { height });
            } else {
                let html = attribute(attrs, "html")
                    .map(|v| decode_entities(&v))
                    .unwrap_or_default();
                nodes.push(RichNode::Snippet { html });
            }
        }

        if cursor < html.len() {
            nodes.push(RichNode::Markup(html[cursor..].to_string()));
        }
        Self::new(nodes)
    }

    /// Serialize back to the stored HTML vocabulary.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                RichNode::Markup(m) => out.push_str(m),
                RichNode::Scene { height: Some(h) } => {
                    out.push_str(&format!("<{SCENE_TAG} height=\"{h}\"></{SCENE_TAG}>"));
                }
                RichNode::Scene { height: None } => {
                    out.push_str(&format!("<{SCENE_TAG}></{SCENE_TAG}>"));
                }
                RichNode::Snippet { html } => {
                    out.push_str(&format!(
                        "<{SNIPPET_TAG} html=\"{}\"></{SNIPPET_TAG}>",
                        encode_attribute(html)
                    ));
                }
            }
        }
        out
    }

    /// Height of the first scene marker, if the document has one.
    pub fn first_scene_height(&self) -> Option<u32> {
        self.nodes.iter().find_map(|n| match n {
            RichNode::Scene { height } => Some(height.unwrap_or(DEFAULT_SCENE_HEIGHT)),
            _ => None,
        })
    }

    /// Decoded snippet bodies in document order.
    pub fn snippets(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|n| match n {
            RichNode::Snippet { html } => Some(html.as_str()),
            _ => None,
        })
    }
}

/// Look up an attribute value (entity-encoded, as written) by name.
fn attribute(attrs: &str, name: &str) -> Option<String> {
    ATTR_RE.captures_iter(attrs).find_map(|caps| {
        let key = caps.get(1)?.as_str();
        if !key.eq_ignore_ascii_case(name) {
            return None;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        Some(value.to_string())
    })
}

/// Leading-digit integer parse: `"450"` and `"450px"` both give 450.
/// Zero and non-numeric values mean "use the default".
fn parse_height(raw: &str) -> Option<u32> {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok().filter(|h| *h > 0)
}
