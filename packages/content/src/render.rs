//! # Rendering
//!
//! Two renderers, one per content representation:
//!
//! - [`render_blocks`] turns a block sequence into HTML. Unknown block types
//!   and images without a source render nothing.
//! - [`plan`] decides how stored rich HTML is shown. It is a pure function of
//!   its input so the server render and the client hydration always agree.
//!
//! Rich HTML is trusted author content and is never sanitized here.

use crate::block::{Block, BlockType};
use crate::markup::{escape_text, has_document_wrappers, strip_document_wrappers};
use crate::rich::{has_markers, RichDocument};

/// Render one block, or `None` when the block has nothing to show.
pub fn render_block(block: &Block) -> Option<String> {
    let text = || escape_text(block.text_or_empty());
    let html = match &block.kind {
        BlockType::Heading1 => format!("<h1 class=\"block-h1\">{}</h1>", text()),
        BlockType::Heading2 => format!("<h2 class=\"block-h2\">{}</h2>", text()),
        BlockType::Heading3 => format!("<h3 class=\"block-h3\">{}</h3>", text()),
        BlockType::Paragraph => format!("<p class=\"block-p\">{}</p>", text()),
        BlockType::BulletList => format!("<ul class=\"block-ul\">{}</ul>", render_items(block)),
        BlockType::NumberedList => format!("<ol class=\"block-ol\">{}</ol>", render_items(block)),
        BlockType::Image => {
            let src = block.src.as_deref().filter(|s| !s.is_empty())?;
            let alt = block.alt.as_deref().filter(|s| !s.is_empty()).unwrap_or("Image");
            let caption = block
                .caption
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| format!("<figcaption>{}</figcaption>", escape_text(c)))
                .unwrap_or_default();
            format!(
                "<figure class=\"block-image\"><img src=\"{}\" alt=\"{}\" loading=\"lazy\">{caption}</figure>",
                escape_text(src),
                escape_text(alt),
            )
        }
        BlockType::Code => format!("<pre class=\"block-code\"><code>{}</code></pre>", text()),
        BlockType::Divider => "<hr class=\"block-hr\">".to_string(),
        BlockType::Other(_) => return None,
    };
    Some(html)
}

fn render_items(block: &Block) -> String {
    block
        .children
        .iter()
        .map(|item| format!("<li>{}</li>", escape_text(item.text_or_empty())))
        .collect()
}

/// Render a whole block sequence in order.
pub fn render_blocks(blocks: &[Block]) -> String {
    blocks.iter().filter_map(render_block).collect()
}

/// How a stored rich document is to be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderPlan {
    /// Inject the HTML as-is.
    Direct(String),
    /// Show a single live 3D scene. Surrounding content is not shown.
    Scene { height: u32 },
    /// Show the concatenated snippet bodies. Surrounding content is not shown.
    Snippets(String),
}

/// Decide how to render stored rich HTML.
///
/// Document wrappers are always stripped. With no marker tags the result is
/// [`RenderPlan::Direct`]. A scene marker takes precedence over snippets.
/// Snippet markers whose bodies are all empty fall back to `Direct`.
pub fn plan(html: &str) -> RenderPlan {
    let stripped = if has_document_wrappers(html) {
        strip_document_wrappers(html)
    } else {
        html.to_string()
    };
    if !has_markers(&stripped) {
        return RenderPlan::Direct(stripped);
    }

    let doc = RichDocument::parse(&stripped);
    if let Some(height) = doc.first_scene_height() {
        return RenderPlan::Scene { height };
    }

    let fragments: Vec<String> = doc
        .snippets()
        .filter(|s| !s.trim().is_empty())
        .map(strip_document_wrappers)
        .collect();
    if fragments.is_empty() {
        return RenderPlan::Direct(stripped);
    }
    RenderPlan::Snippets(fragments.concat())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(id: &str, kind: BlockType, text: &str) -> Block {
        Block {
            text: Some(text.to_string()),
            ..Block::empty(id.to_string(), kind)
        }
    }

    #[test]
    fn renders_text_blocks_escaped() {
        let blocks = vec![
            block("1", BlockType::Heading1, "Title"),
            block("2", BlockType::Paragraph, "a < b & c"),
            block("3", BlockType::Code, "fn main() {}"),
        ];
        assert_eq!(
            render_blocks(&blocks),
            concat!(
                "<h1 class=\"block-h1\">Title</h1>",
                "<p class=\"block-p\">a &lt; b &amp; c</p>",
                "<pre class=\"block-code\"><code>fn main() {}</code></pre>",
            )
        );
    }

    #[test]
    fn lists_render_children_as_items() {
        let mut list = Block::empty("l".into(), BlockType::BulletList);
        list.children = vec![Block::item("a".into(), "one"), Block::item("b".into(), "two")];
        assert_eq!(
            render_block(&list).unwrap(),
            "<ul class=\"block-ul\"><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn image_without_src_renders_nothing_but_siblings_do() {
        let image = Block::empty("img".into(), BlockType::Image);
        let blocks = vec![block("1", BlockType::Paragraph, "before"), image, Block::empty("hr".into(), BlockType::Divider)];
        let html = render_blocks(&blocks);
        assert!(!html.contains("<img"));
        assert_eq!(html, "<p class=\"block-p\">before</p><hr class=\"block-hr\">");
    }

    #[test]
    fn image_with_caption_and_default_alt() {
        let mut image = Block::empty("img".into(), BlockType::Image);
        image.src = Some("/uploads/a.png".into());
        image.caption = Some("A \"cube\"".into());
        assert_eq!(
            render_block(&image).unwrap(),
            "<figure class=\"block-image\"><img src=\"/uploads/a.png\" alt=\"Image\" loading=\"lazy\"><figcaption>A &quot;cube&quot;</figcaption></figure>"
        );
    }

    #[test]
    fn unknown_types_are_skipped() {
        let blocks = vec![
            block("1", BlockType::Other("callout".into()), "??"),
            block("2", BlockType::Paragraph, "kept"),
        ];
        assert_eq!(render_blocks(&blocks), "<p class=\"block-p\">kept</p>");
    }

    #[test]
    fn rendering_is_deterministic() {
        let blocks = vec![block("1", BlockType::Heading2, "x")];
        assert_eq!(render_blocks(&blocks), render_blocks(&blocks));
    }

    #[test]
    fn marker_free_html_renders_directly_and_idempotently() {
        let html = "<h2>Hello</h2><p>World</p>";
        let once = plan(html);
        assert_eq!(once, RenderPlan::Direct(html.to_string()));
        let RenderPlan::Direct(inner) = &once else { unreachable!() };
        assert_eq!(plan(inner), once);
    }

    #[test]
    fn direct_path_strips_document_skeleton() {
        assert_eq!(
            plan("<!DOCTYPE html><html><head></head><body>Content</body></html>"),
            RenderPlan::Direct("Content".into())
        );
    }

    #[test]
    fn scene_marker_replaces_everything() {
        let html = "<three-js-block height=\"450\"></three-js-block><p>Trailing text</p>";
        assert_eq!(plan(html), RenderPlan::Scene { height: 450 });
        assert_eq!(plan("<p>x</p><three-js-block></three-js-block>"), RenderPlan::Scene { height: 300 });
    }

    #[test]
    fn scene_takes_precedence_over_snippets() {
        let html = "<html-snippet html=\"&lt;b&gt;x&lt;/b&gt;\"></html-snippet><three-js-block height=\"250\"></three-js-block>";
        assert_eq!(plan(html), RenderPlan::Scene { height: 250 });
    }

    #[test]
    fn snippets_concatenate_in_order_and_drop_surroundings() {
        let html = concat!(
            "<p>ignored</p>",
            "<html-snippet html=\"&lt;div&gt;one&lt;/div&gt;\"></html-snippet>",
            "<p>also ignored</p>",
            "<html-snippet html=\"&lt;html&gt;&lt;body&gt;&lt;span&gt;two&lt;/span&gt;&lt;/body&gt;&lt;/html&gt;\"></html-snippet>",
        );
        assert_eq!(plan(html), RenderPlan::Snippets("<div>one</div><span>two</span>".into()));
    }

    #[test]
    fn empty_snippets_fall_through_to_direct() {
        let html = "<p>Body</p><html-snippet></html-snippet>";
        assert_eq!(plan(html), RenderPlan::Direct(html.to_string()));
    }

    #[test]
    fn wrapped_snippet_marker_survives_stripping() {
        let html = "<html><body><html-snippet html=\"&lt;i&gt;k&lt;/i&gt;\"></html-snippet></body></html>";
        assert_eq!(plan(html), RenderPlan::Snippets("<i>k</i>".into()));
    }

    #[test]
    fn lookalike_tag_names_render_directly() {
        let html = "<html-snippet-x html=\"&lt;b&gt;\"></html-snippet-x>";
        assert_eq!(plan(html), RenderPlan::Direct(html.to_string()));
    }
}
