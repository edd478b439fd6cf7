use dioxus::prelude::*;

use content::render::render_block;
use content::Block;

/// Read-only view of a block document.
///
/// Each block renders through [`render_block`], so the server-rendered page and
/// the hydrated client produce the same markup. Unknown block types render
/// nothing.
#[component]
pub fn BlockRenderer(blocks: Vec<Block>) -> Element {
    rsx! {
        div { class: "block-content",
            for (block, html) in blocks.iter().filter_map(|b| render_block(b).map(|html| (b, html))) {
                div {
                    key: "{block.id}",
                    class: "block block-{block.kind.as_str()}",
                    dangerous_inner_html: html,
                }
            }
        }
    }
}
