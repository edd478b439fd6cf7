use dioxus::prelude::*;

use content::{DocumentContent, RendererKind};

use crate::block_renderer::BlockRenderer;
use crate::interactive_renderer::InteractiveRenderer;

/// Public view of an entry body. Block documents and rich documents each go
/// to their own renderer; a document is never handed to the other one.
#[component]
pub fn ContentView(content: DocumentContent) -> Element {
    match content.renderer() {
        RendererKind::Blocks => rsx! {
            BlockRenderer { blocks: content.blocks().map(<[_]>::to_vec).unwrap_or_default() }
        },
        RendererKind::Interactive => rsx! {
            InteractiveRenderer { html: content.html().unwrap_or_default() }
        },
    }
}
