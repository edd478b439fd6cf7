use dioxus::prelude::*;

use content::editor::BlockList;
use content::{Block, BlockPatch, BlockType};

use crate::icons::*;
use crate::Icon;

const BLOCK_EDITOR_CSS: Asset = asset!("/assets/styling/block-editor.css");

/// Run `op` on the block list and report the new sequence if it changed.
fn apply(
    mut blocks: Signal<Vec<Block>>,
    on_change: EventHandler<Vec<Block>>,
    op: impl FnOnce(&mut Vec<Block>) -> bool,
) {
    let changed = op(&mut blocks.write());
    if changed {
        on_change.call(blocks.peek().clone());
    }
}

/// Structured editor for block documents.
///
/// Blocks are added from the toolbar, edited in place, removed, and
/// reordered by dragging the handle or with Alt+Arrow keys while the handle
/// has focus. Every change hands the whole sequence to `on_change`.
#[component]
pub fn BlockEditor(blocks: Signal<Vec<Block>>, on_change: EventHandler<Vec<Block>>) -> Element {
    let dragging = use_signal(|| Option::<String>::None);
    let list = blocks();

    rsx! {
        document::Link { rel: "stylesheet", href: BLOCK_EDITOR_CSS }
        div { class: "block-editor",
            div { class: "block-editor-add",
                for kind in BlockType::ADDABLE {
                    button {
                        key: "{kind.as_str()}",
                        r#type: "button",
                        class: "button small",
                        onclick: {
                            let kind = kind.clone();
                            move |_| {
                                let kind = kind.clone();
                                apply(blocks, on_change, |b| {
                                    b.add_block(kind);
                                    true
                                });
                            }
                        },
                        Icon { icon: FaPlus, width: 10, height: 10 }
                        " {kind.label()}"
                    }
                }
            }
            if list.is_empty() {
                p { class: "block-editor-empty", "No blocks yet. Add one above." }
            }
            for (index, block) in list.into_iter().enumerate() {
                BlockRow {
                    key: "{block.id}",
                    block,
                    index,
                    blocks,
                    on_change,
                    dragging,
                }
            }
        }
    }
}

#[component]
fn BlockRow(
    block: Block,
    index: usize,
    blocks: Signal<Vec<Block>>,
    on_change: EventHandler<Vec<Block>>,
    mut dragging: Signal<Option<String>>,
) -> Element {
    let id = block.id.clone();
    let is_dragging = dragging.read().as_deref() == Some(id.as_str());

    let drag_id = id.clone();
    let drop_id = id.clone();
    let remove_id = id.clone();

    rsx! {
        div {
            class: if is_dragging { "block-row dragging" } else { "block-row" },
            ondragover: move |evt| evt.prevent_default(),
            ondrop: move |evt| {
                evt.prevent_default();
                if let Some(active) = dragging.take() {
                    let over = drop_id.clone();
                    apply(blocks, on_change, |b| b.move_block(&active, Some(&over)));
                }
            },
            button {
                r#type: "button",
                class: "block-handle",
                title: "Drag to reorder (Alt+↑/↓)",
                draggable: "true",
                ondragstart: move |_| dragging.set(Some(drag_id.clone())),
                ondragend: move |_| dragging.set(None),
                onkeydown: move |evt| {
                    if !evt.modifiers().contains(Modifiers::ALT) {
                        return;
                    }
                    let target = match evt.key() {
                        Key::ArrowUp => index.checked_sub(1),
                        Key::ArrowDown => Some(index + 1),
                        _ => return,
                    };
                    evt.prevent_default();
                    apply(blocks, on_change, |b| b.reorder_block(index, target));
                },
                Icon { icon: FaGripVertical, width: 12, height: 12 }
            }
            div { class: "block-body",
                span { class: "block-type", "{block.kind.label()}" }
                BlockFields { block: block.clone(), blocks, on_change }
            }
            button {
                r#type: "button",
                class: "block-remove",
                title: "Remove block",
                onclick: move |_| {
                    let id = remove_id.clone();
                    apply(blocks, on_change, |b| b.remove_block(&id));
                },
                Icon { icon: FaXmark, width: 12, height: 12 }
            }
        }
    }
}

/// The payload inputs for one block, chosen by its type.
#[component]
fn BlockFields(block: Block, blocks: Signal<Vec<Block>>, on_change: EventHandler<Vec<Block>>) -> Element {
    let id = block.id.clone();

    match block.kind {
        BlockType::Image => {
            let src_id = id.clone();
            let caption_id = id;
            rsx! {
                input {
                    class: "block-input",
                    r#type: "url",
                    placeholder: "Image URL",
                    value: block.src.clone().unwrap_or_default(),
                    oninput: move |evt| {
                        let id = src_id.clone();
                        apply(blocks, on_change, |b| b.update_block(&id, BlockPatch::src(evt.value())));
                    },
                }
                input {
                    class: "block-input",
                    placeholder: "Caption",
                    value: block.caption.clone().unwrap_or_default(),
                    oninput: move |evt| {
                        let id = caption_id.clone();
                        apply(blocks, on_change, |b| b.update_block(&id, BlockPatch::caption(evt.value())));
                    },
                }
                if let Some(src) = block.src.as_deref().filter(|s| !s.is_empty()) {
                    img { class: "block-preview", src: "{src}", alt: "" }
                }
            }
        }
        BlockType::BulletList | BlockType::NumberedList => rsx! {
            ListItemsField { block: block.clone(), blocks, on_change }
        },
        BlockType::Divider => rsx! {
            hr { class: "block-divider" }
        },
        BlockType::Other(ref kind) => rsx! {
            p { class: "block-unknown", "Unsupported block type \"{kind}\"; it is kept as is." }
        },
        _ => {
            let placeholder = format!("Enter {} content...", block.kind.as_str());
            rsx! {
                textarea {
                    class: if block.kind == BlockType::Code { "block-textarea code" } else { "block-textarea" },
                    placeholder,
                    value: block.text_or_empty().to_string(),
                    oninput: move |evt| {
                        let id = id.clone();
                        apply(blocks, on_change, |b| b.update_block(&id, BlockPatch::text(evt.value())));
                    },
                }
            }
        }
    }
}

/// One item per non-blank line.
fn list_items(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Text of a list textarea. While the user is typing, the raw text is shown
/// instead of the stored items, so a fresh trailing newline is not dropped.
#[derive(Clone, Debug, Default, PartialEq)]
struct ListDraft {
    raw: Option<String>,
}

impl ListDraft {
    fn shown(&self, stored: &str) -> String {
        self.raw.clone().unwrap_or_else(|| stored.to_string())
    }

    fn edit(&mut self, value: String) -> Vec<String> {
        let items = list_items(&value);
        self.raw = Some(value);
        items
    }

    fn blur(&mut self) {
        self.raw = None;
    }
}

#[component]
fn ListItemsField(block: Block, blocks: Signal<Vec<Block>>, on_change: EventHandler<Vec<Block>>) -> Element {
    let mut draft = use_signal(ListDraft::default);
    let id = block.id.clone();

    rsx! {
        textarea {
            class: "block-textarea",
            placeholder: "One item per line",
            value: draft.read().shown(&block.items_as_lines()),
            oninput: move |evt| {
                let items = draft.write().edit(evt.value());
                let id = id.clone();
                apply(blocks, on_change, |b| b.update_block(&id, BlockPatch::items(items)));
            },
            onblur: move |_| draft.write().blur(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_newline_survives_while_typing() {
        let mut draft = ListDraft::default();
        let items = draft.edit("one\n".to_string());
        assert_eq!(items, vec!["one".to_string()]);
        assert_eq!(draft.shown("one"), "one\n");

        let items = draft.edit("one\ntw".to_string());
        assert_eq!(items, vec!["one".to_string(), "tw".to_string()]);

        draft.blur();
        assert_eq!(draft.shown("one\ntw"), "one\ntw");
    }

    #[test]
    fn blank_lines_are_not_items() {
        assert_eq!(list_items("a\r\n\n  \nb\n"), vec!["a".to_string(), "b".to_string()]);
        assert!(list_items("").is_empty());
    }
}
