//! Slash command palette: the item table, filtering, and selection state.

use dioxus::prelude::*;

use super::bridge::SlashAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlashItem {
    pub title: &'static str,
    pub description: &'static str,
    pub shortcut: &'static str,
    pub action: SlashAction,
}

pub const SLASH_ITEMS: [SlashItem; 9] = [
    SlashItem {
        title: "Heading 1",
        description: "Big section heading.",
        shortcut: "h1",
        action: SlashAction::Heading { level: 1 },
    },
    SlashItem {
        title: "Heading 2",
        description: "Medium section heading.",
        shortcut: "h2",
        action: SlashAction::Heading { level: 2 },
    },
    SlashItem {
        title: "Heading 3",
        description: "Small section heading.",
        shortcut: "h3",
        action: SlashAction::Heading { level: 3 },
    },
    SlashItem {
        title: "Bullet List",
        description: "Create a simple bulleted list.",
        shortcut: "ul",
        action: SlashAction::BulletList,
    },
    SlashItem {
        title: "Numbered List",
        description: "Create a list with numbering.",
        shortcut: "ol",
        action: SlashAction::OrderedList,
    },
    SlashItem {
        title: "Blockquote",
        description: "Capture a quotation.",
        shortcut: "quote",
        action: SlashAction::Blockquote,
    },
    SlashItem {
        title: "Code Block",
        description: "Insert code snippet (Javascript, HTML, CSS, etc.)",
        shortcut: "code",
        action: SlashAction::CodeBlock,
    },
    SlashItem {
        title: "3D Model",
        description: "Insert an interactive 3D rotating cube.",
        shortcut: "3d",
        action: SlashAction::Scene,
    },
    SlashItem {
        title: "HTML Widget",
        description: "Insert custom HTML code.",
        shortcut: "html",
        action: SlashAction::Snippet,
    },
];

/// Items matching `query`, best matches first.
///
/// Title prefix beats title substring, which beats a description substring
/// or shortcut prefix. Within a rank the table order is kept.
pub fn filter_items(query: &str) -> Vec<SlashItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return SLASH_ITEMS.to_vec();
    }
    let mut ranked: Vec<(u8, SlashItem)> = SLASH_ITEMS
        .iter()
        .filter_map(|item| {
            let title = item.title.to_lowercase();
            let rank = if title.starts_with(&query) {
                0
            } else if title.contains(&query) {
                1
            } else if item.description.to_lowercase().contains(&query)
                || item.shortcut.starts_with(&query)
            {
                2
            } else {
                return None;
            };
            Some((rank, *item))
        })
        .collect();
    ranked.sort_by_key(|(rank, _)| *rank);
    ranked.into_iter().map(|(_, item)| item).collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlashPalette {
    query: Option<String>,
    items: Vec<SlashItem>,
    selected: usize,
    pub left: f64,
    pub top: f64,
}

impl SlashPalette {
    /// Open (or update) the palette for `query` at a viewport position.
    /// Selection returns to the first item whenever the query changes.
    pub fn open_at(&mut self, query: String, left: f64, top: f64) {
        if self.query.as_deref() != Some(query.as_str()) {
            self.items = filter_items(&query);
            self.selected = 0;
            self.query = Some(query);
        }
        self.left = left;
        self.top = top;
    }

    pub fn close(&mut self) {
        self.query = None;
        self.items.clear();
        self.selected = 0;
    }

    pub fn is_open(&self) -> bool {
        self.query.is_some()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn items(&self) -> &[SlashItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn move_up(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }

    pub fn move_down(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    pub fn selected_item(&self) -> Option<SlashItem> {
        self.items.get(self.selected).copied()
    }
}

/// Floating list rendered at the caret while the palette is open.
#[component]
pub fn SlashMenu(palette: Signal<SlashPalette>, on_pick: EventHandler<SlashItem>) -> Element {
    let state = palette.read();
    if !state.is_open() {
        return rsx! {};
    }
    let style = format!("left: {}px; top: {}px;", state.left, state.top + 4.0);
    let selected = state.selected();
    let items = state.items().to_vec();
    drop(state);

    rsx! {
        div { class: "slash-menu", style: "{style}",
            if items.is_empty() {
                div { class: "slash-menu-empty", "No results found" }
            }
            for (index, item) in items.into_iter().enumerate() {
                button {
                    key: "{item.shortcut}",
                    class: if index == selected { "slash-item selected" } else { "slash-item" },
                    // Keep focus in the editor
                    onmousedown: move |evt| evt.prevent_default(),
                    onmouseenter: move |_| palette.write().select(index),
                    onclick: move |_| on_pick.call(item),
                    span { class: "slash-item-title", "{item.title}" }
                    span { class: "slash-item-description", "{item.description}" }
                }
            }
        }
    }
}
