use dioxus::prelude::*;

use crate::icons::*;
use crate::Icon;

use super::bridge::{EditorCommand, EditorStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarAction {
    Undo,
    Redo,
    Heading(u8),
    Bold,
    Italic,
    Strike,
    Highlight,
    BulletList,
    OrderedList,
    Blockquote,
    CodeBlock,
    Image,
    Link,
    Scene,
    Snippet,
}

/// Button groups, separated by dividers in the toolbar.
pub const TOOLBAR_GROUPS: [&[ToolbarAction]; 5] = [
    &[ToolbarAction::Undo, ToolbarAction::Redo],
    &[ToolbarAction::Heading(1), ToolbarAction::Heading(2), ToolbarAction::Heading(3)],
    &[
        ToolbarAction::Bold,
        ToolbarAction::Italic,
        ToolbarAction::Strike,
        ToolbarAction::Highlight,
    ],
    &[
        ToolbarAction::BulletList,
        ToolbarAction::OrderedList,
        ToolbarAction::Blockquote,
        ToolbarAction::CodeBlock,
    ],
    &[
        ToolbarAction::Image,
        ToolbarAction::Link,
        ToolbarAction::Scene,
        ToolbarAction::Snippet,
    ],
];

impl ToolbarAction {
    pub fn title(&self) -> String {
        match self {
            ToolbarAction::Undo => "Undo".into(),
            ToolbarAction::Redo => "Redo".into(),
            ToolbarAction::Heading(level) => format!("Heading {level}"),
            ToolbarAction::Bold => "Bold".into(),
            ToolbarAction::Italic => "Italic".into(),
            ToolbarAction::Strike => "Strikethrough".into(),
            ToolbarAction::Highlight => "Highlight".into(),
            ToolbarAction::BulletList => "Bullet list".into(),
            ToolbarAction::OrderedList => "Numbered list".into(),
            ToolbarAction::Blockquote => "Blockquote".into(),
            ToolbarAction::CodeBlock => "Code block".into(),
            ToolbarAction::Image => "Insert image".into(),
            ToolbarAction::Link => "Set link".into(),
            ToolbarAction::Scene => "Insert 3D scene".into(),
            ToolbarAction::Snippet => "Insert HTML widget".into(),
        }
    }

    /// Name the editor reports in `state.active` when this mark or node is
    /// active at the cursor.
    pub fn active_key(&self) -> Option<String> {
        let key = match self {
            ToolbarAction::Heading(level) => return Some(format!("heading{level}")),
            ToolbarAction::Bold => "bold",
            ToolbarAction::Italic => "italic",
            ToolbarAction::Strike => "strike",
            ToolbarAction::Highlight => "highlight",
            ToolbarAction::BulletList => "bulletList",
            ToolbarAction::OrderedList => "orderedList",
            ToolbarAction::Blockquote => "blockquote",
            ToolbarAction::CodeBlock => "codeBlock",
            ToolbarAction::Link => "link",
            _ => return None,
        };
        Some(key.to_string())
    }

    pub fn command(&self, scene_height: u32) -> EditorCommand {
        match self {
            ToolbarAction::Undo => EditorCommand::Undo,
            ToolbarAction::Redo => EditorCommand::Redo,
            ToolbarAction::Heading(level) => EditorCommand::ToggleHeading { level: *level },
            ToolbarAction::Bold => EditorCommand::ToggleBold,
            ToolbarAction::Italic => EditorCommand::ToggleItalic,
            ToolbarAction::Strike => EditorCommand::ToggleStrike,
            ToolbarAction::Highlight => EditorCommand::ToggleHighlight,
            ToolbarAction::BulletList => EditorCommand::ToggleBulletList,
            ToolbarAction::OrderedList => EditorCommand::ToggleOrderedList,
            ToolbarAction::Blockquote => EditorCommand::ToggleBlockquote,
            ToolbarAction::CodeBlock => EditorCommand::ToggleCodeBlock,
            ToolbarAction::Image => EditorCommand::PickImage,
            ToolbarAction::Link => EditorCommand::PromptLink,
            ToolbarAction::Scene => EditorCommand::InsertScene { height: scene_height },
            ToolbarAction::Snippet => EditorCommand::InsertSnippet,
        }
    }

    pub fn is_enabled(&self, status: &EditorStatus) -> bool {
        match self {
            ToolbarAction::Undo => status.can_undo,
            ToolbarAction::Redo => status.can_redo,
            _ => true,
        }
    }
}

#[component]
fn ActionIcon(action: ToolbarAction) -> Element {
    match action {
        ToolbarAction::Undo => rsx! { Icon { icon: FaRotateLeft, width: 14, height: 14 } },
        ToolbarAction::Redo => rsx! { Icon { icon: FaRotateRight, width: 14, height: 14 } },
        ToolbarAction::Heading(level) => rsx! { span { class: "toolbar-text", "H{level}" } },
        ToolbarAction::Bold => rsx! { Icon { icon: FaBold, width: 14, height: 14 } },
        ToolbarAction::Italic => rsx! { Icon { icon: FaItalic, width: 14, height: 14 } },
        ToolbarAction::Strike => rsx! { Icon { icon: FaStrikethrough, width: 14, height: 14 } },
        ToolbarAction::Highlight => rsx! { Icon { icon: FaHighlighter, width: 14, height: 14 } },
        ToolbarAction::BulletList => rsx! { Icon { icon: FaListUl, width: 14, height: 14 } },
        ToolbarAction::OrderedList => rsx! { Icon { icon: FaListOl, width: 14, height: 14 } },
        ToolbarAction::Blockquote => rsx! { Icon { icon: FaQuoteLeft, width: 14, height: 14 } },
        ToolbarAction::CodeBlock => rsx! { Icon { icon: FaCode, width: 14, height: 14 } },
        ToolbarAction::Image => rsx! { Icon { icon: FaImage, width: 14, height: 14 } },
        ToolbarAction::Link => rsx! { Icon { icon: FaLink, width: 14, height: 14 } },
        ToolbarAction::Scene => rsx! { Icon { icon: FaCube, width: 14, height: 14 } },
        ToolbarAction::Snippet => rsx! { Icon { icon: FaFileCode, width: 14, height: 14 } },
    }
}

#[component]
pub fn Toolbar(status: EditorStatus, on_action: EventHandler<ToolbarAction>) -> Element {
    rsx! {
        div { class: "editor-toolbar",
            for (group_index, group) in TOOLBAR_GROUPS.iter().enumerate() {
                if group_index > 0 {
                    span { class: "toolbar-divider" }
                }
                for action in group.iter().copied() {
                    button {
                        r#type: "button",
                        title: action.title(),
                        disabled: !action.is_enabled(&status),
                        class: if action.active_key().is_some_and(|k| status.is_active(&k)) { "toolbar-button active" } else { "toolbar-button" },
                        onmousedown: move |evt| evt.prevent_default(),
                        onclick: move |_| on_action.call(action),
                        ActionIcon { action }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_group_action_has_a_title() {
        for action in TOOLBAR_GROUPS.iter().flat_map(|g| g.iter()) {
            assert!(!action.title().is_empty());
        }
        assert_eq!(TOOLBAR_GROUPS.iter().map(|g| g.len()).sum::<usize>(), 15);
    }

    #[test]
    fn undo_follows_editor_history() {
        let status = EditorStatus { can_undo: false, can_redo: true, ..Default::default() };
        assert!(!ToolbarAction::Undo.is_enabled(&status));
        assert!(ToolbarAction::Redo.is_enabled(&status));
        assert!(ToolbarAction::Bold.is_enabled(&status));
    }

    #[test]
    fn headings_map_to_levels() {
        assert_eq!(ToolbarAction::Heading(2).active_key().as_deref(), Some("heading2"));
        assert_eq!(
            ToolbarAction::Heading(3).command(300),
            EditorCommand::ToggleHeading { level: 3 }
        );
        assert_eq!(ToolbarAction::Scene.command(420), EditorCommand::InsertScene { height: 420 });
        assert_eq!(ToolbarAction::Image.active_key(), None);
    }
}
