//! Messages exchanged with the TipTap glue script.
//!
//! Editor → Rust messages arrive on the long-lived `eval` channel as JSON
//! objects tagged by `event`. Rust → editor commands are serialized the same
//! way (tagged by `cmd`) and handed to the editor instance's `exec`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EditorEvent {
    /// Document changed; `html` is the full serialized document.
    Change { html: String },
    /// Slash trigger opened, moved or closed (`query: None`).
    Slash {
        query: Option<String>,
        #[serde(default)]
        left: f64,
        #[serde(default)]
        top: f64,
    },
    /// A navigation key the editor swallowed while the palette was open.
    SlashKey { key: String },
    /// A picked, dropped or pasted image was stored and is served at `url`.
    Uploaded { url: String },
    UploadFailed { name: String, error: String },
    State {
        #[serde(default)]
        active: Vec<String>,
        #[serde(rename = "canUndo", default)]
        can_undo: bool,
        #[serde(rename = "canRedo", default)]
        can_redo: bool,
    },
}

/// Toolbar-relevant editor state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EditorStatus {
    pub active: Vec<String>,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl EditorStatus {
    pub fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|a| a == name)
    }
}

/// What a slash palette item does once its trigger text is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SlashAction {
    Heading { level: u8 },
    BulletList,
    OrderedList,
    Blockquote,
    CodeBlock,
    Scene,
    Snippet,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum EditorCommand {
    Undo,
    Redo,
    ToggleHeading { level: u8 },
    ToggleBold,
    ToggleItalic,
    ToggleStrike,
    ToggleHighlight,
    ToggleBulletList,
    ToggleOrderedList,
    ToggleBlockquote,
    ToggleCodeBlock,
    /// Open a file picker; the result comes back as `uploaded` or `uploadFailed`.
    PickImage,
    /// Ask for a URL in a prompt; an empty answer removes the link.
    PromptLink,
    InsertScene { height: u32 },
    InsertSnippet,
    SetImage { src: String },
    /// Delete the `/query` trigger text, then run `action`.
    ApplySlash { action: SlashAction },
    /// Stop intercepting keys for the current trigger.
    CloseSlash,
    /// Replace the document without emitting a change event.
    SetContent { html: String },
}

impl EditorCommand {
    /// JS statement that runs this command on the editor mounted in `editor_id`.
    pub fn script(&self, editor_id: &str) -> Result<String, serde_json::Error> {
        let payload = serde_json::to_string(self)?;
        Ok(format!(
            r#"if (window.PortfolioEditor) {{ window.PortfolioEditor.exec("{editor_id}", {payload}); }}"#
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_parse_by_tag() {
        let change: EditorEvent =
            serde_json::from_value(json!({"event": "change", "html": "<p>x</p>"})).unwrap();
        assert_eq!(change, EditorEvent::Change { html: "<p>x</p>".into() });

        let closed: EditorEvent =
            serde_json::from_value(json!({"event": "slash", "query": null})).unwrap();
        assert_eq!(closed, EditorEvent::Slash { query: None, left: 0.0, top: 0.0 });

        let state: EditorEvent = serde_json::from_value(
            json!({"event": "state", "active": ["bold"], "canUndo": true, "canRedo": false}),
        )
        .unwrap();
        assert_eq!(
            state,
            EditorEvent::State { active: vec!["bold".into()], can_undo: true, can_redo: false }
        );

        let uploaded: EditorEvent =
            serde_json::from_value(json!({"event": "uploaded", "url": "/uploads/a.png"})).unwrap();
        assert_eq!(uploaded, EditorEvent::Uploaded { url: "/uploads/a.png".into() });

        let failed: EditorEvent = serde_json::from_value(
            json!({"event": "uploadFailed", "name": "a.png", "error": "length limit exceeded"}),
        )
        .unwrap();
        assert_eq!(
            failed,
            EditorEvent::UploadFailed { name: "a.png".into(), error: "length limit exceeded".into() }
        );
    }

    #[test]
    fn unknown_events_are_rejected() {
        assert!(serde_json::from_value::<EditorEvent>(json!({"event": "blur"})).is_err());
        // File bytes never travel over the event channel.
        assert!(serde_json::from_value::<EditorEvent>(
            json!({"event": "upload", "name": "a.png", "bytes": [1, 2, 3]})
        )
        .is_err());
    }

    #[test]
    fn commands_serialize_for_the_script() {
        assert_eq!(
            serde_json::to_value(EditorCommand::ToggleHeading { level: 2 }).unwrap(),
            json!({"cmd": "toggleHeading", "level": 2})
        );
        assert_eq!(
            serde_json::to_value(EditorCommand::ApplySlash { action: SlashAction::Heading { level: 1 } })
                .unwrap(),
            json!({"cmd": "applySlash", "action": {"kind": "heading", "level": 1}})
        );
        assert_eq!(
            serde_json::to_value(EditorCommand::ApplySlash { action: SlashAction::CodeBlock }).unwrap(),
            json!({"cmd": "applySlash", "action": {"kind": "codeBlock"}})
        );
    }

    #[test]
    fn script_embeds_payload_as_a_literal() {
        let script = EditorCommand::SetContent { html: "<p>\"quoted\"</p>".into() }
            .script("rich-editor-1")
            .unwrap();
        assert!(script.contains(r#"exec("rich-editor-1", {"cmd":"setContent","html":"<p>\"quoted\"</p>"})"#));
    }

    #[test]
    fn status_lookup() {
        let status = EditorStatus { active: vec!["heading2".into()], ..Default::default() };
        assert!(status.is_active("heading2"));
        assert!(!status.is_active("bold"));
    }
}
