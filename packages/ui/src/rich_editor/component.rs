use dioxus::prelude::*;

use content::rich::DEFAULT_SCENE_HEIGHT;

use super::bridge::{EditorCommand, EditorEvent, EditorStatus};
use super::palette::{SlashItem, SlashMenu, SlashPalette};
use super::toolbar::Toolbar;
use crate::interactive_renderer::THREE_SCENE_JS;
use crate::notices::{push_notice, NoticeLevel, Notices};

const RICH_EDITOR_JS: Asset = asset!("/assets/rich-editor.js");
const RICH_EDITOR_CSS: Asset = asset!("/assets/styling/rich-editor.css");

pub const DEFAULT_PLACEHOLDER: &str = "Type '/' for commands, or just start writing...";

static EDITOR_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

/// Escape a string so it's safe to embed inside a JS string literal (double-quoted).
fn js_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

fn run(editor_id: &str, command: &EditorCommand) {
    match command.script(editor_id) {
        Ok(js) => {
            document::eval(&js);
        }
        Err(e) => tracing::warn!("could not encode editor command: {e}"),
    }
}

/// TipTap-based WYSIWYG editor with a toolbar and a `/` command palette.
///
/// `content` holds the document HTML. Edits are written back to it and
/// reported through `on_change`; outside writes are pushed into the editor
/// only when they differ from what the editor last reported.
#[component]
pub fn RichTextEditor(
    mut content: Signal<String>,
    on_change: EventHandler<String>,
    #[props(default = DEFAULT_PLACEHOLDER.to_string())] placeholder: String,
    #[props(default = true)] editable: bool,
    #[props(default = DEFAULT_SCENE_HEIGHT)] scene_height: u32,
) -> Element {
    let editor_id = use_signal(|| {
        let n = EDITOR_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        format!("rich-editor-{n}")
    });
    let mut initialized = use_signal(|| false);
    let mut last_pushed = use_signal(String::new);
    let mut palette = use_signal(SlashPalette::default);
    let mut status = use_signal(EditorStatus::default);
    let notices = try_use_context::<Signal<Notices>>();

    // ── Load the editor glue script once ──
    use_effect(move || {
        let js = format!(
            r#"(function() {{
                if (window.PortfolioEditor) {{ dioxus.send(true); return; }}
                var existing = document.getElementById('portfolio-editor-js');
                if (existing) {{
                    existing.addEventListener('load', function() {{ dioxus.send(true); }});
                    return;
                }}
                var script = document.createElement('script');
                script.id = 'portfolio-editor-js';
                script.src = {src};
                script.onload = function() {{ dioxus.send(true); }};
                script.onerror = function() {{ dioxus.send(false); }};
                document.head.appendChild(script);
            }})();"#,
            src = js_string_escape(&RICH_EDITOR_JS.to_string()),
        );
        spawn(async move {
            let mut eval = document::eval(&js);
            match eval.recv::<bool>().await {
                Ok(true) => initialized.set(true),
                Ok(false) => tracing::warn!("rich editor script failed to load"),
                Err(e) => tracing::warn!("rich editor script bridge failed: {e:?}"),
            }
        });
    });

    // ── Create the editor and keep one channel open for its events ──
    {
        let ph = placeholder.clone();
        use_effect(move || {
            if !initialized() {
                return;
            }

            let eid = editor_id.peek().clone();
            let text = content.peek().clone();
            last_pushed.set(text.clone());

            let js = format!(
                r#"(function() {{
                    var container = document.getElementById({eid_js});
                    if (!container) return;
                    PortfolioEditor.create({eid_js}, container, {{
                        content: {content_js},
                        placeholder: {ph_js},
                        editable: {editable},
                        sceneHeight: {scene_height},
                        sceneScript: {scene_js},
                        uploadUrl: {upload_js},
                        uploadField: {field_js},
                        onEvent: function(event) {{ dioxus.send(event); }}
                    }});
                }})();"#,
                eid_js = js_string_escape(&eid),
                content_js = js_string_escape(&text),
                ph_js = js_string_escape(&ph),
                scene_js = js_string_escape(&THREE_SCENE_JS.to_string()),
                upload_js = js_string_escape(api::UPLOAD_ROUTE),
                field_js = js_string_escape(api::UPLOAD_FIELD),
            );

            spawn(async move {
                let mut eval = document::eval(&js);
                while let Ok(value) = eval.recv::<serde_json::Value>().await {
                    let event = match serde_json::from_value::<EditorEvent>(value) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::debug!("ignoring editor event: {e}");
                            continue;
                        }
                    };
                    match event {
                        EditorEvent::Change { html } => {
                            last_pushed.set(html.clone());
                            content.set(html.clone());
                            on_change.call(html);
                        }
                        EditorEvent::Slash { query: Some(query), left, top } => {
                            palette.write().open_at(query, left, top);
                        }
                        EditorEvent::Slash { query: None, .. } => palette.write().close(),
                        EditorEvent::SlashKey { key } => match key.as_str() {
                            "ArrowUp" => palette.write().move_up(),
                            "ArrowDown" => palette.write().move_down(),
                            "Enter" => {
                                let item = palette.peek().selected_item();
                                apply_slash(&eid, palette, item);
                            }
                            "Escape" => apply_slash(&eid, palette, None),
                            _ => {}
                        },
                        EditorEvent::Uploaded { url } => run(&eid, &EditorCommand::SetImage { src: url }),
                        EditorEvent::UploadFailed { name, error } => {
                            tracing::warn!(name = %name, "image upload failed: {error}");
                            if let Some(mut notices) = notices {
                                push_notice(
                                    &mut notices,
                                    NoticeLevel::Error,
                                    format!("Image upload failed: {error}"),
                                );
                            }
                        }
                        EditorEvent::State { active, can_undo, can_redo } => {
                            let next = EditorStatus { active, can_undo, can_redo };
                            if *status.peek() != next {
                                status.set(next);
                            }
                        }
                    }
                }
            });
        });
    }

    // ── Sync external content changes into the editor ──
    use_effect(move || {
        let html = content();
        if !initialized() {
            return;
        }
        if html == last_pushed() {
            return;
        }
        last_pushed.set(html.clone());
        run(&editor_id.peek(), &EditorCommand::SetContent { html });
    });

    use_drop(move || {
        let js = format!(
            "if (window.PortfolioEditor) {{ window.PortfolioEditor.destroy({}); }}",
            js_string_escape(&editor_id.peek())
        );
        document::eval(&js);
    });

    let on_pick = move |item: SlashItem| {
        apply_slash(&editor_id.peek(), palette, Some(item));
    };

    rsx! {
        document::Link { rel: "stylesheet", href: RICH_EDITOR_CSS }
        div { class: "rich-editor",
            if editable {
                Toolbar {
                    status: status(),
                    on_action: move |action: super::toolbar::ToolbarAction| {
                        run(&editor_id.peek(), &action.command(scene_height));
                    },
                }
            }
            div { id: "{editor_id}", class: "rich-editor-content" }
            SlashMenu { palette, on_pick }
        }
    }
}

/// Close the palette and either run `item` or release the trigger.
fn apply_slash(editor_id: &str, mut palette: Signal<SlashPalette>, item: Option<SlashItem>) {
    palette.write().close();
    let command = match item {
        Some(item) => EditorCommand::ApplySlash { action: item.action },
        None => EditorCommand::CloseSlash,
    };
    run(editor_id, &command);
}

#[cfg(test)]
mod tests {
    use super::js_string_escape;

    #[test]
    fn escapes_for_double_quoted_literals() {
        assert_eq!(js_string_escape("a\"b"), r#""a\"b""#);
        assert_eq!(js_string_escape("line\nnext"), r#""line\nnext""#);
        assert_eq!(js_string_escape("\u{1}"), r#""\u0001""#);
        assert_eq!(js_string_escape("\u{2028}"), r#""\u2028""#);
    }
}
