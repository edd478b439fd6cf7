use dioxus::prelude::*;

use api::FixResponse;

use super::state::{DragGesture, FixState, FloatingWindow, Generation, GestureKind};
use super::FixEndpoint;
use crate::icons::*;
use crate::notices::{push_notice, NoticeLevel, Notices};
use crate::rich_editor::RichTextEditor;
use crate::Icon;

const AI_FIX_CSS: Asset = asset!("/assets/styling/ai-fix.css");

/// Used when the browser cannot tell us (server render, tests).
const FALLBACK_VIEWPORT: (f64, f64) = (1280.0, 800.0);

fn viewport_size() -> (f64, f64) {
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        let width = window.inner_width().ok().and_then(|v| v.as_f64());
        let height = window.inner_height().ok().and_then(|v| v.as_f64());
        if let (Some(width), Some(height)) = (width, height) {
            return (width, height);
        }
    }
    FALLBACK_VIEWPORT
}

pub async fn request_fix(endpoint: &FixEndpoint, html: String) -> Result<FixResponse, ServerFnError> {
    match endpoint {
        FixEndpoint::Blog => api::fix_blog(html).await,
        FixEndpoint::EnrichWork { title } => api::enrich_work(html, title.clone()).await,
    }
}

/// Button that opens a floating side-by-side window: the current content on
/// the left, the AI-rewritten version (editable) on the right.
#[component]
pub fn AiFixDialog(
    content: String,
    endpoint: FixEndpoint,
    on_apply: EventHandler<String>,
    #[props(default = "AI Content Fixer".to_string())] title: String,
) -> Element {
    let mut open = use_signal(|| false);
    let mut fix = use_signal(FixState::default);
    let mut generation = use_signal(Generation::default);
    let mut window = use_signal(|| FloatingWindow::centered(FALLBACK_VIEWPORT.0, FALLBACK_VIEWPORT.1));
    let mut gesture = use_signal(|| Option::<DragGesture>::None);
    let mut original = use_signal(String::new);
    let mut fixed = use_signal(String::new);
    let notices = try_use_context::<Signal<Notices>>();

    let open_dialog = move |_| {
        generation.write().advance();
        fix.set(FixState::Idle);
        original.set(content.clone());
        fixed.set(String::new());
        let (width, height) = viewport_size();
        window.set(FloatingWindow::centered(width, height));
        open.set(true);
    };

    // Closing bumps the generation so an in-flight answer is dropped.
    let mut close = move || {
        generation.write().advance();
        gesture.set(None);
        open.set(false);
    };

    let start_fix = move |_| {
        if !fix.write().start() {
            return;
        }
        let ticket = *generation.peek();
        let html = original.peek().clone();
        let endpoint = endpoint.clone();
        spawn(async move {
            let result = request_fix(&endpoint, html).await;
            if *generation.peek() != ticket {
                tracing::debug!("discarding AI fix result for a closed dialog");
                return;
            }
            match result {
                Ok(response) => {
                    fixed.set(response.fixed_html.clone());
                    fix.write().succeed(response.fixed_html);
                }
                Err(e) => {
                    let message = e.to_string();
                    if let Some(mut notices) = notices {
                        push_notice(&mut notices, NoticeLevel::Error, format!("AI fix failed: {message}"));
                    }
                    fix.write().fail(message);
                }
            }
        });
    };

    let apply = move |_| {
        let Some(html) = fix.write().take_result() else {
            return;
        };
        on_apply.call(html);
        close();
        if let Some(mut notices) = notices {
            push_notice(&mut notices, NoticeLevel::Success, "AI changes applied successfully");
        }
    };

    let state = fix();
    let has_result = state.result().is_some();

    rsx! {
        document::Link { rel: "stylesheet", href: AI_FIX_CSS }
        button {
            r#type: "button",
            class: "button ai-fix-trigger",
            onclick: open_dialog,
            Icon { icon: FaWandMagicSparkles, width: 14, height: 14 }
            " {title}"
        }
        if open() {
            div {
                class: "ai-fix-layer",
                onmousemove: move |evt| {
                    if let Some(g) = *gesture.peek() {
                        let p = evt.client_coordinates();
                        window.set(g.apply(p.x, p.y, viewport_size()));
                    }
                },
                onmouseup: move |_| gesture.set(None),
                div {
                    class: "ai-fix-window",
                    style: window().style(),
                    div {
                        class: "ai-fix-header",
                        onmousedown: move |evt| {
                            let p = evt.client_coordinates();
                            gesture.set(Some(DragGesture::begin(GestureKind::Move, p.x, p.y, window())));
                        },
                        span { class: "ai-fix-title",
                            Icon { icon: FaWandMagicSparkles, width: 14, height: 14 }
                            " {title}"
                        }
                        button {
                            r#type: "button",
                            class: "ai-fix-close",
                            title: "Close",
                            onmousedown: move |evt| evt.stop_propagation(),
                            onclick: move |_| close(),
                            Icon { icon: FaXmark, width: 14, height: 14 }
                        }
                    }
                    div { class: "ai-fix-panels",
                        section { class: "ai-fix-panel",
                            h3 { "Original" }
                            div { class: "ai-fix-panel-body",
                                RichTextEditor { content: original, on_change: move |_| {}, editable: false }
                            }
                        }
                        section { class: "ai-fix-panel",
                            h3 { "AI Fixed Version" }
                            div { class: "ai-fix-panel-body",
                                {match state {
                                    FixState::Idle => rsx! {
                                        div { class: "ai-fix-idle",
                                            p { "Ready to fix formatting?" }
                                            button { r#type: "button", class: "button primary", onclick: start_fix, "Start AI Fix" }
                                        }
                                    },
                                    FixState::Loading => rsx! {
                                        div { class: "ai-fix-loading",
                                            span { class: "spinner" }
                                            p { "Analyzing and fixing content..." }
                                        }
                                    },
                                    FixState::Ready(_) => rsx! {
                                        RichTextEditor {
                                            content: fixed,
                                            on_change: move |html: String| {
                                                fix.write().edit(html);
                                            },
                                        }
                                    },
                                    FixState::Failed(message) => rsx! {
                                        div { class: "ai-fix-error",
                                            p { "{message}" }
                                            button { r#type: "button", class: "button", onclick: start_fix, "Try again" }
                                        }
                                    },
                                }}
                            }
                        }
                    }
                    div { class: "ai-fix-footer",
                        button { r#type: "button", class: "button", onclick: move |_| close(), "Cancel" }
                        if has_result {
                            button {
                                r#type: "button",
                                class: "button primary",
                                onclick: apply,
                                Icon { icon: FaCheck, width: 12, height: 12 }
                                " Apply Changes"
                            }
                        }
                    }
                    div {
                        class: "ai-fix-resize",
                        title: "Resize",
                        onmousedown: move |evt| {
                            evt.stop_propagation();
                            let p = evt.client_coordinates();
                            gesture.set(Some(DragGesture::begin(GestureKind::Resize, p.x, p.y, window())));
                        },
                    }
                }
            }
        }
    }
}
