use dioxus::prelude::*;

const NOTICES_CSS: Asset = asset!("/assets/styling/notices.css");

/// How long non-error notices stay on screen.
#[cfg(target_arch = "wasm32")]
const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub timestamp: String,
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Notices {
    pub entries: Vec<Notice>,
    next_id: u64,
}

impl Notices {
    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notice {
            id,
            timestamp: current_time(),
            level,
            message: message.into(),
        });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }
}

pub fn use_notices() -> Signal<Notices> {
    use_context::<Signal<Notices>>()
}

/// Show a notice. Errors stay until dismissed; everything else fades out.
pub fn push_notice(notices: &mut Signal<Notices>, level: NoticeLevel, message: impl Into<String>) {
    let message = message.into();
    match level {
        NoticeLevel::Error => tracing::error!("{message}"),
        NoticeLevel::Warning => tracing::warn!("{message}"),
        _ => tracing::info!("{message}"),
    }
    let id = notices.write().push(level, message);

    #[cfg(target_arch = "wasm32")]
    if level != NoticeLevel::Error {
        let mut notices = *notices;
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
            notices.write().dismiss(id);
        });
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = id;
}

/// Provides the notice stack to everything below it and renders it.
#[component]
pub fn NoticeProvider(children: Element) -> Element {
    use_context_provider(|| Signal::new(Notices::default()));

    rsx! {
        {children}
        NoticeStack {}
    }
}

#[component]
pub fn NoticeStack() -> Element {
    let mut notices = use_notices();
    let entries = notices().entries.clone();

    if entries.is_empty() {
        return rsx! {};
    }

    rsx! {
        document::Stylesheet { href: NOTICES_CSS }

        div {
            class: "notice-stack",
            for notice in entries.into_iter().rev() {
                div {
                    key: "{notice.id}",
                    class: match notice.level {
                        NoticeLevel::Error => "notice error",
                        NoticeLevel::Warning => "notice warning",
                        NoticeLevel::Success => "notice success",
                        NoticeLevel::Info => "notice info",
                    },
                    span { class: "notice-time", "{notice.timestamp}" }
                    span { class: "notice-message", "{notice.message}" }
                    button {
                        class: "notice-dismiss",
                        title: "Dismiss",
                        onclick: move |_| notices.write().dismiss(notice.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    "00:00:00".to_string()
}
