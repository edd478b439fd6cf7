use dioxus::prelude::*;

use content::EntryKind;

use super::EntryCard;

#[component]
pub fn WorksList() -> Element {
    rsx! {
        h1 { "Works" }
        PublishedEntries { kind: EntryKind::Work }
    }
}

#[component]
pub fn BlogList() -> Element {
    rsx! {
        h1 { "Blog" }
        PublishedEntries { kind: EntryKind::Blog }
    }
}

#[component]
fn PublishedEntries(kind: EntryKind) -> Element {
    let entries = use_server_future(move || api::list_published(kind.to_string()))?;

    let body = match &*entries.read() {
        Some(Ok(list)) if list.is_empty() => rsx! { p { class: "muted", "Nothing published yet." } },
        Some(Ok(list)) => rsx! {
            div { class: if kind == EntryKind::Work { "card-grid" } else { "card-list" },
                for entry in list.iter().cloned() {
                    EntryCard { key: "{entry.id}", entry }
                }
            }
        },
        Some(Err(e)) => rsx! { p { class: "error", "Could not load {kind.label().to_lowercase()}: {e}" } },
        None => rsx! {},
    };
    body
}
