use dioxus::prelude::*;

use content::{Entry, EntryKind};

use crate::Route;

/// Every entry grouped by kind, drafts included.
#[component]
pub fn Dashboard() -> Element {
    let entries = use_resource(api::list_entries);

    let body = match &*entries.read() {
        Some(Ok(list)) => rsx! {
            for kind in EntryKind::ALL {
                KindSection {
                    key: "{kind}",
                    kind,
                    entries: list.iter().filter(|e| e.kind == kind).cloned().collect::<Vec<_>>(),
                }
            }
        },
        Some(Err(e)) => rsx! { p { class: "error", "Could not load entries: {e}" } },
        None => rsx! { p { class: "muted", "Loading..." } },
    };

    rsx! {
        h1 { "Dashboard" }
        {body}
    }
}

#[component]
fn KindSection(kind: EntryKind, entries: Vec<Entry>) -> Element {
    rsx! {
        section { class: "dashboard-section",
            div { class: "section-header",
                h2 { "{kind.label()}" }
                Link {
                    class: "button small",
                    to: Route::NewEntry { kind: kind.to_string() },
                    "New"
                }
            }
            if entries.is_empty() {
                p { class: "muted", "None yet." }
            } else {
                table { class: "entry-table",
                    thead {
                        tr {
                            th { "Title" }
                            th { "Slug" }
                            th { "Status" }
                            th { "Updated" }
                        }
                    }
                    tbody {
                        for entry in entries {
                            tr { key: "{entry.id}",
                                td {
                                    Link {
                                        to: Route::EditEntry { kind: kind.to_string(), id: entry.id.clone() },
                                        "{entry.title}"
                                    }
                                }
                                td { class: "muted", "{entry.slug}" }
                                td {
                                    if entry.published {
                                        span { class: "status published", "Published" }
                                    } else {
                                        span { class: "status draft", "Draft" }
                                    }
                                }
                                td { class: "muted",
                                    {entry.updated_at.map(|at| at.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default()}
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
