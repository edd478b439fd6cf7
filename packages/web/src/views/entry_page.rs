use dioxus::prelude::*;

use content::EntryKind;
use ui::ContentView;

use super::display_date;
use crate::Route;

#[component]
pub fn WorkDetail(slug: String) -> Element {
    rsx! {
        PublishedEntry { kind: EntryKind::Work, slug }
    }
}

#[component]
pub fn BlogPost(slug: String) -> Element {
    rsx! {
        PublishedEntry { kind: EntryKind::Blog, slug }
    }
}

/// Full view of one published work or post.
#[component]
fn PublishedEntry(kind: EntryKind, slug: String) -> Element {
    // Track the slug in a signal so the fetch re-runs on route param change
    let mut slug_signal = use_signal(|| slug.clone());
    if *slug_signal.peek() != slug {
        slug_signal.set(slug.clone());
    }

    let entry = use_server_future(move || api::get_published(kind.to_string(), slug_signal()))?;
    let back = match kind {
        EntryKind::Work => rsx! { Link { to: Route::WorksList {}, "← All works" } },
        _ => rsx! { Link { to: Route::BlogList {}, "← All posts" } },
    };

    let body = match &*entry.read() {
        Some(Ok(Some(entry))) => {
            let date = display_date(entry);
            rsx! {
                article { class: "entry",
                    header { class: "entry-header",
                        h1 { "{entry.title}" }
                        if let Some(date) = date {
                            time { class: "muted", "{date}" }
                        }
                        if !entry.tags.is_empty() {
                            ul { class: "tags",
                                for tag in entry.tags.iter() {
                                    li { key: "{tag}", "{tag}" }
                                }
                            }
                        }
                    }
                    if let Some(src) = entry.thumbnail.clone() {
                        img { class: "entry-hero", src, alt: "{entry.title}" }
                    }
                    ContentView { content: entry.content.clone() }
                }
            }
        }
        Some(Ok(None)) => rsx! {
            h1 { "Not found" }
            p { class: "muted", "There is nothing published at this address." }
        },
        Some(Err(e)) => rsx! { p { class: "error", "Could not load this entry: {e}" } },
        None => rsx! {},
    };

    rsx! {
        nav { class: "breadcrumb", {back} }
        {body}
    }
}
