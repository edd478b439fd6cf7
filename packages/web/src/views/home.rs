use dioxus::prelude::*;

use content::EntryKind;
use ui::ContentView;

use super::EntryCard;
use crate::Route;

const LATEST: usize = 3;

/// Introduction page followed by the latest works and posts.
#[component]
pub fn Home() -> Element {
    let intro = use_server_future(|| api::get_published("page".to_string(), "introduction".to_string()))?;
    let works = use_server_future(|| api::list_published(EntryKind::Work.to_string()))?;
    let posts = use_server_future(|| api::list_published(EntryKind::Blog.to_string()))?;

    let intro = intro.read().as_ref().and_then(|res| res.as_ref().ok()).cloned().flatten();
    let works = latest(works.read().as_ref());
    let posts = latest(posts.read().as_ref());

    rsx! {
        if let Some(page) = intro {
            section { class: "intro",
                h1 { "{page.title}" }
                ContentView { content: page.content }
            }
        }
        section { class: "home-section",
            div { class: "section-header",
                h2 { "Latest works" }
                Link { to: Route::WorksList {}, "All works" }
            }
            if works.is_empty() {
                p { class: "muted", "Nothing here yet." }
            }
            div { class: "card-grid",
                for entry in works {
                    EntryCard { key: "{entry.id}", entry }
                }
            }
        }
        section { class: "home-section",
            div { class: "section-header",
                h2 { "Latest posts" }
                Link { to: Route::BlogList {}, "All posts" }
            }
            if posts.is_empty() {
                p { class: "muted", "Nothing here yet." }
            }
            div { class: "card-list",
                for entry in posts {
                    EntryCard { key: "{entry.id}", entry }
                }
            }
        }
    }
}

fn latest(loaded: Option<&Result<Vec<content::Entry>, ServerFnError>>) -> Vec<content::Entry> {
    match loaded {
        Some(Ok(entries)) => entries.iter().take(LATEST).cloned().collect(),
        Some(Err(e)) => {
            tracing::warn!(error = %e, "loading entries failed");
            Vec::new()
        }
        None => Vec::new(),
    }
}
