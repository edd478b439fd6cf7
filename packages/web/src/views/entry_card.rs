use dioxus::prelude::*;

use content::Entry;

use super::{display_date, public_route};

#[component]
pub fn EntryCard(entry: Entry) -> Element {
    let date = display_date(&entry);

    rsx! {
        article { class: "entry-card",
            if let Some(src) = entry.thumbnail.clone() {
                img { class: "entry-card-thumb", src, alt: "{entry.title}" }
            }
            div { class: "entry-card-body",
                h3 { class: "entry-card-title",
                    Link { to: public_route(&entry), "{entry.title}" }
                }
                if let Some(date) = date {
                    time { class: "muted", "{date}" }
                }
                if !entry.excerpt.is_empty() {
                    p { "{entry.excerpt}" }
                }
                if !entry.tags.is_empty() {
                    ul { class: "tags",
                        for tag in entry.tags.iter() {
                            li { key: "{tag}", "{tag}" }
                        }
                    }
                }
            }
        }
    }
}
