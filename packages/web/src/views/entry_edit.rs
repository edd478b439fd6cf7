use dioxus::prelude::*;

use content::rich::DEFAULT_SCENE_HEIGHT;
use content::EntryKind;
use ui::EntryEditor;

use crate::Route;

fn use_scene_height() -> u32 {
    let site = use_resource(api::get_site_config);
    let height = site
        .read()
        .as_ref()
        .and_then(|res| res.as_ref().ok())
        .map(|config| config.scene.default_height)
        .unwrap_or(DEFAULT_SCENE_HEIGHT);
    height
}

#[component]
pub fn NewEntry(kind: String) -> Element {
    let nav = use_navigator();
    let scene_height = use_scene_height();

    let Some(entry_kind) = EntryKind::from_segment(&kind) else {
        return rsx! { UnknownKind { kind } };
    };

    rsx! {
        EntryEditor {
            key: "new-{entry_kind}",
            kind: entry_kind,
            entry: None,
            scene_height,
            on_saved: move |entry: content::Entry| {
                nav.replace(Route::EditEntry { kind: entry.kind.to_string(), id: entry.id });
            },
            on_deleted: move |_| {
                nav.push(Route::Dashboard {});
            },
        }
    }
}

#[component]
pub fn EditEntry(kind: String, id: String) -> Element {
    // Track the id in a signal so the fetch re-runs on route param change
    let mut id_signal = use_signal(|| id.clone());
    if *id_signal.peek() != id {
        id_signal.set(id.clone());
    }

    let nav = use_navigator();
    let scene_height = use_scene_height();
    let entry = use_resource(move || api::get_entry(id_signal()));

    let Some(entry_kind) = EntryKind::from_segment(&kind) else {
        return rsx! { UnknownKind { kind } };
    };

    let body = match &*entry.read() {
        Some(Ok(entry)) => rsx! {
            EntryEditor {
                key: "{entry.id}",
                kind: entry_kind,
                entry: Some(entry.clone()),
                scene_height,
                on_saved: move |_| {},
                on_deleted: move |_| {
                    nav.push(Route::Dashboard {});
                },
            }
        },
        Some(Err(e)) => rsx! {
            p { class: "error", "Could not load this entry: {e}" }
            Link { to: Route::Dashboard {}, "Back to the dashboard" }
        },
        None => rsx! { p { class: "muted", "Loading..." } },
    };
    body
}

#[component]
fn UnknownKind(kind: String) -> Element {
    rsx! {
        h1 { "Unknown content type" }
        p { class: "muted", "\"{kind}\" is not one of blog, work or page." }
        Link { to: Route::Dashboard {}, "Back to the dashboard" }
    }
}
