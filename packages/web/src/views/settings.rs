use dioxus::prelude::*;

use ui::SiteSettingsForm;

#[component]
pub fn AdminSettings() -> Element {
    let site = use_resource(api::get_site_config);

    let body = match &*site.read() {
        Some(Ok(config)) => rsx! {
            SiteSettingsForm { initial: config.clone() }
        },
        Some(Err(e)) => rsx! { p { class: "error", "Could not load settings: {e}" } },
        None => rsx! { p { class: "muted", "Loading..." } },
    };

    rsx! {
        h1 { "Site settings" }
        {body}
    }
}
