use dioxus::prelude::*;

use ui::Navbar;

use crate::Route;

/// Public shell: navbar with the site title, the routed page and a footer.
#[component]
pub fn SiteLayout() -> Element {
    let site = use_server_future(api::get_site_config)?;
    let config = site
        .read()
        .as_ref()
        .and_then(|res| res.as_ref().ok())
        .cloned()
        .unwrap_or_default();

    rsx! {
        Navbar {
            title: config.site.title.clone(),
            tagline: Some(config.site.tagline.clone()),
            Link { to: Route::Home {}, active_class: "active", "Home" }
            Link { to: Route::WorksList {}, active_class: "active", "Works" }
            Link { to: Route::BlogList {}, active_class: "active", "Blog" }
            Link { to: Route::Resume {}, active_class: "active", "Resume" }
            Link { to: Route::Contact {}, active_class: "active", "Contact" }
        }
        main { class: "page",
            SuspenseBoundary {
                fallback: |_| rsx! { p { class: "muted", "Loading..." } },
                Outlet::<Route> {}
            }
        }
        footer { class: "site-footer",
            if !config.site.owner.is_empty() {
                span { "© {config.site.owner}" }
            }
        }
    }
}
