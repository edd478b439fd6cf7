use dioxus::prelude::*;

const SITE_CSS: Asset = asset!("/assets/styling/site.css");

/// Top bar with the site title on the left and navigation links (passed as
/// children) on the right.
#[component]
pub fn Navbar(title: String, #[props(default)] tagline: Option<String>, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: SITE_CSS }
        header {
            class: "navbar",
            div { class: "navbar-brand",
                span { class: "navbar-title", "{title}" }
                if let Some(tagline) = tagline.filter(|t| !t.is_empty()) {
                    span { class: "navbar-tagline", "{tagline}" }
                }
            }
            nav { class: "navbar-links", {children} }
        }
    }
}
