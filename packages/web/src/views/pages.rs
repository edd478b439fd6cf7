use dioxus::prelude::*;

use content::EntryKind;
use ui::ContentView;

/// Optional `resume` page entry above the uploaded resume PDF.
#[component]
pub fn Resume() -> Element {
    let site = use_server_future(api::get_site_config)?;
    let resume = site
        .read()
        .as_ref()
        .and_then(|res| res.as_ref().ok())
        .and_then(|config| config.resume.clone());

    rsx! {
        div { class: "resume-page",
            div { class: "resume-header",
                h1 { "Resume" }
                if let Some(resume) = &resume {
                    a { class: "button primary", href: "{resume.url}", download: "resume.pdf", "Download" }
                }
            }
            StaticPage { slug: "resume", hide_when_missing: true }
            {match resume {
                Some(resume) => rsx! {
                    iframe { class: "resume-frame", src: "{resume.url}", title: "Resume" }
                },
                None => rsx! { p { class: "muted", "No resume uploaded yet." } },
            }}
        }
    }
}

#[component]
pub fn Introduction() -> Element {
    rsx! {
        StaticPage { slug: "introduction" }
    }
}

/// Contact page entry followed by the contact details from the site settings.
#[component]
pub fn Contact() -> Element {
    let site = use_server_future(api::get_site_config)?;
    let contact = site
        .read()
        .as_ref()
        .and_then(|res| res.as_ref().ok())
        .map(|config| config.contact.clone())
        .unwrap_or_default();

    rsx! {
        StaticPage { slug: "contact" }
        ul { class: "contact-links",
            if let Some(email) = contact.email {
                li { a { href: "mailto:{email}", "{email}" } }
            }
            if let Some(github) = contact.github {
                li { a { href: "{github}", target: "_blank", rel: "noopener", "GitHub" } }
            }
            if let Some(linkedin) = contact.linkedin {
                li { a { href: "{linkedin}", target: "_blank", rel: "noopener", "LinkedIn" } }
            }
        }
    }
}

/// A published `page` entry looked up by its fixed slug.
#[component]
fn StaticPage(slug: &'static str, #[props(default)] hide_when_missing: bool) -> Element {
    let page = use_server_future(move || api::get_published(EntryKind::Page.to_string(), slug.to_string()))?;

    let body = match &*page.read() {
        Some(Ok(Some(page))) => rsx! {
            article { class: "entry",
                h1 { "{page.title}" }
                ContentView { content: page.content.clone() }
            }
        },
        Some(Ok(None)) if hide_when_missing => rsx! {},
        Some(Ok(None)) => rsx! { p { class: "muted", "This page has not been published yet." } },
        Some(Err(e)) => rsx! { p { class: "error", "Could not load this page: {e}" } },
        None => rsx! {},
    };
    body
}
