use dioxus::prelude::*;

use api::AssetInfo;
use content::{ResumeAsset, SiteConfig};

use crate::modal_overlay::ConfirmDialog;
use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::upload::pick_and_upload;

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

/// Point the config at a freshly uploaded resume, returning the one it replaces.
fn replace_resume(config: &mut SiteConfig, asset: AssetInfo) -> Option<ResumeAsset> {
    config.resume.replace(ResumeAsset {
        url: asset.url,
        path: asset.path,
    })
}

/// Admin form for `site.toml`: title, tagline, owner, contact links and the
/// default 3D scene height, plus the resume PDF. Resume changes are saved
/// right away so the stored file and the config never disagree.
#[component]
pub fn SiteSettingsForm(initial: SiteConfig, #[props(default)] on_saved: EventHandler<SiteConfig>) -> Element {
    let mut config = use_signal(|| initial.clone());
    let mut saving = use_signal(|| false);
    let mut notices = use_notices();

    let save = move |_| {
        if saving() {
            return;
        }
        saving.set(true);
        let site = config();
        spawn(async move {
            match api::save_site_config(site.clone()).await {
                Ok(()) => {
                    push_notice(&mut notices, NoticeLevel::Success, "Site settings saved");
                    on_saved.call(site);
                }
                Err(e) => push_notice(&mut notices, NoticeLevel::Error, format!("Saving settings failed: {e}")),
            }
            saving.set(false);
        });
    };

    let mut resume_busy = use_signal(|| false);
    let mut confirm_remove = use_signal(|| false);

    let upload_resume = move |_| {
        if resume_busy() {
            return;
        }
        resume_busy.set(true);
        spawn(async move {
            match pick_and_upload("application/pdf").await {
                Ok(Some(asset)) => {
                    let mut next = config();
                    let previous = replace_resume(&mut next, asset);
                    match api::save_site_config(next.clone()).await {
                        Ok(()) => {
                            config.set(next.clone());
                            if let Some(old) = previous {
                                if let Err(e) = api::delete_asset(old.path.clone()).await {
                                    tracing::warn!(path = %old.path, "could not remove old resume: {e}");
                                }
                            }
                            push_notice(&mut notices, NoticeLevel::Success, "Resume uploaded");
                            on_saved.call(next);
                        }
                        Err(e) => push_notice(&mut notices, NoticeLevel::Error, format!("Saving resume failed: {e}")),
                    }
                }
                Ok(None) => {}
                Err(e) => push_notice(&mut notices, NoticeLevel::Error, format!("Resume upload failed: {e}")),
            }
            resume_busy.set(false);
        });
    };

    let remove_resume = move |_| {
        confirm_remove.set(false);
        let Some(resume) = config.peek().resume.clone() else {
            return;
        };
        resume_busy.set(true);
        spawn(async move {
            if let Err(e) = api::delete_asset(resume.path.clone()).await {
                push_notice(&mut notices, NoticeLevel::Error, format!("Removing resume failed: {e}"));
                resume_busy.set(false);
                return;
            }
            let mut next = config();
            next.resume = None;
            match api::save_site_config(next.clone()).await {
                Ok(()) => {
                    config.set(next.clone());
                    push_notice(&mut notices, NoticeLevel::Info, "Resume removed");
                    on_saved.call(next);
                }
                Err(e) => push_notice(&mut notices, NoticeLevel::Error, format!("Saving settings failed: {e}")),
            }
            resume_busy.set(false);
        });
    };

    let current = config();

    rsx! {
        form {
            class: "site-settings",
            onsubmit: move |evt| evt.prevent_default(),
            fieldset {
                legend { "Site" }
                label { class: "field",
                    span { "Title" }
                    input {
                        value: current.site.title.clone(),
                        oninput: move |e| config.write().site.title = e.value(),
                    }
                }
                label { class: "field",
                    span { "Tagline" }
                    input {
                        value: current.site.tagline.clone(),
                        oninput: move |e| config.write().site.tagline = e.value(),
                    }
                }
                label { class: "field",
                    span { "Owner" }
                    input {
                        value: current.site.owner.clone(),
                        oninput: move |e| config.write().site.owner = e.value(),
                    }
                }
            }
            fieldset {
                legend { "Contact" }
                label { class: "field",
                    span { "Email" }
                    input {
                        r#type: "email",
                        value: current.contact.email.clone().unwrap_or_default(),
                        oninput: move |e| config.write().contact.email = optional(e.value()),
                    }
                }
                label { class: "field",
                    span { "GitHub" }
                    input {
                        r#type: "url",
                        value: current.contact.github.clone().unwrap_or_default(),
                        oninput: move |e| config.write().contact.github = optional(e.value()),
                    }
                }
                label { class: "field",
                    span { "LinkedIn" }
                    input {
                        r#type: "url",
                        value: current.contact.linkedin.clone().unwrap_or_default(),
                        oninput: move |e| config.write().contact.linkedin = optional(e.value()),
                    }
                }
            }
            fieldset {
                legend { "3D scenes" }
                label { class: "field",
                    span { "Default height (px)" }
                    input {
                        r#type: "number",
                        min: "200",
                        max: "600",
                        value: "{current.scene.default_height}",
                        oninput: move |e| {
                            if let Ok(height) = e.value().trim().parse::<u32>() {
                                config.write().scene.default_height = height;
                            }
                        },
                    }
                }
            }
            fieldset { class: "resume-settings",
                legend { "Resume" }
                {match current.resume.clone() {
                    Some(resume) => rsx! {
                        p { class: "resume-current",
                            a { href: "{resume.url}", target: "_blank", rel: "noopener", "Current resume (PDF)" }
                        }
                    },
                    None => rsx! {
                        p { class: "muted", "No resume uploaded yet." }
                    },
                }}
                div { class: "resume-actions",
                    button {
                        r#type: "button",
                        class: "button",
                        disabled: resume_busy(),
                        onclick: upload_resume,
                        if resume_busy() {
                            "Working..."
                        } else if current.resume.is_some() {
                            "Replace PDF"
                        } else {
                            "Upload PDF"
                        }
                    }
                    if current.resume.is_some() {
                        button {
                            r#type: "button",
                            class: "button danger",
                            disabled: resume_busy(),
                            onclick: move |_| confirm_remove.set(true),
                            "Remove"
                        }
                    }
                }
            }
            button {
                r#type: "button",
                class: "button primary",
                disabled: saving(),
                onclick: save,
                if saving() { "Saving..." } else { "Save settings" }
            }
        }
        if confirm_remove() {
            ConfirmDialog {
                message: "Remove the uploaded resume? The PDF file is deleted.",
                confirm_label: "Remove",
                on_confirm: remove_resume,
                on_cancel: move |_| confirm_remove.set(false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(path: &str) -> AssetInfo {
        AssetInfo {
            id: path.trim_end_matches(".pdf").to_string(),
            url: format!("/uploads/{path}"),
            path: path.to_string(),
            kind: api::AssetKind::Pdf,
        }
    }

    #[test]
    fn first_resume_has_nothing_to_replace() {
        let mut config = SiteConfig::default();
        assert_eq!(replace_resume(&mut config, asset("a.pdf")), None);
        assert_eq!(
            config.resume,
            Some(ResumeAsset { url: "/uploads/a.pdf".into(), path: "a.pdf".into() })
        );
    }

    #[test]
    fn replacing_returns_the_old_file() {
        let mut config = SiteConfig::default();
        replace_resume(&mut config, asset("a.pdf"));
        let old = replace_resume(&mut config, asset("b.pdf")).unwrap();
        assert_eq!(old.path, "a.pdf");
        assert_eq!(config.resume.unwrap().path, "b.pdf");
    }

    #[test]
    fn blank_contact_fields_are_none() {
        assert_eq!(optional("  ".into()), None);
        assert_eq!(optional(" a@b.c ".into()), Some("a@b.c".into()));
    }
}
