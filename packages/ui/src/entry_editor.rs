use dioxus::prelude::*;

use content::entry::parse_tags;
use content::rich::DEFAULT_SCENE_HEIGHT;
use content::{Block, DocumentContent, Entry, EntryDraft, EntryKind, RendererKind};

use crate::ai_fix::{AiFixDialog, FixEndpoint};
use crate::block_editor::BlockEditor;
use crate::icons::*;
use crate::modal_overlay::ConfirmDialog;
use crate::notices::{push_notice, use_notices, NoticeLevel};
use crate::rich_editor::RichTextEditor;
use crate::upload::pick_and_upload;
use crate::Icon;

const ENTRY_EDITOR_CSS: Asset = asset!("/assets/styling/entry-editor.css");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorMode {
    Rich,
    Blocks,
}

/// Form fields of the entry editor, apart from the document itself.
#[derive(Clone, Debug, PartialEq)]
pub struct EntryForm {
    pub id: Option<String>,
    pub kind: EntryKind,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// Comma separated, as typed.
    pub tags: String,
    pub published: bool,
    pub thumbnail: Option<String>,
    pub mode: EditorMode,
}

impl EntryForm {
    /// New entries start in the rich editor.
    pub fn new(kind: EntryKind) -> Self {
        Self {
            id: None,
            kind,
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            tags: String::new(),
            published: false,
            thumbnail: None,
            mode: EditorMode::Rich,
        }
    }

    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id.clone()),
            kind: entry.kind,
            title: entry.title.clone(),
            slug: entry.slug.clone(),
            excerpt: entry.excerpt.clone(),
            tags: entry.tags.join(", "),
            published: entry.published,
            thumbnail: entry.thumbnail.clone(),
            mode: match entry.content.renderer() {
                RendererKind::Blocks => EditorMode::Blocks,
                RendererKind::Interactive => EditorMode::Rich,
            },
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Blog posts and pages get the clean-up prompt; works get enriched
    /// under their title.
    pub fn fix_endpoint(&self) -> FixEndpoint {
        match self.kind {
            EntryKind::Work => FixEndpoint::EnrichWork {
                title: self.title.trim().to_string(),
            },
            EntryKind::Blog | EntryKind::Page => FixEndpoint::Blog,
        }
    }

    pub fn to_draft(&self, html: &str, blocks: &[Block]) -> EntryDraft {
        let content = match self.mode {
            EditorMode::Rich => DocumentContent::from_html(html),
            EditorMode::Blocks => DocumentContent::Blocks(blocks.to_vec()),
        };
        EntryDraft {
            id: self.id.clone(),
            kind: self.kind,
            title: self.title.trim().to_string(),
            slug: self.slug.trim().to_string(),
            excerpt: self.excerpt.trim().to_string(),
            tags: parse_tags(&self.tags),
            published: self.published,
            thumbnail: self.thumbnail.clone().filter(|t| !t.is_empty()),
            content,
        }
    }

    /// Take over what the server stored (id, normalized slug).
    pub fn saved_as(&mut self, entry: &Entry) {
        self.id = Some(entry.id.clone());
        self.slug = entry.slug.clone();
        self.title = entry.title.clone();
    }
}

/// Admin form for creating or editing one entry.
#[component]
pub fn EntryEditor(
    kind: EntryKind,
    entry: Option<Entry>,
    on_saved: EventHandler<Entry>,
    on_deleted: EventHandler<()>,
    #[props(default = DEFAULT_SCENE_HEIGHT)] scene_height: u32,
) -> Element {
    let mut form = use_signal(|| match &entry {
        Some(entry) => EntryForm::from_entry(entry),
        None => EntryForm::new(kind),
    });
    let mut html = use_signal(|| {
        entry
            .as_ref()
            .and_then(|e| e.content.html())
            .unwrap_or_default()
    });
    let blocks = use_signal(|| {
        entry
            .as_ref()
            .and_then(|e| e.content.blocks().map(<[Block]>::to_vec))
            .unwrap_or_default()
    });
    let mut saving = use_signal(|| false);
    let mut uploading = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
    let mut notices = use_notices();

    let save = move |_| {
        if saving() {
            return;
        }
        let draft = form.read().to_draft(&html.read(), &blocks.read());
        if draft.title.is_empty() {
            push_notice(&mut notices, NoticeLevel::Warning, "A title is required");
            return;
        }
        saving.set(true);
        spawn(async move {
            match api::save_entry(draft).await {
                Ok(saved) => {
                    form.write().saved_as(&saved);
                    push_notice(&mut notices, NoticeLevel::Success, format!("Saved \"{}\"", saved.title));
                    on_saved.call(saved);
                }
                Err(e) => push_notice(&mut notices, NoticeLevel::Error, format!("Save failed: {e}")),
            }
            saving.set(false);
        });
    };

    let upload_thumbnail = move |_| {
        if uploading() {
            return;
        }
        uploading.set(true);
        spawn(async move {
            match pick_and_upload("image/*").await {
                Ok(Some(asset)) => form.write().thumbnail = Some(asset.url),
                Ok(None) => {}
                Err(e) => push_notice(&mut notices, NoticeLevel::Error, format!("Thumbnail upload failed: {e}")),
            }
            uploading.set(false);
        });
    };

    let delete = move |_| {
        confirm_delete.set(false);
        let Some(id) = form.read().id.clone() else {
            return;
        };
        spawn(async move {
            match api::delete_entry(id).await {
                Ok(()) => {
                    push_notice(&mut notices, NoticeLevel::Info, "Entry deleted");
                    on_deleted.call(());
                }
                Err(e) => push_notice(&mut notices, NoticeLevel::Error, format!("Delete failed: {e}")),
            }
        });
    };

    let current = form();
    let heading = if current.is_new() {
        format!("New {}", current.kind)
    } else {
        format!("Edit {}", current.kind)
    };

    rsx! {
        document::Link { rel: "stylesheet", href: ENTRY_EDITOR_CSS }
        div { class: "entry-editor",
            div { class: "entry-editor-header",
                h1 { "{heading}" }
                div { class: "entry-editor-actions",
                    if current.mode == EditorMode::Rich {
                        AiFixDialog {
                            content: html(),
                            endpoint: current.fix_endpoint(),
                            on_apply: move |fixed: String| html.set(fixed),
                        }
                    }
                    if !current.is_new() {
                        button {
                            r#type: "button",
                            class: "button danger",
                            onclick: move |_| confirm_delete.set(true),
                            Icon { icon: FaTrashCan, width: 12, height: 12 }
                            " Delete"
                        }
                    }
                    button {
                        r#type: "button",
                        class: "button primary",
                        disabled: saving(),
                        onclick: save,
                        Icon { icon: FaFloppyDisk, width: 12, height: 12 }
                        if saving() { " Saving..." } else { " Save" }
                    }
                }
            }

            div { class: "entry-fields",
                label { class: "field",
                    span { "Title" }
                    input {
                        value: current.title.clone(),
                        placeholder: "Title",
                        oninput: move |e| form.write().title = e.value(),
                    }
                }
                label { class: "field",
                    span { "Slug" }
                    input {
                        value: current.slug.clone(),
                        placeholder: "Derived from the title when empty",
                        oninput: move |e| form.write().slug = e.value(),
                    }
                }
                label { class: "field",
                    span { "Tags" }
                    input {
                        value: current.tags.clone(),
                        placeholder: "rust, graphics, tools",
                        oninput: move |e| form.write().tags = e.value(),
                    }
                }
                label { class: "field wide",
                    span { "Excerpt" }
                    textarea {
                        value: current.excerpt.clone(),
                        rows: "2",
                        oninput: move |e| form.write().excerpt = e.value(),
                    }
                }
                label { class: "field checkbox",
                    input {
                        r#type: "checkbox",
                        checked: current.published,
                        onchange: move |e| form.write().published = e.checked(),
                    }
                    span { "Published" }
                }
                div { class: "field thumbnail",
                    span { "Thumbnail" }
                    if let Some(url) = current.thumbnail.clone() {
                        img { class: "thumbnail-preview", src: "{url}", alt: "" }
                        button {
                            r#type: "button",
                            class: "button small",
                            onclick: move |_| form.write().thumbnail = None,
                            "Remove"
                        }
                    }
                    button {
                        r#type: "button",
                        class: "button small",
                        disabled: uploading(),
                        onclick: upload_thumbnail,
                        Icon { icon: FaUpload, width: 10, height: 10 }
                        if uploading() { " Uploading..." } else { " Upload" }
                    }
                }
            }

            if current.is_new() {
                div { class: "editor-mode",
                    span { "Editor" }
                    button {
                        r#type: "button",
                        class: if current.mode == EditorMode::Rich { "button small active" } else { "button small" },
                        onclick: move |_| form.write().mode = EditorMode::Rich,
                        "Rich text"
                    }
                    button {
                        r#type: "button",
                        class: if current.mode == EditorMode::Blocks { "button small active" } else { "button small" },
                        onclick: move |_| form.write().mode = EditorMode::Blocks,
                        "Blocks"
                    }
                }
            }

            div { class: "entry-content",
                {match current.mode {
                    EditorMode::Rich => rsx! {
                        RichTextEditor { content: html, on_change: move |_| {}, scene_height }
                    },
                    EditorMode::Blocks => rsx! {
                        BlockEditor { blocks, on_change: move |_| {} }
                    },
                }}
            }

            if confirm_delete() {
                ConfirmDialog {
                    message: format!("Delete \"{}\"? This cannot be undone.", current.title),
                    on_confirm: delete,
                    on_cancel: move |_| confirm_delete.set(false),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content::rich::{RichDocument, RichNode};
    use content::BlockType;

    fn entry(kind: EntryKind, content: DocumentContent) -> Entry {
        Entry {
            id: "e1".into(),
            kind,
            slug: "ray-tracer".into(),
            title: "Ray Tracer".into(),
            excerpt: String::new(),
            tags: vec!["rust".into(), "graphics".into()],
            published: true,
            thumbnail: None,
            content,
            published_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn new_forms_start_rich_and_unsaved() {
        let form = EntryForm::new(EntryKind::Blog);
        assert!(form.is_new());
        assert_eq!(form.mode, EditorMode::Rich);
        assert_eq!(form.fix_endpoint(), FixEndpoint::Blog);
    }

    #[test]
    fn existing_entries_keep_their_editor() {
        let blocks = entry(EntryKind::Work, DocumentContent::Blocks(vec![]));
        assert_eq!(EntryForm::from_entry(&blocks).mode, EditorMode::Blocks);

        let rich = entry(
            EntryKind::Work,
            DocumentContent::Html(RichDocument::new(vec![RichNode::Markup("<p>x</p>".into())])),
        );
        let form = EntryForm::from_entry(&rich);
        assert_eq!(form.mode, EditorMode::Rich);
        assert_eq!(form.tags, "rust, graphics");
        assert_eq!(
            form.fix_endpoint(),
            FixEndpoint::EnrichWork { title: "Ray Tracer".into() }
        );
    }

    #[test]
    fn drafts_carry_the_chosen_content() {
        let mut form = EntryForm::new(EntryKind::Page);
        form.title = "  About  ".into();
        form.tags = "a, b,, c ".into();
        form.thumbnail = Some(String::new());

        let draft = form.to_draft("<p>hello</p>", &[]);
        assert_eq!(draft.title, "About");
        assert_eq!(draft.tags, vec!["a", "b", "c"]);
        assert_eq!(draft.thumbnail, None);
        assert_eq!(draft.content.html().as_deref(), Some("<p>hello</p>"));

        form.mode = EditorMode::Blocks;
        let block = Block::empty("b1".into(), BlockType::Paragraph);
        let draft = form.to_draft("<p>ignored</p>", std::slice::from_ref(&block));
        assert_eq!(draft.content.blocks(), Some(&[block][..]));
    }

    #[test]
    fn saving_adopts_server_identity() {
        let mut form = EntryForm::new(EntryKind::Work);
        form.title = "Ray Tracer".into();
        form.saved_as(&entry(EntryKind::Work, DocumentContent::Blocks(vec![])));
        assert_eq!(form.id.as_deref(), Some("e1"));
        assert_eq!(form.slug, "ray-tracer");
        assert!(!form.is_new());
    }
}
