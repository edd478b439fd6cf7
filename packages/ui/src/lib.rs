//! This crate contains all shared UI for the portfolio site: content
//! renderers, the block and rich-text editors, the AI fix dialog and the
//! admin forms built on them.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const BASE_CSS: Asset = asset!("/assets/styling/base.css");

mod navbar;
pub use navbar::Navbar;

pub mod notices;
pub use notices::{push_notice, use_notices, NoticeLevel, NoticeProvider, NoticeStack, Notices};

mod modal_overlay;
pub use modal_overlay::{ConfirmDialog, ModalOverlay};

mod upload;
pub use upload::{pick_and_upload, UploadReply};

mod block_renderer;
pub use block_renderer::BlockRenderer;

mod block_editor;
pub use block_editor::BlockEditor;

pub mod rich_editor;
pub use rich_editor::RichTextEditor;

mod interactive_renderer;
pub use interactive_renderer::{HtmlSnippet, InteractiveRenderer, ThreeJsScene};

pub mod ai_fix;
pub use ai_fix::{AiFixDialog, FixEndpoint};

mod content_view;
pub use content_view::ContentView;

pub mod entry_editor;
pub use entry_editor::EntryEditor;

mod site_settings;
pub use site_settings::SiteSettingsForm;
