//! TipTap-backed rich-text editor.
//!
//! - [`bridge`]: JSON events and commands exchanged with the glue script
//! - [`palette`]: `/` command palette state and menu
//! - [`toolbar`]: formatting toolbar
//! - `component`: the [`RichTextEditor`] itself

pub mod bridge;
mod component;
pub mod palette;
pub mod toolbar;

pub use component::{RichTextEditor, DEFAULT_PLACEHOLDER};
