//! Content model for the portfolio site.
//!
//! Everything here is pure data and pure transformation: no UI, no network.
//! The same code runs on the server (rendering, persistence) and in the
//! browser (editing, hydration), so nothing may depend on platform globals.

pub mod block;
pub mod config;
pub mod document;
pub mod editor;
pub mod entry;
pub mod error;
pub mod markup;
pub mod render;
pub mod repo;
pub mod rich;

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

pub use block::{Block, BlockPatch, BlockType};
pub use config::{ResumeAsset, SiteConfig};
pub use document::{DocumentContent, RendererKind};
pub use editor::{new_block_id, BlockList};
pub use entry::{Entry, EntryDraft, EntryKind};
pub use error::ContentError;
pub use render::RenderPlan;
pub use repo::{ContentStore, Repository};
pub use rich::{RichDocument, RichNode};
