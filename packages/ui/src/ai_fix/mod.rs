//! AI content fixing: a floating dialog that sends the editor HTML to one of
//! the fix endpoints and lets the user review the answer before applying it.

mod dialog;
pub mod state;

/// Which server function rewrites the content.
pub use api::FixMode as FixEndpoint;
pub use dialog::{request_fix, AiFixDialog};
pub use state::{FixState, FloatingWindow};
