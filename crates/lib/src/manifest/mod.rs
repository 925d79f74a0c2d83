//! Component manifest loading and selection.
//!
//! The manifest is loaded once per run and stays immutable for its duration.

mod selection;
mod types;

pub use selection::{Selection, resolve_selection};
pub use types::*;
