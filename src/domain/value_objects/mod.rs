//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod entry_point;
mod hash;
mod layout;
mod tool;

pub use entry_point::EntryPoint;
pub use hash::ContentHash;
pub use layout::{BuildLayout, BOOTSTRAP_FILE, STATE_FILE};
pub use tool::{Platform, Tool};
