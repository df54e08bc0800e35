//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system
//! - `process` - Child processes and executable lookup
//! - `repositories/` - Build state persistence
//! - `events/` - NDJSON event sink

pub mod events;
pub mod fs;
pub mod process;
pub mod repositories;

pub use events::JsonEventSink;
pub use fs::LocalFs;
pub use process::{exit_code_of, SystemToolRunner, WhichLocator};
pub use repositories::TomlBuildStateRepository;
