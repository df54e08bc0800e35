//! Hatch - build-and-launch driver for GTK/Adwaita applications
//!
//! Hatch takes a Python GTK application checkout from sources to a running
//! process: it provisions an isolated interpreter environment, batch-compiles
//! declarative UI sources per group, bundles them with stylesheets into a
//! binary resource archive, derives and compiles the settings schema, and
//! launches the application through a generated bootstrap that registers the
//! archive before any UI code loads.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{BuildPipeline, BuildReport, Project};
pub use config::{Config, ConfigWarning};
pub use error::{HatchError, HatchResult};
