//! Domain Entities
//!
//! - `SourceGroup` / `CompiledAsset` - UI sources and their compiled output
//! - `ResourceManifest` - files bundled into the resource archive
//! - `DerivedSchema` / `SchemaArtifact` - settings schema from a template
//! - `RuntimeConfig` - generated runtime-configuration module
//! - `LaunchEnvironment` - environment and bootstrap of the launched app
//! - `BuildState` - incremental compilation fingerprints

mod build_state;
mod launch;
mod manifest;
mod runtime_config;
mod schema;
mod source_group;

pub use build_state::{BuildState, GroupFingerprint, STATE_VERSION};
pub use launch::{
    python_string, render_bootstrap, BootstrapSpec, LaunchEnvironment, LaunchPlan,
    DEFAULT_SCHEMA_DIR_VAR,
};
pub use manifest::{escape_xml, Preprocess, ResourceManifest, ResourceManifestEntry};
pub use runtime_config::RuntimeConfig;
pub use schema::{
    derive_schema, schema_file_name, substitute, DerivedSchema, SchemaArtifact, APP_ID_TOKEN,
    PREFIX_TOKEN,
};
pub use source_group::{
    compiled_file_name, compiled_relative_path, validate_group_name, CompiledAsset, SourceGroup,
    COMPILED_EXTENSION, SOURCE_EXTENSION,
};
