//! Repository Implementations

mod build_state;

pub use build_state::TomlBuildStateRepository;
