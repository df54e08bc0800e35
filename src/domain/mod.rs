//! Domain Layer
//!
//! Pure pipeline logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Source groups, manifest, schema, launch environment, build state
//! - `value_objects/` - Immutable value types (Tool, BuildLayout, EntryPoint, Hash)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or spawns processes
//! 2. **Pure Functions** - Manifest, schema and bootstrap rendering are deterministic
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod value_objects;
