//! Common test utilities for Hatch CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project, home and tool directories
//! - Assertion macros: `assert_generated!`, `assert_output_contains!`, etc.
//! - Fixtures: Demo project content and fake tool scripts

#![allow(dead_code)]

pub mod assertions;
pub mod env;
pub mod fixtures;

pub use assertions::*;
pub use env::*;
pub use fixtures::*;
