//! CLI command handlers for Layer Shortcuts.
//!
//! This module provides headless access to the shortcut engine for authoring
//! and checking technology files outside the host application.

pub mod common;
pub mod conflicts;
pub mod example;
pub mod simulate;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use conflicts::ConflictsArgs;
pub use example::ExampleArgs;
pub use simulate::SimulateArgs;
pub use validate::ValidateArgs;
