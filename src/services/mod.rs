//! Service layer for the shortcut engine.
//!
//! Services hold the host-independent logic: loading technology files,
//! resolving layer groups, executing shortcuts and detecting key conflicts.

pub mod catalog;
pub mod conflicts;
pub mod example;
pub mod executor;
pub mod interpreter;
pub mod layer_groups;
pub mod validation;

// Re-export commonly used types and functions
pub use catalog::ConfigCatalog;
pub use conflicts::{ConflictPrompt, ConflictReport, Resolution};
pub use executor::{execute, ExecutionOutcome, ExecutionResult};
pub use interpreter::GlobalVisibility;
pub use validation::ValidationReport;
