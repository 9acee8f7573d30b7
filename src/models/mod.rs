//! Data models for technology configurations, shortcuts and layer snapshots.
//!
//! Models are plain data and carry no host or engine behavior.

pub mod action;
pub mod layer;
pub mod shortcut;
pub mod technology;

// Re-export all model types
pub use action::{Action, ActionKind, LayerDescriptor};
pub use layer::{LayerEntry, LayerId};
pub use shortcut::{MenuItem, Shortcut};
pub use technology::{LayerGroup, TechnologyConfig};
