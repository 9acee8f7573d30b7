//! Layer Shortcuts Library
//!
//! Rule-driven layer visibility for layout viewers. A technology file defines
//! named layer groups and keyboard shortcuts; triggering a shortcut computes
//! which layers become visible and which one is selected. The library also
//! keeps the shortcut keys free of conflicts with the host's own bindings.
//!
//! The host application is reached only through [`host::LayoutHost`].

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod event_loop;
pub mod host;
pub mod models;
pub mod services;

pub use controller::{LayerShortcuts, SetupOutcome};
pub use error::{Result, ShortcutError};
