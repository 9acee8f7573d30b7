//! Application-wide constants.
//!
//! This module defines constants shared by the engine, the host glue and the
//! CLI, including the names the plugin claims inside the host application.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Layer Shortcuts";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "layer-shortcuts";

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "LayerShortcuts";

/// Key value the host uses for "no binding".
pub const NO_BINDING: &str = "none";

/// Name of the layer tab the navigation shortcuts render into.
pub const DEFAULT_LAYER_LIST_NAME: &str = "LayNav";

/// Menu group that owns every entry installed by this plugin.
pub const DEFAULT_MENU_GROUP: &str = "edit_menu.layer_navigation_group";

/// Menu path the group is appended to.
pub const MENU_PARENT: &str = "edit_menu";

/// Host configuration key for the "hide empty layers" preference.
pub const HIDE_EMPTY_LAYERS_KEY: &str = "hide-empty-layers";

/// Host configuration key announcing the technology of a freshly opened layout.
pub const INITIAL_TECHNOLOGY_KEY: &str = "initial-technology";

/// Host menu symbol emitted when the user applies a technology to a layout.
pub const APPLY_TECHNOLOGY_SYMBOL: &str = "technology_selector:apply_technology";

/// Title of the conflict prompt.
pub const CONFLICT_PROMPT_TITLE: &str = "Shortcut Conflict";

/// File extension of technology configuration files.
pub const TECHNOLOGY_FILE_EXTENSION: &str = "json";
