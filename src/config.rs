//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving the plugin settings
//! in TOML format with platform-specific directory resolution. Technology
//! files themselves are JSON and live on the search path configured here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_NAME, DEFAULT_LAYER_LIST_NAME, DEFAULT_MENU_GROUP};
use crate::host::LayerListId;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directories scanned for technology files, in scan order
    pub search_paths: Vec<PathBuf>,
}

impl Default for PathConfig {
    fn default() -> Self {
        // Fall back to a relative directory when the platform has no config dir
        let search_paths = vec![Self::default_technology_dir().unwrap_or_else(|_| PathBuf::from("pdks"))];

        Self { search_paths }
    }
}

impl PathConfig {
    /// Gets the default technology directory.
    ///
    /// - Linux: `~/.config/LayerShortcuts/pdks/`
    /// - macOS: `~/Library/Application Support/LayerShortcuts/pdks/`
    /// - Windows: `%APPDATA%\LayerShortcuts\pdks\`
    pub fn default_technology_dir() -> Result<PathBuf> {
        Ok(Config::config_dir()?.join("pdks"))
    }
}

/// Names the plugin claims inside the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Tab name of the layer list shortcuts render into
    #[serde(default = "default_layer_list_name")]
    pub layer_list_name: String,
    /// Menu group that owns every installed entry
    #[serde(default = "default_menu_group")]
    pub menu_group: String,
    /// Layer list shortcuts read layers from
    #[serde(default)]
    pub source_layer_list: LayerListId,
}

fn default_layer_list_name() -> String {
    DEFAULT_LAYER_LIST_NAME.to_string()
}

fn default_menu_group() -> String {
    DEFAULT_MENU_GROUP.to_string()
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            layer_list_name: default_layer_list_name(),
            menu_group: default_menu_group(),
            source_layer_list: 0,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/LayerShortcuts/config.toml`
/// - macOS: `~/Library/Application Support/LayerShortcuts/config.toml`
/// - Windows: `%APPDATA%\LayerShortcuts\config.toml`
///
/// # Validation
///
/// - `layer_list_name` must not be empty
/// - `menu_group` must not be empty and must not end with a dot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Host-side names
    #[serde(default)]
    pub navigation: NavigationConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.navigation.layer_list_name.trim().is_empty() {
            anyhow::bail!("navigation.layer_list_name must not be empty");
        }

        let group = &self.navigation.menu_group;
        if group.trim().is_empty() || group.ends_with('.') {
            anyhow::bail!("navigation.menu_group is not a valid menu path: '{group}'");
        }

        Ok(())
    }
}
