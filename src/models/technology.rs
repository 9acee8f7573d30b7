//! Per-technology configuration: layer groups and the navigation menu.

use serde::{Deserialize, Serialize};

use super::layer::LayerId;
use super::shortcut::{MenuItem, Shortcut};

/// A named, reusable set of layer identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerGroup {
    /// Group name, unique within a technology (e.g., "Metal1.Visible")
    pub name: String,
    /// Member layers, in authoring order
    pub layers: Vec<LayerId>,
}

impl LayerGroup {
    /// Creates a layer group.
    pub fn new<I, S>(name: impl Into<String>, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LayerId>,
    {
        Self {
            name: name.into(),
            layers: layers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Layer groups and shortcuts of one technology (a "PDK info" file).
///
/// Field names follow the packaged JSON files: `tech_name`,
/// `layer_group_definitions` and `shortcuts`.
///
/// # Validation
///
/// - Group names must be unique
/// - Every group referenced by an action must be defined
/// - Shortcut keys must be unique and non-empty
///
/// See [`crate::services::validation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnologyConfig {
    /// Technology name as reported by the host (unique catalog key)
    #[serde(rename = "tech_name")]
    pub technology_name: String,
    /// Layer group definitions
    #[serde(rename = "layer_group_definitions", default)]
    pub layer_groups: Vec<LayerGroup>,
    /// Menu layout, shortcuts and separators in display order
    #[serde(rename = "shortcuts", default)]
    pub menu_items: Vec<MenuItem>,
}

impl TechnologyConfig {
    /// Creates an empty configuration for a technology.
    pub fn new(technology_name: impl Into<String>) -> Self {
        Self {
            technology_name: technology_name.into(),
            layer_groups: Vec::new(),
            menu_items: Vec::new(),
        }
    }

    /// Looks up a layer group by name.
    #[must_use]
    pub fn layer_group(&self, name: &str) -> Option<&LayerGroup> {
        self.layer_groups.iter().find(|g| g.name == name)
    }

    /// Iterates the shortcuts, skipping separators.
    pub fn shortcuts(&self) -> impl Iterator<Item = &Shortcut> {
        self.menu_items.iter().filter_map(MenuItem::as_shortcut)
    }

    /// Finds the first shortcut bound to `key`.
    #[must_use]
    pub fn shortcut_for_key(&self, key: &str) -> Option<&Shortcut> {
        self.shortcuts().find(|s| s.key == key)
    }

    /// Adds a layer group.
    pub fn add_layer_group(&mut self, group: LayerGroup) {
        self.layer_groups.push(group);
    }

    /// Appends a menu item.
    pub fn add_menu_item(&mut self, item: impl Into<MenuItem>) {
        self.menu_items.push(item.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Action;

    fn sample() -> TechnologyConfig {
        let mut config = TechnologyConfig::new("sg13g2");
        config.add_layer_group(LayerGroup::new("Metal1.Selected", ["Metal1.drawing"]));
        config.add_menu_item(Shortcut::new("Show default layers", "0", vec![Action::reset_show_all()]));
        config.add_menu_item(MenuItem::Separator);
        config.add_menu_item(Shortcut::new("Hide default layers", ",", vec![Action::reset_hide_all()]));
        config
    }

    #[test]
    fn test_lookup_helpers() {
        let config = sample();
        assert!(config.layer_group("Metal1.Selected").is_some());
        assert!(config.layer_group("Metal9.Selected").is_none());
        assert_eq!(config.shortcuts().count(), 2);
        assert_eq!(
            config.shortcut_for_key(",").map(|s| s.title.as_str()),
            Some("Hide default layers")
        );
    }

    #[test]
    fn test_file_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["tech_name"], "sg13g2");
        assert!(json["layer_group_definitions"].is_array());
        assert_eq!(json["shortcuts"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn test_missing_lists_default_to_empty() {
        let config: TechnologyConfig = serde_json::from_str(r#"{"tech_name": "gf180mcu"}"#).unwrap();
        assert!(config.layer_groups.is_empty());
        assert!(config.menu_items.is_empty());
    }
}
