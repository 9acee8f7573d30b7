//! Actions and the layer descriptors they target.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::layer::LayerId;

/// Selects a subset of the currently enumerable layers.
///
/// Serialized with a `kind` tag so configuration files stay readable:
/// `{"kind": "all"}`, `{"kind": "layers", "layers": [...]}`,
/// `{"kind": "layer_groups", "layer_groups": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerDescriptor {
    /// Matches no layer
    #[default]
    None,
    /// Matches every layer
    All,
    /// Matches the listed layer identifiers
    #[serde(rename = "layers")]
    Explicit {
        /// Layer identifiers
        layers: BTreeSet<LayerId>,
    },
    /// Matches the union of the named layer groups
    #[serde(rename = "layer_groups")]
    ByGroups {
        /// Group names, in authoring order
        layer_groups: Vec<String>,
    },
}

impl LayerDescriptor {
    /// Descriptor matching an explicit set of layers.
    pub fn layers<I, S>(layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<LayerId>,
    {
        Self::Explicit {
            layers: layers.into_iter().map(Into::into).collect(),
        }
    }

    /// Descriptor matching the union of named layer groups.
    pub fn groups<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::ByGroups {
            layer_groups: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Group names referenced by this descriptor (empty unless `ByGroups`).
    #[must_use]
    pub fn group_names(&self) -> &[String] {
        match self {
            Self::ByGroups { layer_groups } => layer_groups,
            Self::None | Self::All | Self::Explicit { .. } => &[],
        }
    }
}

/// The verb an action applies.
///
/// The tag strings are the ones found in packaged technology files; the
/// historical misspelling `reset_and_hid_all_layers` is still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Drop the navigation tab and show every layer
    #[serde(rename = "reset_and_show_all_layers")]
    ResetShowAll,
    /// Drop the navigation tab and hide every layer
    #[serde(rename = "reset_and_hide_all_layers", alias = "reset_and_hid_all_layers")]
    ResetHideAll,
    /// Remove matching layers from the visible set
    #[serde(rename = "hide_layers")]
    Hide,
    /// Add matching layers to the visible set
    #[serde(rename = "show_layers")]
    Show,
    /// Make the first matching layer the current one
    #[serde(rename = "select_layers", alias = "select_layer")]
    Select,
}

impl ActionKind {
    /// Checks if this verb terminates the shortcut and acts globally.
    #[must_use]
    pub const fn is_reset(self) -> bool {
        matches!(self, Self::ResetShowAll | Self::ResetHideAll)
    }

    /// Tag string as written to configuration files.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::ResetShowAll => "reset_and_show_all_layers",
            Self::ResetHideAll => "reset_and_hide_all_layers",
            Self::Hide => "hide_layers",
            Self::Show => "show_layers",
            Self::Select => "select_layers",
        }
    }
}

/// One verb applied to a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// What to do
    pub kind: ActionKind,
    /// Which layers to do it to (ignored by resets)
    #[serde(rename = "layers", default)]
    pub target: LayerDescriptor,
}

impl Action {
    /// Creates an action.
    #[must_use]
    pub const fn new(kind: ActionKind, target: LayerDescriptor) -> Self {
        Self { kind, target }
    }

    /// `Hide` action.
    #[must_use]
    pub const fn hide(target: LayerDescriptor) -> Self {
        Self::new(ActionKind::Hide, target)
    }

    /// `Show` action.
    #[must_use]
    pub const fn show(target: LayerDescriptor) -> Self {
        Self::new(ActionKind::Show, target)
    }

    /// `Select` action.
    #[must_use]
    pub const fn select(target: LayerDescriptor) -> Self {
        Self::new(ActionKind::Select, target)
    }

    /// `ResetShowAll` action.
    #[must_use]
    pub const fn reset_show_all() -> Self {
        Self::new(ActionKind::ResetShowAll, LayerDescriptor::All)
    }

    /// `ResetHideAll` action.
    #[must_use]
    pub const fn reset_hide_all() -> Self {
        Self::new(ActionKind::ResetHideAll, LayerDescriptor::All)
    }
}
