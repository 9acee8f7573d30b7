//! Layer snapshot entries as reported by the host's layer list.

use serde::{Deserialize, Serialize};

/// Opaque name of a drawing layer/purpose pair (e.g., "Metal1.drawing").
pub type LayerId = String;

/// One row of the host's live layer list.
///
/// Entries without an identifier are anonymous (synthetic grouping nodes or
/// unnamed sources); they can never be addressed by a layer group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerEntry {
    /// Layer identifier, if the host knows one
    pub identifier: Option<LayerId>,
    /// Name shown in the layer panel
    pub display_name: String,
    /// Current visibility flag
    pub visible: bool,
    /// Whether this entry is the current layer
    #[serde(default)]
    pub selected: bool,
}

impl LayerEntry {
    /// Creates a visible, unselected entry whose display name is its identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use layer_shortcuts::models::LayerEntry;
    ///
    /// let entry = LayerEntry::new("Metal1.drawing");
    /// assert_eq!(entry.id(), Some("Metal1.drawing"));
    /// assert!(entry.visible);
    /// ```
    pub fn new(identifier: impl Into<LayerId>) -> Self {
        let identifier = identifier.into();
        Self {
            display_name: identifier.clone(),
            identifier: Some(identifier),
            visible: true,
            selected: false,
        }
    }

    /// Creates an anonymous entry.
    pub fn anonymous(display_name: impl Into<String>) -> Self {
        Self {
            identifier: None,
            display_name: display_name.into(),
            visible: true,
            selected: false,
        }
    }

    /// Sets the visibility flag.
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Checks if this entry has no identifier.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.identifier.is_none()
    }
}
