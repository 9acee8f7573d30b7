//! Shortcuts and the menu items that lay them out.

use serde::{Deserialize, Serialize};

use super::action::Action;

/// A key binding plus the ordered actions it triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcut {
    /// Menu title (e.g., "Focus on Metal1 layers")
    pub title: String,
    /// Key sequence in host syntax (e.g., "1", "Shift+F2")
    pub key: String,
    /// Actions, executed in order
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Shortcut {
    /// Creates a shortcut.
    pub fn new(title: impl Into<String>, key: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
            actions,
        }
    }
}

/// One entry of the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "MenuItemRepr", into = "MenuItemRepr")]
pub enum MenuItem {
    /// A bound shortcut
    Shortcut(Shortcut),
    /// A visual separator, written as `{"kind": "separator"}`
    Separator,
}

impl MenuItem {
    /// Returns the shortcut, if this item is one.
    #[must_use]
    pub const fn as_shortcut(&self) -> Option<&Shortcut> {
        match self {
            Self::Shortcut(shortcut) => Some(shortcut),
            Self::Separator => None,
        }
    }

    /// Checks if this item is a separator.
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }
}

impl From<Shortcut> for MenuItem {
    fn from(shortcut: Shortcut) -> Self {
        Self::Shortcut(shortcut)
    }
}

// Shortcuts carry no `kind` field, so the separator variant is tried first.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum MenuItemRepr {
    Separator(SeparatorRepr),
    Shortcut(Shortcut),
}

#[derive(Clone, Serialize, Deserialize)]
struct SeparatorRepr {
    kind: SeparatorTag,
}

#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SeparatorTag {
    Separator,
}

impl From<MenuItemRepr> for MenuItem {
    fn from(repr: MenuItemRepr) -> Self {
        match repr {
            MenuItemRepr::Separator(_) => Self::Separator,
            MenuItemRepr::Shortcut(shortcut) => Self::Shortcut(shortcut),
        }
    }
}

impl From<MenuItem> for MenuItemRepr {
    fn from(item: MenuItem) -> Self {
        match item {
            MenuItem::Separator => Self::Separator(SeparatorRepr {
                kind: SeparatorTag::Separator,
            }),
            MenuItem::Shortcut(shortcut) => Self::Shortcut(shortcut),
        }
    }
}
