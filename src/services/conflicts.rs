//! Key-binding conflict detection.
//!
//! Compares the keys a technology wants to bind against every key bound
//! elsewhere in the host and builds the prompt offered to the user.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::{CONFLICT_PROMPT_TITLE, NO_BINDING};
use crate::error::ShortcutError;
use crate::models::TechnologyConfig;

/// A key this plugin wants to bind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WantedBinding {
    /// Shortcut title
    pub title: String,
    /// Key sequence
    pub key: String,
}

impl WantedBinding {
    /// Creates a wanted binding.
    pub fn new(title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            key: key.into(),
        }
    }
}

/// A key bound to some command in the host's menu tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundShortcut {
    /// Menu path of the command (e.g., "file_menu.save")
    pub path: String,
    /// Command title
    pub title: String,
    /// Effective key sequence
    pub key: String,
}

impl BoundShortcut {
    /// Creates a bound shortcut.
    pub fn new(path: impl Into<String>, title: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            key: key.into(),
        }
    }
}

/// An external binding that collides with a wanted key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    /// Menu path of the external command
    pub path: String,
    /// Title of the external command
    pub title: String,
    /// The colliding key
    pub key: String,
    /// Title of the shortcut that wants the key
    pub wanted_title: String,
}

/// A key claimed by more than one shortcut of the same technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    /// The key
    pub key: String,
    /// Every shortcut title using it, in menu order
    pub titles: Vec<String>,
}

impl From<DuplicateKey> for ShortcutError {
    fn from(dup: DuplicateKey) -> Self {
        Self::DuplicateKeyInConfig {
            key: dup.key,
            titles: dup.titles,
        }
    }
}

/// Result of one detection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    /// Every wanted binding, in menu order
    pub wanted: Vec<WantedBinding>,
    /// External bindings colliding with a wanted key
    pub conflicts: Vec<Conflict>,
    /// Configuration errors: keys wanted more than once
    pub duplicate_keys: Vec<DuplicateKey>,
}

impl ConflictReport {
    /// Checks if any external binding collides.
    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Keys that collide with an external binding.
    #[must_use]
    pub fn conflicting_keys(&self) -> BTreeSet<&str> {
        self.conflicts.iter().map(|c| c.key.as_str()).collect()
    }

    /// Menu paths to unbind when the user accepts the resolution.
    #[must_use]
    pub fn paths_to_clear(&self) -> Vec<&str> {
        self.conflicts.iter().map(|c| c.path.as_str()).collect()
    }
}

/// The user's answer to a conflict prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// Conflicting external bindings were cleared
    Accepted,
    /// External bindings were kept and keep shadowing ours
    Declined,
}

/// Checks if a key counts as bound.
///
/// # Examples
/// ```
/// use layer_shortcuts::services::conflicts::is_key_bound;
///
/// assert!(is_key_bound("Ctrl+S"));
/// assert!(!is_key_bound(""));
/// assert!(!is_key_bound("none"));
/// ```
#[must_use]
pub fn is_key_bound(key: &str) -> bool {
    !key.is_empty() && key != NO_BINDING
}

/// Collects the bindings a technology wants, in menu order.
#[must_use]
pub fn wanted_bindings(config: &TechnologyConfig) -> Vec<WantedBinding> {
    config
        .shortcuts()
        .map(|s| WantedBinding::new(s.title.clone(), s.key.clone()))
        .collect()
}

/// Finds keys wanted by more than one shortcut.
#[must_use]
pub fn duplicate_keys(wanted: &[WantedBinding]) -> Vec<DuplicateKey> {
    let mut by_key: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for binding in wanted.iter().filter(|w| is_key_bound(&w.key)) {
        by_key.entry(&binding.key).or_default().push(&binding.title);
    }

    by_key
        .into_iter()
        .filter(|(_, titles)| titles.len() > 1)
        .map(|(key, titles)| DuplicateKey {
            key: key.to_string(),
            titles: titles.into_iter().map(String::from).collect(),
        })
        .collect()
}

/// Detects collisions between wanted keys and external bindings.
///
/// Bindings under `owned_path` (this plugin's own menu group, left over from
/// an earlier activation) are never reported. Unbound keys never collide.
///
/// # Examples
/// ```
/// use layer_shortcuts::services::conflicts::{detect, BoundShortcut, WantedBinding};
///
/// let wanted = vec![
///     WantedBinding::new("Show defaults", "0"),
///     WantedBinding::new("Hide defaults", ","),
/// ];
/// let bound = vec![
///     BoundShortcut::new("file_menu.save", "Save", "Ctrl+S"),
///     BoundShortcut::new("other.x", "X", "0"),
/// ];
///
/// let report = detect(&wanted, &bound, "edit_menu.layer_navigation_group");
/// assert_eq!(report.conflicts.len(), 1);
/// assert_eq!(report.conflicts[0].key, "0");
/// ```
#[must_use]
pub fn detect(wanted: &[WantedBinding], bound: &[BoundShortcut], owned_path: &str) -> ConflictReport {
    let mut wanted_titles: BTreeMap<&str, &str> = BTreeMap::new();
    for binding in wanted.iter().filter(|w| is_key_bound(&w.key)) {
        wanted_titles.entry(&binding.key).or_insert(&binding.title);
    }

    let conflicts = bound
        .iter()
        .filter(|b| !is_owned_path(&b.path, owned_path))
        .filter(|b| is_key_bound(&b.key))
        .filter_map(|b| {
            wanted_titles.get(b.key.as_str()).map(|wanted_title| Conflict {
                path: b.path.clone(),
                title: b.title.clone(),
                key: b.key.clone(),
                wanted_title: (*wanted_title).to_string(),
            })
        })
        .collect();

    ConflictReport {
        wanted: wanted.to_vec(),
        conflicts,
        duplicate_keys: duplicate_keys(wanted),
    }
}

fn is_owned_path(path: &str, owned_path: &str) -> bool {
    path == owned_path
        || path
            .strip_prefix(owned_path)
            .is_some_and(|rest| rest.starts_with('.'))
}

/// The yes/no question shown when conflicts exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictPrompt {
    /// Dialog title
    pub title: String,
    /// Rich-text body
    pub message: String,
}

impl ConflictPrompt {
    /// Builds the prompt for a report, or `None` when nothing collides.
    ///
    /// Both lists are shown in full; entries with a colliding key are red.
    #[must_use]
    pub fn from_report(report: &ConflictReport) -> Option<Self> {
        if !report.has_conflicts() {
            return None;
        }

        let conflicting = report.conflicting_keys();
        let mut msg = String::from("The <i>LayerShortcuts</i> plugin wants to configure new shortcuts:<br/>");
        for binding in &report.wanted {
            push_line(&mut msg, &binding.title, &binding.key, conflicting.contains(binding.key.as_str()));
        }

        msg.push_str("<br/>Some shortcuts are already in use:<br/>");
        for conflict in &report.conflicts {
            push_line(&mut msg, &conflict.title, &conflict.key, true);
        }
        msg.push_str("<br/>Do you want to remove these conflicting shortcuts?");

        Some(Self {
            title: CONFLICT_PROMPT_TITLE.to_string(),
            message: msg,
        })
    }
}

fn push_line(msg: &mut String, title: &str, key: &str, highlight: bool) {
    if highlight {
        msg.push_str("<font color='red'>");
    }
    msg.push_str(&format!(
        "&nbsp;&nbsp;&nbsp;&nbsp;• <i>{}</i> (<code>{}</code>)<br/>",
        escape_rich_text(title),
        escape_rich_text(key)
    ));
    if highlight {
        msg.push_str("</font>");
    }
}

/// Escapes the characters Qt rich text treats as markup.
fn escape_rich_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNED: &str = "edit_menu.layer_navigation_group";

    fn wanted() -> Vec<WantedBinding> {
        vec![
            WantedBinding::new("Show defaults", "0"),
            WantedBinding::new("Hide defaults", ","),
        ]
    }

    #[test]
    fn test_detect_reports_only_colliding_key() {
        let bound = vec![
            BoundShortcut::new("file_menu.save", "Save", "Ctrl+S"),
            BoundShortcut::new("other.x", "X", "0"),
        ];
        let report = detect(&wanted(), &bound, OWNED);

        assert_eq!(report.conflicts.len(), 1);
        let conflict = &report.conflicts[0];
        assert_eq!(conflict.key, "0");
        assert_eq!(conflict.path, "other.x");
        assert_eq!(conflict.wanted_title, "Show defaults");
        assert!(report.duplicate_keys.is_empty());
    }

    #[test]
    fn test_unbound_keys_never_conflict() {
        let wanted = vec![WantedBinding::new("Unbound", ""), WantedBinding::new("Sentinel", "none")];
        let bound = vec![
            BoundShortcut::new("a.b", "Empty", ""),
            BoundShortcut::new("a.c", "Sentinel", "none"),
        ];
        let report = detect(&wanted, &bound, OWNED);
        assert!(!report.has_conflicts());
    }

    #[test]
    fn test_own_bindings_are_not_conflicts() {
        let bound = vec![
            BoundShortcut::new(format!("{OWNED}.shortcut_0"), "Show defaults", "0"),
            BoundShortcut::new(format!("{OWNED}_other.x"), "Lookalike", ","),
        ];
        let report = detect(&wanted(), &bound, OWNED);

        // The lookalike path is a different menu and still collides
        assert_eq!(report.conflicting_keys().into_iter().collect::<Vec<_>>(), vec![","]);
    }

    #[test]
    fn test_duplicate_keys_flagged() {
        let wanted = vec![
            WantedBinding::new("Focus Metal1", "1"),
            WantedBinding::new("Focus Metal2", "2"),
            WantedBinding::new("Focus TopMetal1", "1"),
        ];
        let dups = duplicate_keys(&wanted);
        assert_eq!(dups.len(), 1);
        assert_eq!(dups[0].key, "1");
        assert_eq!(dups[0].titles, vec!["Focus Metal1", "Focus TopMetal1"]);

        let err: ShortcutError = dups[0].clone().into();
        assert!(err.to_string().contains("defined multiple times"));
    }

    #[test]
    fn test_every_colliding_external_binding_listed() {
        let bound = vec![
            BoundShortcut::new("view.zoom", "Zoom", "0"),
            BoundShortcut::new("view.fit", "Fit", "0"),
        ];
        let report = detect(&wanted(), &bound, OWNED);
        assert_eq!(report.paths_to_clear(), vec!["view.zoom", "view.fit"]);
    }

    #[test]
    fn test_prompt_highlights_conflicting_keys() {
        let bound = vec![BoundShortcut::new("other.x", "X <beta>", "0")];
        let report = detect(&wanted(), &bound, OWNED);
        let prompt = ConflictPrompt::from_report(&report).expect("prompt");

        assert_eq!(prompt.title, "Shortcut Conflict");
        assert!(prompt
            .message
            .contains("<font color='red'>&nbsp;&nbsp;&nbsp;&nbsp;• <i>Show defaults</i> (<code>0</code>)"));
        assert!(!prompt.message.contains("<font color='red'>&nbsp;&nbsp;&nbsp;&nbsp;• <i>Hide defaults</i>"));
        assert!(prompt.message.contains("X &lt;beta&gt;"));
        assert!(prompt.message.ends_with("Do you want to remove these conflicting shortcuts?"));
    }

    #[test]
    fn test_no_prompt_without_conflicts() {
        let report = detect(&wanted(), &[], OWNED);
        assert!(ConflictPrompt::from_report(&report).is_none());
    }
}
