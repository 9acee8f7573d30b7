//! Shortcut execution.
//!
//! Runs the actions of a triggered shortcut in order and produces either a
//! complete replacement view or a global reset. Ordinary shortcuts are not a
//! diff against the previous view: the result is the only visible layer set.

use std::collections::BTreeSet;

use tracing::debug;

use crate::error::Result;
use crate::models::{LayerEntry, LayerId, Shortcut, TechnologyConfig};
use crate::services::interpreter::{self, Accumulator, Effect, GlobalVisibility};

/// Final view computed by an ordinary shortcut.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// The only layers that will be visible
    pub visible_layers: BTreeSet<LayerId>,
    /// The layer to activate, if any
    pub selected_layer: Option<LayerId>,
    /// Whether unnamed entries matched by `All` are carried into the view
    pub include_unnamed: bool,
}

impl ExecutionResult {
    /// Visible entries of `snapshot`, in snapshot order, flagged visible.
    ///
    /// This is the sequence installed into the navigation layer tab. Unnamed
    /// entries are kept only when the last `All` show or hide showed them.
    #[must_use]
    pub fn ordered_layers(&self, snapshot: &[LayerEntry]) -> Vec<LayerEntry> {
        snapshot
            .iter()
            .filter(|entry| match entry.id() {
                Some(id) => self.visible_layers.contains(id),
                None => self.include_unnamed,
            })
            .map(|entry| LayerEntry {
                visible: true,
                selected: entry.id() == self.selected_layer.as_deref(),
                ..entry.clone()
            })
            .collect()
    }
}

impl From<Accumulator> for ExecutionResult {
    fn from(acc: Accumulator) -> Self {
        Self {
            visible_layers: acc.visible,
            selected_layer: acc.selected,
            include_unnamed: acc.unnamed_visible,
        }
    }
}

/// Outcome of executing one shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Install this view as the navigation tab
    View(ExecutionResult),
    /// Bypass the tab and set every layer's visibility directly
    Reset(GlobalVisibility),
}

/// Executes a shortcut against a layer snapshot.
///
/// A reset action ends the shortcut immediately; any later actions are
/// never looked at. A dangling group reference fails the whole shortcut.
///
/// # Examples
/// ```
/// use layer_shortcuts::models::{Action, LayerDescriptor, LayerEntry, LayerGroup, Shortcut, TechnologyConfig};
/// use layer_shortcuts::services::executor::{execute, ExecutionOutcome};
///
/// let mut config = TechnologyConfig::new("sg13g2");
/// config.add_layer_group(LayerGroup::new("Metal1.Visible", ["Metal1.drawing"]));
///
/// let shortcut = Shortcut::new("Focus on Metal1 layers", "1", vec![
///     Action::hide(LayerDescriptor::All),
///     Action::show(LayerDescriptor::groups(["Metal1.Visible"])),
/// ]);
/// let layers = vec![LayerEntry::new("Metal1.drawing"), LayerEntry::new("Metal2.drawing")];
///
/// match execute(&config, &shortcut, &layers).unwrap() {
///     ExecutionOutcome::View(result) => assert_eq!(result.visible_layers.len(), 1),
///     ExecutionOutcome::Reset(_) => unreachable!(),
/// }
/// ```
pub fn execute(
    config: &TechnologyConfig,
    shortcut: &Shortcut,
    layers: &[LayerEntry],
) -> Result<ExecutionOutcome> {
    let mut acc = Accumulator::default();

    for (idx, action) in shortcut.actions.iter().enumerate() {
        match interpreter::apply(action, config, layers, &mut acc)? {
            Effect::Continue => {}
            Effect::Reset(visibility) => {
                let skipped = shortcut.actions.len() - idx - 1;
                debug!(
                    shortcut = %shortcut.title,
                    ?visibility,
                    skipped,
                    "reset action ends shortcut"
                );
                return Ok(ExecutionOutcome::Reset(visibility));
            }
        }
    }

    debug!(
        shortcut = %shortcut.title,
        visible = acc.visible.len(),
        selected = acc.selected.as_deref().unwrap_or("none"),
        "shortcut executed"
    );

    Ok(ExecutionOutcome::View(acc.into()))
}
