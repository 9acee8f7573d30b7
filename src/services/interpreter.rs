//! Action interpretation.
//!
//! Classifies the current layers against a descriptor and applies one verb to
//! the accumulated view of a running shortcut.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::models::{Action, ActionKind, LayerDescriptor, LayerEntry, LayerId, TechnologyConfig};
use crate::services::layer_groups;

/// Whether a layer is matched by a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// Matched; the verb applies
    Included,
    /// Not matched; the verb leaves the layer alone
    Excluded,
}

impl Membership {
    const fn from_bool(included: bool) -> Self {
        if included {
            Self::Included
        } else {
            Self::Excluded
        }
    }
}

/// Visibility applied to every layer by a reset action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalVisibility {
    /// Every layer visible
    ShowAll,
    /// Every layer hidden
    HideAll,
}

impl GlobalVisibility {
    /// The visibility flag to apply.
    #[must_use]
    pub const fn visible(self) -> bool {
        matches!(self, Self::ShowAll)
    }
}

/// What the executor should do after an action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Keep going with the next action
    Continue,
    /// Stop and apply this visibility to the whole layer list
    Reset(GlobalVisibility),
}

/// Work-in-progress view of a running shortcut.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    /// Layers that will be visible
    pub visible: BTreeSet<LayerId>,
    /// Layer that will become current
    pub selected: Option<LayerId>,
    /// Whether unnamed entries (grouping nodes) stay in the view
    pub unnamed_visible: bool,
}

/// Classifies each layer of a snapshot against a descriptor.
///
/// Anonymous entries are excluded by `Explicit` and `ByGroups`; they can
/// never match a name.
pub fn classify(
    descriptor: &LayerDescriptor,
    config: &TechnologyConfig,
    layers: &[LayerEntry],
) -> Result<Vec<Membership>> {
    let memberships = match descriptor {
        LayerDescriptor::All => vec![Membership::Included; layers.len()],
        LayerDescriptor::None => vec![Membership::Excluded; layers.len()],
        LayerDescriptor::Explicit { layers: wanted } => layers
            .iter()
            .map(|l| Membership::from_bool(l.id().is_some_and(|id| wanted.contains(id))))
            .collect(),
        LayerDescriptor::ByGroups { layer_groups } => {
            let wanted = layer_groups::resolve(config, layer_groups)?;
            layers
                .iter()
                .map(|l| Membership::from_bool(l.id().is_some_and(|id| wanted.contains(id))))
                .collect()
        }
    };

    Ok(memberships)
}

/// Applies one action to the accumulator.
///
/// Resets do not touch the accumulator; they tell the executor to abandon it.
pub fn apply(
    action: &Action,
    config: &TechnologyConfig,
    layers: &[LayerEntry],
    acc: &mut Accumulator,
) -> Result<Effect> {
    match action.kind {
        ActionKind::ResetShowAll => return Ok(Effect::Reset(GlobalVisibility::ShowAll)),
        ActionKind::ResetHideAll => return Ok(Effect::Reset(GlobalVisibility::HideAll)),
        ActionKind::Hide | ActionKind::Show | ActionKind::Select => {}
    }

    let memberships = classify(&action.target, config, layers)?;
    let mut included = layers
        .iter()
        .zip(&memberships)
        .filter(|(_, m)| **m == Membership::Included)
        .filter_map(|(layer, _)| layer.identifier.as_ref());

    // Only `All` ever matches unnamed entries
    let matches_unnamed = layers
        .iter()
        .zip(&memberships)
        .any(|(layer, m)| layer.is_anonymous() && *m == Membership::Included);

    match action.kind {
        ActionKind::Hide => {
            // Narrowing: only matches leave the set, everything else stays as is
            for id in included {
                acc.visible.remove(id);
            }
            if matches_unnamed {
                acc.unnamed_visible = false;
            }
        }
        ActionKind::Show => {
            acc.visible.extend(included.cloned());
            if matches_unnamed {
                acc.unnamed_visible = true;
            }
        }
        ActionKind::Select => {
            if let Some(first) = included.next() {
                acc.selected = Some(first.clone());
            }
        }
        ActionKind::ResetShowAll | ActionKind::ResetHideAll => {}
    }

    Ok(Effect::Continue)
}
