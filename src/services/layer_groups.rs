//! Layer group resolution.
//!
//! Expands layer-group references into the flat set of layer identifiers
//! they denote. A dangling reference is an authoring bug and is reported,
//! never resolved to an empty set.

use std::collections::BTreeSet;

use crate::error::{Result, ShortcutError};
use crate::models::{LayerId, TechnologyConfig};

/// Resolves group names to the union of their layers.
///
/// Duplicates collapse and the result does not depend on name order.
///
/// # Examples
/// ```
/// use layer_shortcuts::models::{LayerGroup, TechnologyConfig};
/// use layer_shortcuts::services::layer_groups::resolve;
///
/// let mut config = TechnologyConfig::new("sg13g2");
/// config.add_layer_group(LayerGroup::new("Metal1.Visible", ["Metal1.drawing", "Via1.drawing"]));
/// config.add_layer_group(LayerGroup::new("Metal2.Visible", ["Metal2.drawing", "Via1.drawing"]));
///
/// let layers = resolve(&config, &["Metal1.Visible", "Metal2.Visible"]).unwrap();
/// assert_eq!(layers.len(), 3);
/// assert!(resolve(&config, &["Metal7.Visible"]).is_err());
/// ```
pub fn resolve<S: AsRef<str>>(config: &TechnologyConfig, names: &[S]) -> Result<BTreeSet<LayerId>> {
    let mut layers = BTreeSet::new();

    for name in names {
        let name = name.as_ref();
        let mut found = false;

        // Duplicate definitions are a validation error; union them here so
        // nothing silently disappears.
        for group in config.layer_groups.iter().filter(|g| g.name == name) {
            found = true;
            layers.extend(group.layers.iter().cloned());
        }

        if !found {
            return Err(ShortcutError::unknown_group(name));
        }
    }

    Ok(layers)
}

/// Returns the referenced names that have no definition, in reference order.
#[must_use]
pub fn unresolved<'a, S: AsRef<str>>(config: &TechnologyConfig, names: &'a [S]) -> Vec<&'a str> {
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| config.layer_group(name).is_none())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LayerGroup;

    fn config() -> TechnologyConfig {
        let mut config = TechnologyConfig::new("sg13g2");
        config.add_layer_group(LayerGroup::new(
            "Metal1.Visible",
            ["Metal1.drawing", "Metal1.pin", "Cont.drawing", "Via1.drawing"],
        ));
        config.add_layer_group(LayerGroup::new("Metal1.Selected", ["Metal1.drawing"]));
        config.add_layer_group(LayerGroup::new(
            "Metal2.Visible",
            ["Metal2.drawing", "Via1.drawing", "Via2.drawing"],
        ));
        config
    }

    #[test]
    fn test_resolve_single_group() {
        let layers = resolve(&config(), &["Metal1.Selected"]).unwrap();
        assert_eq!(layers.into_iter().collect::<Vec<_>>(), vec!["Metal1.drawing"]);
    }

    #[test]
    fn test_resolve_union_is_order_independent() {
        let config = config();
        let forward = resolve(&config, &["Metal1.Visible", "Metal2.Visible"]).unwrap();
        let backward = resolve(&config, &["Metal2.Visible", "Metal1.Visible"]).unwrap();

        assert_eq!(forward, backward);
        // Via1.drawing is in both groups but appears once
        assert_eq!(forward.len(), 6);
        assert!(forward.contains("Via1.drawing"));
    }

    #[test]
    fn test_resolve_unknown_group_fails() {
        let err = resolve(&config(), &["Metal1.Visible", "Metal3.Visible"]).unwrap_err();
        match err {
            ShortcutError::UnknownGroup { name } => assert_eq!(name, "Metal3.Visible"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_empty_reference_list() {
        let names: [&str; 0] = [];
        assert!(resolve(&config(), &names).unwrap().is_empty());
    }

    #[test]
    fn test_resolve_merges_duplicate_definitions() {
        let mut config = config();
        config.add_layer_group(LayerGroup::new("Metal1.Selected", ["Metal1.pin"]));
        let layers = resolve(&config, &["Metal1.Selected"]).unwrap();
        assert_eq!(layers.len(), 2);
    }

    #[test]
    fn test_unresolved() {
        let names = ["Metal1.Visible", "Nope", "Metal2.Visible", "AlsoNope"];
        assert_eq!(unresolved(&config(), &names), vec!["Nope", "AlsoNope"]);
    }
}
