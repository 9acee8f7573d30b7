//! Built-in example technology.
//!
//! A complete navigation menu for the IHP `sg13g2` metal stack, used as a
//! starting point for new technology files and as a test fixture.

use crate::models::{Action, LayerDescriptor, LayerGroup, Shortcut, TechnologyConfig};

/// Technology name of the example.
pub const EXAMPLE_TECHNOLOGY: &str = "sg13g2";

/// Builds the example technology configuration.
///
/// Keys `0` and `,` reset the layer view; `1`..`9` focus on one layer family.
#[must_use]
pub fn build_example_technology() -> TechnologyConfig {
    let mut config = TechnologyConfig::new(EXAMPLE_TECHNOLOGY);

    let metals: [(&str, &[&str]); 7] = [
        ("Metal1", &["Cont.drawing", "Via1.drawing"]),
        ("Metal2", &["Via1.drawing", "Via2.drawing"]),
        ("Metal3", &["Via2.drawing", "Via3.drawing"]),
        ("Metal4", &["Via3.drawing", "Via4.drawing"]),
        ("Metal5", &["Via4.drawing", "TopVia1.drawing"]),
        ("TopMetal1", &["TopVia1.drawing", "TopVia2.drawing"]),
        ("TopMetal2", &["TopVia1.drawing"]),
    ];
    for (metal, vias) in metals {
        let mut visible = metal_layers(metal);
        visible.extend(vias.iter().map(|v| (*v).to_string()));
        config.add_layer_group(LayerGroup::new(format!("{metal}.Visible"), visible));
        config.add_layer_group(LayerGroup::new(
            format!("{metal}.Selected"),
            [format!("{metal}.drawing")],
        ));
    }

    config.add_layer_group(LayerGroup::new(
        "GatPoly.Visible",
        ["GatPoly.drawing", "PolyRes.drawing", "Cont.drawing"],
    ));
    config.add_layer_group(LayerGroup::new("GatPoly.Selected", ["GatPoly.drawing"]));
    config.add_layer_group(LayerGroup::new(
        "Activ.Visible",
        [
            "Activ.drawing",
            "Cont.drawing",
            "NWell.drawing",
            "nBuLay.drawing",
            "pSD.drawing",
            "nSD.drawing",
            "SalBlock.drawing",
            "RES.drawing",
        ],
    ));
    config.add_layer_group(LayerGroup::new("Activ.Selected", ["Activ.drawing"]));

    config.add_menu_item(Shortcut::new(
        "Show default layers",
        "0",
        vec![Action::reset_show_all()],
    ));
    config.add_menu_item(Shortcut::new(
        "Hide default layers",
        ",",
        vec![Action::reset_hide_all()],
    ));

    // Keys follow the stack from bottom to top
    let families = (1..=5)
        .map(|i| format!("Metal{i}"))
        .chain((1..=2).map(|i| format!("TopMetal{i}")))
        .chain(["GatPoly".to_string(), "Activ".to_string()]);
    for (key, family) in (1..).zip(families) {
        config.add_menu_item(focus_shortcut(&family, &key.to_string()));
    }

    config
}

fn metal_layers(metal: &str) -> Vec<String> {
    ["drawing", "pin", "text", "label"]
        .iter()
        .map(|purpose| format!("{metal}.{purpose}"))
        .collect()
}

fn focus_shortcut(family: &str, key: &str) -> Shortcut {
    Shortcut::new(
        format!("Focus on {family} layers"),
        key,
        vec![
            Action::hide(LayerDescriptor::All),
            Action::show(LayerDescriptor::groups([format!("{family}.Visible")])),
            Action::select(LayerDescriptor::groups([format!("{family}.Selected")])),
        ],
    )
}
