//! Tests for the layer tab helpers against the recording host.

mod fixtures;

use fixtures::*;
use layer_shortcuts::host::{find_layer_list, install_layer_tab, remove_layer_tab};
use layer_shortcuts::models::LayerEntry;

#[test]
fn test_install_creates_tab_at_end() {
    let mut host = FakeHost::with_layout("sg13g2");
    let layers = vec![LayerEntry::new("Metal1.drawing")];

    let list = install_layer_tab(&mut host, TAB, &layers);

    assert_eq!(list, 1);
    assert_eq!(find_layer_list(&host, TAB), Some(1));
    assert_eq!(host.current_list, 1);
    assert_eq!(host.tab_ids(TAB), vec!["Metal1.drawing"]);
    assert_eq!(
        host.calls,
        vec![
            "insert_layer_list(1)",
            "rename_layer_list(1, LayNav)",
            "set_current_layer_list(1)",
            "append_layers(1, 1)",
        ]
    );
}

#[test]
fn test_install_replaces_existing_contents() {
    let mut host = FakeHost::with_layout("sg13g2");
    host.clear_drops_name = true;
    install_layer_tab(&mut host, TAB, &[LayerEntry::new("Metal1.drawing")]);
    host.calls.clear();

    let list = install_layer_tab(
        &mut host,
        TAB,
        &[LayerEntry::new("Via1.drawing"), LayerEntry::new("Metal2.drawing")],
    );

    assert_eq!(list, 1);
    assert_eq!(host.lists.len(), 2);
    assert_eq!(host.tab_ids(TAB), vec!["Via1.drawing", "Metal2.drawing"]);
    assert_eq!(host.calls[0], "clear_layer_list(1)");
    assert_eq!(host.calls[1], "rename_layer_list(1, LayNav)");
}

#[test]
fn test_remove_tab() {
    let mut host = FakeHost::with_layout("sg13g2");
    assert!(!remove_layer_tab(&mut host, TAB));

    install_layer_tab(&mut host, TAB, &[]);
    assert!(remove_layer_tab(&mut host, TAB));
    assert_eq!(host.lists.len(), 1);
    assert_eq!(find_layer_list(&host, TAB), None);
}
