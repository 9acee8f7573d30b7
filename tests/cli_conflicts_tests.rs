//! End-to-end tests for `layer-shortcuts conflicts` command.

use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the layer-shortcuts binary
fn layer_shortcuts_bin() -> &'static str {
    env!("CARGO_BIN_EXE_layer-shortcuts")
}

const BINDINGS: &str = r#"[
    {"path": "file_menu.save", "title": "Save", "key": "Ctrl+S"},
    {"path": "zoom_menu.zoom_fit", "title": "Zoom Fit", "key": "1"},
    {"path": "bookmark_menu.goto", "title": "Goto Bookmark", "key": "none"},
    {"path": "edit_menu.layer_navigation_group.shortcut_3", "title": "Focus on Metal2 layers", "key": "2"}
]"#;

#[test]
fn test_conflicts_reported_as_json() {
    let (config, _config_dir) = create_temp_technology_file(&test_technology());
    let (bindings, _bindings_dir) = create_temp_file("bindings.json", BINDINGS);

    let output = Command::new(layer_shortcuts_bin())
        .args([
            "conflicts",
            "--config",
            config.to_str().unwrap(),
            "--bindings",
            bindings.to_str().unwrap(),
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1), "Conflicts should exit with code 1");

    let result: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    let conflicts = result["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["path"], "zoom_menu.zoom_fit");
    assert_eq!(conflicts[0]["wanted_title"], "Focus on Metal1 layers");
    assert!(result["duplicate_keys"].as_array().unwrap().is_empty());
}

#[test]
fn test_no_conflicts() {
    let (config, _config_dir) = create_temp_technology_file(&test_technology());
    let (bindings, _bindings_dir) = create_temp_file(
        "bindings.json",
        r#"[{"path": "file_menu.save", "title": "Save", "key": "Ctrl+S"}]"#,
    );

    let output = Command::new(layer_shortcuts_bin())
        .args([
            "conflicts",
            "-c",
            config.to_str().unwrap(),
            "-b",
            bindings.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No conflicts"));
}

#[test]
fn test_other_menu_group_owns_nothing() {
    let (config, _config_dir) = create_temp_technology_file(&test_technology());
    let (bindings, _bindings_dir) = create_temp_file("bindings.json", BINDINGS);

    let output = Command::new(layer_shortcuts_bin())
        .args([
            "conflicts",
            "-c",
            config.to_str().unwrap(),
            "-b",
            bindings.to_str().unwrap(),
            "--menu-group",
            "tools_menu.navigation",
            "--json",
        ])
        .output()
        .expect("Failed to execute command");

    let result: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(result["conflicts"].as_array().unwrap().len(), 2);
}

#[test]
fn test_malformed_bindings_file() {
    let (config, _config_dir) = create_temp_technology_file(&test_technology());
    let (bindings, _bindings_dir) = create_temp_file("bindings.json", "{}");

    let output = Command::new(layer_shortcuts_bin())
        .args([
            "conflicts",
            "-c",
            config.to_str().unwrap(),
            "-b",
            bindings.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
