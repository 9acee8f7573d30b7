//! Shared test fixtures for integration and E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use layer_shortcuts::config::NavigationConfig;
use layer_shortcuts::event_loop::PluginHandle;
use layer_shortcuts::host::{LayerListId, LayoutHost};
use layer_shortcuts::models::{
    Action, LayerDescriptor, LayerEntry, LayerGroup, MenuItem, Shortcut, TechnologyConfig,
};
use layer_shortcuts::services::catalog::write_technology;
use layer_shortcuts::services::conflicts::BoundShortcut;
use layer_shortcuts::services::ConfigCatalog;
use layer_shortcuts::LayerShortcuts;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// Menu group used by every controller test.
pub const MENU_GROUP: &str = "edit_menu.layer_navigation_group";

/// Layer tab used by every controller test.
pub const TAB: &str = "LayNav";

/// Small technology with a reset pair, two focus shortcuts and a broken one.
///
/// Keys: `0` show all, `,` hide all, `1` Metal1, `2` Metal2, `9` broken.
pub fn test_technology() -> TechnologyConfig {
    let mut config = TechnologyConfig::new("sg13g2");
    config.add_layer_group(LayerGroup::new(
        "Metal1.Visible",
        ["Metal1.drawing", "Cont.drawing", "Via1.drawing"],
    ));
    config.add_layer_group(LayerGroup::new("Metal1.Selected", ["Metal1.drawing"]));
    config.add_layer_group(LayerGroup::new(
        "Metal2.Visible",
        ["Metal2.drawing", "Via1.drawing"],
    ));
    config.add_layer_group(LayerGroup::new("Metal2.Selected", ["Metal2.drawing"]));

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
    config.add_menu_item(MenuItem::Separator);
    config.add_menu_item(focus("Metal1", "1"));
    config.add_menu_item(focus("Metal2", "2"));
    config.add_menu_item(Shortcut::new(
        "Broken",
        "9",
        vec![Action::show(LayerDescriptor::groups(["Metal9.Visible"]))],
    ));
    config
}

/// Index of each test shortcut among the menu's shortcuts.
pub const SHOW_ALL: usize = 0;
pub const HIDE_ALL: usize = 1;
pub const FOCUS_METAL1: usize = 2;
pub const FOCUS_METAL2: usize = 3;
pub const BROKEN: usize = 4;

fn focus(metal: &str, key: &str) -> Shortcut {
    Shortcut::new(
        format!("Focus on {metal} layers"),
        key,
        vec![
            Action::hide(LayerDescriptor::All),
            Action::show(LayerDescriptor::groups([format!("{metal}.Visible")])),
            Action::select(LayerDescriptor::groups([format!("{metal}.Selected")])),
        ],
    )
}

/// Layer identifiers of the default source list, in display order.
pub fn test_layer_ids() -> Vec<&'static str> {
    vec![
        "Activ.drawing",
        "Cont.drawing",
        "Metal1.drawing",
        "Via1.drawing",
        "Metal2.drawing",
    ]
}

/// Writes a technology file into a fresh temp directory.
///
/// Keep the `TempDir` alive for as long as the file is needed.
pub fn create_temp_technology_file(config: &TechnologyConfig) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(format!("{}.json", config.technology_name));
    write_technology(config, &path).expect("Failed to write technology file");
    (path, temp_dir)
}

/// Writes arbitrary content into a temp directory.
pub fn create_temp_file(name: &str, content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write temp file");
    (path, temp_dir)
}

/// One layer list (tab) of the fake view.
#[derive(Debug, Clone, Default)]
pub struct FakeLayerList {
    pub name: Option<String>,
    pub layers: Vec<LayerEntry>,
}

/// In-memory host recording every mutation.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub view_open: bool,
    pub layout_loaded: bool,
    pub technology: Option<String>,
    pub lists: Vec<FakeLayerList>,
    pub current_list: LayerListId,
    pub selected: Option<(LayerListId, String)>,
    pub external_bindings: Vec<BoundShortcut>,
    pub menus: BTreeMap<String, Vec<MenuItem>>,
    pub config: BTreeMap<String, String>,
    /// Answer given to every prompt
    pub prompt_answer: bool,
    /// Titles and messages of every prompt shown
    pub prompts: Vec<(String, String)>,
    /// Handle notified from inside the prompt, to exercise re-entrancy
    pub notify_during_prompt: Option<PluginHandle>,
    /// Results of the notifications sent from inside the prompt
    pub notify_results: Vec<bool>,
    /// Mimics hosts that drop the tab name when a list is cleared
    pub clear_drops_name: bool,
    /// Handle the host glue reports file opens and config echoes through
    pub glue: Option<PluginHandle>,
    /// Set while the plugin waits for a file to be opened into the view
    pub watching_file_open: bool,
    /// Echo every config write back through `glue`, as the host does
    pub echo_config: bool,
    /// Mutating calls, in order
    pub calls: Vec<String>,
}

impl FakeHost {
    /// A host with one open view showing a layout of `technology`.
    pub fn with_layout(technology: &str) -> Self {
        let layers = test_layer_ids().into_iter().map(LayerEntry::new).collect();
        Self {
            view_open: true,
            layout_loaded: true,
            technology: Some(technology.to_string()),
            lists: vec![FakeLayerList { name: None, layers }],
            ..Self::default()
        }
    }

    /// Index of the tab with the given name.
    pub fn tab(&self, name: &str) -> Option<LayerListId> {
        self.lists.iter().position(|l| l.name.as_deref() == Some(name))
    }

    /// Identifiers in a tab, in order.
    pub fn tab_ids(&self, name: &str) -> Vec<String> {
        self.tab(name)
            .map(|idx| {
                self.lists[idx]
                    .layers
                    .iter()
                    .filter_map(|l| l.identifier.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Current key of an external binding.
    pub fn binding(&self, path: &str) -> Option<&str> {
        self.external_bindings
            .iter()
            .find(|b| b.path == path)
            .map(|b| b.key.as_str())
    }

    /// Number of entries installed under a menu group.
    pub fn menu_len(&self, group: &str) -> usize {
        self.menus.get(group).map_or(0, Vec::len)
    }

    /// Loads a layout into the open view and fires the file-open signal.
    pub fn open_file(&mut self) {
        self.layout_loaded = true;
        if std::mem::take(&mut self.watching_file_open) {
            if let Some(glue) = &self.glue {
                glue.on_file_opened();
            }
        }
    }

    /// Whether a menu group exists at all.
    pub fn has_menu_group(&self, group: &str) -> bool {
        self.menus.contains_key(group)
    }

    /// Host configuration value, borrowed.
    pub fn config_value_of(&self, name: &str) -> Option<&str> {
        self.config.get(name).map(String::as_str)
    }
}

impl LayoutHost for FakeHost {
    fn has_current_view(&self) -> bool {
        self.view_open
    }

    fn has_current_layout(&self) -> bool {
        self.view_open && self.layout_loaded
    }

    fn watch_file_open(&mut self) {
        self.calls.push("watch_file_open".to_string());
        self.watching_file_open = true;
    }

    fn current_technology_name(&self) -> Option<String> {
        self.technology.clone()
    }

    fn enumerate_layers(&self, list: LayerListId) -> Vec<LayerEntry> {
        self.lists.get(list).map(|l| l.layers.clone()).unwrap_or_default()
    }

    fn layer_list_count(&self) -> usize {
        self.lists.len()
    }

    fn layer_list_name(&self, list: LayerListId) -> Option<String> {
        self.lists.get(list).and_then(|l| l.name.clone())
    }

    fn insert_layer_list(&mut self, list: LayerListId) {
        self.calls.push(format!("insert_layer_list({list})"));
        self.lists.insert(list, FakeLayerList::default());
    }

    fn rename_layer_list(&mut self, list: LayerListId, name: &str) {
        self.calls.push(format!("rename_layer_list({list}, {name})"));
        if let Some(l) = self.lists.get_mut(list) {
            l.name = Some(name.to_string());
        }
    }

    fn clear_layer_list(&mut self, list: LayerListId) {
        self.calls.push(format!("clear_layer_list({list})"));
        if let Some(l) = self.lists.get_mut(list) {
            l.layers.clear();
            if self.clear_drops_name {
                l.name = None;
            }
        }
    }

    fn delete_layer_list(&mut self, list: LayerListId) {
        self.calls.push(format!("delete_layer_list({list})"));
        if list < self.lists.len() {
            self.lists.remove(list);
        }
    }

    fn append_layers(&mut self, list: LayerListId, layers: &[LayerEntry]) {
        self.calls.push(format!("append_layers({list}, {})", layers.len()));
        if let Some(l) = self.lists.get_mut(list) {
            l.layers.extend_from_slice(layers);
        }
    }

    fn set_current_layer_list(&mut self, list: LayerListId) {
        self.calls.push(format!("set_current_layer_list({list})"));
        self.current_list = list;
    }

    fn set_all_layers_visible(&mut self, visible: bool) {
        self.calls.push(format!("set_all_layers_visible({visible})"));
        for list in &mut self.lists {
            for layer in &mut list.layers {
                layer.visible = visible;
            }
        }
    }

    fn set_selected_layer(&mut self, list: LayerListId, identifier: &str) -> bool {
        let found = self
            .lists
            .get(list)
            .is_some_and(|l| l.layers.iter().any(|e| e.id() == Some(identifier)));
        if found {
            self.selected = Some((list, identifier.to_string()));
        }
        found
    }

    fn enumerate_bound_shortcuts(&self) -> Vec<BoundShortcut> {
        let own = self.menus.iter().flat_map(|(group, items)| {
            items
                .iter()
                .filter_map(MenuItem::as_shortcut)
                .enumerate()
                .map(move |(i, s)| {
                    BoundShortcut::new(format!("{group}.shortcut_{i}"), s.title.clone(), s.key.clone())
                })
        });
        self.external_bindings.iter().cloned().chain(own).collect()
    }

    fn set_key_binding(&mut self, path: &str, key: &str) {
        self.calls.push(format!("set_key_binding({path}, {key})"));
        if let Some(b) = self.external_bindings.iter_mut().find(|b| b.path == path) {
            b.key = key.to_string();
        }
    }

    fn install_menu(&mut self, group: &str, items: &[MenuItem]) {
        self.calls.push(format!("install_menu({group})"));
        self.menus.insert(group.to_string(), items.to_vec());
    }

    fn clear_menu(&mut self, group: &str) {
        self.calls.push(format!("clear_menu({group})"));
        self.menus.remove(group);
    }

    fn has_menu(&self, group: &str) -> bool {
        self.menus.contains_key(group)
    }

    fn prompt_user_yes_no(&mut self, title: &str, message: &str) -> bool {
        self.prompts.push((title.to_string(), message.to_string()));
        if let Some(handle) = &self.notify_during_prompt {
            self.notify_results.push(handle.on_technology_applied());
        }
        self.prompt_answer
    }

    fn config_value(&self, name: &str) -> Option<String> {
        self.config.get(name).cloned()
    }

    fn set_config_value(&mut self, name: &str, value: &str) {
        self.calls.push(format!("set_config_value({name}, {value})"));
        self.config.insert(name.to_string(), value.to_string());
        if self.echo_config {
            if let Some(glue) = &self.glue {
                glue.on_config_changed(name, value);
            }
        }
    }
}

/// Controller over a fake host with the test technology registered.
pub fn test_plugin(host: FakeHost) -> LayerShortcuts<FakeHost> {
    LayerShortcuts::new(
        host,
        ConfigCatalog::from_configs([test_technology()]),
        NavigationConfig::default(),
    )
}

/// Like [`test_plugin`], with the host glue wired to the plugin's handle.
pub fn glued_plugin(host: FakeHost) -> LayerShortcuts<FakeHost> {
    let mut plugin = test_plugin(host);
    let handle = plugin.handle();
    plugin.host_mut().glue = Some(handle);
    plugin
}
