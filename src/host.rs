//! Host application interface.
//!
//! The layout viewer the plugin runs inside is reached only through
//! [`LayoutHost`]. Implementations wrap the real scripting API; tests use a
//! recording fake.

use crate::models::{LayerEntry, MenuItem};
use crate::services::conflicts::BoundShortcut;

/// Index of a layer list (a layer tab) in the current view.
pub type LayerListId = usize;

/// Operations the plugin needs from the host application.
///
/// Every method refers to the *current* view. When there is none, queries
/// return empty values and mutations do nothing.
pub trait LayoutHost {
    /// Whether a view is open.
    fn has_current_view(&self) -> bool;

    /// Whether the current view has a layout loaded.
    fn has_current_layout(&self) -> bool;

    /// Asks to be told when a file is opened into the current view.
    ///
    /// The host glue answers with
    /// [`PluginHandle::on_file_opened`](crate::event_loop::PluginHandle::on_file_opened)
    /// once the layout is loaded.
    fn watch_file_open(&mut self);

    /// Technology of the active layout.
    fn current_technology_name(&self) -> Option<String>;

    /// Live snapshot of a layer list, in display order.
    fn enumerate_layers(&self, list: LayerListId) -> Vec<LayerEntry>;

    /// Number of layer lists in the current view.
    fn layer_list_count(&self) -> usize;

    /// Tab name of a layer list.
    fn layer_list_name(&self, list: LayerListId) -> Option<String>;

    /// Inserts an empty layer list at `list`.
    fn insert_layer_list(&mut self, list: LayerListId);

    /// Sets the tab name of a layer list.
    fn rename_layer_list(&mut self, list: LayerListId, name: &str);

    /// Removes every entry of a layer list. Some hosts also drop the name.
    fn clear_layer_list(&mut self, list: LayerListId);

    /// Deletes a layer list.
    fn delete_layer_list(&mut self, list: LayerListId);

    /// Appends entries to the end of a layer list.
    fn append_layers(&mut self, list: LayerListId, layers: &[LayerEntry]);

    /// Makes a layer list the active tab.
    fn set_current_layer_list(&mut self, list: LayerListId);

    /// Sets the visibility of every layer in every list.
    fn set_all_layers_visible(&mut self, visible: bool);

    /// Makes the named layer current. Returns false if it is not in the list.
    fn set_selected_layer(&mut self, list: LayerListId, identifier: &str) -> bool;

    /// Every key-bound command in the host's menu tree.
    fn enumerate_bound_shortcuts(&self) -> Vec<BoundShortcut>;

    /// Rebinds the command at `path`.
    fn set_key_binding(&mut self, path: &str, key: &str);

    /// Creates a menu group and fills it with entries.
    ///
    /// Shortcut entries are inserted as `<group>.shortcut_<index>`.
    fn install_menu(&mut self, group: &str, items: &[MenuItem]);

    /// Removes every entry of a menu group. Clearing an empty group is fine.
    fn clear_menu(&mut self, group: &str);

    /// Whether a menu group exists.
    fn has_menu(&self, group: &str) -> bool;

    /// Asks a modal yes/no question. Returns true on "yes".
    fn prompt_user_yes_no(&mut self, title: &str, message: &str) -> bool;

    /// Reads a host configuration value.
    fn config_value(&self, name: &str) -> Option<String>;

    /// Writes a host configuration value.
    ///
    /// The host may echo the write back. Synchronous echoes must go through
    /// [`PluginHandle::on_config_changed`](crate::event_loop::PluginHandle::on_config_changed)
    /// because the controller is still busy.
    fn set_config_value(&mut self, name: &str, value: &str);
}

/// Finds the layer list with the given tab name.
pub fn find_layer_list<H: LayoutHost + ?Sized>(host: &H, name: &str) -> Option<LayerListId> {
    (0..host.layer_list_count()).find(|&idx| host.layer_list_name(idx).as_deref() == Some(name))
}

/// Installs entries as the contents of a named layer tab.
///
/// Creates the tab at the end if it does not exist, otherwise clears it. The
/// name is written every time because clearing may drop it. The tab becomes
/// current before the entries are appended.
pub fn install_layer_tab<H: LayoutHost + ?Sized>(
    host: &mut H,
    name: &str,
    layers: &[LayerEntry],
) -> LayerListId {
    let list = match find_layer_list(host, name) {
        Some(list) => {
            host.clear_layer_list(list);
            list
        }
        None => {
            let list = host.layer_list_count();
            host.insert_layer_list(list);
            list
        }
    };

    host.rename_layer_list(list, name);
    host.set_current_layer_list(list);
    host.append_layers(list, layers);
    list
}

/// Deletes a named layer tab. Returns false when it does not exist.
pub fn remove_layer_tab<H: LayoutHost + ?Sized>(host: &mut H, name: &str) -> bool {
    match find_layer_list(host, name) {
        Some(list) => {
            host.delete_layer_list(list);
            true
        }
        None => false,
    }
}
