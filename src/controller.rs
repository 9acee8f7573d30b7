//! Plugin controller.
//!
//! [`LayerShortcuts`] owns every piece of per-plugin state and reacts to host
//! notifications. Construction reads the host preferences once; a technology
//! activation installs the menu; closing the last view tears it down.
//!
//! # Lifecycle
//!
//! 1. The host glue creates the controller and keeps a [`PluginHandle`].
//! 2. Host callbacks go through the handle and become [`Deferred`] tasks.
//! 3. Once per host tick the glue calls [`LayerShortcuts::run_pending`].
//! 4. Menu entries call [`LayerShortcuts::trigger_shortcut`] directly.

use std::collections::VecDeque;

use tracing::{debug, error, info, warn};

use crate::config::NavigationConfig;
use crate::constants::{
    APPLY_TECHNOLOGY_SYMBOL, HIDE_EMPTY_LAYERS_KEY, INITIAL_TECHNOLOGY_KEY, NO_BINDING,
};
use crate::error::{Result, ShortcutError};
use crate::event_loop::{Deferred, EventLoop, PluginHandle, PromptGuard};
use crate::host::{self, LayerListId, LayoutHost};
use crate::models::TechnologyConfig;
use crate::services::conflicts::{self, ConflictPrompt, Resolution};
use crate::services::executor::{self, ExecutionOutcome};
use crate::services::ConfigCatalog;

/// What a setup pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// A conflict prompt is on screen; nothing was touched
    Skipped,
    /// No view or no layout; the menu was cleared
    NoLayout,
    /// The active technology has no configuration; the menu was cleared
    UnknownTechnology(String),
    /// The menu for a technology was installed
    Installed {
        /// Technology name
        technology: String,
        /// User's answer, if a conflict prompt was shown
        resolution: Option<Resolution>,
    },
}

#[derive(Debug, Default)]
struct Session {
    /// Configuration whose menu is installed
    active: Option<TechnologyConfig>,
    /// The user's "hide empty layers" preference
    hide_empty_layers: bool,
    /// Our own writes to the preference the host has not echoed yet, oldest first
    own_hide_empty_writes: VecDeque<bool>,
    last_resolution: Option<Resolution>,
}

/// The layer shortcuts plugin bound to one host.
pub struct LayerShortcuts<H: LayoutHost> {
    host: H,
    catalog: ConfigCatalog,
    settings: NavigationConfig,
    events: EventLoop,
    guard: PromptGuard,
    session: Session,
}

impl<H: LayoutHost> LayerShortcuts<H> {
    /// Creates the controller.
    pub fn new(host: H, catalog: ConfigCatalog, settings: NavigationConfig) -> Self {
        let hide_empty_layers = host
            .config_value(HIDE_EMPTY_LAYERS_KEY)
            .is_some_and(|v| v == "true");

        debug!(
            technologies = catalog.len(),
            hide_empty_layers, "layer shortcuts plugin created"
        );

        Self {
            host,
            catalog,
            settings,
            events: EventLoop::new(),
            guard: PromptGuard::new(),
            session: Session {
                hide_empty_layers,
                ..Session::default()
            },
        }
    }

    /// Handle for scheduling host notifications.
    #[must_use]
    pub fn handle(&self) -> PluginHandle {
        PluginHandle::new(self.events.clone(), self.guard.clone())
    }

    /// The host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The loaded technology catalog.
    pub const fn catalog(&self) -> &ConfigCatalog {
        &self.catalog
    }

    /// Technology whose menu is installed.
    #[must_use]
    pub fn active_technology(&self) -> Option<&str> {
        self.session
            .active
            .as_ref()
            .map(|c| c.technology_name.as_str())
    }

    /// The user's "hide empty layers" preference as last observed.
    #[must_use]
    pub const fn hide_empty_layers_preference(&self) -> bool {
        self.session.hide_empty_layers
    }

    /// Answer to the most recent conflict prompt.
    #[must_use]
    pub const fn last_resolution(&self) -> Option<Resolution> {
        self.session.last_resolution
    }

    /// Number of tasks waiting for the next tick.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.events.len()
    }

    /// Runs the tasks queued before this call. Returns how many ran.
    ///
    /// Tasks scheduled while running wait for the next call.
    pub fn run_pending(&mut self) -> usize {
        let batch = self.events.take_batch();
        let count = batch.len();
        for task in batch {
            self.run_task(task);
        }
        count
    }

    fn run_task(&mut self, task: Deferred) {
        debug!(?task, "running deferred task");

        match task {
            Deferred::Setup | Deferred::TechnologyApplied => {
                let outcome = self.setup();
                debug!(?outcome, "setup finished");
            }
            Deferred::ViewCreated => {
                // Startup with a file argument may skip the view-changed notification
                if !self.host.has_menu(&self.settings.menu_group) {
                    self.setup();
                }
            }
            Deferred::CurrentViewChanged => {
                if !self.host.has_current_view() {
                    return;
                }
                if self.host.has_current_layout() {
                    self.setup();
                } else {
                    debug!("no layout yet, waiting for the file to open");
                    self.host.watch_file_open();
                }
            }
            Deferred::LayoutLoaded => {
                if self.host.has_current_layout() {
                    self.setup();
                } else {
                    debug!("file open reported without a layout, ignoring");
                }
            }
            Deferred::ConfigChanged { name, value } => self.configure(&name, &value),
            Deferred::ViewClosed => {
                if !self.host.has_current_view() {
                    self.teardown();
                }
            }
            Deferred::SelectLayer { list, identifier } => {
                if let Err(e) = self.select_layer(list, &identifier) {
                    if e.is_stale() {
                        debug!("{e}, dropping selection");
                    } else {
                        warn!("{e}");
                    }
                }
            }
        }
    }

    /// Checks for key conflicts and installs the menu of the active technology.
    pub fn setup(&mut self) -> SetupOutcome {
        if self.guard.is_pending() {
            debug!("conflict prompt already displayed, skipping setup");
            return SetupOutcome::Skipped;
        }

        let menu_group = self.settings.menu_group.clone();

        let technology = if self.host.has_current_view() && self.host.has_current_layout() {
            self.host.current_technology_name()
        } else {
            None
        };
        let Some(technology) = technology else {
            self.host.clear_menu(&menu_group);
            self.session.active = None;
            return SetupOutcome::NoLayout;
        };

        let config = match self.catalog.lookup(&technology) {
            Ok(config) => config.clone(),
            Err(e) => {
                error!("{e}");
                self.host.clear_menu(&menu_group);
                self.session.active = None;
                return SetupOutcome::UnknownTechnology(technology);
            }
        };

        let resolution = self.resolve_conflicts(&config);
        if resolution.is_some() {
            self.session.last_resolution = resolution;
        }

        self.host.clear_menu(&menu_group);
        self.host.install_menu(&menu_group, &config.menu_items);
        info!(
            technology = %technology,
            shortcuts = config.shortcuts().count(),
            "layer navigation menu installed"
        );
        self.session.active = Some(config);

        SetupOutcome::Installed {
            technology,
            resolution,
        }
    }

    fn resolve_conflicts(&mut self, config: &TechnologyConfig) -> Option<Resolution> {
        let wanted = conflicts::wanted_bindings(config);
        let bound = self.host.enumerate_bound_shortcuts();
        let report = conflicts::detect(&wanted, &bound, &self.settings.menu_group);

        for dup in &report.duplicate_keys {
            error!(
                technology = %config.technology_name,
                "shortcut key '{}' is defined multiple times ({})",
                dup.key,
                dup.titles.join(", ")
            );
        }

        let prompt = ConflictPrompt::from_report(&report)?;
        let _ticket = self.guard.enter()?;

        let resolution = if self.host.prompt_user_yes_no(&prompt.title, &prompt.message) {
            for path in report.paths_to_clear() {
                self.host.set_key_binding(path, NO_BINDING);
            }
            Resolution::Accepted
        } else {
            Resolution::Declined
        };

        info!(
            conflicts = report.conflicts.len(),
            ?resolution,
            "shortcut conflicts resolved"
        );
        Some(resolution)
    }

    /// Runs the `index`-th shortcut of the active technology.
    ///
    /// On error the current layer view is left untouched.
    pub fn trigger_shortcut(&mut self, index: usize) -> Result<ExecutionOutcome> {
        let source = self.settings.source_layer_list;

        let (title, layers, outcome) = {
            let config = self
                .session
                .active
                .as_ref()
                .ok_or_else(|| ShortcutError::HostStateStale("no technology is active".into()))?;
            let shortcut = config.shortcuts().nth(index).ok_or_else(|| {
                ShortcutError::HostStateStale(format!("shortcut #{index} no longer exists"))
            })?;
            if !self.host.has_current_view() {
                return Err(ShortcutError::HostStateStale("no current view".into()));
            }

            debug!(shortcut = %shortcut.title, "triggered");
            let layers = self.host.enumerate_layers(source);
            let outcome = executor::execute(config, shortcut, &layers).inspect_err(|e| {
                error!(
                    technology = %config.technology_name,
                    shortcut = %shortcut.title,
                    "{e}"
                );
            })?;
            (shortcut.title.clone(), layers, outcome)
        };

        match &outcome {
            ExecutionOutcome::Reset(visibility) => {
                self.host.set_current_layer_list(source);
                host::remove_layer_tab(&mut self.host, &self.settings.layer_list_name);
                self.host.set_all_layers_visible(visibility.visible());
                if self.session.hide_empty_layers {
                    self.write_hide_empty_layers(true);
                }
            }
            ExecutionOutcome::View(result) => {
                // Focus shortcuts must show their layers even when they are empty
                self.write_hide_empty_layers(false);

                let ordered = result.ordered_layers(&layers);
                let list = host::install_layer_tab(&mut self.host, &self.settings.layer_list_name, &ordered);
                if let Some(identifier) = &result.selected_layer {
                    // The host applies a selection only after it rebuilt the list
                    self.events.defer(Deferred::SelectLayer {
                        list,
                        identifier: identifier.clone(),
                    });
                }
            }
        }

        debug!(shortcut = %title, ?outcome, "shortcut applied");
        Ok(outcome)
    }

    fn select_layer(&mut self, list: LayerListId, identifier: &str) -> Result<()> {
        if !self.host.has_current_view() {
            return Err(ShortcutError::HostStateStale("view closed".into()));
        }
        if self.host.layer_list_name(list).as_deref() != Some(self.settings.layer_list_name.as_str()) {
            return Err(ShortcutError::HostStateStale(format!(
                "layer tab '{}' is gone",
                self.settings.layer_list_name
            )));
        }
        if !self.host.set_selected_layer(list, identifier) {
            return Err(ShortcutError::HostStateStale(format!(
                "layer '{identifier}' is gone"
            )));
        }
        Ok(())
    }

    fn write_hide_empty_layers(&mut self, hide: bool) {
        self.session.own_hide_empty_writes.push_back(hide);
        self.host
            .set_config_value(HIDE_EMPTY_LAYERS_KEY, if hide { "true" } else { "false" });
    }

    /// Host configuration change callback.
    pub fn configure(&mut self, name: &str, value: &str) {
        debug!(name, value, "configure");

        match name {
            INITIAL_TECHNOLOGY_KEY => {
                self.handle().on_technology_applied();
            }
            HIDE_EMPTY_LAYERS_KEY => {
                let hide = value == "true";
                if self.session.own_hide_empty_writes.front() == Some(&hide) {
                    // Echo of our own write
                    self.session.own_hide_empty_writes.pop_front();
                } else {
                    self.session.own_hide_empty_writes.clear();
                    self.session.hide_empty_layers = hide;
                }
            }
            _ => {}
        }
    }

    /// Host menu activation callback.
    pub fn menu_activated(&mut self, symbol: &str) {
        debug!(symbol, "menu activated");

        // The layout reports the old technology until the next tick
        if symbol == APPLY_TECHNOLOGY_SYMBOL {
            self.handle().on_technology_applied();
        }
    }

    /// A view was created.
    pub fn on_view_created(&self) {
        self.handle().on_view_created();
    }

    /// The current view changed.
    pub fn on_current_view_changed(&self) {
        self.handle().on_current_view_changed();
    }

    /// A view was closed.
    pub fn on_view_closed(&self) {
        self.handle().on_view_closed();
    }

    /// Removes the menu and forgets the active technology.
    pub fn teardown(&mut self) {
        if let Some(config) = self.session.active.take() {
            info!(technology = %config.technology_name, "layer navigation menu removed");
        }
        self.host.clear_menu(&self.settings.menu_group);
    }
}
