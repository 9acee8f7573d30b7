//! Deferred work and re-entrancy control.
//!
//! Host notifications often arrive before the host has committed the state
//! they announce (a new technology, a rebuilt layer list). They are queued as
//! [`Deferred`] tasks and run on the next host tick.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

use crate::host::LayerListId;
use crate::models::LayerId;

/// A unit of work scheduled for the next host tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    /// Re-run conflict detection and rebuild the menu
    Setup,
    /// The user applied a technology to the active layout
    TechnologyApplied,
    /// A view was created
    ViewCreated,
    /// The current view changed
    CurrentViewChanged,
    /// A view was closed
    ViewClosed,
    /// A file was opened into a view that had no layout
    LayoutLoaded,
    /// A host configuration value changed
    ConfigChanged {
        /// Configuration key
        name: String,
        /// New value
        value: String,
    },
    /// Make a layer current once the host has rebuilt the list
    SelectLayer {
        /// Layer list holding the layer
        list: LayerListId,
        /// Layer to select
        identifier: LayerId,
    },
}

impl Deferred {
    /// Whether this task runs conflict detection.
    #[must_use]
    pub const fn is_detection_request(&self) -> bool {
        matches!(self, Self::Setup | Self::TechnologyApplied | Self::LayoutLoaded)
    }
}

/// FIFO queue of deferred tasks.
///
/// Cloning shares the queue.
#[derive(Debug, Clone, Default)]
pub struct EventLoop {
    queue: Rc<RefCell<VecDeque<Deferred>>>,
}

impl EventLoop {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a task for the next tick.
    pub fn defer(&self, task: Deferred) {
        debug!(?task, "deferred");
        self.queue.borrow_mut().push_back(task);
    }

    /// Removes and returns every task queued so far.
    ///
    /// Tasks deferred while the batch runs land in the next batch.
    #[must_use]
    pub fn take_batch(&self) -> Vec<Deferred> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

/// Tracks whether a conflict prompt is on screen.
#[derive(Debug, Clone, Default)]
pub struct PromptGuard {
    pending: Rc<Cell<bool>>,
}

impl PromptGuard {
    /// Creates a guard with no prompt pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a prompt is pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Marks a prompt as pending until the ticket drops.
    ///
    /// Returns `None` if one is already pending.
    #[must_use]
    pub fn enter(&self) -> Option<PromptTicket> {
        if self.pending.replace(true) {
            return None;
        }
        Some(PromptTicket {
            pending: Rc::clone(&self.pending),
        })
    }
}

/// Held while a prompt is on screen; clears the guard on drop.
#[derive(Debug)]
pub struct PromptTicket {
    pending: Rc<Cell<bool>>,
}

impl Drop for PromptTicket {
    fn drop(&mut self) {
        self.pending.set(false);
    }
}

/// Cloneable handle the host glue uses to report notifications.
///
/// Detection requests arriving while a prompt is pending are dropped, not
/// queued.
#[derive(Debug, Clone)]
pub struct PluginHandle {
    events: EventLoop,
    guard: PromptGuard,
}

impl PluginHandle {
    pub(crate) const fn new(events: EventLoop, guard: PromptGuard) -> Self {
        Self { events, guard }
    }

    /// Queues a task. Returns false if it was dropped.
    pub fn notify(&self, task: Deferred) -> bool {
        if task.is_detection_request() && self.guard.is_pending() {
            debug!(?task, "conflict prompt pending, dropping request");
            return false;
        }
        self.events.defer(task);
        true
    }

    /// A view was created.
    pub fn on_view_created(&self) -> bool {
        self.notify(Deferred::ViewCreated)
    }

    /// The current view changed.
    pub fn on_current_view_changed(&self) -> bool {
        self.notify(Deferred::CurrentViewChanged)
    }

    /// A view was closed.
    pub fn on_view_closed(&self) -> bool {
        self.notify(Deferred::ViewClosed)
    }

    /// The user applied a technology.
    pub fn on_technology_applied(&self) -> bool {
        self.notify(Deferred::TechnologyApplied)
    }

    /// A file was opened into the view watched via
    /// [`LayoutHost::watch_file_open`](crate::host::LayoutHost::watch_file_open).
    pub fn on_file_opened(&self) -> bool {
        self.notify(Deferred::LayoutLoaded)
    }

    /// A host configuration value changed.
    ///
    /// Safe to call while the controller is busy, e.g. when the host echoes
    /// a write synchronously.
    pub fn on_config_changed(&self, name: &str, value: &str) -> bool {
        self.notify(Deferred::ConfigChanged {
            name: name.to_string(),
            value: value.to_string(),
        })
    }

    /// Whether a conflict prompt is on screen.
    #[must_use]
    pub fn is_prompt_pending(&self) -> bool {
        self.guard.is_pending()
    }
}
