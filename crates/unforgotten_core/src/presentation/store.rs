//! Observable presentation state store.
//!
//! # Responsibility
//! - Hold the single active panel and the sidebar destination.
//! - Batch writes into transactions and notify observers once per commit.
//!
//! # Invariants
//! - Observers never see an intermediate state inside a transaction.
//! - A transaction that leaves state unchanged emits no notification and
//!   does not bump the revision.

use crate::model::panel::ActivePanel;
use crate::presentation::flags::PresentationFlags;
use crate::presentation::navigation::SidebarDestination;
use serde::{Deserialize, Serialize};

/// Full presentation state owned by the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationState {
    pub panel: ActivePanel,
    pub destination: SidebarDestination,
}

/// One committed state change, delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentationChange {
    pub previous: PresentationState,
    pub current: PresentationState,
    /// Store revision after this change.
    pub revision: u64,
    /// Host should animate this change as one transaction.
    pub animated: bool,
}

/// Handle returned by [`PresentationStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&PresentationChange) + Send>;

/// Presentation state with change notification.
#[derive(Default)]
pub struct PresentationStore {
    state: PresentationState,
    revision: u64,
    observers: Vec<(ObserverId, Observer)>,
    next_observer_id: u64,
}

impl PresentationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a restored state, revision zero.
    pub fn with_state(state: PresentationState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn panel(&self) -> ActivePanel {
        self.state.panel
    }

    pub fn destination(&self) -> SidebarDestination {
        self.state.destination
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Per-surface `(visible, subject)` view of the current panel.
    pub fn flags(&self) -> PresentationFlags {
        PresentationFlags::from_panel(&self.state.panel)
    }

    /// Registers an observer called after every committed change.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&PresentationChange) + Send + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes one observer. Returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Applies `update` as one atomic change.
    ///
    /// Returns the committed change, or `None` when state did not change.
    pub fn transaction(
        &mut self,
        animated: bool,
        update: impl FnOnce(&mut PresentationState),
    ) -> Option<PresentationChange> {
        let previous = self.state;
        let mut next = previous;
        update(&mut next);
        if next == previous {
            return None;
        }

        self.state = next;
        self.revision += 1;
        let change = PresentationChange {
            previous,
            current: next,
            revision: self.revision,
            animated,
        };
        for (_, observer) in &mut self.observers {
            observer(&change);
        }
        Some(change)
    }
}

impl std::fmt::Debug for PresentationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationStore")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("observers", &self.observers.len())
            .finish()
    }
}
