//! Typed panel intents and the channel that carries them.
//!
//! # Responsibility
//! - Define the messages leaf views and hosted surfaces send to the
//!   coordinator.
//! - Let completions from background work reach the UI thread.
//!
//! # Invariants
//! - Intents are applied only when the UI thread pumps the bus.
//! - Sending never blocks; a dropped coordinator makes sends report `false`.

use crate::model::entity::EntityRef;
use crate::model::panel::ActivePanel;
use crate::presentation::navigation::SidebarDestination;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

/// Session id handed to a hosted surface when it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelToken(u64);

impl PanelToken {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Display for PanelToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a hosted surface finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SurfaceOutcome {
    /// Closed or cancelled without changes.
    Dismissed,
    /// Upstream mutation succeeded for this entity.
    Saved { entity: EntityRef },
    /// The subject was deleted upstream.
    Deleted,
}

impl SurfaceOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dismissed => "dismissed",
            Self::Saved { .. } => "saved",
            Self::Deleted => "deleted",
        }
    }
}

/// Message applied by the coordinator on the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelIntent {
    Open(ActivePanel),
    DismissAll,
    Complete {
        token: PanelToken,
        outcome: SurfaceOutcome,
    },
    Navigate(SidebarDestination),
}

/// Cloneable, thread-safe sending half of the intent bus.
#[derive(Debug, Clone)]
pub struct IntentSender {
    inner: Sender<PanelIntent>,
}

impl IntentSender {
    /// Queues one intent. Returns `false` when the coordinator is gone.
    pub fn send(&self, intent: PanelIntent) -> bool {
        self.inner.send(intent).is_ok()
    }
}

/// Intent channel owned by the coordinator.
#[derive(Debug)]
pub struct IntentBus {
    sender: Sender<PanelIntent>,
    receiver: Receiver<PanelIntent>,
}

impl Default for IntentBus {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentBus {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> IntentSender {
        IntentSender {
            inner: self.sender.clone(),
        }
    }

    /// Next queued intent without blocking.
    pub fn try_next(&self) -> Option<PanelIntent> {
        match self.receiver.try_recv() {
            Ok(intent) => Some(intent),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Completion handle given to a hosted surface.
///
/// Safe to move into background save work; completions are queued and take
/// effect on the next pump.
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    token: PanelToken,
    sender: IntentSender,
}

impl SurfaceHandle {
    pub fn new(token: PanelToken, sender: IntentSender) -> Self {
        Self { token, sender }
    }

    pub fn token(&self) -> PanelToken {
        self.token
    }

    pub fn on_dismiss(&self) -> bool {
        self.complete(SurfaceOutcome::Dismissed)
    }

    pub fn on_save(&self, entity: EntityRef) -> bool {
        self.complete(SurfaceOutcome::Saved { entity })
    }

    pub fn on_delete(&self) -> bool {
        self.complete(SurfaceOutcome::Deleted)
    }

    fn complete(&self, outcome: SurfaceOutcome) -> bool {
        self.sender.send(PanelIntent::Complete {
            token: self.token,
            outcome,
        })
    }
}
