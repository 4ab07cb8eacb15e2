//! Entity references carried by open panels.
//!
//! # Responsibility
//! - Identify the domain record a panel is creating, editing or viewing.
//! - Keep the core independent from repository-owned entity shapes.
//!
//! # Invariants
//! - `EntityRef` never carries a nil id.
//! - References are transient: the core never owns entity data.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by the repository layer.
pub type EntityId = Uuid;

/// Domain record categories that panels can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Person in the care circle (also the source of birthdays).
    Profile,
    Medication,
    Appointment,
    /// Sticky reminder shown on the home dashboard.
    Reminder,
    TodoList,
    Note,
    /// Countdown to a dated event.
    Countdown,
    UsefulContact,
    MoodEntry,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        Self::Profile,
        Self::Medication,
        Self::Appointment,
        Self::Reminder,
        Self::TodoList,
        Self::Note,
        Self::Countdown,
        Self::UsefulContact,
        Self::MoodEntry,
    ];

    /// Stable snake_case label used in logs and FFI payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Medication => "medication",
            Self::Appointment => "appointment",
            Self::Reminder => "reminder",
            Self::TodoList => "todo_list",
            Self::Note => "note",
            Self::Countdown => "countdown",
            Self::UsefulContact => "useful_contact",
            Self::MoodEntry => "mood_entry",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL.into_iter().find(|kind| kind.as_str() == normalized)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed pointer to one repository-owned entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: EntityId,
}

impl EntityRef {
    /// Builds a reference, rejecting the nil id.
    pub fn new(kind: EntityKind, id: EntityId) -> Result<Self, EntityRefError> {
        if id.is_nil() {
            return Err(EntityRefError::NilId(kind));
        }
        Ok(Self { kind, id })
    }

    /// Parses a reference from its id string form.
    pub fn parse(kind: EntityKind, raw_id: &str) -> Result<Self, EntityRefError> {
        let trimmed = raw_id.trim();
        let id = Uuid::parse_str(trimmed)
            .map_err(|_| EntityRefError::InvalidId(trimmed.to_string()))?;
        Self::new(kind, id)
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Errors raised while building entity references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityRefError {
    NilId(EntityKind),
    InvalidId(String),
}

impl Display for EntityRefError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId(kind) => write!(f, "{kind} id must not be nil"),
            Self::InvalidId(value) => write!(f, "entity id is not a valid uuid: `{value}`"),
        }
    }
}

impl Error for EntityRefError {}
