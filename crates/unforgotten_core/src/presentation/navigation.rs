//! Home sidebar destinations for the content pane.

use serde::{Deserialize, Serialize};

/// Section shown in the content pane next to the persistent sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidebarDestination {
    #[default]
    Home,
    Profiles,
    Medications,
    Appointments,
    Calendar,
    TodoLists,
    Notes,
    Birthdays,
    Countdowns,
    UsefulContacts,
    Mood,
    Settings,
}

impl SidebarDestination {
    pub const ALL: [SidebarDestination; 12] = [
        Self::Home,
        Self::Profiles,
        Self::Medications,
        Self::Appointments,
        Self::Calendar,
        Self::TodoLists,
        Self::Notes,
        Self::Birthdays,
        Self::Countdowns,
        Self::UsefulContacts,
        Self::Mood,
        Self::Settings,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Profiles => "profiles",
            Self::Medications => "medications",
            Self::Appointments => "appointments",
            Self::Calendar => "calendar",
            Self::TodoLists => "todo_lists",
            Self::Notes => "notes",
            Self::Birthdays => "birthdays",
            Self::Countdowns => "countdowns",
            Self::UsefulContacts => "useful_contacts",
            Self::Mood => "mood",
            Self::Settings => "settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|destination| destination.as_str() == normalized)
    }
}
