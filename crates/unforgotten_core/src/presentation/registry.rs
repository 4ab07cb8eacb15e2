//! Action registry passed explicitly to leaf views.
//!
//! # Responsibility
//! - Give every view one typed method per panel intent.
//! - Decouple callers from the coordinator: they hold a registry handle,
//!   never coordinator internals.
//!
//! # Invariants
//! - A detached registry never panics; it answers with a local
//!   presentation request so the caller can present in place.

use crate::model::entity::EntityId;
use crate::model::panel::{ActivePanel, SettingsPage};
use crate::presentation::intent::{IntentSender, PanelIntent};

/// One method per panel intent.
///
/// Implementors only provide [`PanelActions::request`]; the named actions
/// build the matching `ActivePanel` and route through it.
pub trait PanelActions {
    type Output;

    fn request(&mut self, panel: ActivePanel) -> Self::Output;

    fn add_profile(&mut self) -> Self::Output {
        self.request(ActivePanel::AddProfile)
    }

    fn edit_profile(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::EditProfile { id })
    }

    fn view_profile(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::ViewProfile { id })
    }

    fn add_medication(&mut self) -> Self::Output {
        self.request(ActivePanel::AddMedication)
    }

    fn edit_medication(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::EditMedication { id })
    }

    fn view_medication(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::ViewMedication { id })
    }

    fn add_appointment(&mut self) -> Self::Output {
        self.request(ActivePanel::AddAppointment)
    }

    fn edit_appointment(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::EditAppointment { id })
    }

    fn view_appointment(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::ViewAppointment { id })
    }

    fn add_reminder(&mut self) -> Self::Output {
        self.request(ActivePanel::AddReminder)
    }

    fn edit_reminder(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::EditReminder { id })
    }

    fn view_reminder(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::ViewReminder { id })
    }

    fn add_todo_list(&mut self) -> Self::Output {
        self.request(ActivePanel::AddTodoList)
    }

    fn view_todo_list(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::ViewTodoList { id })
    }

    fn add_note(&mut self) -> Self::Output {
        self.request(ActivePanel::AddNote)
    }

    fn edit_note(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::EditNote { id })
    }

    fn add_countdown(&mut self) -> Self::Output {
        self.request(ActivePanel::AddCountdown)
    }

    fn edit_countdown(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::EditCountdown { id })
    }

    /// Birthday details; `profile_id` is the person whose birthday it is.
    fn view_birthday(&mut self, profile_id: EntityId) -> Self::Output {
        self.request(ActivePanel::ViewBirthday { id: profile_id })
    }

    fn add_useful_contact(&mut self) -> Self::Output {
        self.request(ActivePanel::AddUsefulContact)
    }

    fn edit_useful_contact(&mut self, id: EntityId) -> Self::Output {
        self.request(ActivePanel::EditUsefulContact { id })
    }

    fn log_mood(&mut self) -> Self::Output {
        self.request(ActivePanel::LogMood)
    }

    fn show_appointment_filter(&mut self) -> Self::Output {
        self.request(ActivePanel::AppointmentFilter)
    }

    fn show_todo_list_filter(&mut self) -> Self::Output {
        self.request(ActivePanel::TodoListFilter)
    }

    fn show_countdown_filter(&mut self) -> Self::Output {
        self.request(ActivePanel::CountdownFilter)
    }

    fn show_settings(&mut self, page: SettingsPage) -> Self::Output {
        self.request(ActivePanel::settings(page))
    }

    fn invite_member(&mut self) -> Self::Output {
        self.request(ActivePanel::InviteMember)
    }

    fn join_account(&mut self) -> Self::Output {
        self.request(ActivePanel::JoinAccount)
    }

    fn switch_account(&mut self) -> Self::Output {
        self.request(ActivePanel::SwitchAccount)
    }

    fn show_upgrade(&mut self) -> Self::Output {
        self.request(ActivePanel::Upgrade)
    }
}

/// Answer to a registry request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Queued for the coordinator's overlay.
    Coordinated,
    /// No coordinator is mounted here; present this panel locally.
    Local(ActivePanel),
}

/// Handle views hold to request panels.
#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    sender: Option<IntentSender>,
}

impl ActionRegistry {
    pub fn attached(sender: IntentSender) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Registry for subtrees without a coordinator.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.sender.is_some()
    }

    /// Queues a dismiss-all. Returns `false` when detached or disconnected.
    pub fn dismiss_all(&self) -> bool {
        self.sender
            .as_ref()
            .is_some_and(|sender| sender.send(PanelIntent::DismissAll))
    }

    fn route(&self, panel: ActivePanel) -> Presentation {
        match &self.sender {
            Some(sender) if sender.send(PanelIntent::Open(panel)) => Presentation::Coordinated,
            _ => Presentation::Local(panel),
        }
    }
}

impl PanelActions for ActionRegistry {
    type Output = Presentation;

    fn request(&mut self, panel: ActivePanel) -> Presentation {
        self.route(panel)
    }
}
