//! Panel surfaces and the single active-panel value.
//!
//! # Responsibility
//! - Enumerate every surface the content area can host, in priority order.
//! - Represent "which surface is open" as one tagged value.
//!
//! # Invariants
//! - At most one surface is visible: `ActivePanel` holds exactly one variant.
//! - Edit/view surfaces always carry a subject of the matching `EntityKind`.
//! - `SurfaceKind::ALL` order is the multiplexer priority order.

use crate::model::entity::{EntityId, EntityKind, EntityRef};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Closed set of surfaces hosted by the panel overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    AddProfile,
    EditProfile,
    ViewProfile,
    AddMedication,
    EditMedication,
    ViewMedication,
    AddAppointment,
    EditAppointment,
    ViewAppointment,
    AddReminder,
    EditReminder,
    ViewReminder,
    AddTodoList,
    ViewTodoList,
    AddNote,
    EditNote,
    AddCountdown,
    EditCountdown,
    ViewBirthday,
    AddUsefulContact,
    EditUsefulContact,
    LogMood,
    AppointmentFilter,
    TodoListFilter,
    CountdownFilter,
    Settings,
    InviteMember,
    JoinAccount,
    SwitchAccount,
    Upgrade,
}

/// What a surface does, used by access checks and placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRole {
    /// Creates a new entity of the given kind.
    Create(EntityKind),
    /// Edits an existing entity.
    Edit(EntityKind),
    /// Read-only detail viewer.
    View(EntityKind),
    /// Filter popover over a list.
    Filter,
    Settings,
    /// Invitations and member management.
    Membership,
    /// Account switching/joining.
    Account,
    Upgrade,
}

/// Subject requirement for one surface kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectRule {
    /// Surface never carries a subject.
    None,
    /// Surface needs a subject of this kind.
    Required(EntityKind),
}

impl SurfaceKind {
    /// Every surface in multiplexer priority order.
    pub const ALL: [SurfaceKind; 30] = [
        Self::AddProfile,
        Self::EditProfile,
        Self::ViewProfile,
        Self::AddMedication,
        Self::EditMedication,
        Self::ViewMedication,
        Self::AddAppointment,
        Self::EditAppointment,
        Self::ViewAppointment,
        Self::AddReminder,
        Self::EditReminder,
        Self::ViewReminder,
        Self::AddTodoList,
        Self::ViewTodoList,
        Self::AddNote,
        Self::EditNote,
        Self::AddCountdown,
        Self::EditCountdown,
        Self::ViewBirthday,
        Self::AddUsefulContact,
        Self::EditUsefulContact,
        Self::LogMood,
        Self::AppointmentFilter,
        Self::TodoListFilter,
        Self::CountdownFilter,
        Self::Settings,
        Self::InviteMember,
        Self::JoinAccount,
        Self::SwitchAccount,
        Self::Upgrade,
    ];

    pub fn role(self) -> SurfaceRole {
        use EntityKind as E;
        match self {
            Self::AddProfile => SurfaceRole::Create(E::Profile),
            Self::EditProfile => SurfaceRole::Edit(E::Profile),
            Self::ViewProfile | Self::ViewBirthday => SurfaceRole::View(E::Profile),
            Self::AddMedication => SurfaceRole::Create(E::Medication),
            Self::EditMedication => SurfaceRole::Edit(E::Medication),
            Self::ViewMedication => SurfaceRole::View(E::Medication),
            Self::AddAppointment => SurfaceRole::Create(E::Appointment),
            Self::EditAppointment => SurfaceRole::Edit(E::Appointment),
            Self::ViewAppointment => SurfaceRole::View(E::Appointment),
            Self::AddReminder => SurfaceRole::Create(E::Reminder),
            Self::EditReminder => SurfaceRole::Edit(E::Reminder),
            Self::ViewReminder => SurfaceRole::View(E::Reminder),
            Self::AddTodoList => SurfaceRole::Create(E::TodoList),
            Self::ViewTodoList => SurfaceRole::View(E::TodoList),
            Self::AddNote => SurfaceRole::Create(E::Note),
            Self::EditNote => SurfaceRole::Edit(E::Note),
            Self::AddCountdown => SurfaceRole::Create(E::Countdown),
            Self::EditCountdown => SurfaceRole::Edit(E::Countdown),
            Self::AddUsefulContact => SurfaceRole::Create(E::UsefulContact),
            Self::EditUsefulContact => SurfaceRole::Edit(E::UsefulContact),
            Self::LogMood => SurfaceRole::Create(E::MoodEntry),
            Self::AppointmentFilter | Self::TodoListFilter | Self::CountdownFilter => {
                SurfaceRole::Filter
            }
            Self::Settings => SurfaceRole::Settings,
            Self::InviteMember => SurfaceRole::Membership,
            Self::JoinAccount | Self::SwitchAccount => SurfaceRole::Account,
            Self::Upgrade => SurfaceRole::Upgrade,
        }
    }

    pub fn subject_rule(self) -> SubjectRule {
        match self.role() {
            SurfaceRole::Edit(kind) | SurfaceRole::View(kind) => SubjectRule::Required(kind),
            _ => SubjectRule::None,
        }
    }

    /// Stable snake_case label used in logs and FFI payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AddProfile => "add_profile",
            Self::EditProfile => "edit_profile",
            Self::ViewProfile => "view_profile",
            Self::AddMedication => "add_medication",
            Self::EditMedication => "edit_medication",
            Self::ViewMedication => "view_medication",
            Self::AddAppointment => "add_appointment",
            Self::EditAppointment => "edit_appointment",
            Self::ViewAppointment => "view_appointment",
            Self::AddReminder => "add_reminder",
            Self::EditReminder => "edit_reminder",
            Self::ViewReminder => "view_reminder",
            Self::AddTodoList => "add_todo_list",
            Self::ViewTodoList => "view_todo_list",
            Self::AddNote => "add_note",
            Self::EditNote => "edit_note",
            Self::AddCountdown => "add_countdown",
            Self::EditCountdown => "edit_countdown",
            Self::ViewBirthday => "view_birthday",
            Self::AddUsefulContact => "add_useful_contact",
            Self::EditUsefulContact => "edit_useful_contact",
            Self::LogMood => "log_mood",
            Self::AppointmentFilter => "appointment_filter",
            Self::TodoListFilter => "todo_list_filter",
            Self::CountdownFilter => "countdown_filter",
            Self::Settings => "settings",
            Self::InviteMember => "invite_member",
            Self::JoinAccount => "join_account",
            Self::SwitchAccount => "switch_account",
            Self::Upgrade => "upgrade",
        }
    }

    /// Parses the stable label; labels are case-sensitive.
    pub fn parse(value: &str) -> Result<Self, PanelError> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| PanelError::UnknownSurface(normalized.to_string()))
    }

    /// Priority index; lower wins when flags collide.
    pub fn priority(self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl Display for SurfaceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings sub-pages hosted by the settings surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsPage {
    #[default]
    Overview,
    Account,
    Notifications,
    Appearance,
    /// Member list and role management.
    Members,
    Subscription,
    Privacy,
    About,
    Feedback,
}

impl SettingsPage {
    pub const ALL: [SettingsPage; 9] = [
        Self::Overview,
        Self::Account,
        Self::Notifications,
        Self::Appearance,
        Self::Members,
        Self::Subscription,
        Self::Privacy,
        Self::About,
        Self::Feedback,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Account => "account",
            Self::Notifications => "notifications",
            Self::Appearance => "appearance",
            Self::Members => "members",
            Self::Subscription => "subscription",
            Self::Privacy => "privacy",
            Self::About => "about",
            Self::Feedback => "feedback",
        }
    }

    pub fn parse(value: &str) -> Result<Self, PanelError> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|page| page.as_str() == normalized)
            .ok_or_else(|| PanelError::UnknownSettingsPage(normalized.to_string()))
    }

    /// Pages restricted to member managers.
    pub fn is_administrative(self) -> bool {
        matches!(self, Self::Members)
    }
}

/// The one surface currently open in the content area, if any.
///
/// Edit/view variants carry the subject id; the subject kind is implied by
/// the variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "surface", rename_all = "snake_case")]
pub enum ActivePanel {
    #[default]
    None,
    AddProfile,
    EditProfile { id: EntityId },
    ViewProfile { id: EntityId },
    AddMedication,
    EditMedication { id: EntityId },
    ViewMedication { id: EntityId },
    AddAppointment,
    EditAppointment { id: EntityId },
    ViewAppointment { id: EntityId },
    AddReminder,
    EditReminder { id: EntityId },
    ViewReminder { id: EntityId },
    AddTodoList,
    ViewTodoList { id: EntityId },
    AddNote,
    EditNote { id: EntityId },
    AddCountdown,
    EditCountdown { id: EntityId },
    /// Birthday details for a profile.
    ViewBirthday { id: EntityId },
    AddUsefulContact,
    EditUsefulContact { id: EntityId },
    LogMood,
    AppointmentFilter,
    TodoListFilter,
    CountdownFilter,
    Settings { page: SettingsPage },
    InviteMember,
    JoinAccount,
    SwitchAccount,
    Upgrade,
}

impl ActivePanel {
    /// Builds the panel for `kind`, validating the subject against the
    /// surface's subject rule. Settings opens on its overview page.
    pub fn build(kind: SurfaceKind, subject: Option<EntityRef>) -> Result<Self, PanelError> {
        let id = match (kind.subject_rule(), subject) {
            (SubjectRule::None, None) => None,
            (SubjectRule::None, Some(entity)) => {
                return Err(PanelError::UnexpectedSubject {
                    surface: kind,
                    subject: entity,
                })
            }
            (SubjectRule::Required(expected), None) => {
                return Err(PanelError::MissingSubject {
                    surface: kind,
                    expected,
                })
            }
            (SubjectRule::Required(expected), Some(entity)) => {
                if entity.kind != expected {
                    return Err(PanelError::SubjectKindMismatch {
                        surface: kind,
                        expected,
                        actual: entity.kind,
                    });
                }
                if entity.id.is_nil() {
                    return Err(PanelError::NilSubject(kind));
                }
                Some(entity.id)
            }
        };

        // Surfaces with a required subject always reach here with `Some`.
        let id = id.unwrap_or_else(EntityId::nil);
        let panel = match kind {
            SurfaceKind::AddProfile => Self::AddProfile,
            SurfaceKind::EditProfile => Self::EditProfile { id },
            SurfaceKind::ViewProfile => Self::ViewProfile { id },
            SurfaceKind::AddMedication => Self::AddMedication,
            SurfaceKind::EditMedication => Self::EditMedication { id },
            SurfaceKind::ViewMedication => Self::ViewMedication { id },
            SurfaceKind::AddAppointment => Self::AddAppointment,
            SurfaceKind::EditAppointment => Self::EditAppointment { id },
            SurfaceKind::ViewAppointment => Self::ViewAppointment { id },
            SurfaceKind::AddReminder => Self::AddReminder,
            SurfaceKind::EditReminder => Self::EditReminder { id },
            SurfaceKind::ViewReminder => Self::ViewReminder { id },
            SurfaceKind::AddTodoList => Self::AddTodoList,
            SurfaceKind::ViewTodoList => Self::ViewTodoList { id },
            SurfaceKind::AddNote => Self::AddNote,
            SurfaceKind::EditNote => Self::EditNote { id },
            SurfaceKind::AddCountdown => Self::AddCountdown,
            SurfaceKind::EditCountdown => Self::EditCountdown { id },
            SurfaceKind::ViewBirthday => Self::ViewBirthday { id },
            SurfaceKind::AddUsefulContact => Self::AddUsefulContact,
            SurfaceKind::EditUsefulContact => Self::EditUsefulContact { id },
            SurfaceKind::LogMood => Self::LogMood,
            SurfaceKind::AppointmentFilter => Self::AppointmentFilter,
            SurfaceKind::TodoListFilter => Self::TodoListFilter,
            SurfaceKind::CountdownFilter => Self::CountdownFilter,
            SurfaceKind::Settings => Self::Settings {
                page: SettingsPage::default(),
            },
            SurfaceKind::InviteMember => Self::InviteMember,
            SurfaceKind::JoinAccount => Self::JoinAccount,
            SurfaceKind::SwitchAccount => Self::SwitchAccount,
            SurfaceKind::Upgrade => Self::Upgrade,
        };
        Ok(panel)
    }

    /// Editor surface for an existing entity.
    ///
    /// To-do lists are edited inside their detail surface. Mood entries are
    /// append-only and have no editor.
    pub fn edit(entity: EntityRef) -> Result<Self, PanelError> {
        let kind = match entity.kind {
            EntityKind::Profile => SurfaceKind::EditProfile,
            EntityKind::Medication => SurfaceKind::EditMedication,
            EntityKind::Appointment => SurfaceKind::EditAppointment,
            EntityKind::Reminder => SurfaceKind::EditReminder,
            EntityKind::TodoList => SurfaceKind::ViewTodoList,
            EntityKind::Note => SurfaceKind::EditNote,
            EntityKind::Countdown => SurfaceKind::EditCountdown,
            EntityKind::UsefulContact => SurfaceKind::EditUsefulContact,
            EntityKind::MoodEntry => return Err(PanelError::NoEditorFor(entity.kind)),
        };
        Self::build(kind, Some(entity))
    }

    /// Settings surface opened on a specific sub-page.
    pub fn settings(page: SettingsPage) -> Self {
        Self::Settings { page }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Surface kind of the open panel, `None` when hidden.
    pub fn surface(&self) -> Option<SurfaceKind> {
        let kind = match self {
            Self::None => return None,
            Self::AddProfile => SurfaceKind::AddProfile,
            Self::EditProfile { .. } => SurfaceKind::EditProfile,
            Self::ViewProfile { .. } => SurfaceKind::ViewProfile,
            Self::AddMedication => SurfaceKind::AddMedication,
            Self::EditMedication { .. } => SurfaceKind::EditMedication,
            Self::ViewMedication { .. } => SurfaceKind::ViewMedication,
            Self::AddAppointment => SurfaceKind::AddAppointment,
            Self::EditAppointment { .. } => SurfaceKind::EditAppointment,
            Self::ViewAppointment { .. } => SurfaceKind::ViewAppointment,
            Self::AddReminder => SurfaceKind::AddReminder,
            Self::EditReminder { .. } => SurfaceKind::EditReminder,
            Self::ViewReminder { .. } => SurfaceKind::ViewReminder,
            Self::AddTodoList => SurfaceKind::AddTodoList,
            Self::ViewTodoList { .. } => SurfaceKind::ViewTodoList,
            Self::AddNote => SurfaceKind::AddNote,
            Self::EditNote { .. } => SurfaceKind::EditNote,
            Self::AddCountdown => SurfaceKind::AddCountdown,
            Self::EditCountdown { .. } => SurfaceKind::EditCountdown,
            Self::ViewBirthday { .. } => SurfaceKind::ViewBirthday,
            Self::AddUsefulContact => SurfaceKind::AddUsefulContact,
            Self::EditUsefulContact { .. } => SurfaceKind::EditUsefulContact,
            Self::LogMood => SurfaceKind::LogMood,
            Self::AppointmentFilter => SurfaceKind::AppointmentFilter,
            Self::TodoListFilter => SurfaceKind::TodoListFilter,
            Self::CountdownFilter => SurfaceKind::CountdownFilter,
            Self::Settings { .. } => SurfaceKind::Settings,
            Self::InviteMember => SurfaceKind::InviteMember,
            Self::JoinAccount => SurfaceKind::JoinAccount,
            Self::SwitchAccount => SurfaceKind::SwitchAccount,
            Self::Upgrade => SurfaceKind::Upgrade,
        };
        Some(kind)
    }

    /// Entity referenced by the open panel, if any.
    pub fn subject(&self) -> Option<EntityRef> {
        let id = match self {
            Self::EditProfile { id }
            | Self::ViewProfile { id }
            | Self::EditMedication { id }
            | Self::ViewMedication { id }
            | Self::EditAppointment { id }
            | Self::ViewAppointment { id }
            | Self::EditReminder { id }
            | Self::ViewReminder { id }
            | Self::ViewTodoList { id }
            | Self::EditNote { id }
            | Self::EditCountdown { id }
            | Self::ViewBirthday { id }
            | Self::EditUsefulContact { id } => *id,
            _ => return None,
        };
        match self.surface()?.subject_rule() {
            SubjectRule::Required(kind) => Some(EntityRef { kind, id }),
            SubjectRule::None => None,
        }
    }

    /// Settings sub-page when the settings surface is open.
    pub fn settings_page(&self) -> Option<SettingsPage> {
        match self {
            Self::Settings { page } => Some(*page),
            _ => None,
        }
    }
}

impl Display for ActivePanel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.surface(), self.subject()) {
            (None, _) => f.write_str("none"),
            (Some(kind), Some(subject)) => write!(f, "{kind}({})", subject.id),
            (Some(kind), None) => match self.settings_page() {
                Some(page) => write!(f, "{kind}({})", page.as_str()),
                None => write!(f, "{kind}"),
            },
        }
    }
}

/// Caller-side errors when requesting a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// Surface needs a subject but none was given.
    MissingSubject {
        surface: SurfaceKind,
        expected: EntityKind,
    },
    /// Surface takes no subject but one was given.
    UnexpectedSubject {
        surface: SurfaceKind,
        subject: EntityRef,
    },
    SubjectKindMismatch {
        surface: SurfaceKind,
        expected: EntityKind,
        actual: EntityKind,
    },
    NilSubject(SurfaceKind),
    NoEditorFor(EntityKind),
    /// `ActivePanel::None` was requested as a panel to open.
    NoSurface,
    /// Current member role may not open this surface.
    Forbidden(SurfaceKind),
    UnknownSurface(String),
    UnknownSettingsPage(String),
}

impl Display for PanelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSubject { surface, expected } => {
                write!(f, "surface {surface} requires a {expected} subject")
            }
            Self::UnexpectedSubject { surface, subject } => {
                write!(f, "surface {surface} takes no subject, got {subject}")
            }
            Self::SubjectKindMismatch {
                surface,
                expected,
                actual,
            } => write!(
                f,
                "surface {surface} expects a {expected} subject, got {actual}"
            ),
            Self::NilSubject(surface) => write!(f, "surface {surface} subject id must not be nil"),
            Self::NoEditorFor(kind) => write!(f, "no editor surface for {kind}"),
            Self::NoSurface => write!(f, "requested panel has no surface; use dismiss-all"),
            Self::Forbidden(surface) => {
                write!(f, "current member role may not open {surface}")
            }
            Self::UnknownSurface(value) => write!(f, "unknown surface: `{value}`"),
            Self::UnknownSettingsPage(value) => write!(f, "unknown settings page: `{value}`"),
        }
    }
}

impl Error for PanelError {}
