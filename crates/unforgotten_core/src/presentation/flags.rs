//! Per-surface `(visible, subject)` flag table.
//!
//! # Responsibility
//! - Offer the flat flag view hosts bind to, one pair per surface kind.
//! - Convert between the flag view and the single `ActivePanel` value.
//!
//! # Invariants
//! - `from_panel` produces at most one visible slot.
//! - Raw `set` writes are not cross-validated; the multiplexer resolves
//!   collisions by priority.

use crate::model::entity::EntityRef;
use crate::model::panel::{ActivePanel, SettingsPage, SurfaceKind};

const SURFACE_COUNT: usize = SurfaceKind::ALL.len();

/// Visibility and subject for one surface kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceSlot {
    pub visible: bool,
    pub subject: Option<EntityRef>,
}

impl SurfaceSlot {
    pub const HIDDEN: SurfaceSlot = SurfaceSlot {
        visible: false,
        subject: None,
    };
}

/// Flat flag table indexed by surface priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationFlags {
    slots: [SurfaceSlot; SURFACE_COUNT],
    settings_page: Option<SettingsPage>,
}

impl Default for PresentationFlags {
    fn default() -> Self {
        Self::hidden()
    }
}

impl PresentationFlags {
    /// Table with every surface hidden and no subjects.
    pub fn hidden() -> Self {
        Self {
            slots: [SurfaceSlot::HIDDEN; SURFACE_COUNT],
            settings_page: None,
        }
    }

    /// Projects one active panel into the flag table.
    pub fn from_panel(panel: &ActivePanel) -> Self {
        let mut flags = Self::hidden();
        if let Some(kind) = panel.surface() {
            flags.set(kind, true, panel.subject());
            flags.settings_page = panel.settings_page();
        }
        flags
    }

    pub fn slot(&self, kind: SurfaceKind) -> SurfaceSlot {
        self.slots[kind.priority()]
    }

    pub fn is_visible(&self, kind: SurfaceKind) -> bool {
        self.slot(kind).visible
    }

    pub fn subject(&self, kind: SurfaceKind) -> Option<EntityRef> {
        self.slot(kind).subject
    }

    pub fn settings_page(&self) -> Option<SettingsPage> {
        self.settings_page
    }

    /// Raw write of one pair.
    pub fn set(&mut self, kind: SurfaceKind, visible: bool, subject: Option<EntityRef>) {
        self.slots[kind.priority()] = SurfaceSlot { visible, subject };
    }

    pub fn set_settings_page(&mut self, page: Option<SettingsPage>) {
        self.settings_page = page;
    }

    /// Resets every pair to `(false, None)`.
    pub fn clear_all(&mut self) {
        *self = Self::hidden();
    }

    /// Visible surfaces in priority order.
    pub fn visible_surfaces(&self) -> Vec<SurfaceKind> {
        SurfaceKind::ALL
            .into_iter()
            .filter(|kind| self.is_visible(*kind))
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.visible).count()
    }

    pub fn is_all_hidden(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| !slot.visible && slot.subject.is_none())
            && self.settings_page.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::PresentationFlags;
    use crate::model::entity::{EntityKind, EntityRef};
    use crate::model::panel::{ActivePanel, SettingsPage, SurfaceKind};
    use uuid::Uuid;

    #[test]
    fn hidden_table_is_all_hidden() {
        let flags = PresentationFlags::hidden();
        assert!(flags.is_all_hidden());
        assert_eq!(flags.visible_count(), 0);
    }

    #[test]
    fn from_panel_sets_single_pair() {
        let medication = EntityRef::new(EntityKind::Medication, Uuid::new_v4()).expect("ref");
        let flags = PresentationFlags::from_panel(&ActivePanel::EditMedication {
            id: medication.id,
        });

        assert_eq!(flags.visible_surfaces(), vec![SurfaceKind::EditMedication]);
        assert_eq!(flags.subject(SurfaceKind::EditMedication), Some(medication));
        assert_eq!(flags.subject(SurfaceKind::EditAppointment), None);
    }

    #[test]
    fn from_panel_carries_settings_page() {
        let flags = PresentationFlags::from_panel(&ActivePanel::settings(SettingsPage::About));
        assert!(flags.is_visible(SurfaceKind::Settings));
        assert_eq!(flags.settings_page(), Some(SettingsPage::About));
    }

    #[test]
    fn clear_all_resets_any_subset() {
        let mut flags = PresentationFlags::hidden();
        flags.set(SurfaceKind::AddProfile, true, None);
        flags.set(SurfaceKind::LogMood, true, None);
        flags.set_settings_page(Some(SettingsPage::Members));

        flags.clear_all();
        assert!(flags.is_all_hidden());
    }
}
