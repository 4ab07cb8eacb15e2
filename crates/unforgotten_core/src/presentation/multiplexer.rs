//! Panel multiplexer: picks the one surface to render.
//!
//! # Responsibility
//! - Turn the active panel into a host render plan (placement + backdrop).
//! - Resolve a raw flag table to one panel by fixed priority order.
//!
//! # Invariants
//! - A render plan describes zero or one surface, never more.
//! - Flag collisions resolve to the first visible surface in
//!   `SurfaceKind::ALL` order; they are a programmer error and trip
//!   `debug_assert!` in debug builds.

use crate::config::{CoordinatorConfig, LayoutClass};
use crate::model::entity::EntityRef;
use crate::model::panel::{ActivePanel, SettingsPage, SurfaceKind, SurfaceRole};
use crate::presentation::flags::PresentationFlags;
use log::{error, warn};
use serde::Serialize;

/// Where the host places the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelPlacement {
    /// Slides in from the trailing edge of the content pane.
    TrailingEdge,
    /// Centered card over the content pane.
    Centered,
    /// Small popover anchored to the triggering control.
    Popover,
    /// Full-height sheet (compact layout).
    Sheet,
}

/// Dimmed backdrop drawn behind a regular-layout panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Backdrop {
    pub opacity: f32,
    /// Tapping the backdrop runs dismiss-all.
    pub dismiss_on_tap: bool,
}

/// Render instruction for the overlay host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderPlan {
    Hidden,
    Panel {
        surface: SurfaceKind,
        subject: Option<EntityRef>,
        settings_page: Option<SettingsPage>,
        placement: PanelPlacement,
        backdrop: Option<Backdrop>,
    },
}

impl RenderPlan {
    pub fn surface(&self) -> Option<SurfaceKind> {
        match self {
            Self::Hidden => None,
            Self::Panel { surface, .. } => Some(*surface),
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

/// Placement of a surface for the given layout class.
pub fn placement_for(kind: SurfaceKind, layout: LayoutClass) -> PanelPlacement {
    if layout == LayoutClass::Compact {
        return PanelPlacement::Sheet;
    }
    match kind.role() {
        SurfaceRole::Create(_) | SurfaceRole::Edit(_) => PanelPlacement::TrailingEdge,
        SurfaceRole::Filter => PanelPlacement::Popover,
        SurfaceRole::View(_)
        | SurfaceRole::Settings
        | SurfaceRole::Membership
        | SurfaceRole::Account
        | SurfaceRole::Upgrade => PanelPlacement::Centered,
    }
}

/// Render plan for one active panel.
pub fn plan(panel: &ActivePanel, config: &CoordinatorConfig) -> RenderPlan {
    let Some(surface) = panel.surface() else {
        return RenderPlan::Hidden;
    };
    let placement = placement_for(surface, config.layout);
    let backdrop = match config.layout {
        // Popovers dismiss on outside taps but are not dimmed.
        LayoutClass::Regular if placement == PanelPlacement::Popover => Some(Backdrop {
            opacity: 0.0,
            dismiss_on_tap: true,
        }),
        LayoutClass::Regular => Some(Backdrop {
            opacity: config.backdrop_opacity,
            dismiss_on_tap: config.dismiss_on_backdrop_tap,
        }),
        LayoutClass::Compact => None,
    };
    RenderPlan::Panel {
        surface,
        subject: panel.subject(),
        settings_page: panel.settings_page(),
        placement,
        backdrop,
    }
}

/// Resolves a flag table to one panel with a priority-ordered linear scan.
///
/// Visible slots whose subject does not satisfy the surface's rule are
/// skipped, matching a host that only renders an editor once its subject is
/// bound.
pub fn select_from_flags(flags: &PresentationFlags) -> ActivePanel {
    let visible = flags.visible_count();
    debug_assert!(
        visible <= 1,
        "panel flag collision: {:?}",
        flags.visible_surfaces()
    );
    if visible > 1 {
        error!(
            "event=panel_flag_collision module=multiplexer status=error visible={:?}",
            flags.visible_surfaces()
        );
    }

    for kind in SurfaceKind::ALL {
        if !flags.is_visible(kind) {
            continue;
        }
        match ActivePanel::build(kind, flags.subject(kind)) {
            Ok(ActivePanel::Settings { .. }) => {
                return ActivePanel::settings(flags.settings_page().unwrap_or_default());
            }
            Ok(panel) => return panel,
            Err(err) => {
                warn!(
                    "event=panel_flag_skipped module=multiplexer status=warn surface={} reason={}",
                    kind, err
                );
            }
        }
    }
    ActivePanel::None
}

#[cfg(test)]
mod tests {
    use super::{placement_for, plan, select_from_flags, PanelPlacement, RenderPlan};
    use crate::config::{CoordinatorConfig, LayoutClass};
    use crate::model::entity::{EntityKind, EntityRef};
    use crate::model::panel::{ActivePanel, SettingsPage, SurfaceKind};
    use crate::presentation::flags::PresentationFlags;
    use uuid::Uuid;

    #[test]
    fn hidden_panel_renders_nothing() {
        let plan = plan(&ActivePanel::None, &CoordinatorConfig::default());
        assert_eq!(plan, RenderPlan::Hidden);
    }

    #[test]
    fn regular_layout_places_by_role() {
        assert_eq!(
            placement_for(SurfaceKind::AddMedication, LayoutClass::Regular),
            PanelPlacement::TrailingEdge
        );
        assert_eq!(
            placement_for(SurfaceKind::ViewReminder, LayoutClass::Regular),
            PanelPlacement::Centered
        );
        assert_eq!(
            placement_for(SurfaceKind::TodoListFilter, LayoutClass::Regular),
            PanelPlacement::Popover
        );
    }

    #[test]
    fn compact_layout_uses_sheets_without_backdrop() {
        let config = CoordinatorConfig {
            layout: LayoutClass::Compact,
            ..CoordinatorConfig::default()
        };
        match plan(&ActivePanel::AddProfile, &config) {
            RenderPlan::Panel {
                placement,
                backdrop,
                ..
            } => {
                assert_eq!(placement, PanelPlacement::Sheet);
                assert!(backdrop.is_none());
            }
            RenderPlan::Hidden => panic!("expected a panel"),
        }
    }

    #[test]
    fn regular_plan_carries_dimmed_backdrop_and_subject() {
        let config = CoordinatorConfig::default();
        let id = Uuid::new_v4();
        match plan(&ActivePanel::EditNote { id }, &config) {
            RenderPlan::Panel {
                surface,
                subject,
                backdrop,
                ..
            } => {
                assert_eq!(surface, SurfaceKind::EditNote);
                assert_eq!(subject.map(|s| s.id), Some(id));
                let backdrop = backdrop.expect("regular layout has a backdrop");
                assert_eq!(backdrop.opacity, config.backdrop_opacity);
                assert!(backdrop.dismiss_on_tap);
            }
            RenderPlan::Hidden => panic!("expected a panel"),
        }
    }

    #[test]
    fn select_returns_single_visible_panel() {
        let profile = EntityRef::new(EntityKind::Profile, Uuid::new_v4()).expect("ref");
        let mut flags = PresentationFlags::hidden();
        flags.set(SurfaceKind::ViewBirthday, true, Some(profile));
        assert_eq!(
            select_from_flags(&flags),
            ActivePanel::ViewBirthday { id: profile.id }
        );
    }

    #[test]
    fn select_skips_visible_editor_without_subject() {
        let mut flags = PresentationFlags::hidden();
        flags.set(SurfaceKind::EditMedication, true, None);
        assert_eq!(select_from_flags(&flags), ActivePanel::None);
    }

    #[test]
    fn select_restores_settings_page() {
        let mut flags = PresentationFlags::hidden();
        flags.set(SurfaceKind::Settings, true, None);
        flags.set_settings_page(Some(SettingsPage::Notifications));
        assert_eq!(
            select_from_flags(&flags),
            ActivePanel::settings(SettingsPage::Notifications)
        );
    }

    #[cfg(not(debug_assertions))]
    #[test]
    fn select_collision_prefers_priority_order_in_release() {
        let mut flags = PresentationFlags::hidden();
        flags.set(SurfaceKind::Upgrade, true, None);
        flags.set(SurfaceKind::AddNote, true, None);
        assert_eq!(select_from_flags(&flags), ActivePanel::AddNote);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "panel flag collision")]
    fn select_collision_asserts_in_debug() {
        let mut flags = PresentationFlags::hidden();
        flags.set(SurfaceKind::Upgrade, true, None);
        flags.set(SurfaceKind::AddNote, true, None);
        let _ = select_from_flags(&flags);
    }
}
