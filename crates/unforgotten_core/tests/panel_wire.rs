use std::sync::Arc;
use unforgotten_core::{
    ActivePanel, CoordinatorConfig, MemberRole, PanelCoordinator, PresentationState,
    RoleAccessPolicy, SettingsPage, SidebarDestination, Unrestricted,
};
use uuid::Uuid;

#[test]
fn active_panel_serializes_with_surface_tag() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();

    let json = serde_json::to_value(ActivePanel::EditMedication { id }).unwrap();
    assert_eq!(json["surface"], "edit_medication");
    assert_eq!(json["id"], id.to_string());

    let json = serde_json::to_value(ActivePanel::settings(SettingsPage::Members)).unwrap();
    assert_eq!(json["surface"], "settings");
    assert_eq!(json["page"], "members");

    let json = serde_json::to_value(ActivePanel::None).unwrap();
    assert_eq!(json, serde_json::json!({ "surface": "none" }));
}

#[test]
fn saved_state_restores_into_a_new_coordinator() {
    let raw = serde_json::json!({
        "panel": { "surface": "view_birthday", "id": "11111111-2222-4333-8444-555555555555" },
        "destination": "birthdays"
    });
    let state: PresentationState = serde_json::from_value(raw).unwrap();

    let coordinator =
        PanelCoordinator::restore(CoordinatorConfig::default(), Arc::new(Unrestricted), state);
    assert_eq!(coordinator.destination(), SidebarDestination::Birthdays);
    assert!(matches!(
        coordinator.active_panel(),
        ActivePanel::ViewBirthday { .. }
    ));
    assert!(coordinator.session().is_some());
}

#[test]
fn restore_drops_panel_the_role_may_not_open() {
    let state = PresentationState {
        panel: ActivePanel::AddNote,
        destination: SidebarDestination::Notes,
    };
    let coordinator = PanelCoordinator::restore(
        CoordinatorConfig::default(),
        Arc::new(RoleAccessPolicy::unlimited(MemberRole::Viewer)),
        state,
    );
    assert_eq!(coordinator.active_panel(), ActivePanel::None);
    assert_eq!(coordinator.destination(), SidebarDestination::Notes);
    assert!(coordinator.session().is_none());
}

#[test]
fn render_plan_serializes_for_the_host() {
    let mut coordinator = PanelCoordinator::new(CoordinatorConfig::default());
    coordinator.open(ActivePanel::TodoListFilter).unwrap();

    let json = serde_json::to_value(coordinator.render_plan()).unwrap();
    assert_eq!(json["state"], "panel");
    assert_eq!(json["surface"], "todo_list_filter");
    assert_eq!(json["placement"], "popover");
    assert_eq!(json["backdrop"]["dismiss_on_tap"], true);

    coordinator.dismiss_all();
    let json = serde_json::to_value(coordinator.render_plan()).unwrap();
    assert_eq!(json, serde_json::json!({ "state": "hidden" }));
}

#[test]
fn restore_drops_editor_with_nil_subject() {
    let raw = serde_json::json!({
        "panel": { "surface": "edit_note", "id": "00000000-0000-0000-0000-000000000000" },
        "destination": "notes"
    });
    let state: PresentationState = serde_json::from_value(raw).unwrap();

    let coordinator =
        PanelCoordinator::restore(CoordinatorConfig::default(), Arc::new(Unrestricted), state);
    assert_eq!(coordinator.active_panel(), ActivePanel::None);
    assert_eq!(coordinator.destination(), SidebarDestination::Notes);
    assert!(coordinator.session().is_none());
    assert!(coordinator.flags().is_all_hidden());
}
