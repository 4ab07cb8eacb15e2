use std::sync::{Arc, Mutex};
use unforgotten_core::{
    ActivePanel, CoordinatorConfig, EntityKind, EntityRef, PanelActions, PanelCoordinator,
    PresentationChange, SubjectRule, SurfaceKind,
};
use uuid::Uuid;

fn coordinator() -> PanelCoordinator {
    PanelCoordinator::new(CoordinatorConfig::default())
}

fn sample_panel(kind: SurfaceKind) -> ActivePanel {
    let subject = match kind.subject_rule() {
        SubjectRule::None => None,
        SubjectRule::Required(entity_kind) => {
            Some(EntityRef::new(entity_kind, Uuid::new_v4()).expect("valid ref"))
        }
    };
    ActivePanel::build(kind, subject).expect("sample panel should build")
}

#[test]
fn opening_b_after_a_leaves_only_b_visible() {
    for first in SurfaceKind::ALL {
        for second in SurfaceKind::ALL {
            if first == second {
                continue;
            }
            let mut coordinator = coordinator();
            let a = sample_panel(first);
            let b = sample_panel(second);

            coordinator.open(a).expect("open first");
            coordinator.open(b).expect("open second");

            let flags = coordinator.flags();
            assert_eq!(
                flags.visible_surfaces(),
                vec![second],
                "{first} -> {second} should leave only {second}"
            );
            assert_eq!(coordinator.active_panel(), b);
        }
    }
}

#[test]
fn edit_medication_then_edit_appointment_shows_only_appointment_editor() {
    let mut coordinator = coordinator();
    let medication = EntityRef::new(EntityKind::Medication, Uuid::new_v4()).expect("ref");
    let appointment = EntityRef::new(EntityKind::Appointment, Uuid::new_v4()).expect("ref");

    coordinator
        .edit_medication(medication.id)
        .expect("open medication editor");
    coordinator
        .edit_appointment(appointment.id)
        .expect("open appointment editor");

    let flags = coordinator.flags();
    assert!(!flags.is_visible(SurfaceKind::EditMedication));
    assert_eq!(flags.subject(SurfaceKind::EditMedication), None);
    assert!(flags.is_visible(SurfaceKind::EditAppointment));
    assert_eq!(flags.subject(SurfaceKind::EditAppointment), Some(appointment));
    assert_eq!(flags.visible_count(), 1);
}

#[test]
fn replacing_a_panel_notifies_observers_once_without_intermediate_hidden_state() {
    let changes: Arc<Mutex<Vec<PresentationChange>>> = Arc::new(Mutex::new(Vec::new()));
    let mut coordinator = coordinator();
    let sink = Arc::clone(&changes);
    coordinator.subscribe(move |change| sink.lock().expect("lock").push(*change));

    coordinator.add_note().expect("open note");
    coordinator.log_mood().expect("open mood");

    let changes = changes.lock().expect("lock");
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[1].previous.panel, ActivePanel::AddNote);
    assert_eq!(changes[1].current.panel, ActivePanel::LogMood);
    assert!(changes.iter().all(|change| change.animated));
}

#[test]
fn every_open_issues_a_fresh_token() {
    let mut coordinator = coordinator();
    let first = coordinator.add_profile().expect("open");
    let second = coordinator.add_countdown().expect("open");
    let third = coordinator.add_profile().expect("open");

    assert_ne!(first.token, second.token);
    assert_ne!(second.token, third.token);
    assert_ne!(first.token, third.token);
}

#[test]
fn animation_flag_follows_config() {
    let changes: Arc<Mutex<Vec<PresentationChange>>> = Arc::new(Mutex::new(Vec::new()));
    let mut coordinator = PanelCoordinator::new(CoordinatorConfig {
        animate_transitions: false,
        ..CoordinatorConfig::default()
    });
    let sink = Arc::clone(&changes);
    coordinator.subscribe(move |change| sink.lock().expect("lock").push(*change));

    coordinator.show_upgrade().expect("open");
    coordinator.dismiss_all();

    let changes = changes.lock().expect("lock");
    assert_eq!(changes.len(), 2);
    assert!(changes.iter().all(|change| !change.animated));
}
