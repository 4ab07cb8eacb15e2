use std::sync::mpsc;
use std::thread;
use unforgotten_core::{
    ActivePanel, CompletionStatus, CoordinatorConfig, EntityKind, EntityRef, PanelActions,
    PanelCoordinator, PumpReport, SurfaceOutcome,
};
use uuid::Uuid;

#[test]
fn save_resolving_after_dismiss_is_ignored() {
    let mut coordinator = PanelCoordinator::new(CoordinatorConfig::default());
    let medication = EntityRef::new(EntityKind::Medication, Uuid::new_v4()).expect("ref");
    coordinator
        .edit_medication(medication.id)
        .expect("open editor");
    let handle = coordinator.surface_handle().expect("open surface has a handle");

    // The save is gated so it resolves strictly after the user dismisses.
    let (release, gate) = mpsc::channel::<()>();
    let worker = thread::spawn(move || {
        gate.recv().expect("release signal");
        handle.on_save(medication)
    });

    assert!(coordinator.tap_backdrop());
    release.send(()).expect("worker alive");
    assert!(worker.join().expect("worker finished"));

    let revision = coordinator.revision();
    let report = coordinator.pump();
    assert_eq!(
        report,
        PumpReport {
            stale: 1,
            ..PumpReport::default()
        }
    );
    assert_eq!(coordinator.revision(), revision);
    assert_eq!(coordinator.active_panel(), ActivePanel::None);
}

#[test]
fn late_save_does_not_close_the_replacement_panel() {
    let mut coordinator = PanelCoordinator::new(CoordinatorConfig::default());
    let note = EntityRef::new(EntityKind::Note, Uuid::new_v4()).expect("ref");
    let stale = coordinator.edit_note(note.id).expect("open note editor");
    coordinator.add_countdown().expect("replace with countdown");

    assert_eq!(
        coordinator.on_save(stale.token, note),
        CompletionStatus::Stale
    );
    assert_eq!(coordinator.active_panel(), ActivePanel::AddCountdown);
}

#[test]
fn completion_is_applied_once() {
    let mut coordinator = PanelCoordinator::new(CoordinatorConfig::default());
    let session = coordinator.add_todo_list().expect("open");

    assert_eq!(
        coordinator.complete(session.token, SurfaceOutcome::Dismissed),
        CompletionStatus::Applied
    );
    assert_eq!(
        coordinator.complete(session.token, SurfaceOutcome::Dismissed),
        CompletionStatus::Stale
    );
}

#[test]
fn save_completing_in_time_is_applied_through_pump() {
    let mut coordinator = PanelCoordinator::new(CoordinatorConfig::default());
    coordinator.add_note().expect("open");
    let handle = coordinator.surface_handle().expect("handle");
    let note = EntityRef::new(EntityKind::Note, Uuid::new_v4()).expect("ref");

    thread::spawn(move || handle.on_save(note))
        .join()
        .expect("worker finished");

    let report = coordinator.pump();
    assert_eq!(report.completed, 1);
    assert_eq!(report.total(), 1);
    assert_eq!(coordinator.active_panel(), ActivePanel::None);
}
