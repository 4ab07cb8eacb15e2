//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `unforgotten_core` linkage.
//! - Replay a fixed panel scenario so coordinator wiring can be checked
//!   without the mobile shell.
//! - Keep output deterministic for quick local sanity checks.

use unforgotten_core::{
    ActivePanel, CoordinatorConfig, EntityKind, EntityRef, PanelActions, PanelCoordinator,
    SidebarDestination,
};
use uuid::Uuid;

fn main() {
    println!("unforgotten_core ping={}", unforgotten_core::ping());
    println!("unforgotten_core version={}", unforgotten_core::core_version());

    let config = match CoordinatorConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            std::process::exit(2);
        }
    };
    replay(config);
}

fn replay(config: CoordinatorConfig) {
    let mut coordinator = PanelCoordinator::new(config);
    coordinator.subscribe(|change| {
        println!(
            "  change rev={} {} -> {} animated={}",
            change.revision, change.previous.panel, change.current.panel, change.animated
        );
    });

    let medication = Uuid::from_u128(0x1);
    let appointment = Uuid::from_u128(0x2);

    step(&mut coordinator, "edit medication", |c| {
        c.edit_medication(medication).map(|_| ())
    });
    step(&mut coordinator, "edit appointment", |c| {
        c.edit_appointment(appointment).map(|_| ())
    });
    println!("  tap backdrop dismissed={}", coordinator.tap_backdrop());

    step(&mut coordinator, "add note", |c| c.add_note().map(|_| ()));
    if let Some(handle) = coordinator.surface_handle() {
        let note = EntityRef::new(EntityKind::Note, Uuid::from_u128(0x3));
        if let Ok(note) = note {
            handle.on_save(note);
        }
    }
    let report = coordinator.pump();
    println!("  pump completed={} stale={}", report.completed, report.stale);

    let mut registry = coordinator.registry();
    registry.show_appointment_filter();
    coordinator.pump();
    println!("  navigate={}", coordinator.navigate(SidebarDestination::Notes));

    let state = coordinator.state();
    println!(
        "final panel={} destination={} revision={} hidden={}",
        state.panel,
        state.destination.as_str(),
        coordinator.revision(),
        state.panel == ActivePanel::None
    );
}

fn step(
    coordinator: &mut PanelCoordinator,
    label: &str,
    action: impl FnOnce(&mut PanelCoordinator) -> Result<(), unforgotten_core::PanelError>,
) {
    match action(coordinator) {
        Ok(()) => println!("{label}: ok plan={:?}", coordinator.render_plan()),
        Err(err) => println!("{label}: error {err}"),
    }
}
