//! Core presentation logic for Unforgotten.
//! This crate is the single source of truth for panel presentation state.

pub mod config;
pub mod logging;
pub mod model;
pub mod presentation;

pub use config::{ConfigError, CoordinatorConfig, LayoutClass};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::entity::{EntityId, EntityKind, EntityRef, EntityRefError};
pub use model::member::MemberRole;
pub use model::panel::{
    ActivePanel, PanelError, SettingsPage, SubjectRule, SurfaceKind, SurfaceRole,
};
pub use presentation::coordinator::{
    CompletionStatus, PanelCoordinator, PanelSession, PumpReport,
};
pub use presentation::flags::{PresentationFlags, SurfaceSlot};
pub use presentation::intent::{
    IntentBus, IntentSender, PanelIntent, PanelToken, SurfaceHandle, SurfaceOutcome,
};
pub use presentation::multiplexer::{Backdrop, PanelPlacement, RenderPlan};
pub use presentation::navigation::SidebarDestination;
pub use presentation::policy::{
    AccessDecision, AccessPolicy, PremiumOracle, RoleAccessPolicy, Unrestricted,
};
pub use presentation::registry::{ActionRegistry, PanelActions, Presentation};
pub use presentation::store::{
    ObserverId, PresentationChange, PresentationState, PresentationStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
