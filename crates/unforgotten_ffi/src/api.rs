//! FFI panel API for the mobile shell.
//!
//! # Responsibility
//! - Expose panel coordinator use-cases to Dart via FRB.
//! - Keep one process-wide coordinator owned by the UI isolate.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Labels crossing the boundary are the core's stable snake_case strings.
//! - Every call drains queued intents before answering, so completions sent
//!   from background work are visible in the returned state.

use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use unforgotten_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ActivePanel, CompletionStatus, CoordinatorConfig, EntityKind, EntityRef, MemberRole,
    PanelCoordinator, PanelError, PanelSession, PanelToken, PresentationState, RoleAccessPolicy,
    SettingsPage, SidebarDestination, SubjectRule, SurfaceKind, SurfaceOutcome,
};

static COORDINATOR: Lazy<Mutex<PanelCoordinator>> =
    Lazy::new(|| Mutex::new(PanelCoordinator::new(default_config())));

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Snapshot of presentation state for the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStateView {
    /// Open surface label, `None` when hidden.
    pub surface: Option<String>,
    pub subject_kind: Option<String>,
    pub subject_id: Option<String>,
    pub settings_page: Option<String>,
    pub destination: String,
    pub revision: u64,
    /// Token the open surface completes with.
    pub token: Option<u64>,
    /// Render plan as JSON (`{"state":"hidden"}` or panel placement).
    pub render_plan_json: String,
}

/// Response envelope for panel commands.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelResponse {
    pub ok: bool,
    /// Requested surface when the open was redirected to the upgrade surface.
    pub redirected_from: Option<String>,
    pub message: String,
    pub state: PanelStateView,
}

/// Replaces the coordinator with a fresh one, keeping the current role policy.
///
/// `config_json` empty means defaults overlaid with environment variables.
/// Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_configure(config_json: String) -> String {
    let config = if config_json.trim().is_empty() {
        CoordinatorConfig::from_env()
    } else {
        CoordinatorConfig::from_json_str(config_json.as_str())
    };
    match config {
        Ok(config) => {
            let mut coordinator = lock_coordinator();
            let policy = coordinator.policy();
            *coordinator = PanelCoordinator::with_policy(config, policy);
            String::new()
        }
        Err(err) => err.to_string(),
    }
}

/// Applies the signed-in member's role to subsequent panel requests.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_set_role(role: String) -> PanelResponse {
    let mut coordinator = lock_coordinator();
    match MemberRole::parse(role.as_str()) {
        Some(role) => {
            coordinator.set_policy(Arc::new(RoleAccessPolicy::unlimited(role)));
            ok_response(&mut coordinator, None, format!("Role set to {}.", role.as_str()))
        }
        None => failure_response(&mut coordinator, format!("unknown member role: `{role}`")),
    }
}

/// Opens one surface, replacing any open surface.
///
/// `subject_id` is required for edit/view surfaces; `settings_page` only
/// applies to the settings surface.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_open(
    surface: String,
    subject_id: Option<String>,
    settings_page: Option<String>,
) -> PanelResponse {
    let mut coordinator = lock_coordinator();
    let result = parse_panel(surface.as_str(), subject_id.as_deref(), settings_page.as_deref())
        .and_then(|panel| coordinator.open(panel).map_err(|err| err.to_string()));
    match result {
        Ok(PanelSession {
            redirected_from, ..
        }) => ok_response(
            &mut coordinator,
            redirected_from.map(|kind| kind.as_str().to_string()),
            "Panel opened.".to_string(),
        ),
        Err(message) => failure_response(&mut coordinator, format!("panel_open failed: {message}")),
    }
}

/// Hides every surface.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_dismiss_all() -> PanelStateView {
    let mut coordinator = lock_coordinator();
    coordinator.dismiss_all();
    state_view(&mut coordinator)
}

/// Backdrop tap; dismisses when the current placement allows it.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_tap_backdrop() -> PanelStateView {
    let mut coordinator = lock_coordinator();
    coordinator.tap_backdrop();
    state_view(&mut coordinator)
}

/// Hosted-surface completion.
///
/// `outcome` is `dismissed|saved|deleted`; `saved` requires the entity kind
/// and id. Returns `applied`, `stale`, or an error message.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_complete(
    token: u64,
    outcome: String,
    entity_kind: Option<String>,
    entity_id: Option<String>,
) -> String {
    let outcome = match parse_outcome(outcome.as_str(), entity_kind, entity_id) {
        Ok(outcome) => outcome,
        Err(message) => return format!("panel_complete failed: {message}"),
    };
    let mut coordinator = lock_coordinator();
    coordinator.pump();
    match coordinator.complete(PanelToken::from_raw(token), outcome) {
        CompletionStatus::Applied => "applied".to_string(),
        CompletionStatus::Stale => "stale".to_string(),
    }
}

/// Switches the sidebar section; closes any open surface.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_navigate(destination: String) -> PanelResponse {
    let mut coordinator = lock_coordinator();
    match SidebarDestination::parse(destination.as_str()) {
        Some(destination) => {
            coordinator.navigate(destination);
            ok_response(&mut coordinator, None, "Navigated.".to_string())
        }
        None => failure_response(
            &mut coordinator,
            format!("unknown sidebar destination: `{destination}`"),
        ),
    }
}

/// Current presentation state.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_current() -> PanelStateView {
    let mut coordinator = lock_coordinator();
    state_view(&mut coordinator)
}

/// Serialized presentation state for scene restoration.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_snapshot() -> String {
    let mut coordinator = lock_coordinator();
    coordinator.pump();
    serde_json::to_string(&coordinator.state()).unwrap_or_default()
}

/// Restores a snapshot produced by [`panel_snapshot`].
///
/// Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn panel_restore(snapshot_json: String) -> String {
    let state: PresentationState = match serde_json::from_str(snapshot_json.as_str()) {
        Ok(state) => state,
        Err(err) => return format!("panel_restore failed: {err}"),
    };
    let mut coordinator = lock_coordinator();
    let config = coordinator.config().clone();
    let policy = coordinator.policy();
    *coordinator = PanelCoordinator::restore(config, policy, state);
    String::new()
}

fn default_config() -> CoordinatorConfig {
    CoordinatorConfig::from_env().unwrap_or_else(|err| {
        log::warn!(
            "event=ffi_config module=ffi status=fallback reason={}",
            err
        );
        CoordinatorConfig::default()
    })
}

fn lock_coordinator() -> MutexGuard<'static, PanelCoordinator> {
    // A panic while holding the lock leaves plain data behind; keep serving.
    COORDINATOR.lock().unwrap_or_else(PoisonError::into_inner)
}

fn parse_panel(
    surface: &str,
    subject_id: Option<&str>,
    settings_page: Option<&str>,
) -> Result<ActivePanel, String> {
    let kind = SurfaceKind::parse(surface).map_err(|err| err.to_string())?;
    let subject_id = subject_id.filter(|raw| !raw.trim().is_empty());
    if let (SubjectRule::None, Some(raw)) = (kind.subject_rule(), subject_id) {
        return Err(format!("surface {kind} takes no subject, got `{}`", raw.trim()));
    }
    if kind == SurfaceKind::Settings {
        let page = match settings_page.filter(|raw| !raw.trim().is_empty()) {
            Some(raw) => SettingsPage::parse(raw).map_err(|err| err.to_string())?,
            None => SettingsPage::default(),
        };
        return Ok(ActivePanel::settings(page));
    }

    let subject = match (kind.subject_rule(), subject_id) {
        (SubjectRule::Required(entity_kind), Some(raw)) => {
            Some(EntityRef::parse(entity_kind, raw).map_err(|err| err.to_string())?)
        }
        _ => None,
    };
    ActivePanel::build(kind, subject).map_err(|err: PanelError| err.to_string())
}

fn parse_outcome(
    outcome: &str,
    entity_kind: Option<String>,
    entity_id: Option<String>,
) -> Result<SurfaceOutcome, String> {
    match outcome.trim() {
        "dismissed" => Ok(SurfaceOutcome::Dismissed),
        "deleted" => Ok(SurfaceOutcome::Deleted),
        "saved" => {
            let raw_kind = entity_kind.ok_or("saved outcome requires entity_kind")?;
            let kind = EntityKind::parse(raw_kind.as_str())
                .ok_or_else(|| format!("unknown entity kind: `{raw_kind}`"))?;
            let raw_id = entity_id.ok_or("saved outcome requires entity_id")?;
            let entity = EntityRef::parse(kind, raw_id.as_str()).map_err(|err| err.to_string())?;
            Ok(SurfaceOutcome::Saved { entity })
        }
        other => Err(format!("unknown outcome: `{other}`")),
    }
}

fn state_view(coordinator: &mut PanelCoordinator) -> PanelStateView {
    coordinator.pump();
    let panel = coordinator.active_panel();
    let subject = panel.subject();
    PanelStateView {
        surface: panel.surface().map(|kind| kind.as_str().to_string()),
        subject_kind: subject.map(|entity| entity.kind.as_str().to_string()),
        subject_id: subject.map(|entity| entity.id.to_string()),
        settings_page: panel.settings_page().map(|page| page.as_str().to_string()),
        destination: coordinator.destination().as_str().to_string(),
        revision: coordinator.revision(),
        token: coordinator.session().map(|session| session.token.raw()),
        render_plan_json: serde_json::to_string(&coordinator.render_plan())
            .unwrap_or_default(),
    }
}

fn ok_response(
    coordinator: &mut PanelCoordinator,
    redirected_from: Option<String>,
    message: String,
) -> PanelResponse {
    PanelResponse {
        ok: true,
        redirected_from,
        message,
        state: state_view(coordinator),
    }
}

fn failure_response(coordinator: &mut PanelCoordinator, message: String) -> PanelResponse {
    PanelResponse {
        ok: false,
        redirected_from: None,
        message,
        state: state_view(coordinator),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, panel_complete, panel_configure, panel_current,
        panel_dismiss_all, panel_navigate, panel_open, panel_restore, panel_set_role,
        panel_snapshot, panel_tap_backdrop, ping,
    };
    use std::sync::Mutex;
    use uuid::Uuid;

    // Tests share the process-wide coordinator.
    static SERIAL: Mutex<()> = Mutex::new(());

    fn fresh() -> std::sync::MutexGuard<'static, ()> {
        let guard = SERIAL.lock().unwrap_or_else(|poison| poison.into_inner());
        assert!(panel_set_role("owner".to_string()).ok);
        assert_eq!(panel_configure("{}".to_string()), "");
        guard
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_relative_dir_and_bad_level() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
        assert!(!init_logging("info".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn open_then_replace_keeps_one_surface() {
        let _guard = fresh();
        let medication = Uuid::new_v4().to_string();
        let appointment = Uuid::new_v4().to_string();

        let first = panel_open("edit_medication".to_string(), Some(medication), None);
        assert!(first.ok, "{}", first.message);
        let second = panel_open("edit_appointment".to_string(), Some(appointment.clone()), None);
        assert!(second.ok, "{}", second.message);

        assert_eq!(second.state.surface.as_deref(), Some("edit_appointment"));
        assert_eq!(second.state.subject_kind.as_deref(), Some("appointment"));
        assert_eq!(second.state.subject_id, Some(appointment));
    }

    #[test]
    fn open_rejects_missing_subject_and_unknown_surface() {
        let _guard = fresh();
        let missing = panel_open("view_reminder".to_string(), None, None);
        assert!(!missing.ok);
        assert!(missing.message.contains("requires a reminder subject"));

        let unknown = panel_open("edit_everything".to_string(), None, None);
        assert!(!unknown.ok);
        assert!(unknown.message.contains("unknown surface"));
        assert_eq!(unknown.state.surface, None);
    }

    #[test]
    fn settings_page_round_trips() {
        let _guard = fresh();
        let response = panel_open("settings".to_string(), None, Some("privacy".to_string()));
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.state.settings_page.as_deref(), Some("privacy"));
        assert!(response.state.render_plan_json.contains("\"centered\""));
    }

    #[test]
    fn backdrop_tap_and_stale_completion() {
        let _guard = fresh();
        let response = panel_open("add_note".to_string(), None, None);
        let token = response.state.token.expect("open surface has a token");

        let state = panel_tap_backdrop();
        assert_eq!(state.surface, None);

        let note_id = Uuid::new_v4().to_string();
        let status = panel_complete(
            token,
            "saved".to_string(),
            Some("note".to_string()),
            Some(note_id),
        );
        assert_eq!(status, "stale");
    }

    #[test]
    fn completion_applies_and_validates_outcome() {
        let _guard = fresh();
        let response = panel_open("log_mood".to_string(), None, None);
        let token = response.state.token.expect("token");

        let bad = panel_complete(token, "saved".to_string(), None, None);
        assert!(bad.contains("requires entity_kind"));
        assert_eq!(panel_complete(token, "dismissed".to_string(), None, None), "applied");
        assert_eq!(panel_current().surface, None);
    }

    #[test]
    fn viewer_role_cannot_open_editors() {
        let _guard = fresh();
        assert!(panel_set_role("viewer".to_string()).ok);
        let response = panel_open("add_profile".to_string(), None, None);
        assert!(!response.ok);
        assert!(response.message.contains("may not open add_profile"));
        assert!(!panel_set_role("guest".to_string()).ok);
    }

    #[test]
    fn navigate_dismisses_and_snapshot_restores() {
        let _guard = fresh();
        panel_open("add_countdown".to_string(), None, None);
        let response = panel_navigate("countdowns".to_string());
        assert!(response.ok);
        assert_eq!(response.state.surface, None);
        assert_eq!(response.state.destination, "countdowns");

        panel_open("countdown_filter".to_string(), None, None);
        let snapshot = panel_snapshot();
        panel_dismiss_all();
        assert_eq!(panel_restore(snapshot), "");

        let state = panel_current();
        assert_eq!(state.surface.as_deref(), Some("countdown_filter"));
        assert_eq!(state.destination, "countdowns");
        assert!(!panel_restore("not json".to_string()).is_empty());
    }

    #[test]
    fn configure_keeps_the_role_gate() {
        let _guard = fresh();
        assert!(panel_set_role("viewer".to_string()).ok);
        assert_eq!(
            panel_configure(r#"{"layout":"compact"}"#.to_string()),
            ""
        );

        let response = panel_open("add_profile".to_string(), None, None);
        assert!(!response.ok);
        assert!(response.message.contains("may not open add_profile"));
        assert!(response.state.render_plan_json.contains("hidden"));
    }

    #[test]
    fn subject_for_subjectless_surface_is_rejected() {
        let _guard = fresh();
        let stray = Uuid::new_v4().to_string();
        let response = panel_open("add_note".to_string(), Some(stray), None);
        assert!(!response.ok);
        assert!(response.message.contains("add_note takes no subject"));
        assert_eq!(response.state.surface, None);

        let blank = panel_open("add_note".to_string(), Some("  ".to_string()), None);
        assert!(blank.ok, "{}", blank.message);
    }
}
