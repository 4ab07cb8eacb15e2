//! Panel presentation coordinator.
//!
//! # Responsibility
//! - Own presentation state and apply every panel transition.
//! - Gate opens through the access policy.
//! - Hand hosted surfaces a token and route their completion through
//!   dismiss-all.
//!
//! # Invariants
//! - Every open is dismiss-all-then-set inside one store transaction.
//! - Completions carrying a token other than the open session's are stale
//!   and never touch state.
//! - All mutation happens on the thread that owns the coordinator; other
//!   threads only queue intents.

use crate::config::CoordinatorConfig;
use crate::model::entity::EntityRef;
use crate::model::panel::{ActivePanel, PanelError, SurfaceKind};
use crate::presentation::flags::PresentationFlags;
use crate::presentation::intent::{
    IntentBus, IntentSender, PanelIntent, PanelToken, SurfaceHandle, SurfaceOutcome,
};
use crate::presentation::multiplexer::{self, RenderPlan};
use crate::presentation::navigation::SidebarDestination;
use crate::presentation::policy::{AccessDecision, AccessPolicy, Unrestricted};
use crate::presentation::registry::{ActionRegistry, PanelActions};
use crate::presentation::store::{
    ObserverId, PresentationChange, PresentationState, PresentationStore,
};
use log::{debug, info, warn};
use std::sync::Arc;

/// The open panel together with the token its surface completes with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSession {
    pub token: PanelToken,
    pub panel: ActivePanel,
    /// Requested surface when the policy redirected to the upgrade surface.
    pub redirected_from: Option<SurfaceKind>,
}

/// Result of a hosted-surface completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    /// The surface was current; dismiss-all ran.
    Applied,
    /// The surface had already been dismissed or replaced.
    Stale,
}

/// Counters for one [`PanelCoordinator::pump`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    pub opened: usize,
    pub rejected: usize,
    pub dismissed: usize,
    pub completed: usize,
    pub stale: usize,
    pub navigated: usize,
}

impl PumpReport {
    pub fn total(&self) -> usize {
        self.opened + self.rejected + self.dismissed + self.completed + self.stale + self.navigated
    }
}

/// Coordinator for the single panel overlay.
pub struct PanelCoordinator {
    store: PresentationStore,
    config: CoordinatorConfig,
    policy: Arc<dyn AccessPolicy>,
    bus: IntentBus,
    session: Option<PanelSession>,
    next_token: u64,
}

impl PanelCoordinator {
    /// Coordinator with no access restrictions.
    pub fn new(config: CoordinatorConfig) -> Self {
        Self::with_policy(config, Arc::new(Unrestricted))
    }

    pub fn with_policy(config: CoordinatorConfig, policy: Arc<dyn AccessPolicy>) -> Self {
        Self {
            store: PresentationStore::new(),
            config,
            policy,
            bus: IntentBus::new(),
            session: None,
            next_token: 1,
        }
    }

    /// Coordinator seeded with a previously saved state.
    ///
    /// A restored panel that the policy no longer allows is dropped.
    pub fn restore(
        config: CoordinatorConfig,
        policy: Arc<dyn AccessPolicy>,
        mut state: PresentationState,
    ) -> Self {
        if state.panel.is_visible() {
            let rejected = match checked_surface(&state.panel) {
                Err(err) => Some(err.to_string()),
                Ok(_) if policy.evaluate(&state.panel) != AccessDecision::Allow => {
                    Some("not allowed for current role".to_string())
                }
                Ok(_) => None,
            };
            if let Some(reason) = rejected {
                warn!(
                    "event=panel_restore module=coordinator status=dropped surface={} reason={}",
                    state.panel, reason
                );
                state.panel = ActivePanel::None;
            }
        }
        let mut coordinator = Self::with_policy(config, policy);
        coordinator.store = PresentationStore::with_state(state);
        if state.panel.is_visible() {
            let token = coordinator.issue_token();
            coordinator.session = Some(PanelSession {
                token,
                panel: state.panel,
                redirected_from: None,
            });
        }
        coordinator
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn policy(&self) -> Arc<dyn AccessPolicy> {
        Arc::clone(&self.policy)
    }

    pub fn state(&self) -> PresentationState {
        self.store.state()
    }

    pub fn active_panel(&self) -> ActivePanel {
        self.store.panel()
    }

    pub fn destination(&self) -> SidebarDestination {
        self.store.destination()
    }

    pub fn revision(&self) -> u64 {
        self.store.revision()
    }

    pub fn session(&self) -> Option<PanelSession> {
        self.session
    }

    pub fn flags(&self) -> PresentationFlags {
        self.store.flags()
    }

    pub fn render_plan(&self) -> RenderPlan {
        multiplexer::plan(&self.store.panel(), &self.config)
    }

    pub fn subscribe(
        &mut self,
        observer: impl FnMut(&PresentationChange) + Send + 'static,
    ) -> ObserverId {
        self.store.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Registry handle to pass down to views.
    pub fn registry(&self) -> ActionRegistry {
        ActionRegistry::attached(self.bus.sender())
    }

    pub fn intent_sender(&self) -> IntentSender {
        self.bus.sender()
    }

    /// Completion handle for the currently open surface.
    pub fn surface_handle(&self) -> Option<SurfaceHandle> {
        self.session
            .map(|session| SurfaceHandle::new(session.token, self.bus.sender()))
    }

    /// Replaces the access policy and closes a panel it no longer allows.
    pub fn set_policy(&mut self, policy: Arc<dyn AccessPolicy>) {
        self.policy = policy;
        let panel = self.store.panel();
        if panel.is_visible() && self.policy.evaluate(&panel) != AccessDecision::Allow {
            info!(
                "event=panel_policy_revoked module=coordinator status=ok surface={}",
                panel
            );
            self.dismiss_all();
        }
    }

    /// Opens `panel`, replacing whatever is open.
    ///
    /// Resolving to the panel that is already open keeps its session and
    /// token; nothing is committed.
    pub fn open(&mut self, panel: ActivePanel) -> Result<PanelSession, PanelError> {
        let surface = checked_surface(&panel)?;
        let (target, redirected_from) = match self.policy.evaluate(&panel) {
            AccessDecision::Allow => (panel, None),
            AccessDecision::Upgrade => (ActivePanel::Upgrade, Some(surface)),
            AccessDecision::Deny => {
                warn!(
                    "event=panel_open module=coordinator status=denied surface={}",
                    surface
                );
                return Err(PanelError::Forbidden(surface));
            }
        };

        if let Some(session) = self.session.filter(|session| session.panel == target) {
            let session = PanelSession {
                redirected_from,
                ..session
            };
            self.session = Some(session);
            return Ok(session);
        }

        self.store.transaction(self.config.animate_transitions, |state| {
            state.panel = ActivePanel::None;
            state.panel = target;
        });
        let token = self.issue_token();
        let session = PanelSession {
            token,
            panel: target,
            redirected_from,
        };
        self.session = Some(session);

        match redirected_from {
            Some(requested) => info!(
                "event=panel_open module=coordinator status=redirected requested={} surface={} token={}",
                requested, target, token
            ),
            None => info!(
                "event=panel_open module=coordinator status=ok surface={} token={}",
                target, token
            ),
        }
        Ok(session)
    }

    /// Opens the editor for `entity`.
    pub fn edit_entity(&mut self, entity: EntityRef) -> Result<PanelSession, PanelError> {
        let panel = ActivePanel::edit(entity)?;
        self.open(panel)
    }

    /// Hides every surface and forgets every subject in one transaction.
    ///
    /// Returns whether anything was visible.
    pub fn dismiss_all(&mut self) -> bool {
        self.session = None;
        let change = self
            .store
            .transaction(self.config.animate_transitions, |state| {
                state.panel = ActivePanel::None;
            });
        if let Some(change) = change {
            debug!(
                "event=panel_dismiss_all module=coordinator status=ok surface={} revision={}",
                change.previous.panel, change.revision
            );
        }
        change.is_some()
    }

    /// Backdrop tap; dismisses only when the current plan allows it.
    pub fn tap_backdrop(&mut self) -> bool {
        match self.render_plan() {
            RenderPlan::Panel {
                backdrop: Some(backdrop),
                ..
            } if backdrop.dismiss_on_tap => self.dismiss_all(),
            _ => false,
        }
    }

    /// Applies a hosted surface's completion.
    pub fn complete(&mut self, token: PanelToken, outcome: SurfaceOutcome) -> CompletionStatus {
        match self.session {
            Some(session) if session.token == token => {
                info!(
                    "event=panel_complete module=coordinator status=ok surface={} outcome={} token={}",
                    session.panel,
                    outcome.as_str(),
                    token
                );
                self.dismiss_all();
                CompletionStatus::Applied
            }
            _ => {
                debug!(
                    "event=panel_complete module=coordinator status=stale outcome={} token={}",
                    outcome.as_str(),
                    token
                );
                CompletionStatus::Stale
            }
        }
    }

    pub fn on_dismiss(&mut self, token: PanelToken) -> CompletionStatus {
        self.complete(token, SurfaceOutcome::Dismissed)
    }

    pub fn on_save(&mut self, token: PanelToken, entity: EntityRef) -> CompletionStatus {
        self.complete(token, SurfaceOutcome::Saved { entity })
    }

    pub fn on_delete(&mut self, token: PanelToken) -> CompletionStatus {
        self.complete(token, SurfaceOutcome::Deleted)
    }

    /// Switches the content pane section and closes any open panel.
    pub fn navigate(&mut self, destination: SidebarDestination) -> bool {
        self.session = None;
        let change = self
            .store
            .transaction(self.config.animate_transitions, |state| {
                state.panel = ActivePanel::None;
                state.destination = destination;
            });
        if change.is_some() {
            debug!(
                "event=sidebar_navigate module=coordinator status=ok destination={}",
                destination.as_str()
            );
        }
        change.is_some()
    }

    /// Applies every queued intent in arrival order.
    pub fn pump(&mut self) -> PumpReport {
        let mut report = PumpReport::default();
        while let Some(intent) = self.bus.try_next() {
            match intent {
                PanelIntent::Open(panel) => match self.open(panel) {
                    Ok(_) => report.opened += 1,
                    Err(err) => {
                        warn!(
                            "event=panel_intent module=coordinator status=rejected reason={}",
                            err
                        );
                        report.rejected += 1;
                    }
                },
                PanelIntent::DismissAll => {
                    self.dismiss_all();
                    report.dismissed += 1;
                }
                PanelIntent::Complete { token, outcome } => match self.complete(token, outcome) {
                    CompletionStatus::Applied => report.completed += 1,
                    CompletionStatus::Stale => report.stale += 1,
                },
                PanelIntent::Navigate(destination) => {
                    self.navigate(destination);
                    report.navigated += 1;
                }
            }
        }
        report
    }

    fn issue_token(&mut self) -> PanelToken {
        let token = PanelToken::from_raw(self.next_token);
        self.next_token += 1;
        token
    }
}

/// Surface of a panel that may be shown; rejects `None` and nil subjects.
fn checked_surface(panel: &ActivePanel) -> Result<SurfaceKind, PanelError> {
    let surface = panel.surface().ok_or(PanelError::NoSurface)?;
    match panel.subject() {
        Some(subject) if subject.id.is_nil() => Err(PanelError::NilSubject(surface)),
        _ => Ok(surface),
    }
}

impl PanelActions for PanelCoordinator {
    type Output = Result<PanelSession, PanelError>;

    fn request(&mut self, panel: ActivePanel) -> Self::Output {
        self.open(panel)
    }
}

impl std::fmt::Debug for PanelCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelCoordinator")
            .field("store", &self.store)
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
