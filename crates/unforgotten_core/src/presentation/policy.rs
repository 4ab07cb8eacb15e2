//! Access gate consulted before a panel opens.
//!
//! # Responsibility
//! - Map member role and subscription state to an open decision.
//! - Keep premium limit rules behind an external oracle trait.
//!
//! # Invariants
//! - Viewers never reach create/edit surfaces.
//! - Member management surfaces require owner/admin.
//! - A premium refusal redirects to the upgrade surface; it is not an error.

use crate::model::entity::EntityKind;
use crate::model::member::MemberRole;
use crate::model::panel::{ActivePanel, SurfaceRole};
use std::sync::Arc;

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Open the upgrade surface instead.
    Upgrade,
    Deny,
}

/// Gate deciding whether a requested panel may open.
pub trait AccessPolicy: Send + Sync {
    fn evaluate(&self, panel: &ActivePanel) -> AccessDecision;
}

/// Subscription limit oracle implemented outside the core.
pub trait PremiumOracle: Send + Sync {
    /// Whether one more entity of `kind` may be created on the current plan.
    fn allows_create(&self, kind: EntityKind) -> bool;
}

/// Policy that allows everything; used when no account context exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl AccessPolicy for Unrestricted {
    fn evaluate(&self, _panel: &ActivePanel) -> AccessDecision {
        AccessDecision::Allow
    }
}

impl PremiumOracle for Unrestricted {
    fn allows_create(&self, _kind: EntityKind) -> bool {
        true
    }
}

/// Role-based policy combined with a premium oracle.
#[derive(Clone)]
pub struct RoleAccessPolicy {
    role: MemberRole,
    premium: Arc<dyn PremiumOracle>,
}

impl RoleAccessPolicy {
    pub fn new(role: MemberRole, premium: Arc<dyn PremiumOracle>) -> Self {
        Self { role, premium }
    }

    /// Role-only policy without subscription limits.
    pub fn unlimited(role: MemberRole) -> Self {
        Self::new(role, Arc::new(Unrestricted))
    }

    pub fn role(&self) -> MemberRole {
        self.role
    }
}

impl AccessPolicy for RoleAccessPolicy {
    fn evaluate(&self, panel: &ActivePanel) -> AccessDecision {
        let Some(surface) = panel.surface() else {
            return AccessDecision::Allow;
        };
        match surface.role() {
            SurfaceRole::Create(kind) => {
                if !self.role.can_write() {
                    AccessDecision::Deny
                } else if !self.premium.allows_create(kind) {
                    AccessDecision::Upgrade
                } else {
                    AccessDecision::Allow
                }
            }
            SurfaceRole::Edit(_) if !self.role.can_write() => AccessDecision::Deny,
            SurfaceRole::Membership if !self.role.can_manage_members() => AccessDecision::Deny,
            SurfaceRole::Settings => match panel.settings_page() {
                Some(page) if page.is_administrative() && !self.role.can_manage_members() => {
                    AccessDecision::Deny
                }
                _ => AccessDecision::Allow,
            },
            _ => AccessDecision::Allow,
        }
    }
}

impl std::fmt::Debug for RoleAccessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleAccessPolicy")
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
