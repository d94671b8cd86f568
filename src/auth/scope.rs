//! Entity scoping guard
//!
//! Tenant isolation: a non-super-admin actor bound to an entity may only
//! touch records owned by that entity. Reads narrow silently (the actor just
//! sees less); writes against a named resource deny explicitly.
//!
//! Actors with no entity binding are governed by an explicit policy rather
//! than a silent fallthrough; the default keeps them permission-gated only.

use crate::config::ScopeConfig;
use crate::core::models::{EntityRef, User};
use crate::utils::error::{HubError, Result};
use tracing::debug;

/// What an actor may see when listing scoped records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Actor sees every record
    All,
    /// Actor sees only records owned by this entity
    Entity(EntityRef),
    /// Actor sees no scoped records at all
    Nothing,
}

/// Policy for authenticated actors without an entity binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnboundActorPolicy {
    /// Fall through to the permission check's decision
    Allow,
    /// Deny access to every scoped resource
    Deny,
}

/// Entity scoping guard
#[derive(Debug, Clone, Copy)]
pub struct ScopeGuard {
    policy: UnboundActorPolicy,
}

impl ScopeGuard {
    /// Create a guard from configuration
    pub fn new(config: &ScopeConfig) -> Self {
        let policy = if config.allow_unbound_actors {
            UnboundActorPolicy::Allow
        } else {
            UnboundActorPolicy::Deny
        };
        Self { policy }
    }

    /// The configured unbound-actor policy
    pub fn policy(&self) -> UnboundActorPolicy {
        self.policy
    }

    /// Check that the actor may touch a record owned by `resource`.
    ///
    /// Super admins always pass. Bound actors pass iff the owner matches
    /// their own entity exactly. Unbound actors follow the configured
    /// policy.
    pub fn check_ownership(&self, actor: &User, resource: EntityRef) -> Result<()> {
        if actor.is_super_admin {
            return Ok(());
        }

        match actor.entity_binding() {
            Some(own) if own == resource => Ok(()),
            Some(own) => {
                debug!(
                    "Entity mismatch: actor {} bound to {}, resource owned by {}",
                    actor.email, own, resource
                );
                Err(HubError::EntityMismatch)
            }
            None => match self.policy {
                UnboundActorPolicy::Allow => Ok(()),
                UnboundActorPolicy::Deny => Err(HubError::EntityMismatch),
            },
        }
    }

    /// What the actor may see when listing scoped records.
    ///
    /// List handlers narrow their result set to this scope instead of
    /// erroring. Unbound actors see everything under the allow policy and
    /// nothing under the deny policy.
    pub fn visible_scope(&self, actor: &User) -> Visibility {
        if actor.is_super_admin {
            return Visibility::All;
        }
        match actor.entity_binding() {
            Some(own) => Visibility::Entity(own),
            None => match self.policy {
                UnboundActorPolicy::Allow => Visibility::All,
                UnboundActorPolicy::Deny => Visibility::Nothing,
            },
        }
    }
}

/// A non-super-admin actor may never mutate a super admin's user record,
/// regardless of permission grants.
pub fn protect_super_admin(actor: &User, target: &User) -> Result<()> {
    if target.is_super_admin && !actor.is_super_admin {
        debug!(
            "Blocking {} from modifying super admin {}",
            actor.email, target.email
        );
        return Err(HubError::SuperAdminProtected);
    }
    Ok(())
}
