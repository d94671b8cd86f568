//! Permission resolution
//!
//! Pure predicates over a resolved user and their (already loaded) role.
//! The super-admin flag short-circuits everything with the universal grant;
//! otherwise permissions come from the role's permission list. Gates must
//! run before the handler does any state-mutating work.

use crate::core::models::{Permission, Role, User};
use crate::utils::error::{HubError, Result};
use tracing::debug;

/// The universal grant held by super admins
pub const WILDCARD: &str = "*";

/// Effective permission set for a resolved user: `{*}` for super admins,
/// the role's permission list otherwise, empty when no role resolves.
pub fn effective_permissions(user: &User, role: Option<&Role>) -> Vec<String> {
    if user.is_super_admin {
        return vec![WILDCARD.to_string()];
    }
    role.map(|r| r.permissions.clone()).unwrap_or_default()
}

/// Authorize a user for one required permission.
///
/// Deny reasons, in precedence order: no role assigned, role missing from
/// storage, permission not granted. Super admins always pass.
pub fn authorize(user: &User, role: Option<&Role>, required: Permission) -> Result<()> {
    if user.is_super_admin {
        return Ok(());
    }

    if user.role_id.is_none() {
        debug!("Denying {}: no role assigned", user.email);
        return Err(HubError::NoRole);
    }

    let role = role.ok_or(HubError::InvalidRole)?;

    if role.grants(required) {
        Ok(())
    } else {
        debug!("Denying {}: missing {}", user.email, required);
        Err(HubError::missing_permission(required.as_str()))
    }
}

/// Authorize a user holding any of the listed permissions.
///
/// An empty requirement list always allows; such routes are public within
/// authentication.
pub fn authorize_any(user: &User, role: Option<&Role>, required: &[Permission]) -> Result<()> {
    if required.is_empty() || user.is_super_admin {
        return Ok(());
    }

    if user.role_id.is_none() {
        return Err(HubError::NoRole);
    }

    let role = role.ok_or(HubError::InvalidRole)?;

    if required.iter().any(|p| role.grants(*p)) {
        Ok(())
    } else {
        let wanted = required
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(" | ");
        debug!("Denying {}: missing any of {}", user.email, wanted);
        Err(HubError::missing_permission(wanted))
    }
}
