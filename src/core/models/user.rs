//! User accounts
//!
//! A user either belongs to the platform (`System`, no entity binding) or is
//! an admin of exactly one tenant entity. The super-admin flag bypasses all
//! permission and scoping checks downstream.

use super::{EntityRef, EntityType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Email address (unique)
    pub email: String,
    /// Password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Display name
    pub name: String,
    /// Assigned role (if any)
    pub role_id: Option<Uuid>,
    /// Tenant classification
    pub entity_type: EntityType,
    /// Home entity; None for platform-level accounts
    pub entity_id: Option<Uuid>,
    /// Unconditional bypass of permission and scoping checks
    pub is_super_admin: bool,
    /// Linked member record (if the user is also a mess member)
    pub member_id: Option<Uuid>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// Create a new user account
    pub fn new(
        email: String,
        password_hash: String,
        name: String,
        entity_type: EntityType,
        entity_id: Option<Uuid>,
        role_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            name,
            role_id,
            entity_type,
            entity_id,
            is_super_admin: false,
            member_id: None,
            created_at: chrono::Utc::now(),
        }
    }

    /// The entity this user is bound to, if any.
    ///
    /// Platform-level accounts (entity_id unset) are unbound and see the
    /// whole platform, subject to their permission grants.
    pub fn entity_binding(&self) -> Option<EntityRef> {
        self.entity_id
            .map(|id| EntityRef::new(self.entity_type, id))
    }
}

/// Partial update for a user record; unset fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub role_id: Option<Uuid>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<Uuid>,
    pub is_super_admin: Option<bool>,
}

impl UserUpdate {
    /// Apply this patch to an existing user
    pub fn apply(self, user: &mut User) {
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(role_id) = self.role_id {
            user.role_id = Some(role_id);
        }
        if let Some(entity_type) = self.entity_type {
            user.entity_type = entity_type;
        }
        if let Some(entity_id) = self.entity_id {
            user.entity_id = Some(entity_id);
        }
        if let Some(is_super_admin) = self.is_super_admin {
            user.is_super_admin = is_super_admin;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hostel_user(entity_id: Option<Uuid>) -> User {
        User::new(
            "owner@mess.example".to_string(),
            "hashed".to_string(),
            "Owner".to_string(),
            EntityType::Hostel,
            entity_id,
            None,
        )
    }

    #[test]
    fn test_entity_binding_requires_entity_id() {
        let bound = hostel_user(Some(Uuid::new_v4()));
        assert!(bound.entity_binding().is_some());

        let unbound = hostel_user(None);
        assert!(unbound.entity_binding().is_none());
    }

    #[test]
    fn test_new_user_is_not_super_admin() {
        let user = hostel_user(None);
        assert!(!user.is_super_admin);
        assert!(user.role_id.is_none());
    }

    #[test]
    fn test_update_applies_only_set_fields() {
        let mut user = hostel_user(Some(Uuid::new_v4()));
        let original_email = user.email.clone();

        UserUpdate {
            name: Some("Renamed".to_string()),
            ..Default::default()
        }
        .apply(&mut user);

        assert_eq!(user.name, "Renamed");
        assert_eq!(user.email, original_email);
    }
}
