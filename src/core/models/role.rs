//! Roles and the permission vocabulary
//!
//! Permissions form a closed vocabulary; roles persist them as strings but
//! creation and update validate every string against [`Permission`], so the
//! resolver and the route declarations cannot drift apart.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named capability gating one authorization decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    ManageUsers,
    ManageRoles,
    ManageHostels,
    ManageMembers,
    ViewReports,
    ManagePayments,
    ManageFeedback,
    ViewOwnMeals,
    ViewAllData,
}

impl Permission {
    /// Every permission in the vocabulary
    pub const ALL: [Permission; 9] = [
        Permission::ManageUsers,
        Permission::ManageRoles,
        Permission::ManageHostels,
        Permission::ManageMembers,
        Permission::ViewReports,
        Permission::ManagePayments,
        Permission::ManageFeedback,
        Permission::ViewOwnMeals,
        Permission::ViewAllData,
    ];

    /// Canonical string form, as persisted on roles
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ManageUsers => "Manage Users",
            Permission::ManageRoles => "Manage Roles",
            Permission::ManageHostels => "Manage Hostels",
            Permission::ManageMembers => "Manage Members",
            Permission::ViewReports => "View Reports",
            Permission::ManagePayments => "Manage Payments",
            Permission::ManageFeedback => "Manage Feedback",
            Permission::ViewOwnMeals => "View Own Meals",
            Permission::ViewAllData => "View All Data",
        }
    }

    /// Validate a list of permission strings against the vocabulary,
    /// returning the offending strings on failure
    pub fn validate_all(raw: &[String]) -> Result<(), Vec<String>> {
        let unknown: Vec<String> = raw
            .iter()
            .filter(|s| s.parse::<Permission>().is_err())
            .cloned()
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(unknown)
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown permission: {}", s))
    }
}

/// Role definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier
    pub id: Uuid,
    /// Role name (unique)
    pub name: String,
    /// Role description
    pub description: Option<String>,
    /// Permissions granted by this role
    pub permissions: Vec<String>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Role {
    /// Create a new role
    pub fn new(name: String, description: Option<String>, permissions: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            permissions,
            created_at: chrono::Utc::now(),
        }
    }

    /// Whether this role grants the given permission
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions.iter().any(|p| p == permission.as_str())
    }
}

/// Partial update for a role; unset fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permissions: Option<Vec<String>>,
}

impl RoleUpdate {
    /// Apply this patch to an existing role
    pub fn apply(self, role: &mut Role) {
        if let Some(name) = self.name {
            role.name = name;
        }
        if let Some(description) = self.description {
            role.description = Some(description);
        }
        if let Some(permissions) = self.permissions {
            role.permissions = permissions;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_round_trip() {
        for permission in Permission::ALL {
            let parsed: Permission = permission.as_str().parse().unwrap();
            assert_eq!(parsed, permission);
        }
    }

    #[test]
    fn test_unknown_permission_rejected() {
        assert!("Manage Everything".parse::<Permission>().is_err());
    }

    #[test]
    fn test_validate_all_reports_unknown_strings() {
        let raw = vec![
            "Manage Users".to_string(),
            "Launch Rockets".to_string(),
            "View Reports".to_string(),
        ];
        let unknown = Permission::validate_all(&raw).unwrap_err();
        assert_eq!(unknown, vec!["Launch Rockets".to_string()]);
    }

    #[test]
    fn test_role_grants() {
        let role = Role::new(
            "Hostel Owner".to_string(),
            Some("Hostel management access".to_string()),
            vec![
                "Manage Members".to_string(),
                "View Reports".to_string(),
                "Manage Payments".to_string(),
            ],
        );

        assert!(role.grants(Permission::ManageMembers));
        assert!(role.grants(Permission::ManagePayments));
        assert!(!role.grants(Permission::ManageUsers));
    }
}
