//! Domain models for MessHub
//!
//! Every record carries its own identifier and creation timestamp; ownership
//! of tenant-scoped records is expressed by an `(entity_type, entity_id)`
//! pair shared across members, payments, and meal prices.

pub mod billing;
pub mod entity;
pub mod meal;
pub mod member;
pub mod role;
pub mod user;

pub use billing::{Feedback, Payment};
pub use entity::{CorporateOffice, CorporateOfficeUpdate, Hostel, HostelUpdate};
pub use meal::{MealPrice, MealPriceUpdate, MealRecord, MealType};
pub use member::{Member, MemberUpdate};
pub use role::{Permission, Role, RoleUpdate};
pub use user::{User, UserUpdate};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant classification for users and owned records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// Platform-level account, not bound to any tenant
    System,
    /// Hostel mess
    Hostel,
    /// Corporate office mess
    Corporate,
    /// Individual subscriber
    Individual,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::System => write!(f, "System"),
            EntityType::Hostel => write!(f, "Hostel"),
            EntityType::Corporate => write!(f, "Corporate"),
            EntityType::Individual => write!(f, "Individual"),
        }
    }
}

impl std::str::FromStr for EntityType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "System" => Ok(EntityType::System),
            "Hostel" => Ok(EntityType::Hostel),
            "Corporate" => Ok(EntityType::Corporate),
            "Individual" => Ok(EntityType::Individual),
            _ => Err(format!("Invalid entity type: {}", s)),
        }
    }
}

/// Identity of the tenant that owns a scoped record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Tenant kind
    pub entity_type: EntityType,
    /// Tenant identifier
    pub entity_id: Uuid,
}

impl EntityRef {
    /// Create a new entity reference
    pub fn new(entity_type: EntityType, entity_id: Uuid) -> Self {
        Self {
            entity_type,
            entity_id,
        }
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.entity_type, self.entity_id)
    }
}
