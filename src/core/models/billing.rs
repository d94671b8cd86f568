//! Payments and feedback

use super::{EntityRef, EntityType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A payment made by or on behalf of a tenant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: Uuid,
    /// Owning tenant kind
    pub entity_type: EntityType,
    /// Owning tenant identifier
    pub entity_id: Uuid,
    /// Amount in the platform currency
    pub amount: f64,
    /// Payment status (e.g. "pending", "completed", "failed")
    pub status: String,
    /// External processor reference, if settled externally
    pub external_ref: Option<String>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Payment {
    /// Create a new payment
    pub fn new(
        entity_type: EntityType,
        entity_id: Uuid,
        amount: f64,
        status: String,
        external_ref: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_type,
            entity_id,
            amount,
            status,
            external_ref,
            created_at: chrono::Utc::now(),
        }
    }

    /// The entity that owns this payment
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.entity_type, self.entity_id)
    }
}

/// Feedback left by a user, optionally attributed to their entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    /// Unique identifier
    pub id: Uuid,
    /// Authoring user
    pub user_id: Uuid,
    /// Tenant kind the feedback concerns, if any
    pub entity_type: Option<EntityType>,
    /// Tenant the feedback concerns, if any
    pub entity_id: Option<Uuid>,
    /// Rating, 1 to 5
    pub rating: i32,
    /// Feedback category (e.g. "Food Quality", "Service")
    pub category: String,
    /// Free-form comment
    pub comment: Option<String>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Feedback {
    /// Create a new feedback record
    pub fn new(
        user_id: Uuid,
        entity_type: Option<EntityType>,
        entity_id: Option<Uuid>,
        rating: i32,
        category: String,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            entity_type,
            entity_id,
            rating,
            category,
            comment,
            created_at: chrono::Utc::now(),
        }
    }
}
