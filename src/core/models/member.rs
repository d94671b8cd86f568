//! Mess members

use super::{EntityRef, EntityType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member of a hostel or corporate mess
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier
    pub id: Uuid,
    /// Member name
    pub name: String,
    /// Email address
    pub email: String,
    /// Phone number
    pub phone: Option<String>,
    /// Owning tenant kind
    pub entity_type: EntityType,
    /// Owning tenant identifier
    pub entity_id: Uuid,
    /// Meal plan subscription (e.g. "Full Board", "Lunch Only")
    pub meal_plan_type: Option<String>,
    /// Whether the membership is active
    pub is_active: bool,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Member {
    /// Create a new member
    pub fn new(
        name: String,
        email: String,
        phone: Option<String>,
        entity_type: EntityType,
        entity_id: Uuid,
        meal_plan_type: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            entity_type,
            entity_id,
            meal_plan_type,
            is_active: true,
            created_at: chrono::Utc::now(),
        }
    }

    /// The entity that owns this member
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.entity_type, self.entity_id)
    }
}

/// Partial update for a member; unset fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub meal_plan_type: Option<String>,
    pub is_active: Option<bool>,
}

impl MemberUpdate {
    /// Apply this patch to an existing member
    pub fn apply(self, member: &mut Member) {
        if let Some(name) = self.name {
            member.name = name;
        }
        if let Some(email) = self.email {
            member.email = email;
        }
        if let Some(phone) = self.phone {
            member.phone = Some(phone);
        }
        if let Some(meal_plan_type) = self.meal_plan_type {
            member.meal_plan_type = Some(meal_plan_type);
        }
        if let Some(is_active) = self.is_active {
            member.is_active = is_active;
        }
    }
}
