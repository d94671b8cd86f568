//! Meal records and meal pricing

use super::{EntityRef, EntityType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which meal a record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

/// A single meal taken by a member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRecord {
    /// Unique identifier
    pub id: Uuid,
    /// Member who took the meal
    pub member_id: Uuid,
    /// Which meal
    pub meal_type: MealType,
    /// When the meal was taken
    pub date: chrono::DateTime<chrono::Utc>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl MealRecord {
    /// Create a new meal record
    pub fn new(member_id: Uuid, meal_type: MealType, date: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            member_id,
            meal_type,
            date,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Per-entity meal pricing
///
/// Historical rows are retained; only the latest row per entity is offered
/// for editing, and then only inside the rolling edit window (see
/// `auth::edit_window`). `updated_at` stays `None` until the first edit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPrice {
    /// Unique identifier
    pub id: Uuid,
    /// Owning tenant kind
    pub entity_type: EntityType,
    /// Owning tenant identifier
    pub entity_id: Uuid,
    /// Price per breakfast
    pub breakfast_price: f64,
    /// Price per lunch
    pub lunch_price: f64,
    /// Price per dinner
    pub dinner_price: f64,
    /// When these prices take effect
    pub effective_date: chrono::DateTime<chrono::Utc>,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last successful edit, if any
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl MealPrice {
    /// Create a new price record
    pub fn new(
        entity_type: EntityType,
        entity_id: Uuid,
        breakfast_price: f64,
        lunch_price: f64,
        dinner_price: f64,
        effective_date: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            entity_type,
            entity_id,
            breakfast_price,
            lunch_price,
            dinner_price,
            effective_date,
            created_at: chrono::Utc::now(),
            updated_at: None,
        }
    }

    /// The entity that owns this price record
    pub fn entity_ref(&self) -> EntityRef {
        EntityRef::new(self.entity_type, self.entity_id)
    }

    /// The instant the record last changed: the latest edit, or creation
    /// if it has never been edited
    pub fn last_change(&self) -> chrono::DateTime<chrono::Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Partial update for a price record; unset fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MealPriceUpdate {
    pub breakfast_price: Option<f64>,
    pub lunch_price: Option<f64>,
    pub dinner_price: Option<f64>,
    pub effective_date: Option<chrono::DateTime<chrono::Utc>>,
}

impl MealPriceUpdate {
    /// Apply this patch, stamping the edit time
    pub fn apply(self, price: &mut MealPrice, now: chrono::DateTime<chrono::Utc>) {
        if let Some(breakfast_price) = self.breakfast_price {
            price.breakfast_price = breakfast_price;
        }
        if let Some(lunch_price) = self.lunch_price {
            price.lunch_price = lunch_price;
        }
        if let Some(dinner_price) = self.dinner_price {
            price.dinner_price = dinner_price;
        }
        if let Some(effective_date) = self.effective_date {
            price.effective_date = effective_date;
        }
        price.updated_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_change_prefers_updated_at() {
        let mut price = MealPrice::new(
            EntityType::Hostel,
            Uuid::new_v4(),
            5.0,
            8.0,
            7.5,
            chrono::Utc::now(),
        );
        assert_eq!(price.last_change(), price.created_at);

        let later = price.created_at + chrono::Duration::hours(2);
        MealPriceUpdate {
            breakfast_price: Some(6.0),
            ..Default::default()
        }
        .apply(&mut price, later);

        assert_eq!(price.breakfast_price, 6.0);
        assert_eq!(price.last_change(), later);
    }
}
