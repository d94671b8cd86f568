//! In-memory storage backend
//!
//! Concurrent maps keyed by record id. Ships with the three stock roles so a
//! fresh instance can register hostel and corporate accounts immediately.

use super::Store;
use crate::core::models::{
    CorporateOffice, CorporateOfficeUpdate, EntityRef, Feedback, Hostel, HostelUpdate, MealPrice,
    MealPriceUpdate, MealRecord, Member, MemberUpdate, Payment, Role, RoleUpdate, User, UserUpdate,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

/// In-memory storage backed by concurrent maps
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<Uuid, User>,
    roles: DashMap<Uuid, Role>,
    hostels: DashMap<Uuid, Hostel>,
    offices: DashMap<Uuid, CorporateOffice>,
    members: DashMap<Uuid, Member>,
    meal_records: DashMap<Uuid, MealRecord>,
    payments: DashMap<Uuid, Payment>,
    feedback: DashMap<Uuid, Feedback>,
    meal_prices: DashMap<Uuid, MealPrice>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with the stock roles
    pub fn with_default_roles() -> Self {
        let store = Self::new();

        let defaults = [
            Role::new(
                "Super Admin".to_string(),
                Some("Full system access".to_string()),
                vec![
                    "Manage Users".to_string(),
                    "Manage Roles".to_string(),
                    "Manage Hostels".to_string(),
                    "Manage Members".to_string(),
                    "View Reports".to_string(),
                    "Manage Payments".to_string(),
                    "Manage Feedback".to_string(),
                ],
            ),
            Role::new(
                "Hostel Owner".to_string(),
                Some("Hostel management access".to_string()),
                vec![
                    "Manage Members".to_string(),
                    "View Reports".to_string(),
                    "Manage Payments".to_string(),
                ],
            ),
            Role::new(
                "Corporate Admin".to_string(),
                Some("Corporate office management access".to_string()),
                vec!["Manage Members".to_string(), "View Reports".to_string()],
            ),
        ];

        for role in defaults {
            store.roles.insert(role.id, role);
        }

        store
    }
}

#[async_trait]
impl Store for MemoryStore {
    // Users

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn create_user(&self, user: User) -> Result<User> {
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, patch: UserUpdate) -> Result<Option<User>> {
        match self.users.get_mut(&id) {
            Some(mut user) => {
                patch.apply(&mut user);
                Ok(Some(user.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        Ok(self.users.remove(&id).is_some())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.iter().map(|u| u.clone()).collect())
    }

    // Roles

    async fn find_role_by_id(&self, id: Uuid) -> Result<Option<Role>> {
        Ok(self.roles.get(&id).map(|r| r.clone()))
    }

    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>> {
        Ok(self
            .roles
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.clone()))
    }

    async fn create_role(&self, role: Role) -> Result<Role> {
        self.roles.insert(role.id, role.clone());
        Ok(role)
    }

    async fn update_role(&self, id: Uuid, patch: RoleUpdate) -> Result<Option<Role>> {
        match self.roles.get_mut(&id) {
            Some(mut role) => {
                patch.apply(&mut role);
                Ok(Some(role.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_role(&self, id: Uuid) -> Result<bool> {
        Ok(self.roles.remove(&id).is_some())
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        Ok(self.roles.iter().map(|r| r.clone()).collect())
    }

    // Hostels

    async fn find_hostel_by_id(&self, id: Uuid) -> Result<Option<Hostel>> {
        Ok(self.hostels.get(&id).map(|h| h.clone()))
    }

    async fn create_hostel(&self, hostel: Hostel) -> Result<Hostel> {
        self.hostels.insert(hostel.id, hostel.clone());
        Ok(hostel)
    }

    async fn update_hostel(&self, id: Uuid, patch: HostelUpdate) -> Result<Option<Hostel>> {
        match self.hostels.get_mut(&id) {
            Some(mut hostel) => {
                patch.apply(&mut hostel);
                Ok(Some(hostel.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_hostel(&self, id: Uuid) -> Result<bool> {
        Ok(self.hostels.remove(&id).is_some())
    }

    async fn list_hostels(&self) -> Result<Vec<Hostel>> {
        Ok(self.hostels.iter().map(|h| h.clone()).collect())
    }

    // Corporate offices

    async fn find_office_by_id(&self, id: Uuid) -> Result<Option<CorporateOffice>> {
        Ok(self.offices.get(&id).map(|o| o.clone()))
    }

    async fn create_office(&self, office: CorporateOffice) -> Result<CorporateOffice> {
        self.offices.insert(office.id, office.clone());
        Ok(office)
    }

    async fn update_office(
        &self,
        id: Uuid,
        patch: CorporateOfficeUpdate,
    ) -> Result<Option<CorporateOffice>> {
        match self.offices.get_mut(&id) {
            Some(mut office) => {
                patch.apply(&mut office);
                Ok(Some(office.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_office(&self, id: Uuid) -> Result<bool> {
        Ok(self.offices.remove(&id).is_some())
    }

    async fn list_offices(&self) -> Result<Vec<CorporateOffice>> {
        Ok(self.offices.iter().map(|o| o.clone()).collect())
    }

    // Members

    async fn find_member_by_id(&self, id: Uuid) -> Result<Option<Member>> {
        Ok(self.members.get(&id).map(|m| m.clone()))
    }

    async fn create_member(&self, member: Member) -> Result<Member> {
        self.members.insert(member.id, member.clone());
        Ok(member)
    }

    async fn update_member(&self, id: Uuid, patch: MemberUpdate) -> Result<Option<Member>> {
        match self.members.get_mut(&id) {
            Some(mut member) => {
                patch.apply(&mut member);
                Ok(Some(member.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_member(&self, id: Uuid) -> Result<bool> {
        Ok(self.members.remove(&id).is_some())
    }

    async fn list_members(&self) -> Result<Vec<Member>> {
        Ok(self.members.iter().map(|m| m.clone()).collect())
    }

    async fn find_members_by_entity(&self, entity: EntityRef) -> Result<Vec<Member>> {
        Ok(self
            .members
            .iter()
            .filter(|m| m.entity_ref() == entity)
            .map(|m| m.clone())
            .collect())
    }

    // Meal records

    async fn create_meal_record(&self, record: MealRecord) -> Result<MealRecord> {
        self.meal_records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn list_meal_records(&self) -> Result<Vec<MealRecord>> {
        Ok(self.meal_records.iter().map(|r| r.clone()).collect())
    }

    async fn find_meal_records_by_member(&self, member_id: Uuid) -> Result<Vec<MealRecord>> {
        Ok(self
            .meal_records
            .iter()
            .filter(|r| r.member_id == member_id)
            .map(|r| r.clone())
            .collect())
    }

    // Payments

    async fn create_payment(&self, payment: Payment) -> Result<Payment> {
        self.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn list_payments(&self) -> Result<Vec<Payment>> {
        Ok(self.payments.iter().map(|p| p.clone()).collect())
    }

    async fn find_payments_by_entity(&self, entity: EntityRef) -> Result<Vec<Payment>> {
        Ok(self
            .payments
            .iter()
            .filter(|p| p.entity_ref() == entity)
            .map(|p| p.clone())
            .collect())
    }

    // Feedback

    async fn create_feedback(&self, feedback: Feedback) -> Result<Feedback> {
        self.feedback.insert(feedback.id, feedback.clone());
        Ok(feedback)
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>> {
        Ok(self.feedback.iter().map(|f| f.clone()).collect())
    }

    // Meal prices

    async fn find_meal_price_by_id(&self, id: Uuid) -> Result<Option<MealPrice>> {
        Ok(self.meal_prices.get(&id).map(|p| p.clone()))
    }

    async fn create_meal_price(&self, price: MealPrice) -> Result<MealPrice> {
        self.meal_prices.insert(price.id, price.clone());
        Ok(price)
    }

    async fn update_meal_price(
        &self,
        id: Uuid,
        patch: MealPriceUpdate,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<MealPrice>> {
        match self.meal_prices.get_mut(&id) {
            Some(mut price) => {
                patch.apply(&mut price, now);
                Ok(Some(price.clone()))
            }
            None => Ok(None),
        }
    }

    async fn list_meal_prices(&self) -> Result<Vec<MealPrice>> {
        Ok(self.meal_prices.iter().map(|p| p.clone()).collect())
    }

    async fn latest_meal_price_for_entity(&self, entity: EntityRef) -> Result<Option<MealPrice>> {
        Ok(self
            .meal_prices
            .iter()
            .filter(|p| p.entity_ref() == entity)
            .map(|p| p.clone())
            .max_by_key(|p| p.created_at))
    }
}
