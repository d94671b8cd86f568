//! Storage layer for MessHub
//!
//! Persistence is an external collaborator: the guards and handlers depend
//! only on the [`Store`] trait. The bundled [`MemoryStore`] backs the server
//! and the test suite.

pub mod memory;

pub use memory::MemoryStore;

use crate::core::models::{
    CorporateOffice, CorporateOfficeUpdate, EntityRef, Feedback, Hostel, HostelUpdate, MealPrice,
    MealPriceUpdate, MealRecord, Member, MemberUpdate, Payment, Role, RoleUpdate, User, UserUpdate,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Shared handle to a storage backend
pub type DynStore = Arc<dyn Store>;

/// Storage operations the guards and handlers depend on
#[async_trait]
pub trait Store: Send + Sync {
    // Users
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn create_user(&self, user: User) -> Result<User>;
    async fn update_user(&self, id: Uuid, patch: UserUpdate) -> Result<Option<User>>;
    async fn delete_user(&self, id: Uuid) -> Result<bool>;
    async fn list_users(&self) -> Result<Vec<User>>;

    // Roles
    async fn find_role_by_id(&self, id: Uuid) -> Result<Option<Role>>;
    async fn find_role_by_name(&self, name: &str) -> Result<Option<Role>>;
    async fn create_role(&self, role: Role) -> Result<Role>;
    async fn update_role(&self, id: Uuid, patch: RoleUpdate) -> Result<Option<Role>>;
    async fn delete_role(&self, id: Uuid) -> Result<bool>;
    async fn list_roles(&self) -> Result<Vec<Role>>;

    // Hostels
    async fn find_hostel_by_id(&self, id: Uuid) -> Result<Option<Hostel>>;
    async fn create_hostel(&self, hostel: Hostel) -> Result<Hostel>;
    async fn update_hostel(&self, id: Uuid, patch: HostelUpdate) -> Result<Option<Hostel>>;
    async fn delete_hostel(&self, id: Uuid) -> Result<bool>;
    async fn list_hostels(&self) -> Result<Vec<Hostel>>;

    // Corporate offices
    async fn find_office_by_id(&self, id: Uuid) -> Result<Option<CorporateOffice>>;
    async fn create_office(&self, office: CorporateOffice) -> Result<CorporateOffice>;
    async fn update_office(
        &self,
        id: Uuid,
        patch: CorporateOfficeUpdate,
    ) -> Result<Option<CorporateOffice>>;
    async fn delete_office(&self, id: Uuid) -> Result<bool>;
    async fn list_offices(&self) -> Result<Vec<CorporateOffice>>;

    // Members
    async fn find_member_by_id(&self, id: Uuid) -> Result<Option<Member>>;
    async fn create_member(&self, member: Member) -> Result<Member>;
    async fn update_member(&self, id: Uuid, patch: MemberUpdate) -> Result<Option<Member>>;
    async fn delete_member(&self, id: Uuid) -> Result<bool>;
    async fn list_members(&self) -> Result<Vec<Member>>;
    async fn find_members_by_entity(&self, entity: EntityRef) -> Result<Vec<Member>>;

    // Meal records
    async fn create_meal_record(&self, record: MealRecord) -> Result<MealRecord>;
    async fn list_meal_records(&self) -> Result<Vec<MealRecord>>;
    async fn find_meal_records_by_member(&self, member_id: Uuid) -> Result<Vec<MealRecord>>;

    // Payments
    async fn create_payment(&self, payment: Payment) -> Result<Payment>;
    async fn list_payments(&self) -> Result<Vec<Payment>>;
    async fn find_payments_by_entity(&self, entity: EntityRef) -> Result<Vec<Payment>>;

    // Feedback
    async fn create_feedback(&self, feedback: Feedback) -> Result<Feedback>;
    async fn list_feedback(&self) -> Result<Vec<Feedback>>;

    // Meal prices
    async fn find_meal_price_by_id(&self, id: Uuid) -> Result<Option<MealPrice>>;
    async fn create_meal_price(&self, price: MealPrice) -> Result<MealPrice>;
    async fn update_meal_price(
        &self,
        id: Uuid,
        patch: MealPriceUpdate,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Option<MealPrice>>;
    async fn list_meal_prices(&self) -> Result<Vec<MealPrice>>;
    /// The most recently created price record for an entity, if any;
    /// earlier rows are history
    async fn latest_meal_price_for_entity(&self, entity: EntityRef) -> Result<Option<MealPrice>>;
}
