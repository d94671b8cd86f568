//! Authentication and authorization
//!
//! The guard chain: a bearer token resolves to a user exactly once per
//! request ([`AuthSystem::authenticate`]), producing an [`AuthContext`] that
//! downstream checks read instead of re-fetching. Permission gates
//! ([`AuthSystem::require`]) run before handlers mutate anything; scoped
//! resources add an ownership check; meal pricing adds the edit window.
//!
//! Every storage failure inside a guard maps to a deny
//! (`INTERNAL_CHECK_FAILURE`), never a pass-through.

pub mod edit_window;
pub mod jwt;
pub mod password;
pub mod rbac;
pub mod scope;

pub use scope::{ScopeGuard, UnboundActorPolicy, Visibility};

use crate::config::AuthConfig;
use crate::core::models::{EntityRef, Permission, Role, User};
use crate::storage::DynStore;
use crate::utils::error::{HubError, Result};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Request-scoped authorization context
///
/// Built once per request after the credential is verified; carries the
/// resolved user, their role (if one resolved), and the derived permission
/// set so no downstream check repeats a lookup.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authenticated user id
    pub user_id: Uuid,
    /// Resolved user record
    pub user: User,
    /// The user's role, when one is assigned and exists
    pub role: Option<Role>,
    /// Effective permission set; `["*"]` for super admins
    pub permissions: Vec<String>,
    /// Whether the actor bypasses permission and scoping checks
    pub is_super_admin: bool,
}

/// Main authentication and authorization system
#[derive(Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    config: Arc<AuthConfig>,
    /// Storage backend for user and role lookups
    store: DynStore,
    /// JWT handler
    jwt: Arc<jwt::JwtHandler>,
    /// Entity scoping guard
    scope: ScopeGuard,
}

impl AuthSystem {
    /// Create a new authentication system from validated configuration
    pub fn new(config: &AuthConfig, store: DynStore) -> Result<Self> {
        info!("Initializing authentication system");

        // The secret was validated at config load; re-check here so the
        // system cannot be constructed around an unvalidated config.
        config
            .validate()
            .map_err(HubError::config)?;

        let jwt = Arc::new(jwt::JwtHandler::new(config));
        let scope = ScopeGuard::new(&config.scope);

        Ok(Self {
            config: Arc::new(config.clone()),
            store,
            jwt,
            scope,
        })
    }

    /// Resolve a bearer token to an [`AuthContext`].
    ///
    /// A bad token and a token whose user no longer exists are
    /// indistinguishable: both fail `Unauthenticated`. The user's role is
    /// loaded at most once here and never again downstream.
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext> {
        let user_id = self
            .jwt
            .verify_token(token)
            .ok_or(HubError::Unauthenticated)?;

        let user = self
            .store
            .find_user_by_id(user_id)
            .await
            .map_err(|e| HubError::check_failure(format!("user lookup failed: {}", e)))?
            .ok_or(HubError::Unauthenticated)?;

        let role = match user.role_id {
            Some(role_id) => self
                .store
                .find_role_by_id(role_id)
                .await
                .map_err(|e| HubError::check_failure(format!("role lookup failed: {}", e)))?,
            None => None,
        };

        let permissions = rbac::effective_permissions(&user, role.as_ref());
        let is_super_admin = user.is_super_admin;

        debug!("Authenticated {} ({} permissions)", user.email, permissions.len());

        Ok(AuthContext {
            user_id,
            user,
            role,
            permissions,
            is_super_admin,
        })
    }

    /// Gate: the actor must hold `permission`
    pub fn require(&self, ctx: &AuthContext, permission: Permission) -> Result<()> {
        rbac::authorize(&ctx.user, ctx.role.as_ref(), permission)
    }

    /// Gate: the actor must hold any of `permissions` (empty always allows)
    pub fn require_any(&self, ctx: &AuthContext, permissions: &[Permission]) -> Result<()> {
        rbac::authorize_any(&ctx.user, ctx.role.as_ref(), permissions)
    }

    /// Gate: the actor must own the entity that owns the resource
    pub fn check_ownership(&self, ctx: &AuthContext, resource: EntityRef) -> Result<()> {
        self.scope.check_ownership(&ctx.user, resource)
    }

    /// What the actor may see when listing scoped records
    pub fn visible_scope(&self, ctx: &AuthContext) -> Visibility {
        self.scope.visible_scope(&ctx.user)
    }

    /// Gate for user mutations: loads the target and refuses to let a
    /// non-super-admin touch a super admin. Returns the target so the
    /// handler does not fetch it twice.
    pub async fn guard_user_mutation(&self, ctx: &AuthContext, target_id: Uuid) -> Result<User> {
        let target = self
            .store
            .find_user_by_id(target_id)
            .await
            .map_err(|e| HubError::check_failure(format!("target user lookup failed: {}", e)))?
            .ok_or_else(|| HubError::not_found("User not found"))?;

        scope::protect_super_admin(&ctx.user, &target)?;
        Ok(target)
    }

    /// Get the JWT handler
    pub fn jwt(&self) -> &jwt::JwtHandler {
        &self.jwt
    }

    /// Get the entity scoping guard
    pub fn scope(&self) -> &ScopeGuard {
        &self.scope
    }

    /// Get the authentication configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScopeConfig;
    use crate::core::models::EntityType;
    use crate::storage::{MemoryStore, Store};

    fn test_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test_secret_key_for_testing_only_32ch".to_string(),
            jwt_expiration: 604_800,
            scope: ScopeConfig::default(),
        }
    }

    async fn system_with_user(user: User) -> (AuthSystem, String) {
        let store = Arc::new(MemoryStore::with_default_roles());
        store.create_user(user.clone()).await.unwrap();

        let system = AuthSystem::new(&test_config(), store).unwrap();
        let token = system.jwt().create_token(user.id).unwrap();
        (system, token)
    }

    fn plain_user() -> User {
        User::new(
            "owner@mess.example".to_string(),
            "hashed".to_string(),
            "Owner".to_string(),
            EntityType::Hostel,
            Some(Uuid::new_v4()),
            None,
        )
    }

    #[tokio::test]
    async fn test_authenticate_builds_context() {
        let user = plain_user();
        let (system, token) = system_with_user(user.clone()).await;

        let ctx = system.authenticate(&token).await.unwrap();
        assert_eq!(ctx.user_id, user.id);
        assert_eq!(ctx.user.email, user.email);
        assert!(!ctx.is_super_admin);
        assert!(ctx.permissions.is_empty());
    }

    #[tokio::test]
    async fn test_authenticate_resolves_role_permissions() {
        let store = Arc::new(MemoryStore::with_default_roles());
        let role = store
            .find_role_by_name("Hostel Owner")
            .await
            .unwrap()
            .unwrap();

        let mut user = plain_user();
        user.role_id = Some(role.id);
        store.create_user(user.clone()).await.unwrap();

        let system = AuthSystem::new(&test_config(), store).unwrap();
        let token = system.jwt().create_token(user.id).unwrap();

        let ctx = system.authenticate(&token).await.unwrap();
        assert_eq!(ctx.permissions.len(), 3);
        assert!(system.require(&ctx, Permission::ManageMembers).is_ok());
        assert!(system.require(&ctx, Permission::ManageUsers).is_err());
    }

    #[tokio::test]
    async fn test_bad_token_and_missing_user_look_identical() {
        let (system, _token) = system_with_user(plain_user()).await;

        let garbage = system.authenticate("garbage.token.here").await.unwrap_err();
        assert!(matches!(garbage, HubError::Unauthenticated));

        // Valid token for a user that was never stored
        let orphan_token = system.jwt().create_token(Uuid::new_v4()).unwrap();
        let orphan = system.authenticate(&orphan_token).await.unwrap_err();
        assert!(matches!(orphan, HubError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_super_admin_context() {
        let mut user = plain_user();
        user.is_super_admin = true;
        let (system, token) = system_with_user(user).await;

        let ctx = system.authenticate(&token).await.unwrap();
        assert!(ctx.is_super_admin);
        assert_eq!(ctx.permissions, vec!["*".to_string()]);
        for permission in Permission::ALL {
            assert!(system.require(&ctx, permission).is_ok());
        }
    }

    #[tokio::test]
    async fn test_guard_user_mutation_protects_super_admin() {
        let store = Arc::new(MemoryStore::with_default_roles());

        let mut target = plain_user();
        target.email = "root@mess.example".to_string();
        target.is_super_admin = true;
        store.create_user(target.clone()).await.unwrap();

        let actor = plain_user();
        store.create_user(actor.clone()).await.unwrap();

        let system = AuthSystem::new(&test_config(), store).unwrap();
        let token = system.jwt().create_token(actor.id).unwrap();
        let ctx = system.authenticate(&token).await.unwrap();

        let err = system
            .guard_user_mutation(&ctx, target.id)
            .await
            .unwrap_err();
        assert!(matches!(err, HubError::SuperAdminProtected));
    }

    /// A store whose user lookups always fail, for fail-closed checks
    struct FailingStore;

    #[async_trait::async_trait]
    impl Store for FailingStore {
        async fn find_user_by_id(&self, _id: Uuid) -> Result<Option<User>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn find_user_by_email(&self, _email: &str) -> Result<Option<User>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn create_user(&self, _user: User) -> Result<User> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn update_user(
            &self,
            _id: Uuid,
            _patch: crate::core::models::UserUpdate,
        ) -> Result<Option<User>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn delete_user(&self, _id: Uuid) -> Result<bool> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn list_users(&self) -> Result<Vec<User>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn find_role_by_id(&self, _id: Uuid) -> Result<Option<Role>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn find_role_by_name(&self, _name: &str) -> Result<Option<Role>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn create_role(&self, _role: Role) -> Result<Role> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn update_role(
            &self,
            _id: Uuid,
            _patch: crate::core::models::RoleUpdate,
        ) -> Result<Option<Role>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn delete_role(&self, _id: Uuid) -> Result<bool> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn list_roles(&self) -> Result<Vec<Role>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn find_hostel_by_id(
            &self,
            _id: Uuid,
        ) -> Result<Option<crate::core::models::Hostel>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn create_hostel(
            &self,
            _hostel: crate::core::models::Hostel,
        ) -> Result<crate::core::models::Hostel> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn update_hostel(
            &self,
            _id: Uuid,
            _patch: crate::core::models::HostelUpdate,
        ) -> Result<Option<crate::core::models::Hostel>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn delete_hostel(&self, _id: Uuid) -> Result<bool> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn list_hostels(&self) -> Result<Vec<crate::core::models::Hostel>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn find_office_by_id(
            &self,
            _id: Uuid,
        ) -> Result<Option<crate::core::models::CorporateOffice>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn create_office(
            &self,
            _office: crate::core::models::CorporateOffice,
        ) -> Result<crate::core::models::CorporateOffice> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn update_office(
            &self,
            _id: Uuid,
            _patch: crate::core::models::CorporateOfficeUpdate,
        ) -> Result<Option<crate::core::models::CorporateOffice>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn delete_office(&self, _id: Uuid) -> Result<bool> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn list_offices(&self) -> Result<Vec<crate::core::models::CorporateOffice>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn find_member_by_id(
            &self,
            _id: Uuid,
        ) -> Result<Option<crate::core::models::Member>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn create_member(
            &self,
            _member: crate::core::models::Member,
        ) -> Result<crate::core::models::Member> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn update_member(
            &self,
            _id: Uuid,
            _patch: crate::core::models::MemberUpdate,
        ) -> Result<Option<crate::core::models::Member>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn delete_member(&self, _id: Uuid) -> Result<bool> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn list_members(&self) -> Result<Vec<crate::core::models::Member>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn find_members_by_entity(
            &self,
            _entity: EntityRef,
        ) -> Result<Vec<crate::core::models::Member>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn create_meal_record(
            &self,
            _record: crate::core::models::MealRecord,
        ) -> Result<crate::core::models::MealRecord> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn list_meal_records(&self) -> Result<Vec<crate::core::models::MealRecord>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn find_meal_records_by_member(
            &self,
            _member_id: Uuid,
        ) -> Result<Vec<crate::core::models::MealRecord>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn create_payment(
            &self,
            _payment: crate::core::models::Payment,
        ) -> Result<crate::core::models::Payment> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn list_payments(&self) -> Result<Vec<crate::core::models::Payment>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn find_payments_by_entity(
            &self,
            _entity: EntityRef,
        ) -> Result<Vec<crate::core::models::Payment>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn create_feedback(
            &self,
            _feedback: crate::core::models::Feedback,
        ) -> Result<crate::core::models::Feedback> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn list_feedback(&self) -> Result<Vec<crate::core::models::Feedback>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn find_meal_price_by_id(
            &self,
            _id: Uuid,
        ) -> Result<Option<crate::core::models::MealPrice>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn create_meal_price(
            &self,
            _price: crate::core::models::MealPrice,
        ) -> Result<crate::core::models::MealPrice> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn update_meal_price(
            &self,
            _id: Uuid,
            _patch: crate::core::models::MealPriceUpdate,
            _now: chrono::DateTime<chrono::Utc>,
        ) -> Result<Option<crate::core::models::MealPrice>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn list_meal_prices(&self) -> Result<Vec<crate::core::models::MealPrice>> {
            Err(HubError::internal("storage unavailable"))
        }
        async fn latest_meal_price_for_entity(
            &self,
            _entity: EntityRef,
        ) -> Result<Option<crate::core::models::MealPrice>> {
            Err(HubError::internal("storage unavailable"))
        }
    }

    #[tokio::test]
    async fn test_storage_failure_denies_not_allows() {
        let system = AuthSystem::new(&test_config(), Arc::new(FailingStore)).unwrap();
        let token = system.jwt().create_token(Uuid::new_v4()).unwrap();

        let err = system.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, HubError::CheckFailure(_)));
        assert_eq!(err.code(), "INTERNAL_CHECK_FAILURE");
    }
}
