//! Integration tests for the composed guard chain: token verification,
//! identity resolution, permission gates, entity scoping, super-admin
//! protection, and the meal-price edit window, all against the in-memory
//! store.

use actix_web::{App, test, web};
use messhub::auth::{AuthSystem, password};
use messhub::config::{AuthConfig, Config, ScopeConfig};
use messhub::core::models::{EntityType, MealPrice, Member, User};
use messhub::server::middleware::{AuthMiddleware, RequestIdMiddleware};
use messhub::server::routes;
use messhub::server::state::AppState;
use messhub::storage::{MemoryStore, Store};
use std::sync::Arc;
use uuid::Uuid;

fn test_config() -> Config {
    Config {
        auth: AuthConfig {
            jwt_secret: "integration_test_secret_key_32_chars!".to_string(),
            jwt_expiration: 604_800,
            scope: ScopeConfig::default(),
        },
        ..Config::default()
    }
}

struct TestHarness {
    state: AppState,
    store: Arc<MemoryStore>,
}

impl TestHarness {
    fn new() -> Self {
        let config = test_config();
        let store = Arc::new(MemoryStore::with_default_roles());
        let auth = AuthSystem::new(&config.auth, store.clone()).unwrap();
        let state = AppState::new(config, auth, store.clone());
        Self { state, store }
    }

    /// Create a user bound to an entity with the named stock role
    async fn user_with_role(
        &self,
        email: &str,
        role_name: Option<&str>,
        entity_type: EntityType,
        entity_id: Option<Uuid>,
    ) -> (User, String) {
        let role_id = match role_name {
            Some(name) => self
                .store
                .find_role_by_name(name)
                .await
                .unwrap()
                .map(|r| r.id),
            None => None,
        };

        let user = User::new(
            email.to_string(),
            password::hash_password("hunter2!").unwrap(),
            "Test User".to_string(),
            entity_type,
            entity_id,
            role_id,
        );
        let user = self.store.create_user(user).await.unwrap();
        let token = self.state.auth.jwt().create_token(user.id).unwrap();
        (user, token)
    }

    async fn super_admin(&self) -> (User, String) {
        let mut user = User::new(
            "root@mess.example".to_string(),
            password::hash_password("hunter2!").unwrap(),
            "Root".to_string(),
            EntityType::System,
            None,
            None,
        );
        user.is_super_admin = true;
        let user = self.store.create_user(user).await.unwrap();
        let token = self.state.auth.jwt().create_token(user.id).unwrap();
        (user, token)
    }
}

macro_rules! test_app {
    ($harness:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($harness.state.clone()))
                .configure(routes::health::configure)
                .service(
                    web::scope("/api")
                        .wrap(AuthMiddleware)
                        .wrap(RequestIdMiddleware)
                        .configure(routes::auth::configure)
                        .configure(routes::users::configure)
                        .configure(routes::roles::configure)
                        .configure(routes::entities::configure)
                        .configure(routes::members::configure)
                        .configure(routes::meals::configure)
                        .configure(routes::payments::configure)
                        .configure(routes::feedback::configure)
                        .configure(routes::meal_prices::configure),
                ),
        )
        .await
    };
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

async fn error_code<B>(resp: actix_web::dev::ServiceResponse<B>) -> String
where
    B: actix_web::body::MessageBody,
    B::Error: std::fmt::Debug,
{
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["error"]["code"].as_str().unwrap_or_default().to_string()
}

#[actix_web::test]
async fn register_login_me_round_trip() {
    let harness = TestHarness::new();
    let app = test_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({
            "name": "Asha",
            "email": "asha@mess.example",
            "password": "s3cret-pass",
            "entity_type": "Hostel",
            "entity_name": "Sunrise Hostel",
            "entity_data": {
                "address": "12 Hill Road",
                "contact_phone": "555-0100",
                "capacity": 80
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert!(body["data"]["user"]["entity_id"].is_string());
    // Password hashes never leave the server
    assert!(body["data"]["user"].get("password_hash").is_none());

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({
            "email": "asha@mess.example",
            "password": "s3cret-pass"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let (name, value) = bearer(&token);
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((name, value))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    // Registration assigned the stock Hostel Owner role
    let permissions = body["data"]["permissions"].as_array().unwrap();
    assert!(permissions.iter().any(|p| p == "Manage Members"));
    assert_eq!(body["data"]["is_super_admin"], false);
}

#[actix_web::test]
async fn wrong_password_is_rejected() {
    let harness = TestHarness::new();
    harness
        .user_with_role("owner@mess.example", None, EntityType::Hostel, None)
        .await;
    let app = test_app!(harness);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({
            "email": "owner@mess.example",
            "password": "not-the-password"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn missing_and_invalid_tokens_are_indistinguishable() {
    let harness = TestHarness::new();
    let app = test_app!(harness);

    let req = test::TestRequest::get().uri("/api/users").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(error_code(resp).await, "UNAUTHENTICATED");

    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header(("Authorization", "Bearer not.a.real.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(error_code(resp).await, "UNAUTHENTICATED");
}

#[actix_web::test]
async fn token_for_deleted_user_fails_closed() {
    let harness = TestHarness::new();
    let (user, token) = harness
        .user_with_role("ghost@mess.example", None, EntityType::Hostel, None)
        .await;
    harness.store.delete_user(user.id).await.unwrap();
    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header((name, value))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(error_code(resp).await, "UNAUTHENTICATED");
}

#[actix_web::test]
async fn permission_gate_denies_missing_grant() {
    let harness = TestHarness::new();
    // Hostel Owner holds Manage Members but not Manage Users
    let (_user, token) = harness
        .user_with_role(
            "owner@mess.example",
            Some("Hostel Owner"),
            EntityType::Hostel,
            Some(Uuid::new_v4()),
        )
        .await;
    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::get()
        .uri("/api/users")
        .insert_header((name, value))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    assert_eq!(error_code(resp).await, "FORBIDDEN_MISSING_PERMISSION");
}

#[actix_web::test]
async fn role_less_user_is_denied_with_no_role() {
    let harness = TestHarness::new();
    let (_user, token) = harness
        .user_with_role("norole@mess.example", None, EntityType::Hostel, None)
        .await;
    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::get()
        .uri("/api/members")
        .insert_header((name, value))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    assert_eq!(error_code(resp).await, "FORBIDDEN_NO_ROLE");
}

#[actix_web::test]
async fn super_admin_bypasses_every_gate() {
    let harness = TestHarness::new();
    let (_root, token) = harness.super_admin().await;
    let app = test_app!(harness);

    for uri in [
        "/api/users",
        "/api/roles",
        "/api/hostels",
        "/api/members",
        "/api/meals",
        "/api/payments",
        "/api/feedback",
        "/api/meal-prices",
    ] {
        let (name, value) = bearer(&token);
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((name, value))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success(), "super admin denied on {uri}");
    }
}

#[actix_web::test]
async fn cross_entity_member_update_is_denied() {
    let harness = TestHarness::new();
    let h1 = Uuid::new_v4();
    let h2 = Uuid::new_v4();

    let (_owner, token) = harness
        .user_with_role(
            "owner-h1@mess.example",
            Some("Hostel Owner"),
            EntityType::Hostel,
            Some(h1),
        )
        .await;

    // A member that belongs to the other hostel
    let foreign = harness
        .store
        .create_member(Member::new(
            "Ravi".to_string(),
            "ravi@mess.example".to_string(),
            None,
            EntityType::Hostel,
            h2,
            None,
        ))
        .await
        .unwrap();

    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::put()
        .uri(&format!("/api/members/{}", foreign.id))
        .insert_header((name, value))
        .set_json(serde_json::json!({ "name": "Hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    assert_eq!(error_code(resp).await, "FORBIDDEN_ENTITY_MISMATCH");
}

#[actix_web::test]
async fn member_list_narrows_to_own_entity() {
    let harness = TestHarness::new();
    let h1 = Uuid::new_v4();
    let h2 = Uuid::new_v4();

    for (name, entity) in [("own-1", h1), ("own-2", h1), ("foreign", h2)] {
        harness
            .store
            .create_member(Member::new(
                name.to_string(),
                format!("{name}@mess.example"),
                None,
                EntityType::Hostel,
                entity,
                None,
            ))
            .await
            .unwrap();
    }

    let (_owner, token) = harness
        .user_with_role(
            "owner-h1@mess.example",
            Some("Hostel Owner"),
            EntityType::Hostel,
            Some(h1),
        )
        .await;
    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::get()
        .uri("/api/members")
        .insert_header((name, value))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    let members = body["data"].as_array().unwrap();
    // Silently narrowed: the foreign member is simply absent
    assert_eq!(members.len(), 2);
}

#[actix_web::test]
async fn non_super_admin_cannot_delete_super_admin() {
    let harness = TestHarness::new();
    let (root, _root_token) = harness.super_admin().await;

    // Super Admin stock role carries Manage Users; the flag on the target
    // still wins
    let (_actor, token) = harness
        .user_with_role(
            "usermanager@mess.example",
            Some("Super Admin"),
            EntityType::System,
            None,
        )
        .await;
    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", root.id))
        .insert_header((name, value))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    assert_eq!(error_code(resp).await, "FORBIDDEN_SUPER_ADMIN_PROTECTED");
}

#[actix_web::test]
async fn role_creation_rejects_unknown_permission_strings() {
    let harness = TestHarness::new();
    let (_root, token) = harness.super_admin().await;
    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::post()
        .uri("/api/roles")
        .insert_header((name, value))
        .set_json(serde_json::json!({
            "name": "Auditor",
            "permissions": ["View Reports", "Audit Everything"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    assert_eq!(error_code(resp).await, "VALIDATION_ERROR");
}

#[actix_web::test]
async fn meal_price_edit_inside_window_reports_fresh_window() {
    let harness = TestHarness::new();
    let h1 = Uuid::new_v4();
    let (_owner, token) = harness
        .user_with_role(
            "owner@mess.example",
            Some("Hostel Owner"),
            EntityType::Hostel,
            Some(h1),
        )
        .await;

    // Created an hour ago, never edited
    let mut price = MealPrice::new(
        EntityType::Hostel,
        h1,
        5.0,
        8.0,
        7.5,
        chrono::Utc::now(),
    );
    price.created_at = chrono::Utc::now() - chrono::Duration::hours(1);
    let price = harness.store.create_meal_price(price).await.unwrap();

    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::put()
        .uri(&format!("/api/meal-prices/{}", price.id))
        .insert_header((name, value))
        .set_json(serde_json::json!({ "breakfast_price": 6.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["breakfast_price"], 6.0);
    // The edit opened a fresh ~6h window
    assert_eq!(
        body["data"]["remaining_edit_time_ms"].as_i64().unwrap(),
        6 * 60 * 60 * 1000
    );
}

#[actix_web::test]
async fn meal_price_edit_after_window_is_locked() {
    let harness = TestHarness::new();
    let h1 = Uuid::new_v4();
    let (_owner, token) = harness
        .user_with_role(
            "owner@mess.example",
            Some("Hostel Owner"),
            EntityType::Hostel,
            Some(h1),
        )
        .await;

    // Created seven hours ago, never edited
    let mut price = MealPrice::new(
        EntityType::Hostel,
        h1,
        5.0,
        8.0,
        7.5,
        chrono::Utc::now(),
    );
    price.created_at = chrono::Utc::now() - chrono::Duration::hours(7);
    let price = harness.store.create_meal_price(price).await.unwrap();

    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::put()
        .uri(&format!("/api/meal-prices/{}", price.id))
        .insert_header((name, value))
        .set_json(serde_json::json!({ "breakfast_price": 6.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "EDIT_WINDOW_EXPIRED");
    assert_eq!(body["error"]["details"]["remaining_ms"], 0);

    // Locked records remain readable
    let stored = harness
        .store
        .find_meal_price_by_id(price.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.breakfast_price, 5.0);
}

#[actix_web::test]
async fn meal_price_update_checks_ownership_before_window() {
    let harness = TestHarness::new();
    let h1 = Uuid::new_v4();
    let h2 = Uuid::new_v4();
    let (_owner, token) = harness
        .user_with_role(
            "owner-h1@mess.example",
            Some("Hostel Owner"),
            EntityType::Hostel,
            Some(h1),
        )
        .await;

    let foreign = harness
        .store
        .create_meal_price(MealPrice::new(
            EntityType::Hostel,
            h2,
            5.0,
            8.0,
            7.5,
            chrono::Utc::now(),
        ))
        .await
        .unwrap();

    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::put()
        .uri(&format!("/api/meal-prices/{}", foreign.id))
        .insert_header((name, value))
        .set_json(serde_json::json!({ "breakfast_price": 0.01 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);
    assert_eq!(error_code(resp).await, "FORBIDDEN_ENTITY_MISMATCH");
}

#[actix_web::test]
async fn bound_actor_sees_only_own_latest_meal_price() {
    let harness = TestHarness::new();
    let h1 = Uuid::new_v4();
    let (_owner, token) = harness
        .user_with_role(
            "owner@mess.example",
            Some("Hostel Owner"),
            EntityType::Hostel,
            Some(h1),
        )
        .await;

    let mut old = MealPrice::new(EntityType::Hostel, h1, 4.0, 6.0, 5.0, chrono::Utc::now());
    old.created_at = chrono::Utc::now() - chrono::Duration::days(30);
    harness.store.create_meal_price(old).await.unwrap();

    let newest = harness
        .store
        .create_meal_price(MealPrice::new(
            EntityType::Hostel,
            h1,
            5.0,
            8.0,
            7.5,
            chrono::Utc::now(),
        ))
        .await
        .unwrap();

    // Another entity's prices are invisible
    harness
        .store
        .create_meal_price(MealPrice::new(
            EntityType::Corporate,
            Uuid::new_v4(),
            9.0,
            12.0,
            11.0,
            chrono::Utc::now(),
        ))
        .await
        .unwrap();

    let app = test_app!(harness);

    let (name, value) = bearer(&token);
    let req = test::TestRequest::get()
        .uri("/api/meal-prices")
        .insert_header((name, value))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"], serde_json::json!(newest.id));
}
