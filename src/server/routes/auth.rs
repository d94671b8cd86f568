//! Authentication endpoints: register, login, current user

use crate::auth::{AuthContext, password};
use crate::core::models::{CorporateOffice, EntityType, Hostel, User};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{HubError, Result};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub entity_type: EntityType,
    pub entity_name: Option<String>,
    pub entity_data: Option<EntityData>,
}

/// Details of the entity created alongside a registration
#[derive(Debug, Deserialize)]
pub struct EntityData {
    pub name: Option<String>,
    pub address: String,
    pub contact_phone: String,
    pub capacity: Option<i32>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// Current-user response, mirroring the request context handlers see
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
    pub permissions: Vec<String>,
    pub is_super_admin: bool,
}

/// Register a new account, creating its entity and assigning the stock role
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    info!("Registration attempt: {}", request.email);

    if state
        .store
        .find_user_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(HubError::conflict("Email already registered"));
    }

    let entity_id = create_entity_for(&state, &request).await?;
    let role_id = default_role_for(&state, request.entity_type).await?;

    let password_hash = password::hash_password(&request.password)?;
    let user = User::new(
        request.email,
        password_hash,
        request.name,
        request.entity_type,
        entity_id,
        role_id,
    );

    let user = state.store.create_user(user).await?;
    let token = state.auth.jwt().create_token(user.id)?;

    info!("Registered {} as {}", user.email, user.entity_type);
    Ok(HttpResponse::Ok().json(ApiResponse::success(AuthResponse { user, token })))
}

/// Create the tenant entity a registration describes, if any
async fn create_entity_for(
    state: &web::Data<AppState>,
    request: &RegisterRequest,
) -> Result<Option<Uuid>> {
    let Some(data) = &request.entity_data else {
        return Ok(None);
    };

    let entity_name = request
        .entity_name
        .clone()
        .or_else(|| data.name.clone())
        .ok_or_else(|| HubError::validation("Entity name is required"))?;

    match request.entity_type {
        EntityType::Hostel => {
            let capacity = data
                .capacity
                .ok_or_else(|| HubError::validation("Hostel capacity is required"))?;
            let hostel = state
                .store
                .create_hostel(Hostel::new(
                    entity_name,
                    data.address.clone(),
                    request.email.clone(),
                    data.contact_phone.clone(),
                    capacity,
                ))
                .await?;
            Ok(Some(hostel.id))
        }
        EntityType::Corporate => {
            let office = state
                .store
                .create_office(CorporateOffice::new(
                    entity_name,
                    data.address.clone(),
                    request.email.clone(),
                    data.contact_phone.clone(),
                ))
                .await?;
            Ok(Some(office.id))
        }
        _ => Ok(None),
    }
}

/// The stock role assigned to fresh accounts of each entity type
async fn default_role_for(
    state: &web::Data<AppState>,
    entity_type: EntityType,
) -> Result<Option<Uuid>> {
    let role_name = match entity_type {
        EntityType::Hostel => "Hostel Owner",
        EntityType::Corporate => "Corporate Admin",
        _ => return Ok(None),
    };

    Ok(state
        .store
        .find_role_by_name(role_name)
        .await?
        .map(|role| role.id))
}

/// Log in with email and password
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    info!("Login attempt: {}", request.email);

    let user = state
        .store
        .find_user_by_email(&request.email)
        .await?
        .ok_or(HubError::InvalidCredentials)?;

    if !password::verify_password(&request.password, &user.password_hash)? {
        warn!("Invalid password for {}", request.email);
        return Err(HubError::InvalidCredentials);
    }

    let token = state.auth.jwt().create_token(user.id)?;

    info!("User logged in: {}", user.email);
    Ok(HttpResponse::Ok().json(ApiResponse::success(AuthResponse { user, token })))
}

/// Return the authenticated user and their derived context
pub async fn me(ctx: AuthContext) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(MeResponse {
        user: ctx.user,
        permissions: ctx.permissions,
        is_super_admin: ctx.is_super_admin,
    })))
}

/// Register authentication routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me)),
    );
}
