//! User management endpoints
//!
//! Gated by `Manage Users`; mutations additionally pass the super-admin
//! protection guard before touching the target record.

use crate::auth::{AuthContext, password};
use crate::core::models::{EntityType, Permission, UserUpdate};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{HubError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// User update request; a raw password is hashed before storage
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role_id: Option<Uuid>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<Uuid>,
}

/// List all users
pub async fn list_users(state: web::Data<AppState>, ctx: AuthContext) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageUsers)?;

    let users = state.store.list_users().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(users)))
}

/// Fetch a single user
pub async fn get_user(
    state: web::Data<AppState>,
    _ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let user = state
        .store
        .find_user_by_id(path.into_inner())
        .await?
        .ok_or_else(|| HubError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Update a user
pub async fn update_user(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageUsers)?;

    let target_id = path.into_inner();
    state.auth.guard_user_mutation(&ctx, target_id).await?;

    let request = request.into_inner();
    let password_hash = match request.password {
        Some(raw) => Some(password::hash_password(&raw)?),
        None => None,
    };

    let patch = UserUpdate {
        name: request.name,
        email: request.email,
        password_hash,
        role_id: request.role_id,
        entity_type: request.entity_type,
        entity_id: request.entity_id,
        is_super_admin: None,
    };

    let user = state
        .store
        .update_user(target_id, patch)
        .await?
        .ok_or_else(|| HubError::not_found("User not found"))?;

    info!("User {} updated by {}", user.email, ctx.user.email);
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Delete a user
pub async fn delete_user(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageUsers)?;

    let target_id = path.into_inner();
    let target = state.auth.guard_user_mutation(&ctx, target_id).await?;

    state.store.delete_user(target_id).await?;

    info!("User {} deleted by {}", target.email, ctx.user.email);
    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}

/// Register user routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}
