//! Role management endpoints
//!
//! Permission strings are validated against the closed vocabulary at create
//! and update time, so roles can never carry grants the resolver does not
//! understand.

use crate::auth::AuthContext;
use crate::core::models::{Permission, Role, RoleUpdate};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{HubError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Role creation request
#[derive(Debug, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<String>,
}

fn validate_permissions(raw: &[String]) -> Result<()> {
    Permission::validate_all(raw).map_err(|unknown| {
        HubError::validation(format!("Unknown permissions: {}", unknown.join(", ")))
    })
}

/// List all roles
pub async fn list_roles(state: web::Data<AppState>, ctx: AuthContext) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageRoles)?;

    let roles = state.store.list_roles().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(roles)))
}

/// Fetch a single role
pub async fn get_role(
    state: web::Data<AppState>,
    _ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let role = state
        .store
        .find_role_by_id(path.into_inner())
        .await?
        .ok_or_else(|| HubError::not_found("Role not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(role)))
}

/// Create a role
pub async fn create_role(
    state: web::Data<AppState>,
    ctx: AuthContext,
    request: web::Json<CreateRoleRequest>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageRoles)?;

    let request = request.into_inner();
    validate_permissions(&request.permissions)?;

    if state
        .store
        .find_role_by_name(&request.name)
        .await?
        .is_some()
    {
        return Err(HubError::conflict("Role name already exists"));
    }

    let role = state
        .store
        .create_role(Role::new(
            request.name,
            request.description,
            request.permissions,
        ))
        .await?;

    info!("Role {} created by {}", role.name, ctx.user.email);
    Ok(HttpResponse::Ok().json(ApiResponse::success(role)))
}

/// Update a role
pub async fn update_role(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<RoleUpdate>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageRoles)?;

    let patch = request.into_inner();
    if let Some(permissions) = &patch.permissions {
        validate_permissions(permissions)?;
    }

    let role = state
        .store
        .update_role(path.into_inner(), patch)
        .await?
        .ok_or_else(|| HubError::not_found("Role not found"))?;

    info!("Role {} updated by {}", role.name, ctx.user.email);
    Ok(HttpResponse::Ok().json(ApiResponse::success(role)))
}

/// Delete a role
pub async fn delete_role(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageRoles)?;

    let deleted = state.store.delete_role(path.into_inner()).await?;
    if !deleted {
        return Err(HubError::not_found("Role not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}

/// Register role routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/roles")
            .route("", web::get().to(list_roles))
            .route("", web::post().to(create_role))
            .route("/{id}", web::get().to(get_role))
            .route("/{id}", web::put().to(update_role))
            .route("/{id}", web::delete().to(delete_role)),
    );
}
