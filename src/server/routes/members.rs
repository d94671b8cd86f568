//! Member management endpoints
//!
//! Gated by `Manage Members` and entity-scoped: lists narrow silently to the
//! actor's entity, creations are stamped with it, and targeted mutations
//! deny on ownership mismatch.

use crate::auth::{AuthContext, Visibility};
use crate::core::models::{EntityRef, EntityType, Member, MemberUpdate, Permission};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{HubError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Member creation request; entity fields are only honored for actors
/// without an entity binding
#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub meal_plan_type: Option<String>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<Uuid>,
}

/// The entity a scoped creation lands in: the actor's own, or the one the
/// request names when the actor is unbound
fn target_entity(
    ctx: &AuthContext,
    entity_type: Option<EntityType>,
    entity_id: Option<Uuid>,
) -> Result<EntityRef> {
    if let Some(own) = ctx.user.entity_binding() {
        return Ok(own);
    }
    match (entity_type, entity_id) {
        (Some(entity_type), Some(entity_id)) => Ok(EntityRef::new(entity_type, entity_id)),
        _ => Err(HubError::validation(
            "entity_type and entity_id are required",
        )),
    }
}

/// List members visible to the actor
pub async fn list_members(state: web::Data<AppState>, ctx: AuthContext) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageMembers)?;

    let members = match state.auth.visible_scope(&ctx) {
        Visibility::All => state.store.list_members().await?,
        Visibility::Entity(entity) => state.store.find_members_by_entity(entity).await?,
        Visibility::Nothing => vec![],
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(members)))
}

/// Create a member in the actor's entity
pub async fn create_member(
    state: web::Data<AppState>,
    ctx: AuthContext,
    request: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageMembers)?;

    let request = request.into_inner();
    let entity = target_entity(&ctx, request.entity_type, request.entity_id)?;

    let member = state
        .store
        .create_member(Member::new(
            request.name,
            request.email,
            request.phone,
            entity.entity_type,
            entity.entity_id,
            request.meal_plan_type,
        ))
        .await?;

    info!("Member {} created in {}", member.name, entity);
    Ok(HttpResponse::Ok().json(ApiResponse::success(member)))
}

/// Update a member after an ownership check
pub async fn update_member(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<MemberUpdate>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageMembers)?;

    let member_id = path.into_inner();
    let existing = state
        .store
        .find_member_by_id(member_id)
        .await?
        .ok_or_else(|| HubError::not_found("Member not found"))?;

    state.auth.check_ownership(&ctx, existing.entity_ref())?;

    let member = state
        .store
        .update_member(member_id, request.into_inner())
        .await?
        .ok_or_else(|| HubError::not_found("Member not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(member)))
}

/// Delete a member after an ownership check
pub async fn delete_member(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageMembers)?;

    let member_id = path.into_inner();
    let existing = state
        .store
        .find_member_by_id(member_id)
        .await?
        .ok_or_else(|| HubError::not_found("Member not found"))?;

    state.auth.check_ownership(&ctx, existing.entity_ref())?;

    let deleted = state.store.delete_member(member_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "deleted": deleted }))))
}

/// Register member routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/members")
            .route("", web::get().to(list_members))
            .route("", web::post().to(create_member))
            .route("/{id}", web::put().to(update_member))
            .route("/{id}", web::delete().to(delete_member)),
    );
}
