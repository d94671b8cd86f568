//! Payment endpoints, gated by `Manage Payments` and entity-scoped

use crate::auth::{AuthContext, Visibility};
use crate::core::models::{EntityRef, EntityType, Payment, Permission};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{HubError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Payment creation request; entity fields are only honored for actors
/// without an entity binding
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: f64,
    pub status: String,
    pub external_ref: Option<String>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<Uuid>,
}

/// List payments visible to the actor
pub async fn list_payments(state: web::Data<AppState>, ctx: AuthContext) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManagePayments)?;

    let payments = match state.auth.visible_scope(&ctx) {
        Visibility::All => state.store.list_payments().await?,
        Visibility::Entity(entity) => state.store.find_payments_by_entity(entity).await?,
        Visibility::Nothing => vec![],
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(payments)))
}

/// Record a payment against the actor's entity
pub async fn create_payment(
    state: web::Data<AppState>,
    ctx: AuthContext,
    request: web::Json<CreatePaymentRequest>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManagePayments)?;

    let request = request.into_inner();
    let entity = match ctx.user.entity_binding() {
        Some(own) => own,
        None => match (request.entity_type, request.entity_id) {
            (Some(entity_type), Some(entity_id)) => EntityRef::new(entity_type, entity_id),
            _ => {
                return Err(HubError::validation(
                    "entity_type and entity_id are required",
                ));
            }
        },
    };

    let payment = state
        .store
        .create_payment(Payment::new(
            entity.entity_type,
            entity.entity_id,
            request.amount,
            request.status,
            request.external_ref,
        ))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(payment)))
}

/// Register payment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payments")
            .route("", web::get().to(list_payments))
            .route("", web::post().to(create_payment)),
    );
}
