//! Feedback endpoints

use crate::auth::AuthContext;
use crate::core::models::{EntityType, Feedback, Permission};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{HubError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Feedback creation request; the authoring user is stamped from the
/// request context
#[derive(Debug, Deserialize)]
pub struct CreateFeedbackRequest {
    pub rating: i32,
    pub category: String,
    pub comment: Option<String>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<Uuid>,
}

/// List all feedback
pub async fn list_feedback(state: web::Data<AppState>, ctx: AuthContext) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageFeedback)?;

    let feedback = state.store.list_feedback().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(feedback)))
}

/// Leave feedback as the authenticated user
pub async fn create_feedback(
    state: web::Data<AppState>,
    ctx: AuthContext,
    request: web::Json<CreateFeedbackRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();

    if !(1..=5).contains(&request.rating) {
        return Err(HubError::validation("Rating must be between 1 and 5"));
    }

    let (entity_type, entity_id) = match ctx.user.entity_binding() {
        Some(own) => (Some(own.entity_type), Some(own.entity_id)),
        None => (request.entity_type, request.entity_id),
    };

    let feedback = state
        .store
        .create_feedback(Feedback::new(
            ctx.user_id,
            entity_type,
            entity_id,
            request.rating,
            request.category,
            request.comment,
        ))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(feedback)))
}

/// Register feedback routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/feedback")
            .route("", web::get().to(list_feedback))
            .route("", web::post().to(create_feedback)),
    );
}
