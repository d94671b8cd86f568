//! Meal pricing endpoints
//!
//! Reads are never blocked. Mutations pass the ownership check and then the
//! edit window: a record is only updatable while time remains since its last
//! change, and a successful edit opens a fresh window, reported back as
//! `remaining_edit_time_ms` for countdown rendering.

use crate::auth::edit_window;
use crate::auth::{AuthContext, Visibility};
use crate::core::models::{EntityRef, EntityType, MealPrice, MealPriceUpdate};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{HubError, Result};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Meal price creation request; entity fields are only honored for actors
/// without an entity binding
#[derive(Debug, Deserialize)]
pub struct CreateMealPriceRequest {
    pub breakfast_price: f64,
    pub lunch_price: f64,
    pub dinner_price: f64,
    pub effective_date: chrono::DateTime<chrono::Utc>,
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<Uuid>,
}

/// Mutation response carrying the fresh edit window
#[derive(Debug, Serialize)]
pub struct MealPriceResponse {
    #[serde(flatten)]
    pub price: MealPrice,
    /// Milliseconds until the record locks again
    pub remaining_edit_time_ms: i64,
}

/// Fetch prices: the actor's entity's latest record, or every record for
/// actors that see the whole platform
pub async fn get_meal_prices(
    state: web::Data<AppState>,
    ctx: AuthContext,
) -> Result<HttpResponse> {
    match state.auth.visible_scope(&ctx) {
        Visibility::Entity(entity) => {
            let price = state.store.latest_meal_price_for_entity(entity).await?;
            Ok(HttpResponse::Ok().json(ApiResponse::success(price)))
        }
        Visibility::All => {
            let prices = state.store.list_meal_prices().await?;
            Ok(HttpResponse::Ok().json(ApiResponse::success(prices)))
        }
        Visibility::Nothing => Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<MealPrice>::new(),
        ))),
    }
}

/// Create a price record for the actor's entity
pub async fn create_meal_price(
    state: web::Data<AppState>,
    ctx: AuthContext,
    request: web::Json<CreateMealPriceRequest>,
) -> Result<HttpResponse> {
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

    let price = state
        .store
        .create_meal_price(MealPrice::new(
            entity.entity_type,
            entity.entity_id,
            request.breakfast_price,
            request.lunch_price,
            request.dinner_price,
            request.effective_date,
        ))
        .await?;

    info!("Meal prices created for {}", entity);
    Ok(HttpResponse::Ok().json(ApiResponse::success(price)))
}

/// Update a price record while its edit window is open.
///
/// Ownership is checked before staleness; the update stamps a new
/// `last_change`, so the reported remaining time is the full window.
pub async fn update_meal_price(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<MealPriceUpdate>,
) -> Result<HttpResponse> {
    let price_id = path.into_inner();
    let existing = state
        .store
        .find_meal_price_by_id(price_id)
        .await?
        .ok_or_else(|| HubError::not_found("Meal price not found"))?;

    state.auth.check_ownership(&ctx, existing.entity_ref())?;

    let now = chrono::Utc::now();
    edit_window::ensure_editable(&existing, now)?;

    let price = state
        .store
        .update_meal_price(price_id, request.into_inner(), now)
        .await?
        .ok_or_else(|| HubError::not_found("Meal price not found"))?;

    info!("Meal prices updated for {}", price.entity_ref());
    Ok(HttpResponse::Ok().json(ApiResponse::success(MealPriceResponse {
        price,
        remaining_edit_time_ms: edit_window::edit_window().num_milliseconds(),
    })))
}

/// Register meal price routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/meal-prices")
            .route("", web::get().to(get_meal_prices))
            .route("", web::post().to(create_meal_price))
            .route("/{id}", web::put().to(update_meal_price)),
    );
}
