//! Meal record endpoints
//!
//! Viewing meals is open to any role holding one of `Manage Members`,
//! `View Own Meals`, or `View All Data`.

use crate::auth::AuthContext;
use crate::core::models::{MealRecord, MealType, Permission};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use uuid::Uuid;

/// Permissions any one of which opens the meals view
const VIEW_MEALS: [Permission; 3] = [
    Permission::ManageMembers,
    Permission::ViewOwnMeals,
    Permission::ViewAllData,
];

/// Meal record creation request
#[derive(Debug, Deserialize)]
pub struct CreateMealRecordRequest {
    pub member_id: Uuid,
    pub meal_type: MealType,
    pub date: chrono::DateTime<chrono::Utc>,
}

/// List all meal records
pub async fn list_meals(state: web::Data<AppState>, ctx: AuthContext) -> Result<HttpResponse> {
    state.auth.require_any(&ctx, &VIEW_MEALS)?;

    let meals = state.store.list_meal_records().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(meals)))
}

/// Record a meal
pub async fn create_meal(
    state: web::Data<AppState>,
    _ctx: AuthContext,
    request: web::Json<CreateMealRecordRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let record = state
        .store
        .create_meal_record(MealRecord::new(
            request.member_id,
            request.meal_type,
            request.date,
        ))
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
}

/// List meal records for one member
pub async fn meals_by_member(
    state: web::Data<AppState>,
    _ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let meals = state
        .store
        .find_meal_records_by_member(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(meals)))
}

/// Register meal routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/meals")
            .route("", web::get().to(list_meals))
            .route("", web::post().to(create_meal))
            .route("/member/{member_id}", web::get().to(meals_by_member)),
    );
}
