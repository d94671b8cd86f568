//! Hostel and corporate office endpoints, gated by `Manage Hostels`

use crate::auth::AuthContext;
use crate::core::models::{
    CorporateOffice, CorporateOfficeUpdate, Hostel, HostelUpdate, Permission,
};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{HubError, Result};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Hostel creation request
#[derive(Debug, Deserialize)]
pub struct CreateHostelRequest {
    pub name: String,
    pub address: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub capacity: i32,
}

/// Corporate office creation request
#[derive(Debug, Deserialize)]
pub struct CreateOfficeRequest {
    pub name: String,
    pub address: String,
    pub contact_email: String,
    pub contact_phone: String,
}

/// List all hostels
pub async fn list_hostels(state: web::Data<AppState>, ctx: AuthContext) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageHostels)?;

    let hostels = state.store.list_hostels().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(hostels)))
}

/// Create a hostel
pub async fn create_hostel(
    state: web::Data<AppState>,
    ctx: AuthContext,
    request: web::Json<CreateHostelRequest>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageHostels)?;

    let request = request.into_inner();
    let hostel = state
        .store
        .create_hostel(Hostel::new(
            request.name,
            request.address,
            request.contact_email,
            request.contact_phone,
            request.capacity,
        ))
        .await?;

    info!("Hostel {} created by {}", hostel.name, ctx.user.email);
    Ok(HttpResponse::Ok().json(ApiResponse::success(hostel)))
}

/// Update a hostel
pub async fn update_hostel(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<HostelUpdate>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageHostels)?;

    let hostel = state
        .store
        .update_hostel(path.into_inner(), request.into_inner())
        .await?
        .ok_or_else(|| HubError::not_found("Hostel not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(hostel)))
}

/// Delete a hostel
pub async fn delete_hostel(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageHostels)?;

    let deleted = state.store.delete_hostel(path.into_inner()).await?;
    if !deleted {
        return Err(HubError::not_found("Hostel not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}

/// List all corporate offices
pub async fn list_offices(state: web::Data<AppState>, ctx: AuthContext) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageHostels)?;

    let offices = state.store.list_offices().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(offices)))
}

/// Create a corporate office
pub async fn create_office(
    state: web::Data<AppState>,
    ctx: AuthContext,
    request: web::Json<CreateOfficeRequest>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageHostels)?;

    let request = request.into_inner();
    let office = state
        .store
        .create_office(CorporateOffice::new(
            request.name,
            request.address,
            request.contact_email,
            request.contact_phone,
        ))
        .await?;

    info!("Office {} created by {}", office.name, ctx.user.email);
    Ok(HttpResponse::Ok().json(ApiResponse::success(office)))
}

/// Update a corporate office
pub async fn update_office(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
    request: web::Json<CorporateOfficeUpdate>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageHostels)?;

    let office = state
        .store
        .update_office(path.into_inner(), request.into_inner())
        .await?
        .ok_or_else(|| HubError::not_found("Office not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(office)))
}

/// Delete a corporate office
pub async fn delete_office(
    state: web::Data<AppState>,
    ctx: AuthContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    state.auth.require(&ctx, Permission::ManageHostels)?;

    let deleted = state.store.delete_office(path.into_inner()).await?;
    if !deleted {
        return Err(HubError::not_found("Office not found"));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({ "deleted": true }))))
}

/// Register entity routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/hostels")
            .route("", web::get().to(list_hostels))
            .route("", web::post().to(create_hostel))
            .route("/{id}", web::put().to(update_hostel))
            .route("/{id}", web::delete().to(delete_hostel)),
    )
    .service(
        web::scope("/corporate-offices")
            .route("", web::get().to(list_offices))
            .route("", web::post().to(create_office))
            .route("/{id}", web::put().to(update_office))
            .route("/{id}", web::delete().to(delete_office)),
    );
}
