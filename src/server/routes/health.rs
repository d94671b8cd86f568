//! Health check endpoint

use actix_web::{HttpResponse, web};

/// Health check response
#[derive(Debug, serde::Serialize)]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
}

/// Health check handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
    })
}

/// Register health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
