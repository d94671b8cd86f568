//! HTTP server core implementation

use crate::auth::AuthSystem;
use crate::config::{Config, ServerConfig};
use crate::server::middleware::{AuthMiddleware, RequestIdMiddleware};
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::MemoryStore;
use crate::utils::error::{HubError, Result};
use actix_cors::Cors;
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use tracing::info;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let store = Arc::new(MemoryStore::with_default_roles());
        let auth = AuthSystem::new(&config.auth, store.clone())?;
        let state = AppState::new(config.clone(), auth, store);

        Ok(Self {
            config: config.server.clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors_config = &state.config.server.cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allowed_origins.is_empty() {
                cors = cors.allow_any_origin();
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }
            cors = cors.allow_any_method().allow_any_header();
        }

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "MessHub")))
            .configure(routes::health::configure)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .wrap(RequestIdMiddleware)
                    .configure(routes::auth::configure)
                    .configure(routes::users::configure)
                    .configure(routes::roles::configure)
                    .configure(routes::entities::configure)
                    .configure(routes::members::configure)
                    .configure(routes::meals::configure)
                    .configure(routes::payments::configure)
                    .configure(routes::feedback::configure)
                    .configure(routes::meal_prices::configure),
            )
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| HubError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| HubError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
