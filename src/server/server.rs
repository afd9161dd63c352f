//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::handlers::{health_check, not_found};
use crate::server::middleware::{ApiTokenMiddleware, RequestIdMiddleware};
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{ApiError, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::DefaultHeaders,
    web,
};
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server, connecting to the configured database
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        let state = AppState::connect(config.clone()).await?;
        Ok(Self::with_state(state))
    }

    /// Create a server around prepared state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.server().clone(),
            state,
        }
    }

    /// Start the HTTP server and block until it stops
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let server = ActixHttpServer::new(move || create_app(state.clone()))
            .workers(self.config.worker_count())
            .client_request_timeout(Duration::from_secs(self.config.timeout))
            .bind(&bind_addr)
            .map_err(|e| format_bind_error(e, &bind_addr))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| ApiError::internal(format!("Server error: {}", e)))?;

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

/// Create the Actix-web application
pub fn create_app(
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
    let server_config = state.config.server();
    let cors = build_cors(server_config);
    let prefix = server_config.normalized_prefix();
    let batch_path = state.config.batch().path.clone();
    let payload_limit = server_config.max_body_size;

    App::new()
        .app_data(state)
        .app_data(web::PayloadConfig::new(payload_limit))
        .wrap(ApiTokenMiddleware)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .wrap(RequestIdMiddleware)
        .wrap(DefaultHeaders::new().add(("Server", "restapi-rs")))
        .route("/health", web::get().to(health_check))
        .configure(routes::configure_routes(prefix, batch_path))
        .default_service(web::to(not_found))
}

fn build_cors(server_config: &ServerConfig) -> Cors {
    let cors_config = &server_config.cors;
    let mut cors = Cors::default();

    if cors_config.enabled {
        if cors_config.allows_all_origins() {
            cors = cors.allow_any_origin();
            cors_config.validate().unwrap_or_else(|e| {
                warn!(error = %e, "CORS Configuration Warning");
            });
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        let methods: Vec<actix_web::http::Method> = cors_config
            .allowed_methods
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();
        if !methods.is_empty() {
            cors = cors.allowed_methods(methods);
        }

        let headers: Vec<actix_web::http::header::HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        if !headers.is_empty() {
            cors = cors.allowed_headers(headers);
        }

        cors = cors.max_age(cors_config.max_age as usize);

        if cors_config.allow_credentials {
            cors = cors.supports_credentials();
        }
    }

    cors
}

/// Readable error for a failed bind
fn format_bind_error(error: std::io::Error, addr: &str) -> ApiError {
    match error.kind() {
        std::io::ErrorKind::AddrInUse => ApiError::config(format!(
            "Address {} is already in use; stop the other process or change server.port",
            addr
        )),
        std::io::ErrorKind::PermissionDenied => ApiError::config(format!(
            "Permission denied binding {}; ports below 1024 need elevated privileges",
            addr
        )),
        _ => ApiError::config(format!("Failed to bind {}: {}", addr, error)),
    }
}
