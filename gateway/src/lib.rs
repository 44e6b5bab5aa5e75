//! Local stand-in for the request-routing platform.
//!
//! The gateway plays the part a managed API platform plays in production: it
//! runs the request authorizer in front of the admin service, enforces the
//! returned policy, and forwards the decision context to the admin service as
//! part of its proxy event.

use admin_service::AdminService;
use authz::Authorizer;
use axum::{middleware, routing::get, Json, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

pub mod error;
pub mod handlers;
pub mod middleware_hooks;
pub mod models;
pub mod server;

#[cfg(test)]
mod middleware_hooks_tests;

// Re-export server functions for convenience
pub use server::{spawn_server, start_server, GatewayConfig};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub authorizer: Authorizer,
    pub admin: AdminService,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            authorizer: Authorizer::new(),
            admin: AdminService::new(),
            config: Arc::new(config),
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::admin::admin_service,
        handlers::health::health_check,
    ),
    components(
        schemas(
            models::HealthResponse,
            models::MessageResponse,
            models::DenyResponse,
        )
    ),
    tags(
        (name = "admin", description = "Permission-gated admin service"),
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "Admin Service Gateway",
        version = "0.1.0",
        description = "Local gateway running the request authorizer in front of the admin service",
    ),
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Create the gateway router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Routes behind the authorizer
    let protected = Router::new()
        .route(
            &state.config.admin_path,
            get(handlers::admin::admin_service),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            middleware_hooks::authorizer_middleware,
        ));

    Router::new()
        .merge(protected)
        .route("/health", get(handlers::health::health_check))
        .route("/openapi.json", get(openapi))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middleware_hooks::response_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middleware_hooks::request_middleware,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
