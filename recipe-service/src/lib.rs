pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{CorsConfig, RecipeConfig};
use crate::services::{Datastore, IngredientService, RecipeService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RecipeConfig>,
    pub datastore: Arc<dyn Datastore>,
    pub ingredient_service: Arc<dyn IngredientService>,
    pub recipe_service: Arc<dyn RecipeService>,
}

/// Configured origins only; methods and request headers are mirrored and
/// credentials allowed.
fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .route("/messages", post(handlers::create_message))
        .route("/substitute", post(handlers::substitute))
        .route("/suggest", post(handlers::suggest))
        .route("/feedback", post(handlers::submit_feedback))
        // Route layer so the matched path is available as a label
        .route_layer(from_fn(metrics_middleware))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            make_request_span(request)
        }))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
}
