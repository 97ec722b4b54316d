//! Router assembly
//!
//! Mounts the feature routes under `/api` and wraps them in the HTTP
//! middleware stack.

pub mod response;

use axum::Router;
use tower_http::compression::CompressionLayer;

use crate::config::CorsConfig;
use crate::features::{self, FeatureState};
use crate::middleware;

/// Path prefix of every endpoint
pub const API_PREFIX: &str = "/api";

/// Create the application router with all routes and middleware
pub fn create_router(state: FeatureState, cors: &CorsConfig) -> Router {
    Router::new()
        .nest(API_PREFIX, features::router(state))
        // Apply layers from innermost to outermost
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(cors))
}
