use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Loaded catalog
        .route(
            "/items",
            get(handlers::list_items).put(handlers::replace_items),
        )
        .route("/items/categories", get(handlers::get_categories))
        // Stateless filtering
        .route("/filter", post(handlers::filter_items))
        .layer(
            ServiceBuilder::new()
                // request id must be assigned before the trace span is made
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
