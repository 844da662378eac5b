mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::estimator::Estimator;

pub fn create_router(estimator: Estimator) -> Router {
    let api = Router::new()
        // Reference tables
        .route("/pages", get(handlers::list_pages))
        .route("/deployment-tasks", get(handlers::list_deployment_tasks))
        .route("/managers", get(handlers::list_managers))
        .route("/developers", get(handlers::list_developers))
        // Estimation
        .route("/estimate", post(handlers::estimate))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(handlers::index))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(estimator)
}
