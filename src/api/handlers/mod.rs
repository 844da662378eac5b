use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::Deserialize;

use crate::error::EstimateError;
use crate::estimator::Estimator;
use crate::models::*;

// ============================================================
// Error Handling
// ============================================================

/// Lookup misses return their message as a 400. Format errors are logged and
/// reported as a generic 500.
fn estimate_error(e: EstimateError) -> (StatusCode, String) {
    match e {
        EstimateError::ReferenceLookup { .. } => {
            tracing::warn!("Validation error: {}", e);
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        EstimateError::DataFormat { .. } => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// UI
// ============================================================

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../ui/index.html"))
}

// ============================================================
// Reference tables
// ============================================================

#[derive(Debug, Deserialize)]
pub struct ListPagesQuery {
    pub category: Option<String>,
}

pub async fn list_pages(
    State(estimator): State<Estimator>,
    Query(query): Query<ListPagesQuery>,
) -> Json<Vec<PageOverview>> {
    Json(estimator.page_overview(query.category.as_deref()))
}

pub async fn list_deployment_tasks(
    State(estimator): State<Estimator>,
) -> Json<Vec<DeploymentTask>> {
    Json(estimator.reference().deployment_tasks().to_vec())
}

pub async fn list_managers(State(estimator): State<Estimator>) -> Json<Vec<Person>> {
    Json(estimator.reference().managers().to_vec())
}

pub async fn list_developers(State(estimator): State<Estimator>) -> Json<Vec<Person>> {
    Json(estimator.reference().developers().to_vec())
}

// ============================================================
// Estimate
// ============================================================

pub async fn estimate(
    State(estimator): State<Estimator>,
    Json(selection): Json<Selection>,
) -> Result<Json<EstimateOutcome>, (StatusCode, String)> {
    estimator
        .estimate(&selection)
        .map(Json)
        .map_err(estimate_error)
}
