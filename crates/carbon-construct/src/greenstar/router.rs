use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{Initiative, ProjectData};
use super::report::{ComplianceCalculator, ComplianceReport};
use super::CalculationError;

/// Router exposing the calculator and its initiative catalog over HTTP.
pub fn compliance_router(calculator: Arc<ComplianceCalculator>) -> Router {
    Router::new()
        .route("/api/v1/greenstar/compliance", post(compliance_handler))
        .route("/api/v1/greenstar/initiatives", get(initiatives_handler))
        .with_state(calculator)
}

pub(crate) async fn compliance_handler(
    State(calculator): State<Arc<ComplianceCalculator>>,
    Json(project): Json<ProjectData>,
) -> Response {
    match calculator.calculate_project_compliance(&project) {
        Ok(summary) => {
            let report = ComplianceReport::new(&project, summary);
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(CalculationError::InvalidInput(violation)) => {
            let payload = json!({
                "error": violation.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(error @ CalculationError::Configuration(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn initiatives_handler(
    State(calculator): State<Arc<ComplianceCalculator>>,
) -> Json<Vec<Initiative>> {
    Json(calculator.initiatives().iter().cloned().collect())
}
