use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::Applicant;
use super::{EligibilityEngine, EvaluationOutcome};

/// Router builder exposing HTTP endpoints for evaluation and tier listings.
pub fn eligibility_router(engine: Arc<EligibilityEngine>) -> Router {
    Router::new()
        .route("/api/v1/eligibility/evaluate", post(evaluate_handler))
        .route("/api/v1/eligibility/tiers", get(tiers_handler))
        .with_state(engine)
}

/// HTTP view of one evaluation. The timestamp lives here, not on the
/// outcome, so the core evaluation stays deterministic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationView {
    pub evaluated_at: DateTime<Utc>,
    pub summary: String,
    pub outcome: EvaluationOutcome,
}

/// Business non-qualification is a 200 with a structured outcome; only
/// malformed request bodies surface as client errors (axum rejections).
pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<EligibilityEngine>>,
    axum::Json(applicant): axum::Json<Applicant>,
) -> Response {
    let outcome = engine.evaluate(&applicant);
    let view = EvaluationView {
        evaluated_at: Utc::now(),
        summary: outcome.summary(),
        outcome,
    };
    (StatusCode::OK, axum::Json(view)).into_response()
}

pub(crate) async fn tiers_handler(State(engine): State<Arc<EligibilityEngine>>) -> Response {
    (StatusCode::OK, axum::Json(engine.tier_overview())).into_response()
}
