use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

use super::domain::ScoreInputs;
use super::engine::ScoreOutcome;
use super::insights::ScoreInsights;
use super::repository::{AlertPublisher, AssessmentRepository, HouseholdId, RepositoryError};
use super::service::{ScoreService, ScoreServiceError};
use super::snapshot::HouseholdSnapshot;

/// Score plus its interpretation, as returned by `POST /api/v1/score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub outcome: ScoreOutcome,
    pub insights: ScoreInsights,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryQuery {
    pub(crate) limit: Option<usize>,
}

/// Router builder exposing scoring and assessment history endpoints.
pub fn score_router<R, A>(service: Arc<ScoreService<R, A>>) -> Router
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/score", post(score_handler::<R, A>))
        .route(
            "/api/v1/households/:household_id/assessments",
            post(assess_handler::<R, A>).get(history_handler::<R, A>),
        )
        .route(
            "/api/v1/households/:household_id/assessments/latest",
            get(latest_handler::<R, A>),
        )
        .with_state(service)
}

pub(crate) async fn score_handler<R, A>(
    State(service): State<Arc<ScoreService<R, A>>>,
    Json(inputs): Json<ScoreInputs>,
) -> Result<Response, AppError>
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    let (outcome, insights) = service.evaluate(&inputs)?;
    Ok((StatusCode::OK, Json(ScoreResponse { outcome, insights })).into_response())
}

pub(crate) async fn assess_handler<R, A>(
    State(service): State<Arc<ScoreService<R, A>>>,
    Path(household_id): Path<String>,
    Json(snapshot): Json<HouseholdSnapshot>,
) -> Result<Response, AppError>
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    let assessment = service.assess(HouseholdId(household_id), &snapshot)?;
    Ok((StatusCode::CREATED, Json(assessment)).into_response())
}

pub(crate) async fn latest_handler<R, A>(
    State(service): State<Arc<ScoreService<R, A>>>,
    Path(household_id): Path<String>,
) -> Result<Response, AppError>
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    let id = HouseholdId(household_id);
    match service.latest(&id) {
        Ok(assessment) => Ok((StatusCode::OK, Json(assessment)).into_response()),
        Err(ScoreServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "household_id": id.0,
                "error": "no assessments recorded",
            });
            Ok((StatusCode::NOT_FOUND, Json(payload)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// `?limit=0` or a missing limit falls back to the configured page size.
pub(crate) async fn history_handler<R, A>(
    State(service): State<Arc<ScoreService<R, A>>>,
    Path(household_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Response, AppError>
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    let limit = query
        .limit
        .filter(|limit| *limit > 0)
        .unwrap_or_else(|| service.default_history_limit());
    let history = service.history(&HouseholdId(household_id), limit)?;
    Ok((StatusCode::OK, Json(history)).into_response())
}
