use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::domain::{AssessmentResponse, StepId};
use super::service::AssessmentFunnelService;
use super::store::{FunnelAction, FunnelState};
use crate::error::AppError;

/// Stateless endpoints: the client sends its state along with every request.
pub fn assessment_router(service: Arc<AssessmentFunnelService>) -> Router {
    Router::new()
        .route("/api/v1/assessment/sessions", post(start_handler))
        .route("/api/v1/assessment/dispatch", post(dispatch_handler))
        .route("/api/v1/assessment/validate", post(validate_handler))
        .route("/api/v1/assessment/navigate", post(navigate_handler))
        .route("/api/v1/assessment/personalize", post(personalize_handler))
        .route("/api/v1/assessment/complete", post(complete_handler))
        .route("/api/v1/assessment/submission", post(submission_handler))
        .route("/api/v1/assessment/catalogs", get(catalogs_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DispatchRequest {
    #[serde(default)]
    pub state: Option<FunnelState>,
    #[serde(default)]
    pub actions: Vec<FunnelAction>,
}

/// Step to inspect; defaults to the response's current step.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StepRequest {
    #[serde(default)]
    pub step_id: Option<StepId>,
    pub response: AssessmentResponse,
}

impl StepRequest {
    fn step(&self) -> StepId {
        self.step_id
            .clone()
            .unwrap_or_else(|| self.response.current_step_id.clone())
    }
}

pub(crate) async fn start_handler(State(service): State<Arc<AssessmentFunnelService>>) -> Response {
    let session = service.start_session();
    (StatusCode::CREATED, Json(session.into_state())).into_response()
}

pub(crate) async fn dispatch_handler(
    State(service): State<Arc<AssessmentFunnelService>>,
    Json(request): Json<DispatchRequest>,
) -> Response {
    let state = service.dispatch_all(request.state, request.actions);
    (StatusCode::OK, Json(state)).into_response()
}

pub(crate) async fn validate_handler(
    State(service): State<Arc<AssessmentFunnelService>>,
    Json(request): Json<StepRequest>,
) -> Response {
    let validation = service.validate(&request.step(), &request.response);
    (StatusCode::OK, Json(validation)).into_response()
}

pub(crate) async fn navigate_handler(
    State(service): State<Arc<AssessmentFunnelService>>,
    Json(request): Json<StepRequest>,
) -> Response {
    let view = service.navigate(&request.step(), &request.response);
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn personalize_handler(
    State(service): State<Arc<AssessmentFunnelService>>,
    Json(response): Json<AssessmentResponse>,
) -> Response {
    let result = service.personalize(&response);
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn complete_handler(
    State(service): State<Arc<AssessmentFunnelService>>,
    Json(state): Json<FunnelState>,
) -> Result<Response, AppError> {
    let completed = service.complete(state)?;
    Ok((StatusCode::OK, Json(completed)).into_response())
}

pub(crate) async fn submission_handler(
    State(service): State<Arc<AssessmentFunnelService>>,
    Json(state): Json<FunnelState>,
) -> Result<Response, AppError> {
    let submission = service.submission(&state)?;
    Ok((StatusCode::OK, Json(submission)).into_response())
}

pub(crate) async fn catalogs_handler(
    State(service): State<Arc<AssessmentFunnelService>>,
) -> Response {
    (StatusCode::OK, Json(service.catalog_view())).into_response()
}
