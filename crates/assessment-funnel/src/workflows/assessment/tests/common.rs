use std::sync::Arc;

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::config::FunnelConfig;
use crate::workflows::assessment::{
    ActivityImpact, AssessmentFunnelService, AssessmentResponse, BudgetRange, FixedClock,
    FunnelAction, FunnelBlueprint, FunnelSession, FunnelState, FunnelStore, ReferenceCatalogs,
    ResponsePatch, StepId, UrgencyLevel,
};

pub(super) fn started_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 2, 14, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn blueprint() -> FunnelBlueprint {
    FunnelBlueprint::standard()
}

pub(super) fn catalogs() -> ReferenceCatalogs {
    ReferenceCatalogs::standard()
}

pub(super) fn store() -> FunnelStore {
    FunnelStore::new(
        Arc::new(blueprint()),
        Arc::new(catalogs()),
        Arc::new(FixedClock(started_at())),
    )
}

pub(super) fn service_with(config: FunnelConfig) -> AssessmentFunnelService {
    AssessmentFunnelService::with_clock(
        Arc::new(catalogs()),
        &config,
        Arc::new(FixedClock(started_at())),
    )
}

pub(super) fn service() -> AssessmentFunnelService {
    service_with(FunnelConfig::default())
}

pub(super) fn step(key: &str) -> StepId {
    StepId::from(key)
}

pub(super) fn response_at(key: &str) -> AssessmentResponse {
    AssessmentResponse::new(step(key), 10, started_at())
}

pub(super) fn state_at(key: &str) -> FunnelState {
    let mut state = store().initial_state();
    state.response.current_step_id = step(key);
    state
}

pub(super) fn update(patch: ResponsePatch) -> FunnelAction {
    FunnelAction::UpdateFields(patch)
}

/// Answer and advance through every step up to (not including) contact.
pub(super) fn walk_to_contact(session: &mut FunnelSession, has_budget: bool) {
    session.dispatch(update(ResponsePatch::pain_profile(true, None)));
    session.dispatch(FunnelAction::AdvanceStep);
    session.dispatch(update(ResponsePatch::conditions(["chronic-back-neck"])));
    session.dispatch(FunnelAction::AdvanceStep);
    session.dispatch(update(ResponsePatch::sensations(["burning"])));
    session.dispatch(FunnelAction::AdvanceStep);
    session.dispatch(FunnelAction::AdvanceStep);
    session.dispatch(update(ResponsePatch::activity_impact(ActivityImpact::Moderate)));
    session.dispatch(FunnelAction::AdvanceStep);
    session.dispatch(update(ResponsePatch::urgency(UrgencyLevel::WithinMonth)));
    session.dispatch(FunnelAction::AdvanceStep);
    session.dispatch(update(ResponsePatch::budget(has_budget)));
    session.dispatch(FunnelAction::AdvanceStep);
    if has_budget {
        session.dispatch(update(ResponsePatch::budget_range(BudgetRange::From5kTo15k)));
        session.dispatch(FunnelAction::AdvanceStep);
    }
    session.dispatch(update(ResponsePatch::goals("Walk the dog again")));
    session.dispatch(FunnelAction::AdvanceStep);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
