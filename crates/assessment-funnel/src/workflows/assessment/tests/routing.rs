use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::assessment::router::{complete_handler, submission_handler};
use crate::workflows::assessment::{
    assessment_router, FunnelAction, FunnelState, QualificationStatus, ResponsePatch,
};

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).expect("serialize payload")))
        .expect("request")
}

#[tokio::test]
async fn start_route_returns_fresh_state() {
    let router = assessment_router(Arc::new(service()));

    let response = router
        .oneshot(
            Request::post("/api/v1/assessment/sessions")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["response"]["currentStepId"], "pain-profile");
    assert_eq!(body["response"]["totalSteps"], 10);
    assert_eq!(body["response"]["qualificationStatus"], "pending");
}

#[tokio::test]
async fn dispatch_route_applies_actions_in_order() {
    let router = assessment_router(Arc::new(service()));
    let payload = json!({
        "actions": [
            { "type": "UPDATE_FIELDS", "payload": { "hasQualifyingPainDuration": true } },
            { "type": "ADVANCE_STEP" },
            { "type": "UPDATE_FIELDS", "payload": { "selectedConditionIds": ["fibromyalgia"] } },
            { "type": "ADVANCE_STEP" }
        ]
    });

    let response = router
        .oneshot(post_json("/api/v1/assessment/dispatch", payload))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["response"]["currentStepId"], "waiting-list");
    assert_eq!(body["response"]["qualificationStatus"], "disqualified");
    assert_eq!(body["response"]["totalSteps"], 3);
    assert!(body["response"]["disqualificationReason"].is_string());
}

#[tokio::test]
async fn dispatch_route_reports_rejected_transition() {
    let router = assessment_router(Arc::new(service()));
    let state = serde_json::to_value(state_at("conditions")).expect("state json");

    let response = router
        .oneshot(post_json(
            "/api/v1/assessment/dispatch",
            json!({ "state": state, "actions": [{ "type": "ADVANCE_STEP" }] }),
        ))
        .await
        .expect("route response");

    let body = read_json_body(response).await;
    assert_eq!(body["response"]["currentStepId"], "conditions");
    assert_eq!(body["error"]["kind"], "step_incomplete");
}

#[tokio::test]
async fn validate_route_defaults_to_current_step() {
    let router = assessment_router(Arc::new(service()));
    let mut response = response_at("contact");
    response.name = "Lee".to_string();
    response.email = "bad".to_string();

    let reply = router
        .oneshot(post_json(
            "/api/v1/assessment/validate",
            json!({ "response": response }),
        ))
        .await
        .expect("route response");

    let body = read_json_body(reply).await;
    assert_eq!(body["isValid"], false);
    assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn navigate_route_reports_budget_branch() {
    let router = assessment_router(Arc::new(service()));
    let mut response = response_at("budget");
    response.has_budget = Some(true);

    let reply = router
        .oneshot(post_json(
            "/api/v1/assessment/navigate",
            json!({ "stepId": "budget", "response": response }),
        ))
        .await
        .expect("route response");

    let body = read_json_body(reply).await;
    assert_eq!(body["next"], "budget-range");
    assert_eq!(body["previous"], "urgency");
    assert_eq!(body["position"], 7);
    assert_eq!(body["totalSteps"], 11);
}

#[tokio::test]
async fn personalize_route_builds_narrative() {
    let router = assessment_router(Arc::new(service()));
    let mut response = response_at("results");
    response
        .selected_condition_ids
        .insert("chronic-back-neck".to_string());
    response.selected_sensation_ids.insert("burning".to_string());

    let reply = router
        .oneshot(post_json("/api/v1/assessment/personalize", json!(response)))
        .await
        .expect("route response");

    assert_eq!(reply.status(), StatusCode::OK);
    let body = read_json_body(reply).await;
    assert_eq!(body["isQualified"], true);
    assert!(body["summaryParagraph"]
        .as_str()
        .is_some_and(|summary| summary.contains("Chronic back and neck pain")));
}

#[tokio::test]
async fn submission_handler_rejects_unfinished_sessions() {
    let service = Arc::new(service());

    let response = submission_handler(State(service), axum::Json(state_at("urgency")))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn complete_route_records_results_for_submission() {
    let service = Arc::new(service());
    let mut session = service.start_session();
    walk_to_contact(&mut session, true);
    let walked = service.dispatch_all(
        Some(session.into_state()),
        [
            update(ResponsePatch::contact("Jordan Reyes", "jordan@example.com", "")),
            FunnelAction::AdvanceStep,
        ],
    );
    assert_eq!(walked.response.current_step_id, step("results"));
    assert!(walked.response.completed_at.is_none());

    let response = assessment_router(service.clone())
        .oneshot(post_json(
            "/api/v1/assessment/complete",
            serde_json::to_value(&walked).expect("state json"),
        ))
        .await
        .expect("route response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["response"]["qualificationStatus"], "qualified");
    assert!(body["response"]["completedAt"].is_string());
    assert_eq!(body["personalization"]["isQualified"], true);

    let completed: FunnelState = serde_json::from_value(body).expect("state parses");
    let submission = service.submission(&completed).expect("submission builds");
    assert_eq!(
        submission.qualification_status,
        QualificationStatus::Qualified
    );
    assert!(submission.completed_at.is_some());
}

#[tokio::test]
async fn complete_handler_rejects_sessions_mid_funnel() {
    let service = Arc::new(service());

    let response = complete_handler(State(service), axum::Json(state_at("goals")))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn catalogs_route_lists_steps_and_groups() {
    let router = assessment_router(Arc::new(service()));

    let response = router
        .oneshot(
            Request::get("/api/v1/assessment/catalogs")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("route response");

    let body = read_json_body(response).await;
    assert_eq!(body["steps"].as_array().map(Vec::len), Some(11));
    assert_eq!(body["steps"][7]["kind"]["type"], "budget_range");
    assert!(body["conditionGroups"]
        .as_array()
        .is_some_and(|groups| !groups.is_empty()));
    assert_eq!(body["sensations"].as_array().map(Vec::len), Some(8));
}
