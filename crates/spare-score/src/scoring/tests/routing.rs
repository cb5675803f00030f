use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::scoring::router::score_router;
use crate::scoring::service::ScoreService;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn score_endpoint_returns_outcome_and_insights() {
    let (service, _alerts) = service();
    let app = score_router(service);

    let response = app
        .oneshot(post_json(
            "/api/v1/score",
            json!({
                "monthly_income": 5000.0,
                "monthly_expenses": 4000.0,
                "net_amount": 1000.0,
                "emergency_fund_months": 3.0,
                "mdlr_percent": 20.0,
                "savings_rate_percent": 8.0
            }),
        ))
        .await
        .expect("router responds");

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 74);
    assert_eq!(body["classification"], "Strong");
    assert_eq!(body["insights"]["focus_pillar"], "emergency_fund");
}

#[tokio::test]
async fn score_endpoint_rejects_negative_income() {
    let (service, _alerts) = service();
    let app = score_router(service);

    let response = app
        .oneshot(post_json(
            "/api/v1/score",
            json!({
                "monthly_income": -10.0,
                "monthly_expenses": 4000.0,
                "net_amount": -4010.0,
                "emergency_fund_months": 3.0,
                "mdlr_percent": 20.0,
                "savings_rate_percent": 8.0
            }),
        ))
        .await
        .expect("router responds");

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"][0]
        .as_str()
        .expect("error string")
        .starts_with("monthly_income"));
}

#[tokio::test]
async fn assessments_can_be_recorded_and_read_back() {
    let (service, _alerts) = service();
    let app = score_router(service);

    let created = app
        .clone()
        .oneshot(post_json(
            "/api/v1/households/hh-100/assessments",
            json!({
                "monthly_income": 9000.0,
                "monthly_expenses": 5000.0,
                "emergency_fund_balance": 36000.0,
                "debts": [
                    { "loan_type": "mortgage", "monthly_payment": 1000.0 },
                    { "loan_type": "credit_card", "monthly_payment": 400.0, "is_paid_off": true }
                ]
            }),
        ))
        .await
        .expect("router responds");
    let (status, body) = read_json(created).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["household_id"], "hh-100");
    assert_eq!(body["outcome"]["score"], 98);

    let latest = app
        .clone()
        .oneshot(get("/api/v1/households/hh-100/assessments/latest"))
        .await
        .expect("router responds");
    let (status, body) = read_json(latest).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"]["classification"], "Excellent");

    let history = app
        .oneshot(get("/api/v1/households/hh-100/assessments?limit=5"))
        .await
        .expect("router responds");
    let (status, body) = read_json(history).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn latest_for_unknown_household_is_404() {
    let (service, _alerts) = service();
    let app = score_router(service);

    let response = app
        .oneshot(get("/api/v1/households/nobody/assessments/latest"))
        .await
        .expect("router responds");

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["household_id"], "nobody");
}

#[tokio::test]
async fn history_limit_truncates_and_zero_falls_back_to_the_default() {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let alerts = Arc::new(RecordingAlertPublisher::default());
    let service = Arc::new(ScoreService::new(repository, alerts).with_history_limit(2));
    let id = household("hh-200");
    for _ in 0..3 {
        service
            .assess(id.clone(), &healthy_snapshot())
            .expect("assessment stored");
    }
    let app = score_router(service);

    for (uri, expected) in [
        ("/api/v1/households/hh-200/assessments?limit=1", 1),
        ("/api/v1/households/hh-200/assessments?limit=3", 3),
        ("/api/v1/households/hh-200/assessments?limit=0", 2),
        ("/api/v1/households/hh-200/assessments", 2),
    ] {
        let response = app.clone().oneshot(get(uri)).await.expect("router responds");
        let (status, body) = read_json(response).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body.as_array().map(Vec::len), Some(expected), "{uri}");
    }
}

#[tokio::test]
async fn assessment_endpoint_reports_every_snapshot_error() {
    let (service, _alerts) = service();
    let app = score_router(service);

    let response = app
        .oneshot(post_json(
            "/api/v1/households/hh-201/assessments",
            json!({
                "monthly_income": -1.0,
                "monthly_expenses": -2.0,
                "emergency_fund_balance": 0.0
            }),
        ))
        .await
        .expect("router responds");

    let (status, body) = read_json(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));
}
