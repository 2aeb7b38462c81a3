//! Integration tests for the REST API
//!
//! Drives the full router in-process: authentication, judge and team
//! management, score submission, leaderboards and report download.

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use scorecard_api_rest::{create_app_with_state, ApiConfig, AppState};
use scorecard_testing::MockPasswordHasher;
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@scorecard.local";
const ADMIN_PASSWORD: &str = "admin-password";

fn test_app() -> Router {
    let state = AppState::with_password_hasher(ApiConfig::default(), MockPasswordHasher);
    create_app_with_state(state)
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    bytes: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap()
    }
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();

    TestResponse {
        status,
        headers,
        bytes,
    }
}

async fn admin_token(app: &Router) -> String {
    let response = send(
        app,
        Method::POST,
        "/api/v1/auth/admin/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()["data"]["token"].as_str().unwrap().to_string()
}

async fn create_judge(app: &Router, admin: &str, email: &str, events: &[&str]) -> Value {
    let response = send(
        app,
        Method::POST,
        "/api/v1/judges",
        Some(admin),
        Some(json!({
            "name": "Dr. Rao",
            "email": email,
            "password": "secret123",
            "assigned_events": events,
        })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()["data"].clone()
}

async fn judge_token(app: &Router, email: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/api/v1/auth/judge/login",
        None,
        Some(json!({ "email": email, "password": "secret123" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()["data"]["token"].as_str().unwrap().to_string()
}

async fn create_team(app: &Router, admin: &str, name: &str, event: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/api/v1/teams",
        Some(admin),
        Some(json!({
            "name": name,
            "event_type": event,
            "members": [
                { "name": "Asha", "email": "asha@example.com", "role": "Lead" },
                { "name": "Ravi" }
            ],
        })),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()["data"]["id"].as_str().unwrap().to_string()
}

fn scores(values: &[u32]) -> Value {
    Value::Array(
        values
            .iter()
            .enumerate()
            .map(|(i, s)| json!({ "question_number": i + 1, "score": s }))
            .collect(),
    )
}

async fn submit(app: &Router, judge: &str, team_id: &str, round1: &[u32]) -> TestResponse {
    send(
        app,
        Method::POST,
        "/api/v1/evaluations",
        Some(judge),
        Some(json!({
            "team_id": team_id,
            "rounds": [{ "round_number": 1, "questions": scores(round1) }],
            "remarks": "Solid work",
        })),
    )
    .await
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();

    let response = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = test_app();

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_admin_login() {
    let app = test_app();

    let token = admin_token(&app).await;
    assert!(!token.is_empty());

    let rejected = send(
        &app,
        Method::POST,
        "/api/v1/auth/admin/login",
        None,
        Some(json!({ "email": ADMIN_EMAIL, "password": "wrong" })),
    )
    .await;
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);
    assert_eq!(rejected.json()["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = test_app();

    let response = send(&app, Method::GET, "/api/v1/judges", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.json()["request_id"].is_string());
}

#[tokio::test]
async fn test_judge_lifecycle() {
    let app = test_app();
    let admin = admin_token(&app).await;

    let judge = create_judge(&app, &admin, "Rao@Example.com", &["paper-presentation"]).await;
    assert_eq!(judge["email"], "rao@example.com");
    assert!(judge.get("password_hash").is_none());

    let duplicate = send(
        &app,
        Method::POST,
        "/api/v1/judges",
        Some(&admin),
        Some(json!({
            "name": "Someone",
            "email": "rao@example.com",
            "password": "secret123",
            "assigned_events": ["startup-expo"],
        })),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let token = judge_token(&app, "RAO@example.com").await;
    let me = send(&app, Method::GET, "/api/v1/judges/me", Some(&token), None).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.json()["data"]["id"], judge["id"]);

    // judges cannot manage judges
    let listed = send(&app, Method::GET, "/api/v1/judges", Some(&token), None).await;
    assert_eq!(listed.status, StatusCode::FORBIDDEN);

    let id = judge["id"].as_str().unwrap();
    let deactivated = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/judges/{id}/status"),
        Some(&admin),
        Some(json!({ "is_active": false })),
    )
    .await;
    assert_eq!(deactivated.status, StatusCode::OK);
    assert_eq!(deactivated.json()["data"]["is_active"], false);

    let refused = send(
        &app,
        Method::POST,
        "/api/v1/auth/judge/login",
        None,
        Some(json!({ "email": "rao@example.com", "password": "secret123" })),
    )
    .await;
    assert_eq!(refused.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_invalid_judge_request_is_unprocessable() {
    let app = test_app();
    let admin = admin_token(&app).await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/judges",
        Some(&admin),
        Some(json!({
            "name": "Dr. Rao",
            "email": "not-an-email",
            "password": "123",
            "assigned_events": [],
        })),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json()["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_team_registration_and_filtering() {
    let app = test_app();
    let admin = admin_token(&app).await;

    create_team(&app, &admin, "Byte Club", "paper-presentation").await;
    create_team(&app, &admin, "Launchpad", "startup-expo").await;

    let all = send(&app, Method::GET, "/api/v1/teams", Some(&admin), None).await;
    assert_eq!(all.json()["data"].as_array().unwrap().len(), 2);

    let filtered = send(
        &app,
        Method::GET,
        "/api/v1/teams?event=startup-expo",
        Some(&admin),
        None,
    )
    .await;
    let teams = filtered.json()["data"].as_array().unwrap().clone();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["name"], "Launchpad");
    assert_eq!(teams[0]["total_members"], 2);

    let unknown = send(
        &app,
        Method::GET,
        "/api/v1/teams?event=hackathon",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);

    let bad_id = send(&app, Method::GET, "/api/v1/teams/not-a-uuid", Some(&admin), None).await;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_evaluation_submission_and_leaderboard() {
    let app = test_app();
    let admin = admin_token(&app).await;

    create_judge(&app, &admin, "rao@example.com", &["paper-presentation"]).await;
    let judge = judge_token(&app, "rao@example.com").await;

    let leading = create_team(&app, &admin, "Byte Club", "paper-presentation").await;
    let trailing = create_team(&app, &admin, "Null Pointers", "paper-presentation").await;

    let stored = submit(&app, &judge, &leading, &[20, 20, 20, 10, 10]).await;
    assert_eq!(stored.status, StatusCode::CREATED);
    assert_eq!(stored.json()["data"]["total_score"], 80);
    assert_eq!(stored.json()["data"]["rounds"][0]["total_score"], 80);

    assert_eq!(
        submit(&app, &judge, &trailing, &[10, 10, 10, 5, 5]).await.status,
        StatusCode::CREATED
    );

    let over_max = submit(&app, &judge, &trailing, &[26]).await;
    assert_eq!(over_max.status, StatusCode::UNPROCESSABLE_ENTITY);

    let mine = send(&app, Method::GET, "/api/v1/evaluations/mine", Some(&judge), None).await;
    assert_eq!(mine.json()["data"].as_array().unwrap().len(), 2);

    let board = send(
        &app,
        Method::GET,
        "/api/v1/leaderboards/paper-presentation",
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(board.status, StatusCode::OK);
    let entries = board.json()["data"].as_array().unwrap().clone();
    assert_eq!(entries[0]["team_name"], "Byte Club");
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["total_marks"], 80);
    assert_eq!(entries[1]["total_marks"], 40);

    let all = send(&app, Method::GET, "/api/v1/leaderboards", Some(&admin), None).await;
    let boards = all.json()["data"].clone();
    assert!(boards["startup-expo"].as_array().unwrap().is_empty());
    assert_eq!(boards["paper-presentation"].as_array().unwrap().len(), 2);

    let judge_view = send(&app, Method::GET, "/api/v1/leaderboards", Some(&judge), None).await;
    assert_eq!(judge_view.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unassigned_judge_cannot_score() {
    let app = test_app();
    let admin = admin_token(&app).await;

    create_judge(&app, &admin, "rao@example.com", &["startup-expo"]).await;
    let judge = judge_token(&app, "rao@example.com").await;
    let team = create_team(&app, &admin, "Byte Club", "paper-presentation").await;

    let response = submit(&app, &judge, &team, &[10]).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_team_report_download() {
    let app = test_app();
    let admin = admin_token(&app).await;

    create_judge(&app, &admin, "rao@example.com", &["paper-presentation"]).await;
    let judge = judge_token(&app, "rao@example.com").await;
    let team = create_team(&app, &admin, "Byte Club", "paper-presentation").await;
    submit(&app, &judge, &team, &[20, 20, 20, 10, 10]).await;

    let analytics = send(
        &app,
        Method::GET,
        &format!("/api/v1/teams/{team}/analytics"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(analytics.status, StatusCode::OK);

    let report = send(
        &app,
        Method::GET,
        &format!("/api/v1/teams/{team}/report"),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(report.status, StatusCode::OK);
    assert_eq!(report.headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        report.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"Byte Club_Evaluation_Report.pdf\""
    );
    assert!(report.bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_rubrics_are_public() {
    let app = test_app();

    let known = send(&app, Method::GET, "/api/v1/rubrics/startup-expo", None, None).await;
    assert_eq!(known.status, StatusCode::OK);
    assert_eq!(known.json()["data"]["total_max_score"], 100);
    assert_eq!(known.json()["data"]["parameters"].as_array().unwrap().len(), 5);
    assert_eq!(
        known.json()["data"]["parameters"][4],
        json!({
            "question_number": 5,
            "parameter_name": "Pitch Delivery & Communication",
            "max_score": 20
        })
    );

    let unknown = send(&app, Method::GET, "/api/v1/rubrics/hackathon", None, None).await;
    assert_eq!(unknown.status, StatusCode::OK);
    assert_eq!(unknown.json()["data"]["total_max_score"], 0);
    assert!(unknown.json()["data"]["parameters"].as_array().unwrap().is_empty());
}
