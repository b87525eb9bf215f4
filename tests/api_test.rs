//! Integration tests for the admin HTTP surface.
//!
//! Requests go through the full router (JWT middleware included) against an
//! in-memory SQLite database.

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use clinic_api::api::{create_router, AppState};
use clinic_api::config::Config;
use clinic_api::domain::{Account, Role};
use clinic_api::services::{
    AuthService, Authenticator, Directory, Offboarder, Registrar, Services,
};
use common::{clinic, Clinic, RecordingDispatcher};

const SECRET: &str = "integration-test-secret-at-least-32-chars";

struct Harness {
    clinic: Clinic,
    dispatcher: Arc<RecordingDispatcher>,
    app: Router,
}

async fn harness() -> Harness {
    let clinic = clinic().await;
    let dispatcher = RecordingDispatcher::new();

    let services = Services::new(
        Arc::new(Authenticator::new(Config::new("sqlite::memory:", SECRET))),
        Arc::new(Offboarder::new(clinic.uow.clone(), dispatcher.clone())),
        Arc::new(Registrar::new(clinic.uow.clone())),
        Arc::new(Directory::new(clinic.uow.clone())),
    );
    let app = create_router(AppState::new(&services, Arc::new(clinic.db.clone())));

    Harness {
        clinic,
        dispatcher,
        app,
    }
}

fn token_for(account: &Account) -> String {
    Authenticator::new(Config::new("sqlite::memory:", SECRET))
        .issue_token(account)
        .unwrap()
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_reports_database() {
    let h = harness().await;

    let (status, body) = send(&h.app, request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_admin_routes_require_token() {
    let h = harness().await;
    let uri = format!("/admin/patients/{}/offboard", Uuid::new_v4());

    let (status, body) = send(
        &h.app,
        request("POST", &uri, None, Some(json!({}))),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = send(
        &h.app,
        request("POST", &uri, Some("not-a-jwt"), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_admin_cannot_offboard() {
    let h = harness().await;
    let (specialist_account, specialist) = h.clinic.specialist("sam@clinic.test", "Sam").await;
    let uri = format!("/admin/specialists/{}/offboard", specialist.id);

    let (status, _) = send(
        &h.app,
        request(
            "POST",
            &uri,
            Some(&token_for(&specialist_account)),
            Some(json!({})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(h.clinic.role_of(specialist_account.id).await, Role::Specialist);
}

#[tokio::test]
async fn test_admin_offboards_specialist() {
    let h = harness().await;
    let admin = h.clinic.admin().await;
    let (specialist_account, specialist) = h.clinic.specialist("sam@clinic.test", "Sam").await;
    let (patient_account, patient) = h.clinic.patient("pia@clinic.test", "Pia").await;
    h.clinic
        .appointment(&patient, &specialist, Duration::days(1))
        .await;
    let past = h
        .clinic
        .appointment(&patient, &specialist, -Duration::days(1))
        .await;

    let uri = format!("/admin/specialists/{}/offboard", specialist.id);
    let (status, body) = send(
        &h.app,
        request(
            "POST",
            &uri,
            Some(&token_for(&admin)),
            Some(json!({ "include_past_appointments": false })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["account_demoted"], true);
    assert_eq!(body["data"]["appointments_deleted"], 1);
    assert_eq!(body["data"]["notifications_queued"], 1);

    assert_eq!(h.clinic.role_of(specialist_account.id).await, Role::Basic);
    assert_eq!(h.dispatcher.recipients(), vec![patient_account.id]);
    assert!(h.clinic.find_appointment(past.id).await.is_some());

    let (status, _) = send(
        &h.app,
        request("POST", &uri, Some(&token_for(&admin)), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_enrolls_and_inspects_account() {
    let h = harness().await;
    let admin = h.clinic.admin().await;
    let account = h.clinic.account("newcomer@clinic.test", "Newcomer").await;
    let token = token_for(&admin);

    let (status, body) = send(
        &h.app,
        request(
            "POST",
            &format!("/admin/accounts/{}/enroll", account.id),
            Some(&token),
            Some(json!({ "kind": "specialist", "specialty": "Dermatology" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["details"]["kind"], "specialist");
    assert_eq!(body["data"]["details"]["specialty"], "Dermatology");

    let (status, body) = send(
        &h.app,
        request(
            "GET",
            &format!("/admin/accounts/{}", account.id),
            Some(&token),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["account"]["role"], "specialist");
    assert_eq!(body["data"]["profiles"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_enroll_rejects_blank_specialty() {
    let h = harness().await;
    let admin = h.clinic.admin().await;
    let account = h.clinic.account("newcomer@clinic.test", "Newcomer").await;

    let (status, body) = send(
        &h.app,
        request(
            "POST",
            &format!("/admin/accounts/{}/enroll", account.id),
            Some(&token_for(&admin)),
            Some(json!({ "kind": "specialist", "specialty": "  " })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(h.clinic.role_of(account.id).await, Role::Basic);
}

#[tokio::test]
async fn test_list_appointments_of_missing_profile() {
    let h = harness().await;
    let admin = h.clinic.admin().await;

    let (status, _) = send(
        &h.app,
        request(
            "GET",
            &format!("/admin/patients/{}/appointments", Uuid::new_v4()),
            Some(&token_for(&admin)),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_offboard_without_body_keeps_past_appointments() {
    let h = harness().await;
    let admin = h.clinic.admin().await;
    let (_, specialist) = h.clinic.specialist("sam@clinic.test", "Sam").await;
    let (_, patient) = h.clinic.patient("pia@clinic.test", "Pia").await;
    h.clinic
        .appointment(&patient, &specialist, Duration::days(1))
        .await;
    let past = h
        .clinic
        .appointment(&patient, &specialist, -Duration::days(1))
        .await;

    let (status, body) = send(
        &h.app,
        request(
            "POST",
            &format!("/admin/specialists/{}/offboard", specialist.id),
            Some(&token_for(&admin)),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["appointments_deleted"], 1);
    assert!(h.clinic.find_appointment(past.id).await.is_some());
}

#[tokio::test]
async fn test_offboard_rejects_mistyped_flag() {
    let h = harness().await;
    let admin = h.clinic.admin().await;
    let (specialist_account, specialist) = h.clinic.specialist("sam@clinic.test", "Sam").await;

    let (status, body) = send(
        &h.app,
        request(
            "POST",
            &format!("/admin/specialists/{}/offboard", specialist.id),
            Some(&token_for(&admin)),
            Some(json!({ "include_past_appointments": "yes" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(h.clinic.role_of(specialist_account.id).await, Role::Specialist);
}
