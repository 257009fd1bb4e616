use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use async_trait::async_trait;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use devconnect::entities::users;
use devconnect::errors::domain::{DomainError, InfraErrorKind};
use devconnect::utils::avatar::gravatar_url;
use devconnect::{verify_password, verify_subject, Identity, NewIdentity, UserRepo};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::support::app_builder::{create_test_app, test_security, test_state};

fn register_req(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/users")
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn register_returns_token_for_new_identity() {
    let state = test_state().await;
    let app = create_test_app(state.clone()).await;
    let email = unique_email("jane");

    let resp = test::call_service(
        &app,
        register_req(json!({ "name": "Jane", "email": email, "password": "secret1" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let token = body["token"].as_str().expect("token in body");
    assert_eq!(body.as_object().map(|o| o.len()), Some(1), "only the token");

    let subject = verify_subject(token, &test_security()).expect("token verifies");
    let stored = state
        .users()
        .find_by_email(&email)
        .await
        .unwrap()
        .expect("identity stored");

    assert_eq!(stored.id, subject);
    assert_eq!(stored.name, "Jane");
    assert_eq!(stored.avatar_url, gravatar_url(&email));
    assert_ne!(stored.password_hash, "secret1");
    assert!(verify_password("secret1", &stored.password_hash).unwrap());
}

#[actix_web::test]
async fn register_normalizes_email_case() {
    let state = test_state().await;
    let app = create_test_app(state.clone()).await;
    let email = unique_email("mixed");

    let resp = test::call_service(
        &app,
        register_req(json!({
            "name": "Mixed",
            "email": format!("  {}", email.to_uppercase()),
            "password": "secret1"
        })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(state.users().find_by_email(&email).await.unwrap().is_some());
}

#[actix_web::test]
async fn duplicate_registration_is_400_and_leaves_store_unchanged() {
    let state = test_state().await;
    let app = create_test_app(state.clone()).await;
    let email = unique_email("dup");

    let first = test::call_service(
        &app,
        register_req(json!({ "name": "First", "email": email, "password": "secret1" })),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    let before = users::Entity::find().count(state.db()).await.unwrap();

    let second = test::call_service(
        &app,
        register_req(json!({ "name": "Second", "email": email, "password": "other-secret" })),
    )
    .await;
    assert_problem_details_from_service_response(
        second,
        "USER_ALREADY_EXISTS",
        StatusCode::BAD_REQUEST,
        Some("User already exists"),
    )
    .await;

    let after = users::Entity::find().count(state.db()).await.unwrap();
    assert_eq!(before, after);

    let stored = state.users().find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(stored.name, "First");
}

#[actix_web::test]
async fn invalid_fields_are_reported_together() {
    let state = test_state().await;
    let app = create_test_app(state.clone()).await;

    let resp = test::call_service(
        &app,
        register_req(json!({ "name": "", "email": "not-an-email", "password": "12345" })),
    )
    .await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;

    let fields: Vec<(&str, &str)> = problem
        .errors
        .iter()
        .map(|e| (e.param.as_str(), e.msg.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("name", "Name is required"),
            ("email", "Please include a valid email"),
            ("password", "Please enter a password with 6 or more characters"),
        ]
    );

    assert_eq!(users::Entity::find().count(state.db()).await.unwrap(), 0);
}

#[actix_web::test]
async fn empty_body_fails_validation_not_parsing() {
    let app = create_test_app(test_state().await).await;

    let req = test::TestRequest::post().uri("/api/users").to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    assert_eq!(problem.errors.len(), 3);
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = create_test_app(test_state().await).await;

    let req = test::TestRequest::post()
        .uri("/api/users")
        .insert_header(("content-type", "application/json"))
        .set_payload(r#"{"name": "Jane", "email": }"#)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "BAD_REQUEST",
        StatusCode::BAD_REQUEST,
        Some("Invalid JSON"),
    )
    .await;
}

/// Credential store that is unreachable.
struct UnreachableStore;

#[async_trait]
impl UserRepo for UnreachableStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<Identity>, DomainError> {
        Err(DomainError::infra(
            InfraErrorKind::DbUnavailable,
            "pool timed out at 10.1.2.3:5432",
        ))
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Identity>, DomainError> {
        Err(DomainError::infra(
            InfraErrorKind::DbUnavailable,
            "pool timed out at 10.1.2.3:5432",
        ))
    }

    async fn insert(&self, _new_identity: NewIdentity) -> Result<Identity, DomainError> {
        Err(DomainError::infra(
            InfraErrorKind::DbUnavailable,
            "pool timed out at 10.1.2.3:5432",
        ))
    }
}

#[actix_web::test]
async fn store_failure_is_opaque_server_error() {
    let state = test_state()
        .await
        .with_user_repo(Arc::new(UnreachableStore));
    let app = create_test_app(state).await;

    let resp = test::call_service(
        &app,
        register_req(json!({
            "name": "Jane",
            "email": unique_email("down"),
            "password": "secret1"
        })),
    )
    .await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "DB_UNAVAILABLE",
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    )
    .await;

    assert_eq!(problem.detail, "Server error");
    assert!(!problem.detail.contains("10.1.2.3"));
}
