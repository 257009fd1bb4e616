use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use backend_test_support::unique_helpers::unique_email;
use devconnect::verify_subject;
use serde_json::{json, Value};

use crate::common::read_ok_json;
use crate::support::app_builder::{create_test_app, test_security, test_state};
use crate::support::factory::{get, register_user, PASSWORD};

fn login_req(body: Value) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/auth")
        .set_json(body)
        .to_request()
}

#[actix_web::test]
async fn login_returns_token_for_same_identity() {
    let state = test_state().await;
    let app = create_test_app(state.clone()).await;
    let user = register_user(&app, "Bob").await;

    let resp = test::call_service(
        &app,
        login_req(json!({ "email": user.email, "password": PASSWORD })),
    )
    .await;
    let body = read_ok_json(resp).await;
    let token = body["token"].as_str().expect("token in body");

    let stored = state
        .users()
        .find_by_email(&user.email)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(verify_subject(token, &test_security()).unwrap(), stored.id);

    let resp = test::call_service(&app, get("/api/auth", token)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn login_email_is_case_insensitive() {
    let app = create_test_app(test_state().await).await;
    let user = register_user(&app, "Case").await;

    let resp = test::call_service(
        &app,
        login_req(json!({ "email": user.email.to_uppercase(), "password": PASSWORD })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = create_test_app(test_state().await).await;
    let user = register_user(&app, "Carol").await;

    let wrong_password = test::call_service(
        &app,
        login_req(json!({ "email": user.email, "password": "not-the-password" })),
    )
    .await;
    let a = assert_problem_details_from_service_response(
        wrong_password,
        "INVALID_CREDENTIALS",
        StatusCode::BAD_REQUEST,
        Some("Invalid credentials"),
    )
    .await;

    let unknown_email = test::call_service(
        &app,
        login_req(json!({ "email": unique_email("nobody"), "password": PASSWORD })),
    )
    .await;
    let b = assert_problem_details_from_service_response(
        unknown_email,
        "INVALID_CREDENTIALS",
        StatusCode::BAD_REQUEST,
        Some("Invalid credentials"),
    )
    .await;

    assert_eq!(a.detail, b.detail);
    assert_eq!(a.title, b.title);
}

#[actix_web::test]
async fn login_validates_fields() {
    let app = create_test_app(test_state().await).await;

    let resp = test::call_service(&app, login_req(json!({ "email": "nope" }))).await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;

    let params: Vec<&str> = problem.errors.iter().map(|e| e.param.as_str()).collect();
    assert_eq!(params, vec!["email", "password"]);
}
