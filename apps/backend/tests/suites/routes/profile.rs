use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details_from_service_response;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::read_ok_json;
use crate::support::app_builder::{create_test_app, test_state};
use crate::support::factory::{get, post_json, register_user, AUTH_HEADER};

#[actix_web::test]
async fn me_without_profile_is_400() {
    let app = create_test_app(test_state().await).await;
    let user = register_user(&app, "Nopro").await;

    let resp = test::call_service(&app, get("/api/profile/me", &user.token)).await;
    assert_problem_details_from_service_response(
        resp,
        "NO_PROFILE",
        StatusCode::BAD_REQUEST,
        Some("There is no profile for this user"),
    )
    .await;
}

#[actix_web::test]
async fn create_then_update_profile() {
    let app = create_test_app(test_state().await).await;
    let user = register_user(&app, "Dana").await;

    let created = read_ok_json(
        test::call_service(
            &app,
            post_json(
                "/api/profile",
                &user.token,
                json!({
                    "status": "Developer",
                    "skills": " rust, sql ,, actix ",
                    "company": "Acme",
                    "githubusername": "dana-dev",
                    "bio": "   "
                }),
            ),
        )
        .await,
    )
    .await;

    assert_eq!(created["status"], "Developer");
    assert_eq!(created["skills"], json!(["rust", "sql", "actix"]));
    assert_eq!(created["company"], "Acme");
    assert_eq!(created["github_username"], "dana-dev");
    assert_eq!(created["bio"], Value::Null);
    assert_eq!(created["user"]["name"], "Dana");
    assert!(created["user"]["avatar"].as_str().is_some());

    let updated = read_ok_json(
        test::call_service(
            &app,
            post_json(
                "/api/profile",
                &user.token,
                json!({ "status": "Senior Developer", "skills": "rust" }),
            ),
        )
        .await,
    )
    .await;

    assert_eq!(updated["id"], created["id"], "profile is updated in place");
    assert_eq!(updated["status"], "Senior Developer");
    assert_eq!(updated["skills"], json!(["rust"]));
    assert_eq!(updated["company"], Value::Null);

    let me = read_ok_json(test::call_service(&app, get("/api/profile/me", &user.token)).await).await;
    assert_eq!(me, updated);
}

#[actix_web::test]
async fn profile_requires_status_and_skills() {
    let app = create_test_app(test_state().await).await;
    let user = register_user(&app, "Eve").await;

    let resp = test::call_service(&app, post_json("/api/profile", &user.token, json!({}))).await;
    let problem = assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        None,
    )
    .await;
    let params: Vec<&str> = problem.errors.iter().map(|e| e.param.as_str()).collect();
    assert_eq!(params, vec!["status", "skills"]);

    let resp = test::call_service(
        &app,
        post_json("/api/profile", &user.token, json!({ "status": "Dev", "skills": " , ," })),
    )
    .await;
    assert_problem_details_from_service_response(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("Skills is required"),
    )
    .await;
}

#[actix_web::test]
async fn saving_a_profile_needs_a_token() {
    let app = create_test_app(test_state().await).await;

    let req = test::TestRequest::post()
        .uri("/api/profile")
        .set_json(json!({ "status": "Dev", "skills": "rust" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "NO_TOKEN_PROVIDED",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/profile")
        .insert_header((AUTH_HEADER, "garbage"))
        .set_json(json!({ "status": "Dev", "skills": "rust" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_from_service_response(
        resp,
        "TOKEN_INVALID",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn public_profile_listing_and_lookup() {
    let state = test_state().await;
    let app = create_test_app(state.clone()).await;
    let frank = register_user(&app, "Frank").await;
    let grace = register_user(&app, "Grace").await;

    for user in [&frank, &grace] {
        let resp = test::call_service(
            &app,
            post_json("/api/profile", &user.token, json!({ "status": "Dev", "skills": "rust" })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get().uri("/api/profile").to_request();
    let all = read_ok_json(test::call_service(&app, req).await).await;
    let names: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["user"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Frank"));
    assert!(names.contains(&"Grace"));

    let frank_id = state
        .users()
        .find_by_email(&frank.email)
        .await
        .unwrap()
        .unwrap()
        .id;
    let req = test::TestRequest::get()
        .uri(&format!("/api/profile/user/{frank_id}"))
        .to_request();
    let profile = read_ok_json(test::call_service(&app, req).await).await;
    assert_eq!(profile["user"]["id"], Value::String(frank_id.to_string()));
    assert_eq!(profile["user"]["name"], "Frank");
}

#[actix_web::test]
async fn lookup_of_unknown_or_garbage_id_is_400() {
    let app = create_test_app(test_state().await).await;

    for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/profile/user/{id}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_from_service_response(
            resp,
            "PROFILE_NOT_FOUND",
            StatusCode::BAD_REQUEST,
            Some("Profile not found"),
        )
        .await;
    }
}
