use actix_web::test;

use crate::common::read_ok_json;
use crate::support::app_builder::{create_test_app, test_state};

#[actix_web::test]
async fn health_reports_database_and_migrations() {
    let app = create_test_app(test_state().await).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = read_ok_json(test::call_service(&app, req).await).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert!(body.get("db_error").is_none());
    assert_eq!(body["app_version"], env!("CARGO_PKG_VERSION"));
    assert!(body["migrations"].as_str().unwrap().starts_with("m2025"));
    assert!(body["time"].as_str().is_some());
}

#[actix_web::test]
async fn health_is_public() {
    let app = create_test_app(test_state().await).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    assert!(resp.headers().contains_key("x-request-id"));
}
