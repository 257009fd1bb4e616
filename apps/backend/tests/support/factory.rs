//! Request helpers that drive the app through its public routes.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, Error};
use backend_test_support::unique_helpers::unique_email;
use serde_json::{json, Value};

pub const AUTH_HEADER: &str = "x-auth-token";
pub const PASSWORD: &str = "secret123";

/// A registered user as seen by a client.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub name: String,
    pub email: String,
    pub token: String,
}

/// Register a fresh user with a unique email and return its token.
pub async fn register_user<S>(app: &S, name: &str) -> TestUser
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let email = unique_email(&name.to_lowercase());
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({ "name": name, "email": email, "password": PASSWORD }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "registration should succeed");

    let body: Value = test::read_body_json(resp).await;
    let token = body["token"]
        .as_str()
        .expect("registration returns a token")
        .to_string();

    TestUser {
        name: name.to_string(),
        email,
        token,
    }
}

pub fn get(uri: &str, token: &str) -> Request {
    test::TestRequest::get()
        .uri(uri)
        .insert_header((AUTH_HEADER, token))
        .to_request()
}

pub fn post_json(uri: &str, token: &str, body: Value) -> Request {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((AUTH_HEADER, token))
        .set_json(body)
        .to_request()
}

pub fn delete(uri: &str, token: &str) -> Request {
    test::TestRequest::delete()
        .uri(uri)
        .insert_header((AUTH_HEADER, token))
        .to_request()
}
