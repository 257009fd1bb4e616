use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use devconnect::infra::state::build_state;
use devconnect::middleware::{RequestTrace, TraceSpan};
use devconnect::routes;
use devconnect::state::app_state::AppState;
use devconnect::SecurityConfig;

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

pub fn test_security() -> SecurityConfig {
    SecurityConfig::new(TEST_SECRET)
}

/// Fresh state over its own migrated in-memory SQLite database.
pub async fn test_state() -> AppState {
    build_state()
        .with_db_url("sqlite::memory:")
        .with_security(test_security())
        .build()
        .await
        .expect("in-memory test state should build")
}

/// The production route table behind the same trace middleware as `main.rs`.
///
/// CORS is left out: it changes the body type and is not under test here.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}
