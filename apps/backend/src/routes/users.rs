use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::users::{self, RegisterRequest};
use crate::state::app_state::AppState;

/// Register a user and return `{ token }`.
async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let response =
        users::register(app_state.users(), &app_state.security, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(register)));
}
