use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::middleware::AuthGate;
use crate::services::users::{self, LoginRequest};
use crate::state::app_state::AppState;

/// The caller's own identity, without the password hash.
async fn me(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user = users::current_user(app_state.users(), current_user.id).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Exchange email and password for `{ token }`.
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let response = users::login(app_state.users(), &app_state.security, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(me).wrap(AuthGate))
            .route(web::post().to(login)),
    );
}
