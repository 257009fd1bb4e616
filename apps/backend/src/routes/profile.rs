use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::middleware::AuthGate;
use crate::services::profiles::{self, ProfileRequest};
use crate::state::app_state::AppState;

async fn my_profile(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = profiles::my_profile(app_state.db(), current_user.id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn upsert_profile(
    current_user: CurrentUser,
    body: ValidatedJson<ProfileRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile =
        profiles::upsert_profile(app_state.db(), current_user.id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

async fn all_profiles(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let list = profiles::all_profiles(app_state.db()).await?;
    Ok(HttpResponse::Ok().json(list))
}

async fn profile_for_user(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let profile = profiles::profile_for_user(app_state.db(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(all_profiles))
            .route(web::post().to(upsert_profile).wrap(AuthGate)),
    )
    .service(
        web::resource("/me")
            .wrap(AuthGate)
            .route(web::get().to(my_profile)),
    )
    .service(web::resource("/user/{user_id}").route(web::get().to(profile_for_user)));
}
