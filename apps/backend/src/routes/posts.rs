//! Post and comment routes. The whole scope sits behind `AuthGate`.

use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::posts::{self, TextRequest};
use crate::state::app_state::AppState;

async fn create_post(
    current_user: CurrentUser,
    body: ValidatedJson<TextRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = posts::create_post(
        app_state.db(),
        app_state.users(),
        current_user.id,
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(post))
}

async fn list_posts(
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let list = posts::list_posts(app_state.db()).await?;
    Ok(HttpResponse::Ok().json(list))
}

async fn get_post(
    _current_user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post = posts::get_post(app_state.db(), &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

async fn delete_post(
    current_user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let msg = posts::delete_post(app_state.db(), current_user.id, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(msg))
}

async fn add_comment(
    current_user: CurrentUser,
    path: web::Path<String>,
    body: ValidatedJson<TextRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let comments = posts::add_comment(
        app_state.db(),
        app_state.users(),
        current_user.id,
        &path.into_inner(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(comments))
}

async fn delete_comment(
    current_user: CurrentUser,
    path: web::Path<(String, String)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (post_id, comment_id) = path.into_inner();
    let comments =
        posts::delete_comment(app_state.db(), current_user.id, &post_id, &comment_id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/comment/{id}").route(web::post().to(add_comment)))
        .service(
            web::resource("/comment/{id}/{comment_id}").route(web::delete().to(delete_comment)),
        )
        .service(
            web::resource("")
                .route(web::get().to(list_posts))
                .route(web::post().to(create_post)),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_post))
                .route(web::delete().to(delete_post)),
        );
}
