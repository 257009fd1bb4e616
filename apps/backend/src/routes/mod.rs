use actix_web::web;

use crate::middleware::AuthGate;

pub mod auth;
pub mod health;
pub mod posts;
pub mod profile;
pub mod users;

/// Register every route. Used by `main.rs` and by the integration tests.
///
/// Protected routes carry `AuthGate` themselves, so whatever builds the
/// `App` cannot forget it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Registration: /api/users
    cfg.service(web::scope("/api/users").configure(users::configure_routes));

    // Login and current identity: /api/auth
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // Profiles: /api/profile/**
    cfg.service(web::scope("/api/profile").configure(profile::configure_routes));

    // Posts and comments: /api/posts/** (all protected)
    cfg.service(
        web::scope("/api/posts")
            .wrap(AuthGate)
            .configure(posts::configure_routes),
    );
}
