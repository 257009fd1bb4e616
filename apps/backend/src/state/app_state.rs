use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::adapters::users_sea::UserRepoSea;
use crate::repos::users::UserRepo;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    users: Arc<dyn UserRepo>,
}

impl AppState {
    /// Create a new AppState backed by `db` for every store, credentials included
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        let users = Arc::new(UserRepoSea::new(db.clone()));
        Self {
            db,
            security,
            users,
        }
    }

    /// Swap the credential store (e.g. to inject failures in tests)
    pub fn with_user_repo(mut self, users: Arc<dyn UserRepo>) -> Self {
        self.users = users;
        self
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// The credential store
    pub fn users(&self) -> &dyn UserRepo {
        self.users.as_ref()
    }
}
