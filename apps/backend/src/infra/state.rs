use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    security_config: Option<SecurityConfig>,
    database_url: Option<String>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_db_url(mut self, database_url: impl Into<String>) -> Self {
        self.database_url = Some(database_url.into());
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = Some(security_config);
        self
    }

    /// Connect, migrate, and assemble the state.
    pub async fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security_config
            .ok_or_else(|| AppError::config("signing secret not configured"))?;
        let database_url = self
            .database_url
            .ok_or_else(|| AppError::config("database url not configured"))?;

        let conn = bootstrap_db(&database_url).await?;
        Ok(AppState::new(conn, security))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
