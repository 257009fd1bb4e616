//! Adapters for external dependencies.

pub mod posts_sea;
pub mod profiles_sea;
pub mod users_sea;
