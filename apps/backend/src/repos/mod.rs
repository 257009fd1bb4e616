//! Repository layer: domain models and DomainError-returning access functions.

pub mod posts;
pub mod profiles;
pub mod users;
