//! DTOs for users_sea adapter.

/// DTO for inserting a new identity. Email must already be normalized.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
}
