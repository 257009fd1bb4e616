//! DTOs for profiles_sea adapter.

/// Writable profile fields. `skills` is already comma-joined.
#[derive(Debug, Clone)]
pub struct ProfileUpsert {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: String,
    pub skills: String,
    pub bio: Option<String>,
    pub github_username: Option<String>,
}
