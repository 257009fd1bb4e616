//! Credential store: identity records keyed by id and by email.

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::users;
use crate::errors::domain::DomainError;

/// Identity domain model.
///
/// Holds the password hash, so it is deliberately not `Serialize`; handlers
/// project it into a response type instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: String,
    pub created_at: OffsetDateTime,
}

/// Fields for a new identity; the store assigns id and creation time.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: String,
}

/// Persistence seam for identities.
///
/// `insert` fails with `Conflict(UniqueEmail)` when the email is already
/// taken, including when a concurrent insert won the race.
#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, DomainError>;

    async fn insert(&self, new_identity: NewIdentity) -> Result<Identity, DomainError>;
}

impl From<users::Model> for Identity {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            password_hash: model.password_hash,
            avatar_url: model.avatar,
            created_at: model.created_at,
        }
    }
}
