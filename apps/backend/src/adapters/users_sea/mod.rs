//! SeaORM adapter for the credential store.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use uuid::Uuid;

use crate::entities::users;
use crate::errors::domain::DomainError;
use crate::repos::users::{Identity, NewIdentity, UserRepo};

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: Uuid,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(id).one(conn).await
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(dto.name),
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        avatar: Set(dto.avatar),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    user_active.insert(conn).await
}

/// SeaORM implementation of UserRepo over a pooled connection.
#[derive(Debug, Clone)]
pub struct UserRepoSea {
    db: DatabaseConnection,
}

impl UserRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for UserRepoSea {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, DomainError> {
        let user = find_by_email(&self.db, email).await?;
        Ok(user.map(Identity::from))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, DomainError> {
        let user = find_by_id(&self.db, id).await?;
        Ok(user.map(Identity::from))
    }

    async fn insert(&self, new_identity: NewIdentity) -> Result<Identity, DomainError> {
        let dto = UserCreate {
            name: new_identity.name,
            email: new_identity.email,
            password_hash: new_identity.password_hash,
            avatar: new_identity.avatar_url,
        };
        let user = create_user(&self.db, dto).await?;
        Ok(Identity::from(user))
    }
}
