use backend_test_support::unique_helpers::unique_email;
use devconnect::adapters::users_sea::UserRepoSea;
use devconnect::errors::domain::{ConflictKind, DomainError};
use devconnect::{NewIdentity, UserRepo};
use uuid::Uuid;

use crate::support::app_builder::test_state;

fn new_identity(email: &str) -> NewIdentity {
    NewIdentity {
        name: "Stored".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
        avatar_url: "https://www.gravatar.com/avatar/abc?s=200&r=pg&d=mm".to_string(),
    }
}

async fn repo() -> UserRepoSea {
    let state = test_state().await;
    UserRepoSea::new(state.db().clone())
}

#[tokio::test]
async fn insert_assigns_id_and_round_trips() {
    let repo = repo().await;
    let email = unique_email("store");

    let inserted = repo.insert(new_identity(&email)).await.unwrap();
    assert_ne!(inserted.id, Uuid::nil());
    assert_eq!(inserted.email, email);

    let by_email = repo.find_by_email(&email).await.unwrap().expect("by email");
    let by_id = repo.find_by_id(inserted.id).await.unwrap().expect("by id");

    assert_eq!(by_email.id, inserted.id);
    assert_eq!(by_id.email, email);
    assert_eq!(by_id.name, "Stored");
    assert_eq!(by_id.password_hash, inserted.password_hash);
    assert_eq!(by_id.avatar_url, inserted.avatar_url);
}

#[tokio::test]
async fn lookups_miss_cleanly() {
    let repo = repo().await;

    assert!(repo
        .find_by_email(&unique_email("ghost"))
        .await
        .unwrap()
        .is_none());
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn ids_are_unique_per_insert() {
    let repo = repo().await;

    let a = repo.insert(new_identity(&unique_email("a"))).await.unwrap();
    let b = repo.insert(new_identity(&unique_email("b"))).await.unwrap();
    assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn duplicate_email_is_unique_email_conflict() {
    let repo = repo().await;
    let email = unique_email("twice");

    repo.insert(new_identity(&email)).await.unwrap();
    let err = repo.insert(new_identity(&email)).await.unwrap_err();

    assert!(
        matches!(err, DomainError::Conflict(ConflictKind::UniqueEmail, _)),
        "unexpected error: {err:?}"
    );
}
