//! Integration tests for user accounts and authentication.

mod common;

use common::setup_db;
use hydra_db::{CreateUserInput, UserError, UserRepository};

fn cashier_input() -> CreateUserInput {
    CreateUserInput {
        username: "maria".to_string(),
        display_name: "Maria Silva".to_string(),
        password: "correct horse battery".to_string(),
        role: "cashier".to_string(),
    }
}

#[tokio::test]
async fn test_create_user_hashes_password() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());

    let user = repo.create(cashier_input()).await.unwrap();
    assert!(user.active);
    assert!(user.password_hash.starts_with("$argon2id$"));
    assert_ne!(user.password_hash, "correct horse battery");
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());

    repo.create(cashier_input()).await.unwrap();
    let second = repo.create(cashier_input()).await;

    assert!(matches!(second, Err(UserError::DuplicateUsername(_))));
}

#[tokio::test]
async fn test_short_password_rejected() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());

    let result = repo
        .create(CreateUserInput {
            password: "short".to_string(),
            ..cashier_input()
        })
        .await;

    assert!(matches!(result, Err(UserError::Validation(_))));
}

#[tokio::test]
async fn test_authenticate_happy_path() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());
    repo.create(cashier_input()).await.unwrap();

    let user = repo
        .authenticate("maria", "correct horse battery")
        .await
        .expect("Valid credentials should authenticate");
    assert_eq!(user.username, "maria");
}

#[tokio::test]
async fn test_authenticate_wrong_password() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());
    repo.create(cashier_input()).await.unwrap();

    let result = repo.authenticate("maria", "wrong password!").await;
    assert!(matches!(result, Err(UserError::InvalidCredentials)));
}

#[tokio::test]
async fn test_authenticate_unknown_user() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());

    let result = repo.authenticate("nobody", "whatever pass").await;
    assert!(matches!(result, Err(UserError::InvalidCredentials)));
}

#[tokio::test]
async fn test_change_password_rotates_credentials() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());
    let user = repo.create(cashier_input()).await.unwrap();

    repo.change_password(user.id, "fresh horse battery")
        .await
        .unwrap();

    let old = repo.authenticate("maria", "correct horse battery").await;
    assert!(matches!(old, Err(UserError::InvalidCredentials)));
    repo.authenticate("maria", "fresh horse battery")
        .await
        .expect("New password should authenticate");
}

#[tokio::test]
async fn test_change_password_rejects_short_password() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());
    let user = repo.create(cashier_input()).await.unwrap();

    let result = repo.change_password(user.id, "tiny").await;
    assert!(matches!(result, Err(UserError::Validation(_))));
}

#[tokio::test]
async fn test_inactive_user_cannot_authenticate() {
    let db = setup_db().await;
    let repo = UserRepository::new(db.clone());
    let user = repo.create(cashier_input()).await.unwrap();

    repo.set_active(user.id, false).await.unwrap();

    let result = repo.authenticate("maria", "correct horse battery").await;
    assert!(matches!(result, Err(UserError::InvalidCredentials)));
}
