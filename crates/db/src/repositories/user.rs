//! User repository: operator accounts and credential checks.

use chrono::Utc;
use hydra_core::auth::{PasswordError, hash_password, verify_password};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::users;

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// No user with this id or username.
    #[error("User not found")]
    NotFound,

    /// Username already taken.
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Bad username or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Password hashing failed.
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a user.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Unique login name.
    pub username: String,
    /// Name shown on receipts and audit trails.
    pub display_name: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Role label, e.g. `admin` or `cashier`.
    pub role: String,
}

/// User repository.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active user with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateUsername` if the username is taken, a validation
    /// error for blank fields or a too-short password, or a database
    /// error.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, UserError> {
        if input.username.trim().is_empty() {
            return Err(UserError::Validation("username is required".to_string()));
        }
        if input.password.len() < 8 {
            return Err(UserError::Validation(
                "password must be at least 8 characters".to_string(),
            ));
        }

        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(&input.username))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let password_hash = hash_password(&input.password)?;

        let now = Utc::now();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(input.username),
            display_name: Set(input.display_name),
            password_hash: Set(password_hash),
            role: Set(input.role),
            active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let user = user.insert(&self.db).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");

        Ok(user)
    }

    /// Verifies a username/password pair against the stored hash.
    ///
    /// Inactive users cannot authenticate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` for an unknown username, an inactive
    /// account, or a wrong password; propagates hashing and database
    /// errors.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<users::Model, UserError> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !user.active {
            return Err(UserError::InvalidCredentials);
        }

        if verify_password(password, &user.password_hash)? {
            Ok(user)
        } else {
            Err(UserError::InvalidCredentials)
        }
    }

    /// Gets a user by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, or a database error.
    pub async fn find_by_id(&self, id: Uuid) -> Result<users::Model, UserError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound)
    }

    /// Replaces a user's password with a freshly hashed one.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, a validation error for a too-short
    /// password, or propagates hashing and database errors.
    pub async fn change_password(
        &self,
        id: Uuid,
        new_password: &str,
    ) -> Result<users::Model, UserError> {
        if new_password.len() < 8 {
            return Err(UserError::Validation(
                "password must be at least 8 characters".to_string(),
            ));
        }

        let user = self.find_by_id(id).await?;
        let mut model: users::ActiveModel = user.into();
        model.password_hash = Set(hash_password(new_password)?);
        model.updated_at = Set(Utc::now().into());
        let user = model.update(&self.db).await?;

        tracing::info!(user_id = %user.id, "Password changed");

        Ok(user)
    }

    /// Sets the active flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, or a database error.
    pub async fn set_active(&self, id: Uuid, active: bool) -> Result<users::Model, UserError> {
        let user = self.find_by_id(id).await?;
        let mut model: users::ActiveModel = user.into();
        model.active = Set(active);
        model.updated_at = Set(Utc::now().into());
        Ok(model.update(&self.db).await?)
    }

    /// Lists all users sorted by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<users::Model>, UserError> {
        let users = users::Entity::find()
            .order_by_asc(users::Column::Username)
            .all(&self.db)
            .await?;

        Ok(users)
    }
}
