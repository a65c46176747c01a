//! Collaborator repository.
//!
//! Collaborators are staff allowed to buy on account. Only active
//! collaborators can be attached to new sales; deactivation preserves
//! their history and outstanding debts.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use uuid::Uuid;

use crate::entities::collaborators;

/// Error types for collaborator operations.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    /// No collaborator with this id.
    #[error("Collaborator not found: {0}")]
    NotFound(Uuid),

    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a collaborator.
#[derive(Debug, Clone)]
pub struct CreateCollaboratorInput {
    /// Display name.
    pub name: String,
    /// Optional badge or payroll code.
    pub code: Option<String>,
}

/// Collaborator repository.
#[derive(Debug, Clone)]
pub struct CollaboratorRepository {
    db: DatabaseConnection,
}

impl CollaboratorRepository {
    /// Creates a new collaborator repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers an active collaborator.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name, or a database error.
    pub async fn create(
        &self,
        input: CreateCollaboratorInput,
    ) -> Result<collaborators::Model, CollaboratorError> {
        if input.name.trim().is_empty() {
            return Err(CollaboratorError::Validation(
                "name is required".to_string(),
            ));
        }

        let now = Utc::now();
        let collaborator = collaborators::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            code: Set(input.code),
            active: Set(true),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let collaborator = collaborator.insert(&self.db).await?;

        tracing::info!(collaborator_id = %collaborator.id, "Collaborator created");

        Ok(collaborator)
    }

    /// Gets a collaborator by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, or a database error.
    pub async fn find_by_id(&self, id: Uuid) -> Result<collaborators::Model, CollaboratorError> {
        collaborators::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CollaboratorError::NotFound(id))
    }

    /// Sets the active flag.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if absent, or a database error.
    pub async fn set_active(
        &self,
        id: Uuid,
        active: bool,
    ) -> Result<collaborators::Model, CollaboratorError> {
        let collaborator = self.find_by_id(id).await?;
        let mut model: collaborators::ActiveModel = collaborator.into();
        model.active = Set(active);
        model.updated_at = Set(Utc::now().into());
        Ok(model.update(&self.db).await?)
    }

    /// Lists collaborators sorted by name, optionally active only.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        active_only: bool,
    ) -> Result<Vec<collaborators::Model>, CollaboratorError> {
        let mut query = collaborators::Entity::find();
        if active_only {
            query = query.filter(collaborators::Column::Active.eq(true));
        }

        let collaborators = query
            .order_by_asc(collaborators::Column::Name)
            .all(&self.db)
            .await?;

        Ok(collaborators)
    }
}
