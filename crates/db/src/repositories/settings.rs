//! Settings repository: JSON values under well-known keys.
//!
//! Fiscal and receipt parameters (store name, tax id, default location,
//! receipt footer) live here instead of in code. Writes are upserts by
//! key.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

use crate::entities::settings;

/// Settings repository.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    db: DatabaseConnection,
}

impl SettingsRepository {
    /// Creates a new settings repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the value stored under a key, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, DbErr> {
        let setting = settings::Entity::find_by_id(key).one(&self.db).await?;
        Ok(setting.map(|s| s.value))
    }

    /// Inserts or replaces the value under a key.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), DbErr> {
        let model = settings::ActiveModel {
            key: Set(key.to_string()),
            value: Set(value),
            updated_at: Set(Utc::now().into()),
        };

        settings::Entity::insert(model)
            .on_conflict(
                OnConflict::column(settings::Column::Key)
                    .update_columns([settings::Column::Value, settings::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec(&self.db)
            .await?;

        tracing::info!(key, "Setting updated");

        Ok(())
    }

    /// Lists every setting, sorted by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self) -> Result<Vec<settings::Model>, DbErr> {
        settings::Entity::find()
            .order_by_asc(settings::Column::Key)
            .all(&self.db)
            .await
    }
}
