//! Content type repository.

use std::sync::Arc;

use polls_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{ContentType, content_type};

/// Content type repository for database operations.
#[derive(Clone)]
pub struct ContentTypeRepository {
    db: Arc<DatabaseConnection>,
}

impl ContentTypeRepository {
    /// Create a new content type repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// List every registered content type, ordered by app label and model.
    pub async fn find_all(&self) -> AppResult<Vec<content_type::Model>> {
        ContentType::find()
            .order_by_asc(content_type::Column::AppLabel)
            .order_by_asc(content_type::Column::Model)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a content type by its `(app_label, model)` natural key.
    pub async fn find_by_natural_key(
        &self,
        app_label: &str,
        model: &str,
    ) -> AppResult<Option<content_type::Model>> {
        ContentType::find()
            .filter(content_type::Column::AppLabel.eq(app_label))
            .filter(content_type::Column::Model.eq(model))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the content type for `(app_label, model)`, creating it when absent.
    ///
    /// `new_id` is only called when a row is inserted.
    /// Returns the row and whether it was created by this call.
    pub async fn get_or_create(
        &self,
        app_label: &str,
        model: &str,
        name: &str,
        new_id: impl FnOnce() -> String + Send,
    ) -> AppResult<(content_type::Model, bool)> {
        if let Some(existing) = self.find_by_natural_key(app_label, model).await? {
            return Ok((existing, false));
        }

        let active = content_type::ActiveModel {
            id: Set(new_id()),
            app_label: Set(app_label.to_string()),
            model: Set(model.to_string()),
            name: Set(name.to_string()),
        };

        match active.insert(self.db.as_ref()).await {
            Ok(created) => Ok((created, true)),
            Err(err) => match super::map_insert_err(err) {
                AppError::Conflict(msg) => self
                    .find_by_natural_key(app_label, model)
                    .await?
                    .map(|existing| (existing, false))
                    .ok_or(AppError::Conflict(msg)),
                other => Err(other),
            },
        }
    }
}
