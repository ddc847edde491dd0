//! Permission repository.

use std::sync::Arc;

use polls_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use crate::entities::{Permission, permission};

/// Permission repository for database operations.
#[derive(Clone)]
pub struct PermissionRepository {
    db: Arc<DatabaseConnection>,
}

impl PermissionRepository {
    /// Create a new permission repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a permission by content type and codename.
    pub async fn find_by_codename(
        &self,
        content_type_id: &str,
        codename: &str,
    ) -> AppResult<Option<permission::Model>> {
        Permission::find()
            .filter(permission::Column::ContentTypeId.eq(content_type_id))
            .filter(permission::Column::Codename.eq(codename))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a permission by content type and codename, returning
    /// [`AppError::NotFound`] if absent.
    pub async fn get_by_codename(
        &self,
        content_type_id: &str,
        codename: &str,
    ) -> AppResult<permission::Model> {
        self.find_by_codename(content_type_id, codename)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Permission {codename} for content type {content_type_id} not found"
                ))
            })
    }

    /// List the permissions of a content type.
    pub async fn find_by_content_type(
        &self,
        content_type_id: &str,
    ) -> AppResult<Vec<permission::Model>> {
        Permission::find()
            .filter(permission::Column::ContentTypeId.eq(content_type_id))
            .order_by_asc(permission::Column::Codename)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List every permission.
    pub async fn find_all(&self) -> AppResult<Vec<permission::Model>> {
        Permission::find()
            .order_by_asc(permission::Column::ContentTypeId)
            .order_by_asc(permission::Column::Codename)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new permission.
    ///
    /// A duplicate `(content_type_id, codename)` yields [`AppError::Conflict`].
    pub async fn create(&self, model: permission::ActiveModel) -> AppResult<permission::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(super::map_insert_err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_permission(id: &str, codename: &str) -> permission::Model {
        permission::Model {
            id: id.to_string(),
            content_type_id: "ct1".to_string(),
            codename: codename.to_string(),
            name: format!("Can {codename}"),
        }
    }

    #[tokio::test]
    async fn test_get_by_codename_found() {
        let perm = create_test_permission("p1", "view_question");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[perm.clone()]])
                .into_connection(),
        );

        let repo = PermissionRepository::new(db);
        let result = repo.get_by_codename("ct1", "view_question").await.unwrap();

        assert_eq!(result, perm);
    }

    #[tokio::test]
    async fn test_get_by_codename_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<permission::Model>::new()])
                .into_connection(),
        );

        let repo = PermissionRepository::new(db);
        let result = repo.get_by_codename("ct1", "list_question").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_find_by_content_type() {
        let p1 = create_test_permission("p1", "list_question");
        let p2 = create_test_permission("p2", "view_question");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1, p2]])
                .into_connection(),
        );

        let repo = PermissionRepository::new(db);
        let result = repo.find_by_content_type("ct1").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
