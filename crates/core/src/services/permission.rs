//! Permission bootstrap.
//!
//! Content types and permissions are reached through the
//! [`PermissionRegistry`] trait so the bootstrap logic does not depend on a
//! concrete store. [`DbPermissionRegistry`] is the database-backed one.

use std::sync::Arc;

use async_trait::async_trait;
use polls_common::{AppError, AppResult, IdGenerator};
use polls_db::entities::{content_type, permission};
use polls_db::repositories::{ContentTypeRepository, PermissionRepository};
use sea_orm::Set;
use tracing::info;

/// Actions granted to every content type after a permission sync.
pub const BOOTSTRAP_ACTIONS: [&str; 2] = ["view", "list"];

/// Registry of content types and their permissions.
#[async_trait]
pub trait PermissionRegistry: Send + Sync {
    /// List every registered content type.
    async fn content_types(&self) -> AppResult<Vec<content_type::Model>>;

    /// Find the content type for `(app_label, model)`, registering it with
    /// `name` when absent. Returns whether it was created.
    async fn get_or_create_content_type(
        &self,
        app_label: &str,
        model: &str,
        name: &str,
    ) -> AppResult<(content_type::Model, bool)>;

    /// Get a permission, returning [`AppError::NotFound`] if absent.
    async fn get_permission(
        &self,
        content_type_id: &str,
        codename: &str,
    ) -> AppResult<permission::Model>;

    /// Create a permission. A duplicate key yields [`AppError::Conflict`].
    async fn create_permission(
        &self,
        content_type_id: &str,
        codename: &str,
        name: &str,
    ) -> AppResult<permission::Model>;
}

/// Permission registry backed by the `content_type` and `permission` tables.
#[derive(Clone)]
pub struct DbPermissionRegistry {
    content_type_repo: ContentTypeRepository,
    permission_repo: PermissionRepository,
    id_gen: IdGenerator,
}

impl DbPermissionRegistry {
    /// Create a new database-backed registry.
    #[must_use]
    pub const fn new(
        content_type_repo: ContentTypeRepository,
        permission_repo: PermissionRepository,
    ) -> Self {
        Self {
            content_type_repo,
            permission_repo,
            id_gen: IdGenerator::new(),
        }
    }
}

#[async_trait]
impl PermissionRegistry for DbPermissionRegistry {
    async fn content_types(&self) -> AppResult<Vec<content_type::Model>> {
        self.content_type_repo.find_all().await
    }

    async fn get_or_create_content_type(
        &self,
        app_label: &str,
        model: &str,
        name: &str,
    ) -> AppResult<(content_type::Model, bool)> {
        self.content_type_repo
            .get_or_create(app_label, model, name, || self.id_gen.generate())
            .await
    }

    async fn get_permission(
        &self,
        content_type_id: &str,
        codename: &str,
    ) -> AppResult<permission::Model> {
        self.permission_repo
            .get_by_codename(content_type_id, codename)
            .await
    }

    async fn create_permission(
        &self,
        content_type_id: &str,
        codename: &str,
        name: &str,
    ) -> AppResult<permission::Model> {
        self.permission_repo
            .create(permission::ActiveModel {
                id: Set(self.id_gen.generate()),
                content_type_id: Set(content_type_id.to_string()),
                codename: Set(codename.to_string()),
                name: Set(name.to_string()),
            })
            .await
    }
}

/// Shared permission registry handle.
pub type PermissionRegistryHandle = Arc<dyn PermissionRegistry>;

/// Service ensuring permissions exist.
#[derive(Clone)]
pub struct PermissionService {
    registry: PermissionRegistryHandle,
}

impl PermissionService {
    /// Create a new permission service.
    #[must_use]
    pub fn new(registry: PermissionRegistryHandle) -> Self {
        Self { registry }
    }

    /// The registry this service works against.
    #[must_use]
    pub fn registry(&self) -> &dyn PermissionRegistry {
        self.registry.as_ref()
    }

    /// Ensure a permission exists, creating it when the lookup reports
    /// `NotFound`. Existing permissions are left untouched.
    ///
    /// Returns the permission if this call created it.
    pub async fn ensure_permission(
        &self,
        content_type: &content_type::Model,
        codename: &str,
        name: &str,
    ) -> AppResult<Option<permission::Model>> {
        match self.registry.get_permission(&content_type.id, codename).await {
            Ok(_) => Ok(None),
            Err(AppError::NotFound(_)) => {
                match self
                    .registry
                    .create_permission(&content_type.id, codename, name)
                    .await
                {
                    Ok(created) => Ok(Some(created)),
                    // Created concurrently by another sync
                    Err(AppError::Conflict(_)) => Ok(None),
                    Err(e) => Err(e),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Ensure every registered content type has `view` and `list`
    /// permissions. Runs after the permission sync command completes.
    ///
    /// Returns the permissions created by this call; a second run returns
    /// an empty list.
    pub async fn ensure_default_permissions(&self) -> AppResult<Vec<permission::Model>> {
        let mut created = Vec::new();

        for content_type in self.registry.content_types().await? {
            for action in BOOTSTRAP_ACTIONS {
                let codename = format!("{action}_{}", content_type.model);
                let name = format!("Can {action} {}", content_type.name);

                if let Some(permission) =
                    self.ensure_permission(&content_type, &codename, &name).await?
                {
                    info!(
                        codename = %permission.codename,
                        "Added {action} permission for {}",
                        content_type.name
                    );
                    created.push(permission);
                }
            }
        }

        Ok(created)
    }
}
