//! Management commands.

use polls_common::AppResult;
use serde::Serialize;
use tracing::info;

use crate::models::{INSTALLED_MODELS, ModelMeta};
use crate::services::PermissionService;

/// Outcome of a permission sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSyncReport {
    /// `app_label.model` of content types registered by this run.
    pub content_types_created: Vec<String>,
    /// Codenames of permissions created by this run, in creation order.
    pub permissions_created: Vec<String>,
}

impl PermissionSyncReport {
    /// Whether the run changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content_types_created.is_empty() && self.permissions_created.is_empty()
    }
}

/// Synchronizes content types and permissions for the installed models.
///
/// Registers a content type per model, creates the default and declared
/// permissions, then runs the `view`/`list` bootstrap over every content
/// type once the sync itself is complete.
#[derive(Clone)]
pub struct UpdatePermissionsCommand {
    permissions: PermissionService,
    models: &'static [ModelMeta],
}

impl UpdatePermissionsCommand {
    /// Create the command for [`INSTALLED_MODELS`].
    #[must_use]
    pub const fn new(permissions: PermissionService) -> Self {
        Self::with_models(permissions, INSTALLED_MODELS)
    }

    /// Create the command for an explicit model list.
    #[must_use]
    pub const fn with_models(permissions: PermissionService, models: &'static [ModelMeta]) -> Self {
        Self {
            permissions,
            models,
        }
    }

    /// Run the sync. Safe to re-run: existing rows are never modified.
    pub async fn run(&self) -> AppResult<PermissionSyncReport> {
        let mut report = PermissionSyncReport::default();
        let registry = self.permissions.registry();

        for meta in self.models {
            let (content_type, created) = registry
                .get_or_create_content_type(meta.app_label, meta.model, meta.verbose_name)
                .await?;
            if created {
                info!(app_label = meta.app_label, model = meta.model, "Registered content type");
                report
                    .content_types_created
                    .push(format!("{}.{}", meta.app_label, meta.model));
            }

            for (codename, name) in meta.all_permissions() {
                if let Some(permission) = self
                    .permissions
                    .ensure_permission(&content_type, &codename, &name)
                    .await?
                {
                    report.permissions_created.push(permission.codename);
                }
            }
        }

        // view/list over every content type, including ones not installed here
        for permission in self.permissions.ensure_default_permissions().await? {
            report.permissions_created.push(permission.codename);
        }

        info!(
            content_types = report.content_types_created.len(),
            permissions = report.permissions_created.len(),
            "Permission sync finished"
        );
        Ok(report)
    }
}
