//! Core business logic for the polls application.
//!
//! Question creation records a history row, and the permission sync command
//! finishes by granting `view`/`list` permissions on every content type.
//! Both side effects are explicit calls rather than event subscriptions.

pub mod commands;
pub mod models;
pub mod services;

pub use commands::{PermissionSyncReport, UpdatePermissionsCommand};
pub use models::{INSTALLED_MODELS, ModelMeta};
pub use services::*;
