//! Installed models and the permissions they declare.

/// Actions every model gets a permission for on sync.
pub const DEFAULT_PERMISSION_ACTIONS: [&str; 4] = ["add", "change", "delete", "view"];

/// Static description of an installed model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelMeta {
    /// Application the model belongs to.
    pub app_label: &'static str,
    /// Lowercased model name, used in permission codenames.
    pub model: &'static str,
    /// Human-readable name, used in permission names.
    pub verbose_name: &'static str,
    /// Model-specific `(codename, name)` permissions.
    pub permissions: &'static [(&'static str, &'static str)],
}

impl ModelMeta {
    /// Default `(codename, name)` pairs, e.g. `("add_question", "Can add question")`.
    #[must_use]
    pub fn default_permissions(&self) -> Vec<(String, String)> {
        DEFAULT_PERMISSION_ACTIONS
            .iter()
            .map(|action| {
                (
                    format!("{action}_{}", self.model),
                    format!("Can {action} {}", self.verbose_name),
                )
            })
            .collect()
    }

    /// Default and model-specific permissions, defaults first.
    #[must_use]
    pub fn all_permissions(&self) -> Vec<(String, String)> {
        let mut permissions = self.default_permissions();
        permissions.extend(
            self.permissions
                .iter()
                .map(|(codename, name)| ((*codename).to_string(), (*name).to_string())),
        );
        permissions
    }
}

/// Poll questions.
pub const QUESTION: ModelMeta = ModelMeta {
    app_label: "polls",
    model: "question",
    verbose_name: "question",
    permissions: &[
        ("view_published_question", "Can view published questions"),
        ("view_unpublished_question", "Can view unpublished questions"),
    ],
};

/// Answer choices of a question.
pub const CHOICE: ModelMeta = ModelMeta {
    app_label: "polls",
    model: "choice",
    verbose_name: "choice",
    permissions: &[("vote_choice", "Can vote for a choice")],
};

/// Creation records that outlive their question.
pub const QUESTION_HISTORY: ModelMeta = ModelMeta {
    app_label: "polls",
    model: "questionhistory",
    verbose_name: "question history",
    permissions: &[("view_question_history", "Can view question history")],
};

/// Registered model types.
pub const CONTENT_TYPE: ModelMeta = ModelMeta {
    app_label: "contenttypes",
    model: "contenttype",
    verbose_name: "content type",
    permissions: &[],
};

/// Permissions themselves.
pub const PERMISSION: ModelMeta = ModelMeta {
    app_label: "auth",
    model: "permission",
    verbose_name: "permission",
    permissions: &[],
};

/// Every model the application installs.
pub const INSTALLED_MODELS: &[ModelMeta] =
    &[CONTENT_TYPE, PERMISSION, QUESTION, CHOICE, QUESTION_HISTORY];
