//! Domain errors

use thiserror::Error;
use uuid::Uuid;

use crate::domain::UsageBinding;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{resource} not found: {key}")]
    NotFound { resource: &'static str, key: String },

    #[error("Menu code must be non-empty and contain only letters, digits, '-' or '_': {0:?}")]
    InvalidMenuCode(String),

    #[error("Menu code already exists: {0}")]
    MenuCodeAlreadyExists(String),

    #[error("Item entries require a non-empty target payload")]
    TargetRequired,

    #[error("{field} is not allowed on {item_type} entries")]
    FieldForbidden {
        item_type: &'static str,
        field: &'static str,
    },

    #[error("At least one translation is required")]
    TranslationRequired,

    #[error("Translation needs a label, label key, group title or group title key")]
    TranslationTextRequired,

    #[error("Translation already exists for item {item_id} in locale {locale_id}")]
    TranslationAlreadyExists { item_id: Uuid, locale_id: Uuid },

    #[error("Duplicate locale in request: {0}")]
    DuplicateLocaleInRequest(String),

    #[error("Invalid position: {0}")]
    InvalidPosition(i32),

    #[error("An item cannot be collapsed without being collapsible")]
    CollapsedWithoutCollapsible,

    #[error("A collapsible item must have children")]
    CollapsibleWithoutChildren,

    #[error("Invalid parent: {reason}")]
    InvalidParent { reason: String },

    #[error("Hierarchy cycle detected at item {0}")]
    HierarchyCycle(Uuid),

    #[error("Item {0} has children; request a cascading delete to remove the subtree")]
    ChildrenExist(Uuid),

    #[error("Menu is in active use ({} binding(s))", .bindings.len())]
    MenuInUse { bindings: Vec<UsageBinding> },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl DomainError {
    pub fn not_found(resource: &'static str, key: impl Into<String>) -> Self {
        DomainError::NotFound {
            resource,
            key: key.into(),
        }
    }

    pub fn invalid_parent(reason: impl Into<String>) -> Self {
        DomainError::InvalidParent {
            reason: reason.into(),
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
