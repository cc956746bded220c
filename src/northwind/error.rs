use crate::model::EntityId;
use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NorthwindError {
    #[error("Category not found: {0}")]
    CategoryNotFound(EntityId),

    #[error("Product not found: {0}")]
    ProductNotFound(EntityId),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Invalid selection: {0}")]
    Selection(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] confique::Error),

    #[error("Input closed")]
    InputClosed,
}

impl NorthwindError {
    /// Errors the user can fix by choosing differently. These are shown as-is
    /// instead of the generic failure line.
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            NorthwindError::Selection(_)
                | NorthwindError::CategoryNotFound(_)
                | NorthwindError::ProductNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NorthwindError>;
