use thiserror::Error;

use crate::domain::contact::ContactId;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error while accessing a file or resource: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to serialize/deserialize contacts to/from JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Contact {0} Not found")]
    NotFound(ContactId),

    #[error("No contact ids left above {0}")]
    IdsExhausted(ContactId),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Already shown to the user by a presenter.
    #[error("{0}")]
    Reported(Box<AppError>),
}

impl AppError {
    /// Builds a validation error naming every required field that was empty.
    pub fn missing_fields(fields: &[&str]) -> Self {
        AppError::Validation(format!("required field(s) empty: {}", fields.join(", ")))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }

    pub fn is_reported(&self) -> bool {
        matches!(self, AppError::Reported(_))
    }

    /// Marks an error as already shown, so it is not printed a second time.
    pub fn reported(self) -> Self {
        match self {
            AppError::Reported(_) => self,
            other => AppError::Reported(Box::new(other)),
        }
    }
}
