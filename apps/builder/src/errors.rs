use thiserror::Error;

use crate::i18n::Labels;

/// Application-level error type.
///
/// Every failure is caught at the event boundary in `routes::Builder::dispatch`
/// and turned into either a silent fallback, a log line, or a user alert via
/// [`AppError::user_message`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Import rejected: {0}")]
    Import(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    #[error("Failed to load {0}")]
    ResourceLoad(String),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Unknown section '{0}'")]
    UnknownSection(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Maps the error to the alert text shown to the user, if any.
    ///
    /// Decode failures fall through to the next data source and list addressing
    /// errors are programming errors, so neither reaches the user.
    pub fn user_message(&self, labels: &Labels) -> Option<String> {
        match self {
            AppError::Import(msg) => {
                tracing::warn!("Import rejected: {msg}");
                Some(labels.alert_invalid_file.to_string())
            }
            AppError::UnsupportedFile(mime) => {
                tracing::warn!("Rejected non-image upload ({mime})");
                Some(labels.alert_must_be_image.to_string())
            }
            AppError::ImageProcessing(msg) => {
                tracing::warn!("Image processing failed: {msg}");
                Some(labels.alert_image_failed.to_string())
            }
            AppError::ResourceLoad(name) => {
                tracing::error!("Resource load failed: {name}");
                Some(format!("{} {name}", labels.alert_resource_failed))
            }
            AppError::Decode(msg) => {
                tracing::debug!("Decode failure: {msg}");
                None
            }
            AppError::ItemNotFound(msg) => {
                tracing::warn!("Ignoring list operation: item not found ({msg})");
                None
            }
            AppError::UnknownField(key) => {
                tracing::warn!("Ignoring edit of unknown field '{key}'");
                None
            }
            AppError::UnknownSection(tag) => {
                tracing::warn!("Ignoring event for unknown section '{tag}'");
                None
            }
            AppError::Validation(msg) => {
                tracing::warn!("Rejected value: {msg}");
                None
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                Some(labels.alert_internal.to_string())
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {e}");
                Some(labels.alert_internal.to_string())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                Some(labels.alert_internal.to_string())
            }
        }
    }
}
