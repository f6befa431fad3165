use serde::Serialize;
use thiserror::Error;

use super::upstream_error::UpstreamError;
use crate::shared::domain::value_objects::CatalogFamily;

#[derive(Error, Debug, Serialize)]
#[serde(tag = "type", content = "detail")]
pub enum AppError {
    /// Upstream failure propagated unchanged
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Upstream failure wrapped with a provider-specific tag
    #[error("{context}: {source}")]
    UpstreamFailure {
        context: String,
        #[source]
        source: UpstreamError,
    },

    #[error("Genre taxonomy unavailable for {family}: {source}")]
    TaxonomyUnavailable {
        family: CatalogFamily,
        #[source]
        source: UpstreamError,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn wrap(context: impl Into<String>, source: UpstreamError) -> Self {
        AppError::UpstreamFailure {
            context: context.into(),
            source,
        }
    }

    /// The upstream failure behind this error, if any
    pub fn upstream(&self) -> Option<&UpstreamError> {
        match self {
            AppError::Upstream(source)
            | AppError::UpstreamFailure { source, .. }
            | AppError::TaxonomyUnavailable { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.upstream().is_some_and(UpstreamError::is_not_found)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ValidationError(format!("Invalid number: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
