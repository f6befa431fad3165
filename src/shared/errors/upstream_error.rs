use serde::Serialize;
use thiserror::Error;

use crate::shared::domain::value_objects::Provider;

/// Outcome classification for a single upstream call
///
/// `Clone` is required: every waiter of a coalesced cache load observes the
/// same failure value.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UpstreamError {
    #[error("{provider} resource not found: {resource}")]
    NotFound {
        provider: Provider,
        resource: String,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    Status {
        provider: Provider,
        status: u16,
        body: String,
    },

    #[error("{provider} request timed out")]
    Timeout { provider: Provider },

    #[error("{provider} rate limit exceeded after {attempts} attempts")]
    RateLimited { provider: Provider, attempts: u32 },

    #[error("{provider} transport failure: {message}")]
    Transport { provider: Provider, message: String },

    #[error("{provider} payload could not be decoded: {message}")]
    Decode { provider: Provider, message: String },

    #[error("{provider} GraphQL errors: {message}")]
    GraphQl { provider: Provider, message: String },

    #[error("Upstream load aborted: {message}")]
    Aborted { message: String },
}

pub type UpstreamResult<T> = Result<T, UpstreamError>;

const MAX_BODY_CHARS: usize = 200;

impl UpstreamError {
    pub fn not_found(provider: Provider, resource: impl Into<String>) -> Self {
        UpstreamError::NotFound {
            provider,
            resource: resource.into(),
        }
    }

    /// Non-2xx response; the body is truncated for log-friendly diagnostics
    pub fn status(provider: Provider, status: u16, body: &str) -> Self {
        UpstreamError::Status {
            provider,
            status,
            body: truncate_body(body),
        }
    }

    pub fn decode(provider: Provider, message: impl Into<String>) -> Self {
        UpstreamError::Decode {
            provider,
            message: message.into(),
        }
    }

    /// Classify a transport-level reqwest failure
    pub fn from_transport(provider: Provider, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout { provider }
        } else if err.is_decode() {
            UpstreamError::decode(provider, err.to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                404 => {
                    let resource = err.url().map(|u| u.path().to_string());
                    UpstreamError::not_found(provider, resource.unwrap_or_default())
                }
                code => UpstreamError::status(provider, code, &err.to_string()),
            }
        } else {
            UpstreamError::Transport {
                provider,
                message: err.to_string(),
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, UpstreamError::NotFound { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout { .. })
    }

    pub fn provider(&self) -> Option<Provider> {
        match self {
            UpstreamError::NotFound { provider, .. }
            | UpstreamError::Status { provider, .. }
            | UpstreamError::Timeout { provider }
            | UpstreamError::RateLimited { provider, .. }
            | UpstreamError::Transport { provider, .. }
            | UpstreamError::Decode { provider, .. }
            | UpstreamError::GraphQl { provider, .. } => Some(*provider),
            UpstreamError::Aborted { .. } => None,
        }
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() > MAX_BODY_CHARS {
        let truncated: String = body.chars().take(MAX_BODY_CHARS).collect();
        format!("{}...", truncated)
    } else {
        body.to_string()
    }
}
