use axum::http::StatusCode;
use thiserror::Error;
use tracing::error;

use crate::models::{error_response, ApiError};

/// Failure talking to one of the hosted services
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{service} is not configured")]
    NotConfigured { service: &'static str },

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited { service: &'static str },

    #[error("Payment required. Please add credits to continue.")]
    PaymentRequired { service: &'static str },

    #[error("{service} returned status {status}: {body}")]
    Status { service: &'static str, status: u16, body: String },

    #[error("{service} request failed: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned an unexpected response: {message}")]
    InvalidResponse { service: &'static str, message: String },
}

impl ClientError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ClientError::NotConfigured { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ClientError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ClientError::PaymentRequired { .. } => StatusCode::PAYMENT_REQUIRED,
            ClientError::Status { .. }
            | ClientError::Transport { .. }
            | ClientError::InvalidResponse { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message safe to hand back to the browser
    pub fn public_message(&self) -> String {
        match self {
            ClientError::Status { service, .. } | ClientError::Transport { service, .. } => {
                format!("{} error", service)
            }
            ClientError::InvalidResponse { service, .. } => {
                format!("{} returned an unreadable response", service)
            }
            other => other.to_string(),
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        error!("Upstream call failed: {}", e);
        error_response(e.status_code(), e.public_message())
    }
}
