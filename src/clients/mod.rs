pub mod error;
pub mod ai_gateway_client;
pub mod email_client;
pub mod npi_registry_client;
pub mod places_client;
pub mod maps_client;

pub use error::ClientError;

use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Build the shared HTTP client used by every upstream
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("medibot/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Map the status of an upstream response onto a `ClientError`
pub(crate) async fn check_status(service: &'static str, response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::TOO_MANY_REQUESTS => Err(ClientError::RateLimited { service }),
        StatusCode::PAYMENT_REQUIRED => Err(ClientError::PaymentRequired { service }),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Status { service, status: status.as_u16(), body })
        }
    }
}

pub(crate) fn require_key<'a>(service: &'static str, key: &'a Option<String>) -> Result<&'a str, ClientError> {
    key.as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(ClientError::NotConfigured { service })
}
