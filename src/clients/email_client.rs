use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{check_status, require_key, ClientError};

const SERVICE: &str = "Email service";

/// Outgoing transactional email
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: Option<String>,
}

/// Client for a Resend style email API
#[derive(Debug, Clone)]
pub struct EmailClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl EmailClient {
    pub fn new(client: Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        require_key(SERVICE, &self.api_key).is_ok()
    }

    /// Send a message and return the provider's message id
    pub async fn send(&self, message: &EmailMessage) -> Result<String, ClientError> {
        let api_key = require_key(SERVICE, &self.api_key)?;
        let url = format!("{}/emails", self.base_url);

        let response = self.client.post(&url)
            .bearer_auth(api_key)
            .json(message)
            .send().await
            .map_err(|source| ClientError::Transport { service: SERVICE, source })?;
        let response = check_status(SERVICE, response).await?;

        let sent: SendEmailResponse = response.json().await
            .map_err(|e| ClientError::InvalidResponse { service: SERVICE, message: e.to_string() })?;
        let id = sent.id.ok_or_else(|| ClientError::InvalidResponse {
            service: SERVICE,
            message: "missing message id".to_string(),
        })?;

        info!("Email '{}' sent to {:?} with id {}", message.subject, message.to, id);
        Ok(id)
    }
}
