use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{check_status, require_key, ClientError};

const SERVICE: &str = "AI gateway";

/// Image attached to a completion request
#[derive(Debug, Clone)]
pub struct ImageData {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, general_purpose::STANDARD.encode(&self.bytes))
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Value,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI compatible chat completions gateway
#[derive(Debug, Clone)]
pub struct AiGatewayClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl AiGatewayClient {
    pub fn new(client: Client, base_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    pub fn is_configured(&self) -> bool {
        require_key(SERVICE, &self.api_key).is_ok()
    }

    /// Send one system + user turn and return the text of the first choice
    pub async fn complete(&self, system: &str, user_text: &str, image: Option<&ImageData>) -> Result<String, ClientError> {
        let api_key = require_key(SERVICE, &self.api_key)?;

        let user_content = match image {
            Some(image) => json!([
                { "type": "text", "text": user_text },
                { "type": "image_url", "image_url": { "url": image.to_data_url() } }
            ]),
            None => Value::String(user_text.to_string()),
        };

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: Value::String(system.to_string()) },
                ChatMessage { role: "user", content: user_content },
            ],
        };

        let url = format!("{}/v1/chat/completions", self.base_url);
        info!("Calling AI gateway with model {} (image attached: {})", self.model, image.is_some());

        let response = self.client.post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send().await
            .map_err(|source| ClientError::Transport { service: SERVICE, source })?;
        let response = check_status(SERVICE, response).await?;

        let completion: ChatCompletionResponse = response.json().await
            .map_err(|e| ClientError::InvalidResponse { service: SERVICE, message: e.to_string() })?;

        let content = completion.choices.into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ClientError::InvalidResponse {
                service: SERVICE,
                message: "no content in completion".to_string(),
            })?;

        debug!("AI gateway returned {} characters", content.len());
        Ok(content)
    }
}
