use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use super::{check_status, ClientError};

const SERVICE: &str = "Provider registry";

/// Search parameters forwarded to the registry
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryQuery {
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub limit: u32,
}

#[derive(Debug, Deserialize)]
struct RegistryResponse {
    #[serde(default)]
    results: Vec<NpiRecord>,
    #[serde(rename = "Errors")]
    errors: Option<Vec<RegistryError>>,
}

#[derive(Debug, Deserialize)]
struct RegistryError {
    description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NpiRecord {
    pub number: Option<serde_json::Value>,
    #[serde(default)]
    pub basic: NpiBasic,
    #[serde(default)]
    pub addresses: Vec<NpiAddress>,
    #[serde(default)]
    pub taxonomies: Vec<NpiTaxonomy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NpiBasic {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub credential: Option<String>,
    pub organization_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NpiAddress {
    pub address_purpose: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub telephone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NpiTaxonomy {
    pub desc: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

/// Client for the public NPPES provider registry
#[derive(Debug, Clone)]
pub struct NpiRegistryClient {
    client: Client,
    base_url: String,
}

impl NpiRegistryClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Look up individual dermatology providers
    pub async fn search(&self, query: &RegistryQuery) -> Result<Vec<NpiRecord>, ClientError> {
        let mut params: Vec<(&str, String)> = vec![
            ("version", "2.1".to_string()),
            ("enumeration_type", "NPI-1".to_string()),
            ("taxonomy_description", "Dermatology".to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(postal_code) = &query.postal_code {
            params.push(("postal_code", postal_code.clone()));
        }
        if let Some(city) = &query.city {
            params.push(("city", city.clone()));
        }
        if let Some(state) = &query.state {
            params.push(("state", state.clone()));
        }

        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url)
            .query(&params)
            .send().await
            .map_err(|source| ClientError::Transport { service: SERVICE, source })?;
        let response = check_status(SERVICE, response).await?;

        let body: RegistryResponse = response.json().await
            .map_err(|e| ClientError::InvalidResponse { service: SERVICE, message: e.to_string() })?;

        // The registry reports bad queries with a 200 and an Errors array
        if let Some(errors) = body.errors.filter(|e| !e.is_empty()) {
            let message = errors.iter()
                .filter_map(|e| e.description.clone())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ClientError::InvalidResponse { service: SERVICE, message });
        }

        info!("Provider registry returned {} records", body.results.len());
        Ok(body.results)
    }
}
