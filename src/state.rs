use std::sync::Arc;

use crate::clients::{
    ai_gateway_client::AiGatewayClient, build_http_client, email_client::EmailClient,
    maps_client::MapsClient, npi_registry_client::NpiRegistryClient, places_client::PlacesClient,
};
use crate::config::Config;

/// Read-only state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ai: AiGatewayClient,
    pub email: EmailClient,
    pub registry: NpiRegistryClient,
    pub places: PlacesClient,
    pub maps: MapsClient,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = build_http_client(config.request_timeout_secs)?;
        Ok(Self {
            ai: AiGatewayClient::new(
                http.clone(),
                config.ai_gateway_url.clone(),
                config.ai_gateway_api_key.clone(),
                config.ai_model.clone(),
            ),
            email: EmailClient::new(http.clone(), config.email_api_url.clone(), config.email_api_key.clone()),
            registry: NpiRegistryClient::new(http.clone(), config.npi_registry_url.clone()),
            places: PlacesClient::new(http.clone(), config.places_api_url.clone(), config.places_api_key.clone()),
            maps: MapsClient::new(http, config.maps_api_url.clone(), config.maps_api_key.clone()),
            config: Arc::new(config),
        })
    }
}
