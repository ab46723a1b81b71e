use serde::{Deserialize, Serialize};
use tracing::{info, error};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Environment (dev, staging, prod)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// CORS allowed origins, comma separated. When unset the request Origin is echoed.
    pub cors_origins: Option<String>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Largest accepted upload, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Timeout applied to every outbound request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    // AI gateway (OpenAI compatible chat completions)
    #[serde(default = "default_ai_gateway_url")]
    pub ai_gateway_url: String,
    pub ai_gateway_api_key: Option<String>,
    #[serde(default = "default_ai_model")]
    pub ai_model: String,

    // Transactional email
    #[serde(default = "default_email_api_url")]
    pub email_api_url: String,
    pub email_api_key: Option<String>,
    #[serde(default = "default_email_from")]
    pub email_from: String,
    #[serde(default = "default_support_email_to")]
    pub support_email_to: String,

    // Doctor search
    #[serde(default = "default_npi_registry_url")]
    pub npi_registry_url: String,
    #[serde(default = "default_places_api_url")]
    pub places_api_url: String,
    pub places_api_key: Option<String>,

    // Geocoding and directions
    #[serde(default = "default_maps_api_url")]
    pub maps_api_url: String,
    pub maps_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables or app.env file
    pub fn load() -> Result<Self, ConfigError> {
        // Try to load from app.env file first
        if std::path::Path::new("app.env").exists() {
            dotenvy::from_filename("app.env").ok();
        } else {
            // Fallback to .env file
            dotenvy::dotenv().ok();
        }

        // Load from environment variables using envy
        match envy::from_env::<Config>() {
            Ok(config) => {
                info!("✅ Configuration loaded successfully");
                Ok(config)
            }
            Err(e) => {
                error!("❌ Failed to load configuration: {}", e);
                Err(ConfigError::EnvError(e))
            }
        }
    }

    /// Get the full server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment.to_lowercase() == "dev" || self.environment.to_lowercase() == "development"
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "prod" || self.environment.to_lowercase() == "production"
    }

    /// Explicit CORS origins, or an empty list when the request origin should be mirrored
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            cors_origins: None,
            max_upload_bytes: default_max_upload_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
            ai_gateway_url: default_ai_gateway_url(),
            ai_gateway_api_key: None,
            ai_model: default_ai_model(),
            email_api_url: default_email_api_url(),
            email_api_key: None,
            email_from: default_email_from(),
            support_email_to: default_support_email_to(),
            npi_registry_url: default_npi_registry_url(),
            places_api_url: default_places_api_url(),
            places_api_key: None,
            maps_api_url: default_maps_api_url(),
            maps_api_key: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EnvError(envy::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::EnvError(e) => write!(f, "Environment variable error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_ai_gateway_url() -> String {
    "https://ai.gateway.lovable.dev".to_string()
}

fn default_ai_model() -> String {
    "google/gemini-2.5-flash".to_string()
}

fn default_email_api_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_email_from() -> String {
    "MediBot Support <onboarding@resend.dev>".to_string()
}

fn default_support_email_to() -> String {
    "support@medibot.local".to_string()
}

fn default_npi_registry_url() -> String {
    "https://npiregistry.cms.hhs.gov/api".to_string()
}

fn default_places_api_url() -> String {
    "https://serpapi.com".to_string()
}

fn default_maps_api_url() -> String {
    "https://api.mapbox.com".to_string()
}
