//! Application configuration management.
//!
//! Every service reads its own section at process start; nothing here is
//! global state.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Text-generation service configuration.
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Payment provider configuration.
    #[serde(default)]
    pub stripe: StripeConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Token expiration in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: i64,
}

fn default_token_expiry() -> i64 {
    2_592_000 // 30 days
}

/// Text-generation (OpenAI-compatible) service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API key. When absent the AI features run on their fallbacks.
    pub api_key: Option<String>,
    /// Base URL of the chat completions API.
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    /// Model name.
    #[serde(default = "default_openai_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openai_base_url(),
            model: default_openai_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Payment provider (Stripe) configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    /// Secret key. When absent subscriptions are mocked.
    pub secret_key: Option<String>,
    /// Base URL of the Stripe API.
    #[serde(default = "default_stripe_base_url")]
    pub base_url: String,
    /// Stripe price ID for the basic tier.
    pub basic_price_id: Option<String>,
    /// Stripe price ID for the pro tier.
    pub pro_price_id: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            base_url: default_stripe_base_url(),
            basic_price_id: None,
            pro_price_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_stripe_base_url() -> String {
    "https://api.stripe.com/v1".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
    /// then `FYLR__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("FYLR").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
