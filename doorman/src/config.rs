//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `DOORMAN_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `DOORMAN_` override YAML values
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `DOORMAN_PROVIDER__API_KEY=sk-...` sets the `provider.api_key` field.
//!
//! The two secrets the service needs are expected to come from the environment:
//!
//! ```bash
//! export DOORMAN_PROVIDER__API_KEY="sk-..."
//! export DOORMAN_ACCESS_TOKEN="shared-secret"
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "DOORMAN_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// Loaded once at startup and held read-only for the process lifetime. Handlers
/// receive it through [`crate::AppState`] rather than reading globals.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Shared secret callers must present on the analyze endpoints
    pub access_token: String,
    /// CORS configuration for browser clients
    pub cors: CorsConfig,
    /// Remote vision/language provider configuration
    pub provider: ProviderConfig,
}

/// Remote provider configuration.
///
/// The provider is an OpenAI-compatible chat-completions API. The sampling
/// parameters are fixed per process and biased toward deterministic, concise
/// verdicts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// API key for authenticating with the provider (set via DOORMAN_PROVIDER__API_KEY)
    pub api_key: String,
    /// Base URL of the provider API, up to but not including `/chat/completions`
    pub base_url: Url,
    /// Model identifier sent with every request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling threshold
    pub top_p: f32,
    /// Maximum number of tokens the provider may generate for a verdict
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: Url::parse("https://api.openai.com/v1").unwrap(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.0,
            top_p: 0.2,
            max_tokens: 500,
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<CorsOrigin>,
}

/// CORS origin specification.
///
/// Can be either a wildcard (`*`) to allow all origins, or a specific URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    /// Allow all origins (`*`)
    #[serde(deserialize_with = "parse_wildcard")]
    Wildcard,
    /// Specific origin URL (e.g., `https://app.example.com`)
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![CorsOrigin::Wildcard],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            access_token: String::new(),
            cors: CorsConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("DOORMAN_").split("__"))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.access_token.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: access_token is not configured. \
                 Please set DOORMAN_ACCESS_TOKEN or add access_token to the config file."
                    .to_string(),
            });
        }

        if self.provider.api_key.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: provider.api_key is not configured. \
                 Please set DOORMAN_PROVIDER__API_KEY or add provider.api_key to the config file."
                    .to_string(),
            });
        }

        if self.provider.model.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: provider.model must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
