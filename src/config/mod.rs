//! Configuration Management Module
//!
//! This module handles loading and managing configuration for the e-sign
//! gateway service. Configuration covers the upstream e-sign API connection,
//! the externally hosted signing widget, and the API server settings.

use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// Main configuration structure containing all service settings.
///
/// This structure holds configuration for:
/// - The upstream e-sign API (credentials, discovery host, agreement fields)
/// - The externally hosted signing widget
/// - The API server (host, port, CORS settings)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream e-sign API configuration
    pub esign: EsignConfig,
    /// Externally hosted signing widget configuration
    pub webform: WebformConfig,
    /// API server configuration (host, port, CORS settings)
    pub api: ApiConfig,
}

/// Configuration for the upstream e-sign API.
///
/// All identifying values are opaque strings; an absent or placeholder
/// integration key is not validated locally and surfaces as an authorization
/// failure from the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsignConfig {
    /// Fixed discovery host queried once for the account's API access point
    #[serde(default = "default_discovery_url")]
    pub discovery_url: String,
    /// Bearer token for the e-sign API
    #[serde(default)]
    pub integration_key: String,
    /// Countersigner email added as the second participant set
    pub admin_email: String,
    /// Library document id of the signing template
    pub template_id: String,
    /// Display name given to created agreements
    #[serde(default = "default_agreement_name")]
    pub agreement_name: String,
    /// Attempts made against the signing-URLs endpoint before giving up
    #[serde(default = "default_signing_url_attempts")]
    pub signing_url_attempts: u32,
    /// Delay between signing-URL attempts in milliseconds
    #[serde(default = "default_signing_url_retry_ms")]
    pub signing_url_retry_ms: u64,
}

/// Configuration for the externally hosted signing widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebformConfig {
    /// Base URL of the widget; pre-population pairs are appended as a fragment
    pub base_url: String,
}

/// API server configuration for external communication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host address to bind the API server to
    pub host: String,
    /// Port number to bind the API server to
    pub port: u16,
    /// Externally reachable URL of this service, used to build the post-sign
    /// redirect target
    pub public_url: String,
    /// Allowed CORS origins for cross-origin requests
    pub cors_origins: Vec<String>,
}

fn default_discovery_url() -> String {
    "https://api.na1.echosign.com:443".to_string()
}

fn default_agreement_name() -> String {
    "Waiver".to_string()
}

fn default_signing_url_attempts() -> u32 {
    5
}

fn default_signing_url_retry_ms() -> u64 {
    2000
}

// ============================================================================
// CONFIGURATION LOADING AND MANAGEMENT
// ============================================================================

impl Config {
    /// Validates the configuration's structural invariants.
    ///
    /// Only what can be checked locally is checked: URLs must parse and the
    /// signing-URL retry loop needs at least one attempt. Credential values
    /// are deliberately not validated (delegated to the remote API).
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Configuration is valid
    /// - `Err(anyhow::Error)` - A URL failed to parse or a bound is invalid
    pub fn validate(&self) -> anyhow::Result<()> {
        Url::parse(&self.esign.discovery_url).map_err(|e| {
            anyhow::anyhow!(
                "Configuration error: esign.discovery_url '{}' is not a valid URL: {}",
                self.esign.discovery_url,
                e
            )
        })?;

        Url::parse(&self.webform.base_url).map_err(|e| {
            anyhow::anyhow!(
                "Configuration error: webform.base_url '{}' is not a valid URL: {}",
                self.webform.base_url,
                e
            )
        })?;

        Url::parse(&self.api.public_url).map_err(|e| {
            anyhow::anyhow!(
                "Configuration error: api.public_url '{}' is not a valid URL: {}",
                self.api.public_url,
                e
            )
        })?;

        if self.esign.signing_url_attempts == 0 {
            return Err(anyhow::anyhow!(
                "Configuration error: esign.signing_url_attempts must be at least 1"
            ));
        }

        Ok(())
    }

    /// Loads configuration from the TOML file.
    ///
    /// This function:
    /// 1. Checks if config/esign_gateway.toml exists (path overridable via
    ///    the `ESIGN_GATEWAY_CONFIG_PATH` environment variable)
    /// 2. If it exists, loads and parses the configuration
    /// 3. Validates the configuration
    /// 4. If it doesn't exist, returns an error asking user to copy template
    ///
    /// # Returns
    ///
    /// - `Ok(Config)` - Successfully loaded and validated configuration
    /// - `Err(anyhow::Error)` - Failed to load configuration, file doesn't exist, or validation failed
    pub fn load() -> anyhow::Result<Self> {
        // Check for custom config path via environment variable (for tests)
        let config_path = std::env::var("ESIGN_GATEWAY_CONFIG_PATH")
            .unwrap_or_else(|_| "config/esign_gateway.toml".to_string());

        if std::path::Path::new(&config_path).exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Err(anyhow::anyhow!(
                "Configuration file '{}' not found. Please copy the template:\n\
                cp config/esign_gateway.template.toml config/esign_gateway.toml\n\
                Then edit config/esign_gateway.toml with your actual values.",
                config_path
            ))
        }
    }

    /// Creates a default configuration with placeholder values.
    ///
    /// Suitable for local development and testing. For production use the
    /// placeholder credential and template values must be replaced.
    #[allow(dead_code)]
    pub fn default() -> Self {
        Self {
            esign: EsignConfig {
                discovery_url: default_discovery_url(),
                integration_key: String::new(),
                admin_email: "admin@example.com".to_string(),
                template_id: "TEMPLATE_ID".to_string(),
                agreement_name: default_agreement_name(),
                signing_url_attempts: default_signing_url_attempts(),
                signing_url_retry_ms: default_signing_url_retry_ms(),
            },
            webform: WebformConfig {
                base_url: "https://example.com/widget".to_string(),
            },
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                public_url: "http://127.0.0.1:3000".to_string(),
                cors_origins: vec!["http://localhost:3000".to_string()],
            },
        }
    }
}
