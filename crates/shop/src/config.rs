//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CARTWHEEL_DOCSTORE_URL` - Base URL of the document-store REST endpoint
//! - `CARTWHEEL_DOCSTORE_API_KEY` - Document-store API key
//! - `CARTWHEEL_AUTH_URL` - Base URL of the auth-provider REST endpoint
//! - `CARTWHEEL_AUTH_API_KEY` - Auth-provider API key

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shop application configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Document store endpoint configuration
    pub document_store: DocumentStoreConfig,
    /// Auth provider endpoint configuration
    pub auth_provider: AuthProviderConfig,
}

/// Document store REST endpoint configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct DocumentStoreConfig {
    /// Base URL, e.g. `https://docstore.example.com/v1`
    pub base_url: String,
    /// API key sent as a bearer token (server-side only)
    pub api_key: SecretString,
}

impl std::fmt::Debug for DocumentStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Auth provider REST endpoint configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AuthProviderConfig {
    /// Base URL, e.g. `https://auth.example.com/v1`
    pub base_url: String,
    /// API key sent as a bearer token (server-side only)
    pub api_key: SecretString,
}

impl std::fmt::Debug for AuthProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            document_store: DocumentStoreConfig {
                base_url: required_url("CARTWHEEL_DOCSTORE_URL")?,
                api_key: required_secret("CARTWHEEL_DOCSTORE_API_KEY")?,
            },
            auth_provider: AuthProviderConfig {
                base_url: required_url("CARTWHEEL_AUTH_URL")?,
                api_key: required_secret("CARTWHEEL_AUTH_API_KEY")?,
            },
        })
    }
}

/// Read a required environment variable.
fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Read a required environment variable into a `SecretString`.
fn required_secret(name: &str) -> Result<SecretString, ConfigError> {
    required(name).map(SecretString::from)
}

/// Read a required environment variable and validate it parses as a URL.
///
/// A trailing slash is trimmed so clients can join path segments uniformly.
fn required_url(name: &str) -> Result<String, ConfigError> {
    let value = required(name)?;
    validate_base_url(&value).map_err(|reason| ConfigError::InvalidEnvVar(name.to_string(), reason))
}

fn validate_base_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value).map_err(|e| e.to_string())?;
    if url.host_str().is_none() {
        return Err("URL must have a host".to_string());
    }
    Ok(value.trim_end_matches('/').to_string())
}
