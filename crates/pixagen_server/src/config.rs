//! Server configuration.
//!
//! Loaded from an optional TOML file, then overlaid with environment
//! variables. Every field has a default, so an empty file (or none) yields a
//! server on `127.0.0.1:3001` against the public Google AI Studio endpoint.

use derive_getters::Getters;
use pixagen_core::{AliasTable, DEFAULT_ACTIVITY_CAPACITY, GenerationKind};
use pixagen_error::ConfigError;
use pixagen_models::{BatchPolicy, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3001";

/// Default request body limit (25 MiB).
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 25 * 1024 * 1024;

/// Model identifiers offered to clients, per model family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ModelCatalog {
    /// Image models
    imagen: Vec<String>,
    /// Text and vision models
    gemini: Vec<String>,
    /// Video models
    veo: Vec<String>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self {
            imagen: vec![GenerationKind::Image.default_model().to_string()],
            gemini: vec![GenerationKind::EnhanceText.default_model().to_string()],
            veo: vec![GenerationKind::Video.default_model().to_string()],
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[serde(default)]
#[builder(setter(into), default)]
pub struct ServerConfig {
    /// Listen address, `host:port`
    bind_address: String,
    /// Google AI Studio REST base URL
    provider_base_url: String,
    /// Process-wide Gemini/Imagen key
    gemini_api_key: Option<String>,
    /// Process-wide Veo key
    veo_api_key: Option<String>,
    /// Maximum request body size
    body_limit_bytes: usize,
    /// Activity log entries kept in memory
    activity_log_capacity: usize,
    /// Behavior of batches when a call fails
    batch_policy: BatchPolicy,
    /// Accepted request field names
    alias_table: AliasTable,
    /// Served by `/api/models`
    models: ModelCatalog,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            provider_base_url: DEFAULT_BASE_URL.to_string(),
            gemini_api_key: None,
            veo_api_key: None,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            activity_log_capacity: DEFAULT_ACTIVITY_CAPACITY,
            batch_policy: BatchPolicy::default(),
            alias_table: AliasTable::default(),
            models: ModelCatalog::default(),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() { None } else { Some(value) }
}

impl ServerConfig {
    /// Parses a configuration from TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents)
            .map_err(|e| ConfigError::new(format!("Failed to parse server config: {}", e)))
    }

    /// Reads a TOML configuration file.
    #[instrument(skip(path))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&contents)
    }

    /// File (or defaults) overlaid with the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.overlay_env(|name| std::env::var(name).ok())
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// - `PIXAGEN_BIND` replaces the whole bind address
    /// - `PORT` replaces only the port when `PIXAGEN_BIND` is unset
    /// - `PIXAGEN_PROVIDER_URL`, `GEMINI_API_KEY`, `VEO_API_KEY`
    /// - `PIXAGEN_BATCH_POLICY` (`abort` or `partial`)
    pub fn overlay_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("PIXAGEN_BIND").and_then(non_blank) {
            self.bind_address = bind;
        } else if let Some(port) = lookup("PORT").and_then(non_blank) {
            let port: u16 = port
                .parse()
                .map_err(|_| ConfigError::new(format!("Invalid PORT: {}", port)))?;
            let host = self
                .bind_address
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "127.0.0.1".to_string());
            self.bind_address = format!("{}:{}", host, port);
        }

        if let Some(url) = lookup("PIXAGEN_PROVIDER_URL").and_then(non_blank) {
            self.provider_base_url = url;
        }
        if let Some(key) = lookup("GEMINI_API_KEY").and_then(non_blank) {
            self.gemini_api_key = Some(key);
        }
        if let Some(key) = lookup("VEO_API_KEY").and_then(non_blank) {
            self.veo_api_key = Some(key);
        }
        if let Some(policy) = lookup("PIXAGEN_BATCH_POLICY").and_then(non_blank) {
            self.batch_policy = policy.parse().map_err(|_| {
                ConfigError::new(format!(
                    "Invalid PIXAGEN_BATCH_POLICY: {} (expected abort or partial)",
                    policy
                ))
            })?;
        }

        Ok(self)
    }

    /// Replaces the bind address (command-line override).
    pub fn with_bind_address(self, bind_address: impl Into<String>) -> Self {
        Self {
            bind_address: bind_address.into(),
            ..self
        }
    }

    /// The bind address as a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address.parse().map_err(|e| {
            ConfigError::new(format!("Invalid bind address {}: {}", self.bind_address, e))
        })
    }

    /// Checks values that would only fail later at startup.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.body_limit_bytes == 0 {
            return Err(ConfigError::new("body_limit_bytes must be positive"));
        }
        if self.activity_log_capacity == 0 {
            return Err(ConfigError::new("activity_log_capacity must be positive"));
        }
        if !self.provider_base_url.starts_with("http://")
            && !self.provider_base_url.starts_with("https://")
        {
            return Err(ConfigError::new(format!(
                "provider_base_url must be an http(s) URL, got {}",
                self.provider_base_url
            )));
        }
        info!(
            bind = %self.bind_address,
            provider = %self.provider_base_url,
            batch_policy = %self.batch_policy,
            gemini_key = self.gemini_api_key.is_some(),
            veo_key = self.veo_api_key.is_some(),
            "Configuration valid"
        );
        Ok(())
    }
}
