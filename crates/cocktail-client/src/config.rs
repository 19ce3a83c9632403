//! Client configuration loaded from environment variables.
//!
//! All settings have defaults so the client can start with zero
//! configuration against a local development backend.

use std::path::PathBuf;

use cocktail_shared::constants::DEFAULT_API_URL;

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the remote recipe service.
    /// Env: `COCKTAIL_API_URL`
    /// Default: `http://localhost:8080`
    pub api_base_url: String,

    /// Override for the snapshot database location.
    /// Env: `COCKTAIL_DATA_DIR`
    /// Default: the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("COCKTAIL_API_URL") {
            if url.trim().is_empty() {
                tracing::warn!("Empty COCKTAIL_API_URL, using default");
            } else {
                config.api_base_url = url;
            }
        }

        if let Ok(dir) = std::env::var("COCKTAIL_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = Some(PathBuf::from(dir));
            }
        }

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}
