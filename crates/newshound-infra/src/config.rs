//! Client configuration loader for newshound.
//!
//! Reads `config.toml` from the data directory (`~/.newshound/` in
//! production) and deserializes it into [`ClientConfig`]. Falls back to
//! defaults when the file is missing or malformed; a broken config file
//! never prevents startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Per-request timeout used when nothing else is configured.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for talking to the news Q&A backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend, without the `/api` prefix.
    pub api_url: String,
    /// Timeout applied to every backend request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Load client configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ClientConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_client_config(data_dir: &Path) -> ClientConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ClientConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ClientConfig::default();
        }
    };

    match toml::from_str::<ClientConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ClientConfig::default()
        }
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `NEWSHOUND_DATA_DIR` environment variable
/// 2. Platform-specific home directory (`~/.newshound`)
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("NEWSHOUND_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".newshound");
    }

    // Last resort: current directory
    PathBuf::from(".newshound")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_client_config(tmp.path()).await;
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, "http://localhost:3001");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[tokio::test]
    async fn valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
api_url = "https://news.example.com"
request_timeout_secs = 10
"#,
        )
        .await
        .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.api_url, "https://news.example.com");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[tokio::test]
    async fn partial_toml_keeps_remaining_defaults() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "api_url = \"http://10.0.0.5:3001\"\n",
        )
        .await
        .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config.api_url, "http://10.0.0.5:3001");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[tokio::test]
    async fn invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_client_config(tmp.path()).await;
        assert_eq!(config, ClientConfig::default());
    }
}
