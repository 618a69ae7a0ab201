//! Application state wiring for the `hound` binary.
//!
//! Pins the core seams to their concrete infra implementations: the chat
//! gateway to HTTP and the session store to a file under the data
//! directory.

use std::path::PathBuf;
use std::sync::Arc;

use newshound_core::session::SessionIdentity;
use newshound_infra::config::{ClientConfig, load_client_config, resolve_data_dir};
use newshound_infra::http::HttpChatGateway;
use newshound_infra::store::FileSessionStore;

/// Shared application state for CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<HttpChatGateway>,
    pub config: ClientConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve the data directory,
    /// load config, and build the HTTP gateway.
    pub async fn init(api_url_override: Option<String>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let mut config = load_client_config(&data_dir).await;
        if let Some(api_url) = api_url_override {
            config.api_url = api_url;
        }

        let gateway = Arc::new(HttpChatGateway::new(&config));

        Ok(Self {
            gateway,
            config,
            data_dir,
        })
    }

    /// Session identity backed by the data-dir session file.
    pub fn identity(&self) -> SessionIdentity<FileSessionStore> {
        SessionIdentity::new(FileSessionStore::new(&self.data_dir))
    }
}
