use std::sync::Arc;

use super::signature::SigningKey;
use crate::{config::Config, proxy::PlaylistClient, stream::PlaylistAnalyzer, Result};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub client: PlaylistClient,
    pub analyzer: Arc<PlaylistAnalyzer>,
    pub signing_key: SigningKey,
}

impl AppState {
    pub fn new(client: PlaylistClient, analyzer: PlaylistAnalyzer, signing_key: SigningKey) -> Self {
        Self {
            client,
            analyzer: Arc::new(analyzer),
            signing_key,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = config.load_registry()?;
        let options = config.load_options()?;
        tracing::info!("Tag registry holds {} definitions", registry.len());

        Ok(Self::new(
            PlaylistClient::new(config.fetch_timeout, config.max_playlist_bytes)?,
            PlaylistAnalyzer::new(Arc::new(registry), options),
            SigningKey::from_secret(config.signing_key.as_deref()),
        ))
    }
}
