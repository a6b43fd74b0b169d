use std::{env, path::PathBuf, time::Duration};

use crate::{
    proxy::DEFAULT_MAX_PLAYLIST_BYTES, stream::DisplayOptions, tags::TagRegistry, Result,
};

/// Service configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origin: String,
    pub signing_key: Option<String>,

    /// JSON registry merged over the built-in tags.
    pub registry_path: Option<PathBuf>,

    /// JSON display options.
    pub options_path: Option<PathBuf>,

    pub fetch_timeout: Duration,

    /// Largest playlist body accepted from a remote fetch.
    pub max_playlist_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origin: "*".to_string(),
            signing_key: None,
            registry_path: None,
            options_path: None,
            fetch_timeout: Duration::from_secs(30),
            max_playlist_bytes: DEFAULT_MAX_PLAYLIST_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let fetch_timeout = lookup("HLSLENS_FETCH_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.fetch_timeout);
        let max_playlist_bytes = lookup("HLSLENS_MAX_PLAYLIST_BYTES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_playlist_bytes);

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN")
                .unwrap_or(defaults.cors_allowed_origin),
            signing_key: lookup("HLSLENS_SIGNING_KEY"),
            registry_path: lookup("HLSLENS_REGISTRY").map(PathBuf::from),
            options_path: lookup("HLSLENS_OPTIONS").map(PathBuf::from),
            fetch_timeout,
            max_playlist_bytes,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Built-in registry, with the configured file merged on top.
    pub fn load_registry(&self) -> Result<TagRegistry> {
        let registry = TagRegistry::builtin();
        match &self.registry_path {
            Some(path) => {
                let custom = TagRegistry::from_file(path)?;
                tracing::info!(
                    "Loaded {} tag definitions from {}",
                    custom.len(),
                    path.display()
                );
                Ok(registry.merge(custom))
            }
            None => Ok(registry),
        }
    }

    pub fn load_options(&self) -> Result<DisplayOptions> {
        match &self.options_path {
            Some(path) => DisplayOptions::from_file(path),
            None => Ok(DisplayOptions::default()),
        }
    }
}
