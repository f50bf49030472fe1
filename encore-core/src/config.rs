use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use encore_api as api;
use encore_state::{Catalog, CatalogError};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::selection::{LocalStrategy, RemoteStrategy, Strategy, StrategyKind};

/// Overrides [`Server::base_url`] when set.
pub const BASE_URL_ENV_VAR: &str = "ENCORE_BASE_URL";

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, error: std::io::Error },
    Parse { path: PathBuf, error: toml::de::Error },
    Serialize(toml::ser::Error),
    Write { path: PathBuf, error: std::io::Error },
    Catalog { path: PathBuf, error: CatalogError },
    Client(api::ClientError),
}
impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read { path, error } => {
                write!(f, "failed to read {}: {error}", path.display())
            }
            ConfigError::Parse { path, error } => {
                write!(f, "failed to parse {}: {error}", path.display())
            }
            ConfigError::Serialize(error) => write!(f, "failed to serialize config: {error}"),
            ConfigError::Write { path, error } => {
                write!(f, "failed to write {}: {error}", path.display())
            }
            ConfigError::Catalog { path, error } => {
                write!(f, "failed to load catalog {}: {error}", path.display())
            }
            ConfigError::Client(error) => write!(f, "failed to create client: {error}"),
        }
    }
}
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { error, .. } | ConfigError::Write { error, .. } => Some(error),
            ConfigError::Parse { error, .. } => Some(error),
            ConfigError::Serialize(error) => Some(error),
            ConfigError::Catalog { error, .. } => Some(error),
            ConfigError::Client(error) => Some(error),
        }
    }
}

/// Load a TOML config file, returning `Ok(None)` if the file doesn't exist.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents)
            .map(Some)
            .map_err(|error| ConfigError::Parse {
                path: path.to_owned(),
                error,
            }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(ConfigError::Read {
            path: path.to_owned(),
            error,
        }),
    }
}

/// Write `config` to `path` as TOML.
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<(), ConfigError> {
    let contents = toml::to_string(config).map_err(ConfigError::Serialize)?;
    std::fs::write(path, contents).map_err(|error| ConfigError::Write {
        path: path.to_owned(),
        error,
    })?;
    tracing::info!("saved config to {}", path.display());
    Ok(())
}

/// Configuration shared by every front end. `Ui` holds the front end's own
/// section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config<Ui: Default> {
    pub general: General,
    pub server: Server,
    pub ui: Ui,
}
impl<Ui: Default + Serialize + DeserializeOwned> Config<Ui> {
    pub const FILENAME: &str = "encore.toml";

    /// Load from `path`, falling back to defaults if it doesn't exist. Any
    /// [`BASE_URL_ENV_VAR`] override is applied afterwards.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = match load_config(path)? {
            Some(config) => config,
            None => {
                tracing::info!("no config file at {}, using defaults", path.display());
                Self::default()
            }
        };
        config.apply_env_override(std::env::var(BASE_URL_ENV_VAR).ok());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }

    fn apply_env_override(&mut self, base_url: Option<String>) {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            tracing::info!("using base url {base_url} from {BASE_URL_ENV_VAR}");
            self.server.base_url = base_url;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct General {
    pub strategy: StrategyKind,
    /// The shortest time a selection takes, so the "choosing" screen is
    /// always seen.
    pub min_latency_ms: u64,
    /// Seed for the local strategy's generator. Unset means seeded from the
    /// OS.
    pub seed: Option<u64>,
    /// A TOML catalog to use instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
}
impl Default for General {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Local,
            min_latency_ms: 2000,
            seed: None,
            catalog_path: None,
        }
    }
}
impl General {
    pub fn min_latency(&self) -> Duration {
        Duration::from_millis(self.min_latency_ms)
    }

    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path).map_err(|error| ConfigError::Catalog {
                path: path.clone(),
                error,
            }),
            None => Ok(Catalog::builtin()),
        }
    }

    /// Build the configured strategy.
    pub fn build_strategy(&self, server: &Server) -> Result<Strategy, ConfigError> {
        Ok(match self.strategy {
            StrategyKind::Local => Strategy::Local(LocalStrategy::new(self.catalog()?, self.seed)),
            StrategyKind::Remote => Strategy::Remote(RemoteStrategy::new(server.client()?)),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Server {
    pub base_url: String,
    /// Unset means the HTTP client's default.
    pub request_timeout_secs: Option<u64>,
}
impl Default for Server {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            request_timeout_secs: None,
        }
    }
}
impl Server {
    pub fn client(&self) -> Result<api::Client, ConfigError> {
        match self.request_timeout_secs {
            Some(secs) => api::Client::with_timeout(&self.base_url, Duration::from_secs(secs))
                .map_err(ConfigError::Client),
            None => Ok(api::Client::new(&self.base_url)),
        }
    }
}
