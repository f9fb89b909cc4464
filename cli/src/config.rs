use anyhow::{Context, Result};
use crm_filter::{EngineConfig, FeatureFlags};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_DIR_NAME: &str = ".crmf";
const CONFIG_FILE_NAME: &str = "config.toml";
const VIEWS_FILE_NAME: &str = "views.json";

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// JSON file holding the saved views
    #[serde(default)]
    pub views_path: Option<PathBuf>,
    #[serde(default)]
    pub features: FeatureFlags,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// An explicit path must exist; the default location is optional.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = default_config_dir().join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    tracing::debug!("No config at {}, using defaults", default_path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn views_path(&self) -> PathBuf {
        self.views_path
            .clone()
            .unwrap_or_else(|| default_config_dir().join(VIEWS_FILE_NAME))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            features: self.features.clone(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME))
}
