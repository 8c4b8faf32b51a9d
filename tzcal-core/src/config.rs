//! tzcal configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{TzCalError, TzCalResult};
use crate::reminder::Permission;
use crate::storage::FileStorage;
use crate::zones;

static DEFAULT_DATA_PATH: &str = "~/.local/share/tzcal";
static DEFAULT_SHARE_BASE_URL: &str = "https://tzcal.app/";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_share_base_url() -> String {
    DEFAULT_SHARE_BASE_URL.to_string()
}

fn is_default_share_base_url(url: &str) -> bool {
    url == DEFAULT_SHARE_BASE_URL
}

fn is_default_permission(p: &Permission) -> bool {
    *p == Permission::Default
}

/// Configuration at ~/.config/tzcal/config.toml
///
/// Every key can be overridden with a `TZCAL_`-prefixed environment
/// variable, e.g. `TZCAL_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TzcalConfig {
    /// Where events and preferences are stored
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Timezone label preselected for new events (defaults to the viewer's zone)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_timezone: Option<String>,

    /// Zone to show converted times in (defaults to this machine's zone)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer_timezone: Option<String>,

    /// Page that share links point to
    #[serde(
        default = "default_share_base_url",
        skip_serializing_if = "is_default_share_base_url"
    )]
    pub share_base_url: String,

    /// Whether desktop notifications were allowed
    #[serde(default, skip_serializing_if = "is_default_permission")]
    pub notifications: Permission,
}

impl Default for TzcalConfig {
    fn default() -> Self {
        TzcalConfig {
            data_dir: default_data_dir(),
            default_timezone: None,
            viewer_timezone: None,
            share_base_url: default_share_base_url(),
            notifications: Permission::Default,
        }
    }
}

impl TzcalConfig {
    pub fn config_path() -> TzCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TzCalError::Config("Could not determine config directory".into()))?
            .join("tzcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/tzcal/config.toml, creating a commented default on first run.
    pub fn load() -> TzCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> TzCalResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("TZCAL"))
            .build()
            .map_err(|e| TzCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TzCalError::Config(e.to_string()))
    }

    /// Save the current config to ~/.config/tzcal/config.toml
    pub fn save(&self) -> TzCalResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> TzCalResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| TzCalError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TzCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| TzCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TzCalResult<()> {
        let contents = format!(
            "\
# tzcal configuration

# Where events are stored:
# data_dir = \"{}\"

# Timezone preselected for new events (a label like \"Japan/Tokyo\" or a zone id):
# default_timezone = \"United Kingdom/London\"

# Show converted times in this zone instead of the system zone:
# viewer_timezone = \"America/New_York\"

# Page that share links point to:
# share_base_url = \"{}\"
",
            DEFAULT_DATA_PATH, DEFAULT_SHARE_BASE_URL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TzCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TzCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn storage(&self) -> FileStorage {
        FileStorage::new(self.data_path())
    }

    /// Zone converted times are shown in.
    pub fn viewer_zone(&self) -> String {
        self.viewer_timezone.clone().unwrap_or_else(zones::local_zone_id)
    }

    /// Zone preselected for new events.
    pub fn default_zone(&self) -> String {
        self.default_timezone.clone().unwrap_or_else(|| self.viewer_zone())
    }
}
