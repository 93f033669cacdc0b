use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub mod persistence;
pub mod user;

pub use persistence::{SettingsPatch, SettingsState, SETTINGS_KEY};
pub use user::{
    AxisPolicy, CameraConfig, DetectionConfig, GestureConfig, LensConfig, LyricsConfig,
    TransitionConfig,
};

/// Locations of everything stagelens keeps on disk.
pub struct AppPaths;

impl AppPaths {
    pub fn get_config_dir() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("stagelens");
        path
    }

    pub fn get_config_path() -> PathBuf {
        Self::get_config_dir().join("config.toml")
    }

    /// Directory holding the persisted key-value blobs.
    pub fn get_state_dir() -> PathBuf {
        Self::get_config_dir().join("state")
    }

    pub fn get_log_dir() -> PathBuf {
        Self::get_config_dir().join("logs")
    }
}

impl LensConfig {
    /// Load `config.toml`. A missing file is created with defaults; an
    /// unreadable or invalid one yields defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(content) = toml::to_string_pretty(&config) {
                let _ = fs::write(path, content);
            }
            return config;
        }

        let config = match fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<LensConfig>(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "config unparsable, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config unreadable, using defaults");
                Self::default()
            }
        };

        if let Err(e) = config.validate() {
            warn!(error = %e, "config rejected, using defaults");
            return Self::default();
        }
        config
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
