//! Registry configuration persistence
//!
//! Stores user preferences in `~/.config/panelsync/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::panel::DockPosition;

/// Registry configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Hide other owners' panels when a window activates, restore on return
    #[serde(default = "default_auto_hide")]
    pub auto_hide_inactive: bool,

    /// Dock position for the first panel of a new logical panel
    #[serde(default)]
    pub default_dock: DockPosition,

    /// Width in pixels for the first panel of a new logical panel
    #[serde(default = "default_width")]
    pub default_width: u32,

    /// Height in pixels for the first panel of a new logical panel
    #[serde(default = "default_height")]
    pub default_height: u32,
}

fn default_auto_hide() -> bool {
    true
}

fn default_width() -> u32 {
    250
}

fn default_height() -> u32 {
    200
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            auto_hide_inactive: default_auto_hide(),
            default_dock: DockPosition::default(),
            default_width: default_width(),
            default_height: default_height(),
        }
    }
}

impl RegistryConfig {
    /// Load config from the user config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, or return defaults if missing or malformed
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the user config directory
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
