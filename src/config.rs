//! Navigation configuration persistence
//!
//! Stores traversal preferences in `~/.config/gridnav/config.yaml`:
//!
//! ```yaml
//! create_rows: true
//! skipped_columns: [0, 3]
//! walk_limit: 65536
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::traverse::DEFAULT_WALK_LIMIT;

/// Traversal configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Create a row when Tab/Enter runs past the last one
    #[serde(default)]
    pub create_rows: bool,

    /// Columns Tab and Shift+Tab step over
    #[serde(default)]
    pub skipped_columns: Vec<usize>,

    /// Upper bound on the steps of one linked-column walk
    #[serde(default = "default_walk_limit")]
    pub walk_limit: usize,
}

fn default_walk_limit() -> usize {
    DEFAULT_WALK_LIMIT
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            create_rows: false,
            skipped_columns: Vec::new(),
            walk_limit: default_walk_limit(),
        }
    }
}

impl NavigationConfig {
    /// Load config from the config directory, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<NavigationConfig>(&content) {
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

    /// Save config to the config directory
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to `path`, creating parent directories
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

    /// Whether the skip list leaves nothing to visit in a grid this wide
    pub fn skips_every_column(&self, column_count: usize) -> bool {
        (0..column_count).all(|col| self.skipped_columns.contains(&col))
    }
}
