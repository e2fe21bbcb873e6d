//! Editor settings loaded from `worldedit.toml`.
//!
//! ```toml
//! [history]
//! reserve = 8192
//!
//! [world]
//! max_entities = 16384
//! ```
//!
//! Every key is optional; missing keys take their defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use worldedit_core::abstract_editor::DEFAULT_STACK_RESERVE;
use worldedit_world::{DEFAULT_MAX_ENTITIES, WorldLimits};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub history: HistorySettings,
    pub world: WorldSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Entries reserved up front on each side of the edit stack, clamped to
    /// `MAX_STACK_RESERVE`.
    pub reserve: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            reserve: DEFAULT_STACK_RESERVE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Maximum number of entities of each kind.
    pub max_entities: usize,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            max_entities: DEFAULT_MAX_ENTITIES,
        }
    }
}

impl EditorSettings {
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| SettingsError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Loads settings, falling back to defaults if the file is missing or
    /// invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}, using default settings");
                Self::default()
            }
        }
    }

    pub fn world_limits(&self) -> WorldLimits {
        WorldLimits {
            max_entities: self.world.max_entities,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_gives_defaults() {
        let settings = EditorSettings::from_toml("").unwrap();
        assert_eq!(settings, EditorSettings::default());
        assert_eq!(settings.history.reserve, DEFAULT_STACK_RESERVE);
    }

    #[test]
    fn partial_source_keeps_other_defaults() {
        let settings = EditorSettings::from_toml("[world]\nmax_entities = 64\n").unwrap();
        assert_eq!(settings.world.max_entities, 64);
        assert_eq!(settings.history.reserve, DEFAULT_STACK_RESERVE);
        assert_eq!(settings.world_limits().max_entities, 64);
    }

    #[test]
    fn invalid_source_is_an_error() {
        assert!(EditorSettings::from_toml("[history]\nreserve = \"lots\"\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("worldedit-settings-that-does-not-exist.toml");
        assert!(matches!(
            EditorSettings::load(&path),
            Err(SettingsError::Read { .. })
        ));
        assert_eq!(EditorSettings::load_or_default(&path), EditorSettings::default());
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("worldedit-settings-{}.toml", std::process::id()));
        std::fs::write(&path, "[history]\nreserve = 32\n").unwrap();
        let settings = EditorSettings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(settings.history.reserve, 32);
    }
}
