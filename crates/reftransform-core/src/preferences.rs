//! User preferences persisted as JSON.

use crate::keymap::KeymapRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name of the preferences inside the config directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Preferences errors.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Preferences not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for preferences operations.
pub type PreferencesResult<T> = Result<T, PreferencesError>;

/// Add-on preferences: the user's keymap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub keymap: KeymapRegistry,
}

impl Preferences {
    /// Default preferences file location.
    ///
    /// On Unix: `~/.config/reftransform/preferences.json`
    /// On Windows: `%APPDATA%\reftransform\preferences.json`
    pub fn default_path() -> PreferencesResult<PathBuf> {
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| PreferencesError::Io("Could not determine home directory".to_string()))?;
        Ok(base.join("reftransform").join(PREFERENCES_FILE))
    }

    /// Load preferences from a file, restoring any missing default bindings.
    pub fn load(path: &Path) -> PreferencesResult<Self> {
        if !path.exists() {
            return Err(PreferencesError::NotFound(path.display().to_string()));
        }

        let json = fs::read_to_string(path).map_err(|e| {
            PreferencesError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut prefs: Preferences = serde_json::from_str(&json).map_err(|e| {
            PreferencesError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        prefs.keymap.merge_defaults();
        Ok(prefs)
    }

    /// Load preferences, falling back to defaults when the file is missing.
    pub fn load_or_default(path: &Path) -> PreferencesResult<Self> {
        match Self::load(path) {
            Err(PreferencesError::NotFound(_)) => {
                log::info!("No preferences at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Write preferences, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> PreferencesResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    PreferencesError::Io(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PreferencesError::Serialization(e.to_string()))?;
        fs::write(path, json)
            .map_err(|e| PreferencesError::Io(format!("Failed to write {}: {}", path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputKind;
    use crate::keymap::{FLIP_X, FLIP_Y};
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE);

        let mut prefs = Preferences::default();
        prefs
            .keymap
            .rebind(FLIP_X, InputKind::key("F"), true, false, false)
            .unwrap();
        prefs.save(&path).unwrap();

        let loaded = Preferences::load(&path).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);

        assert!(matches!(Preferences::load(&path), Err(PreferencesError::NotFound(_))));
        assert_eq!(Preferences::load_or_default(&path).unwrap(), Preferences::default());
    }

    #[test]
    fn test_load_restores_missing_bindings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        fs::write(
            &path,
            r#"{"keymap": [{
                "action": "flip_y",
                "label": "Flip Image Y",
                "key": {"Key": "B"},
                "section": "Modal"
            }]}"#,
        )
        .unwrap();

        let prefs = Preferences::load(&path).unwrap();
        assert_eq!(prefs.keymap.resolve(FLIP_Y).unwrap().key, InputKind::key("B"));
        assert!(prefs.keymap.resolve(FLIP_X).is_ok());
        assert_eq!(prefs.keymap.len(), KeymapRegistry::with_defaults().len());
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(PREFERENCES_FILE);
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            Preferences::load(&path),
            Err(PreferencesError::Serialization(_))
        ));
    }
}
