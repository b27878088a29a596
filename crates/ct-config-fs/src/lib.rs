// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` for the scan tools.
//!
//! Each key is one `<key>.json` file under a base directory, by default the
//! platform config dir (`~/.config/ct-scan` on Linux). Saves go through a
//! sibling temp file and a rename, so readers see either the old or the new
//! prefs.

use ct_app_core::config::{ConfigError, ConfigStore};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Stores scan configs as JSON files under a base directory.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Store rooted at the platform config directory for `ct-scan`.
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("dev", "flyingrobots", "ct-scan")
            .ok_or_else(|| ConfigError::Other("no home directory for ct-scan config".into()))?;
        Self::at(dirs.config_dir())
    }

    /// Store rooted at `base`, created if missing.
    pub fn at(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = base.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Directory the JSON files live in.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Keys are bare file stems; anything that could escape `base` is refused.
    fn file_for(&self, key: &str) -> Result<PathBuf, ConfigError> {
        if key.is_empty() || key.starts_with('.') || key.contains(['/', '\\']) {
            return Err(ConfigError::Other(format!("invalid config key: {key:?}")));
        }
        Ok(self.base.join(format!("{key}.json")))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.file_for(key)?) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.file_for(key)?;
        fs::create_dir_all(&self.base)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path()).unwrap();
        assert!(matches!(store.load_raw("nope"), Err(ConfigError::NotFound)));
    }

    #[test]
    fn saves_as_json_file_under_base() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path().join("nested")).unwrap();
        assert_eq!(store.base(), dir.path().join("nested"));
        store.save_raw("scan_prefs", b"{}").unwrap();
        assert!(store.base().join("scan_prefs.json").exists());
        assert!(!store.base().join("scan_prefs.json.tmp").exists());
        assert_eq!(store.load_raw("scan_prefs").unwrap(), b"{}");
    }

    #[test]
    fn save_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path()).unwrap();
        store.save_raw("scan_prefs", br#"{"density": 9}"#).unwrap();
        store.save_raw("scan_prefs", b"{}").unwrap();
        assert_eq!(store.load_raw("scan_prefs").unwrap(), b"{}");
    }

    #[test]
    fn keys_cannot_escape_base() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path().join("cfg")).unwrap();
        for key in ["", "../scan_prefs", "a/b", r"a\b", ".hidden"] {
            assert!(matches!(store.save_raw(key, b"{}"), Err(ConfigError::Other(_))), "{key}");
            assert!(matches!(store.load_raw(key), Err(ConfigError::Other(_))), "{key}");
        }
        assert!(!dir.path().join("scan_prefs.json").exists());
    }
}
