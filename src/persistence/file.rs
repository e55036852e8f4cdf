//! File-backed key-value store
//!
//! Layout inside the data directory:
//!
//! ```text
//! data_dir/
//!   favorite-pokemons.json
//!   <key>.json
//! ```
//!
//! Each `set` writes the whole value to `<key>.json.tmp`, syncs it and
//! renames it over `<key>.json`, so readers never observe a torn value.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::{PersistenceError, PersistenceResult};
use super::KeyValueStore;

/// Key-value store persisting one file per key
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> PersistenceResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        tracing::debug!(root = %root.display(), "Opened file key-value store");
        Ok(Self { root })
    }

    /// Root directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PersistenceResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> PersistenceResult<()> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(PersistenceError::InvalidKey(key.to_string()))
    }
}

fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    {
        let mut file = fs::File::create(tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(tmp_path, path)
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> PersistenceResult<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        if let Err(e) = write_then_rename(&tmp_path, &path, value.as_bytes()) {
            if let Err(cleanup) = fs::remove_file(&tmp_path) {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        path = %tmp_path.display(),
                        error = %cleanup,
                        "Failed to remove temporary file"
                    );
                }
            }
            return Err(e.into());
        }

        tracing::trace!(key, bytes = value.len(), "Wrote key");
        Ok(())
    }

    fn health_check(&self) -> PersistenceResult<()> {
        let meta = fs::metadata(&self.root)?;
        if !meta.is_dir() {
            return Err(PersistenceError::Unavailable(format!(
                "{} is not a directory",
                self.root.display()
            )));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_get_overwrite() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        assert_eq!(store.get("favorite-pokemons").unwrap(), None);

        store.set("favorite-pokemons", r#"{"1":{}}"#).unwrap();
        store.set("favorite-pokemons", "{}").unwrap();

        assert_eq!(
            store.get("favorite-pokemons").unwrap().as_deref(),
            Some("{}")
        );
        assert!(dir.path().join("favorite-pokemons.json").exists());
        assert!(!dir.path().join("favorite-pokemons.json.tmp").exists());
    }

    #[test]
    fn test_reopen_sees_previous_writes() {
        let dir = tempdir().unwrap();
        FileStore::open(dir.path())
            .unwrap()
            .set("theme", "\"dark\"")
            .unwrap();

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("\"dark\""));
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        // A directory in place of the target makes the rename fail
        fs::create_dir(dir.path().join("blocked.json")).unwrap();

        assert!(matches!(
            store.set("blocked", "{}"),
            Err(PersistenceError::Io(_))
        ));
        assert!(!dir.path().join("blocked.json.tmp").exists());
        assert!(dir.path().join("blocked.json").is_dir());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(
                matches!(store.set(key, "x"), Err(PersistenceError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn test_health_check() {
        let dir = tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nested")).unwrap();
        assert!(store.health_check().is_ok());

        fs::remove_dir_all(store.root()).unwrap();
        assert!(store.health_check().is_err());
    }
}
