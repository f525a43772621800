//! services/player/src/adapters/file_store.rs
//!
//! This module contains the file-backed snapshot store, the concrete implementation
//! of the `SnapshotStore` port used outside of tests. Each key lives in its own
//! `<key>.json` file under the data directory.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use course_player_core::ports::{PortError, PortResult, SnapshotStore};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

#[derive(Clone, Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> PortResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| {
            PortError::Unexpected(format!("cannot create {}: {}", root.display(), e))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PortResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PortError::Unexpected(format!("invalid snapshot key '{}'", key)));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

//=========================================================================================
// `SnapshotStore` Trait Implementation
//=========================================================================================

impl SnapshotStore for JsonFileStore {
    fn read(&self, key: &str) -> PortResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Unexpected(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Writes to a sibling temp file first and renames it over the target, so a
    /// crash mid-write leaves the previous snapshot intact.
    fn write(&self, key: &str, snapshot: &str) -> PortResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        let result = fs::File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(snapshot.as_bytes())?;
                file.sync_all()
            })
            .and_then(|_| fs::rename(&tmp, &path));

        result.map_err(|e| {
            PortError::Unexpected(format!("cannot write {}: {}", path.display(), e))
        })?;
        debug!("Wrote snapshot {} ({} bytes).", path.display(), snapshot.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert_eq!(store.read("courses").unwrap(), None);
    }

    #[test]
    fn written_snapshot_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nested")).unwrap();

        store.write("notes", "[]").unwrap();
        store.write("notes", "[1]").unwrap();

        assert_eq!(store.read("notes").unwrap().as_deref(), Some("[1]"));
        assert!(store.root().join("notes.json").exists());
        assert!(!store.root().join("notes.json.tmp").exists());
    }

    #[test]
    fn keys_cannot_escape_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert!(store.write("../outside", "x").is_err());
        assert!(store.read("").is_err());
    }
}
