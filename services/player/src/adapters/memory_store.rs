//! In-process snapshot store. Nothing outlives the process.

use std::collections::HashMap;
use std::sync::Mutex;

use course_player_core::ports::{PortError, PortResult, SnapshotStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> PortResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, snapshot: &str) -> PortResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        entries.insert(key.to_string(), snapshot.to_string());
        Ok(())
    }
}
