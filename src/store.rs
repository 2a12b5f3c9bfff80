//! Chatroom list persistence
//!
//! Stores the chatroom list in an embedded database as a single JSON
//! value under a fixed key, mirroring the one-key/one-list contract of a
//! browser local-storage entry. The whole list is rewritten on every
//! mutation; there is a single writer and no concurrent access.
//!
//! Persistence is best-effort by contract: a missing or malformed stored
//! value degrades to an empty list, and write failures are logged rather
//! than surfaced to the caller.

use crate::error::{ChatterboxError, Result};
use crate::rooms::Chatroom;
use sled::Db;
use std::path::Path;

/// Fixed key under which the serialized chatroom list lives
const CHATROOMS_KEY: &[u8] = b"chatrooms";

/// Chatroom list storage backed by an embedded `sled` database
pub struct RoomStore {
    db: Db,
}

impl RoomStore {
    /// Open or create a room store at the given path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the database directory
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Storage` if the database cannot be opened
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| ChatterboxError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }

    /// Load the persisted chatroom list
    ///
    /// Returns an empty list when no value has been stored yet, and
    /// degrades to an empty list (with a warning log) when the stored value
    /// is unreadable or malformed. Never fails.
    pub fn load(&self) -> Vec<Chatroom> {
        let bytes = match self.db.get(CHATROOMS_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read chatroom list, starting empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(rooms) => rooms,
            Err(e) => {
                tracing::warn!("Malformed chatroom list in store, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Persist the full chatroom list
    ///
    /// Serializes the list as JSON under the fixed key and flushes for
    /// durability. Best-effort: failures are logged, not returned.
    pub fn save(&self, rooms: &[Chatroom]) {
        let value = match serde_json::to_vec(rooms) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Failed to serialize chatroom list: {}", e);
                return;
            }
        };

        if let Err(e) = self.db.insert(CHATROOMS_KEY, value) {
            tracing::warn!("Failed to write chatroom list: {}", e);
            return;
        }

        if let Err(e) = self.db.flush() {
            tracing::warn!("Failed to flush chatroom list: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::temp_dir;

    #[test]
    fn test_load_from_fresh_store_is_empty() {
        let dir = temp_dir();
        let store = RoomStore::new(dir.path().join("rooms.db")).expect("open store");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = temp_dir();
        let store = RoomStore::new(dir.path().join("rooms.db")).expect("open store");

        let rooms = vec![
            Chatroom {
                id: 1700000000000,
                title: "general".to_string(),
            },
            Chatroom {
                id: 1700000000001,
                title: "random".to_string(),
            },
        ];

        store.save(&rooms);
        assert_eq!(store.load(), rooms);
    }

    #[test]
    fn test_round_trip_across_reopen() {
        let dir = temp_dir();
        let path = dir.path().join("rooms.db");

        let rooms = vec![Chatroom {
            id: 42,
            title: "persisted".to_string(),
        }];

        {
            let store = RoomStore::new(&path).expect("open store");
            store.save(&rooms);
        }

        // Simulated restart: a fresh handle sees the identical ordered list
        let store = RoomStore::new(&path).expect("reopen store");
        assert_eq!(store.load(), rooms);
    }

    #[test]
    fn test_malformed_value_degrades_to_empty() {
        let dir = temp_dir();
        let path = dir.path().join("rooms.db");

        {
            let db = sled::open(&path).expect("open raw db");
            db.insert(CHATROOMS_KEY, b"not json".to_vec())
                .expect("insert garbage");
            db.flush().expect("flush");
        }

        let store = RoomStore::new(&path).expect("open store");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_list() {
        let dir = temp_dir();
        let store = RoomStore::new(dir.path().join("rooms.db")).expect("open store");

        store.save(&[Chatroom {
            id: 1,
            title: "old".to_string(),
        }]);
        store.save(&[Chatroom {
            id: 2,
            title: "new".to_string(),
        }]);

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "new");
    }
}
