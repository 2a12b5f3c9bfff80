//! Shared helpers for unit tests
//!
//! Only compiled for tests; keeps temp-dir plumbing out of the
//! individual test modules.

use crate::rooms::RoomList;
use crate::store::RoomStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory that is cleaned up on drop
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Write a file with the given content into a temporary directory
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write test file");
    path
}

/// A room list backed by a throwaway database
///
/// The TempDir must be kept alive for the list's lifetime.
pub fn temp_room_list() -> (RoomList, TempDir) {
    let dir = temp_dir();
    let store = RoomStore::new(dir.path().join("rooms.db")).expect("open temp store");
    (RoomList::load(store), dir)
}
