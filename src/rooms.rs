//! Chatroom list controller and debounced search
//!
//! The [`RoomList`] owns the in-memory chatroom list shown on the
//! dashboard. Every successful mutation is synchronized to the
//! [`RoomStore`] immediately, so the persisted list always matches what
//! the user sees. Filtering is read-only and never touches the underlying
//! list; the dashboard drives it through a [`Debouncer`] so the filter only
//! re-evaluates after the query has been idle for the debounce window.

use crate::error::{ChatterboxError, Result};
use crate::store::RoomStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Debounce window for dashboard search (inactivity before re-filtering)
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// A single chatroom record
///
/// The id is the creation time in milliseconds, kept strictly monotonic
/// within a list so ids stay unique even for back-to-back creates.
/// Rooms are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chatroom {
    /// Creation-time identifier (Unix millis, unique within the list)
    pub id: i64,
    /// Room title (non-empty after trimming)
    pub title: String,
}

/// Owns the chatroom list and keeps it synchronized with the store
pub struct RoomList {
    rooms: Vec<Chatroom>,
    store: RoomStore,
}

impl RoomList {
    /// Load the room list from the store
    ///
    /// A fresh or unreadable store yields an empty list.
    pub fn load(store: RoomStore) -> Self {
        let rooms = store.load();
        Self { rooms, store }
    }

    /// Create a new chatroom
    ///
    /// # Arguments
    ///
    /// * `title` - Room title; trimmed before validation
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Validation` when the trimmed title is
    /// empty. The list is unchanged in that case.
    pub fn create(&mut self, title: &str) -> Result<Chatroom> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChatterboxError::Validation("Please enter a title".to_string()).into());
        }

        let room = Chatroom {
            id: self.next_id(),
            title: title.to_string(),
        };
        self.rooms.push(room.clone());
        self.store.save(&self.rooms);
        Ok(room)
    }

    /// Delete a chatroom by id
    ///
    /// Removing an unknown id is a no-op. Returns whether a room was
    /// removed. Callers are expected to confirm with the user before
    /// invoking this.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.rooms.len();
        self.rooms.retain(|room| room.id != id);
        let removed = self.rooms.len() != before;
        if removed {
            self.store.save(&self.rooms);
        }
        removed
    }

    /// Filter rooms by a case-insensitive substring match on the title
    ///
    /// Read-only: the underlying list is untouched. An empty query returns
    /// the full list.
    pub fn filter(&self, query: &str) -> Vec<&Chatroom> {
        let query = query.to_lowercase();
        self.rooms
            .iter()
            .filter(|room| room.title.to_lowercase().contains(&query))
            .collect()
    }

    /// Look up a room by id
    pub fn get(&self, id: i64) -> Option<&Chatroom> {
        self.rooms.iter().find(|room| room.id == id)
    }

    /// All rooms, in creation order
    pub fn rooms(&self) -> &[Chatroom] {
        &self.rooms
    }

    /// Number of rooms
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Next creation-time id, bumped past the current maximum when two
    /// creates land in the same millisecond
    fn next_id(&self) -> i64 {
        let now = Utc::now().timestamp_millis();
        match self.rooms.iter().map(|room| room.id).max() {
            Some(max) if now <= max => max + 1,
            _ => now,
        }
    }
}

/// Debounced copy of a search query
///
/// Holds a pending query that is only committed after the caller has been
/// idle for the debounce window. Time is injected so the behavior is
/// deterministic under test.
#[derive(Debug)]
pub struct Debouncer {
    pending: String,
    committed: String,
    last_edit: Option<Instant>,
    window: Duration,
}

impl Debouncer {
    /// Create a debouncer with the given inactivity window
    pub fn new(window: Duration) -> Self {
        Self {
            pending: String::new(),
            committed: String::new(),
            last_edit: None,
            window,
        }
    }

    /// Record a new query value at the given instant
    ///
    /// Restarts the inactivity timer only when the value actually changed.
    pub fn update(&mut self, query: &str, now: Instant) {
        if query != self.pending {
            self.pending = query.to_string();
            self.last_edit = Some(now);
        }
    }

    /// Commit the pending query if the window has elapsed
    ///
    /// Returns true when the committed query changed, i.e. the filter
    /// should re-evaluate.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_edit {
            Some(edited) if now.duration_since(edited) >= self.window => {
                self.last_edit = None;
                if self.pending != self.committed {
                    self.committed = self.pending.clone();
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// The currently committed query
    pub fn query(&self) -> &str {
        &self.committed
    }
}
