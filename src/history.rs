//! Dummy message source
//!
//! Produces the fixed, deterministic backlog of historical messages shown
//! when a chat session opens. Senders alternate starting with the
//! assistant, and message `i` (0-indexed, `n` messages total) is backdated
//! to `now - (n - i) * interval`, so the whole set is in strictly
//! increasing chronological order.
//!
//! Pages count backwards from the newest messages: page 1 is the most
//! recent `page_size`, page 2 the next older slice, and requests past the
//! start of history return whatever remains (possibly nothing).

use crate::message::{ChatMessage, MessageBody, Sender};
use chrono::{DateTime, Duration, Utc};

/// Deterministic backlog of synthetic historical messages
pub struct DummyHistory {
    messages: Vec<ChatMessage>,
    page_size: usize,
}

impl DummyHistory {
    /// Generate a backlog anchored at the current time
    ///
    /// # Arguments
    ///
    /// * `total` - Number of messages in the backlog
    /// * `page_size` - Messages per page
    /// * `interval` - Spacing between consecutive message timestamps
    pub fn generate(total: usize, page_size: usize, interval: Duration) -> Self {
        Self::anchored_at(Utc::now(), total, page_size, interval)
    }

    /// Generate a backlog anchored at an explicit instant
    ///
    /// Exposed for deterministic tests.
    pub fn anchored_at(
        now: DateTime<Utc>,
        total: usize,
        page_size: usize,
        interval: Duration,
    ) -> Self {
        let messages = (0..total)
            .map(|i| {
                let sender = if i % 2 == 0 {
                    Sender::Assistant
                } else {
                    Sender::User
                };
                let timestamp = now - interval * (total - i) as i32;
                ChatMessage::backdated(
                    sender,
                    MessageBody::Text(format!("Old message #{}", i + 1)),
                    timestamp,
                )
            })
            .collect();

        Self {
            messages,
            page_size,
        }
    }

    /// Return one page of history, newest pages first
    ///
    /// Page 1 is the most recent `page_size` messages in chronological
    /// order, page 2 the next older slice, and so on. Pages past the start
    /// of history return the remaining messages, which may be empty.
    /// Page 0 is empty.
    pub fn page(&self, page: usize) -> &[ChatMessage] {
        if page == 0 {
            return &[];
        }
        let total = self.messages.len() as i64;
        let size = self.page_size as i64;
        let start = total - page as i64 * size;
        let end = (start + size).clamp(0, total) as usize;
        let start = start.max(0) as usize;
        &self.messages[start..end]
    }

    /// Whether pages older than `page` remain
    pub fn has_more(&self, page: usize) -> bool {
        page * self.page_size < self.messages.len()
    }

    /// Total number of messages in the backlog
    pub fn total(&self) -> usize {
        self.messages.len()
    }

    /// Messages per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> DummyHistory {
        DummyHistory::anchored_at(Utc::now(), 100, 20, Duration::seconds(100))
    }

    #[test]
    fn test_backlog_is_chronological() {
        let history = history();
        let all = &history.messages;
        assert_eq!(all.len(), 100);
        for pair in all.windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
    }

    #[test]
    fn test_senders_alternate_starting_with_assistant() {
        let history = history();
        assert_eq!(history.messages[0].sender, Sender::Assistant);
        assert_eq!(history.messages[1].sender, Sender::User);
        assert_eq!(history.messages[2].sender, Sender::Assistant);
    }

    #[test]
    fn test_message_text_numbering() {
        let history = history();
        assert_eq!(history.messages[0].body.text(), Some("Old message #1"));
        assert_eq!(history.messages[99].body.text(), Some("Old message #100"));
    }

    #[test]
    fn test_page_one_is_most_recent() {
        let history = history();
        let page = history.page(1);
        assert_eq!(page.len(), 20);
        assert_eq!(page[19].body.text(), Some("Old message #100"));
        assert_eq!(page[0].body.text(), Some("Old message #81"));
    }

    #[test]
    fn test_page_two_is_strictly_older_than_page_one() {
        let history = history();
        let newest_of_page2 = history.page(2).last().unwrap().timestamp;
        let oldest_of_page1 = history.page(1).first().unwrap().timestamp;
        assert!(newest_of_page2 < oldest_of_page1);
    }

    #[test]
    fn test_last_page_and_beyond() {
        let history = history();
        assert_eq!(history.page(5).len(), 20);
        assert!(history.page(6).is_empty());
        assert!(history.page(7).is_empty());
    }

    #[test]
    fn test_partial_final_page() {
        let history = DummyHistory::anchored_at(Utc::now(), 90, 20, Duration::seconds(100));
        assert_eq!(history.page(4).len(), 20);
        // 90 total: pages 1-4 cover 80, page 5 returns the remaining 10
        assert_eq!(history.page(5).len(), 10);
        assert_eq!(history.page(5)[0].body.text(), Some("Old message #1"));
        assert!(history.page(6).is_empty());
    }

    #[test]
    fn test_page_zero_is_empty() {
        let history = history();
        assert!(history.page(0).is_empty());
    }

    #[test]
    fn test_has_more() {
        let history = history();
        assert!(history.has_more(1));
        assert!(history.has_more(4));
        assert!(!history.has_more(5));
    }
}
