//! Chat session controller
//!
//! Owns the visible message list for one chatroom: merges paged history
//! (older pages prepend) with newly sent and received messages (append),
//! schedules the simulated assistant reply, and tracks the viewport
//! anchor so prepends never cause a visual jump.
//!
//! The session is a small state machine:
//!
//! - `LoadingInitial`: the first history page has not resolved yet; the
//!   REPL shows a skeleton placeholder.
//! - `Ready`: idle, accepting sends.
//! - `AwaitingReply`: a user message is out and the scheduled reply has
//!   not arrived yet.
//!
//! The scheduled reply is a spawned task owned by the session and aborted
//! when the session is dropped, so a dead session can never apply a stale
//! update.

use crate::error::{ChatterboxError, Result};
use crate::history::DummyHistory;
use crate::message::{ChatMessage, ImageAttachment, MessageBody};
use crate::responders::{ReplyPrompt, Responder};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Session lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Initial history page is still "loading"
    LoadingInitial,
    /// Idle, ready to send
    Ready,
    /// A user message was sent; the simulated reply is pending
    AwaitingReply,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadingInitial => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::AwaitingReply => write!(f, "awaiting-reply"),
        }
    }
}

/// Timing knobs for the simulated latencies
#[derive(Debug, Clone)]
pub struct SessionTiming {
    /// Minimum skeleton time before the first page appears
    pub initial_load_delay: Duration,
    /// Lower bound of the randomized reply delay (inclusive)
    pub reply_delay_min: Duration,
    /// Upper bound of the randomized reply delay (exclusive)
    pub reply_delay_max: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            initial_load_delay: Duration::from_millis(500),
            reply_delay_min: Duration::from_millis(1000),
            reply_delay_max: Duration::from_millis(2000),
        }
    }
}

/// Viewport anchor over the visible message list
///
/// Either pinned to the newest message (the auto-scroll position) or
/// anchored at a fixed message index counted from the top. Prepending
/// older messages shifts a fixed anchor by the prepended count so the
/// visible position is undisturbed.
#[derive(Debug, Clone, Copy)]
pub struct ScrollAnchor {
    pinned_to_latest: bool,
    top_index: usize,
}

impl ScrollAnchor {
    fn new() -> Self {
        Self {
            pinned_to_latest: true,
            top_index: 0,
        }
    }

    /// Pin the viewport to the newest message
    pub fn pin_to_latest(&mut self) {
        self.pinned_to_latest = true;
    }

    /// Anchor the viewport at the very top of loaded history
    pub fn move_to_top(&mut self) {
        self.pinned_to_latest = false;
        self.top_index = 0;
    }

    /// Whether the viewport follows the newest message
    pub fn is_pinned_to_latest(&self) -> bool {
        self.pinned_to_latest
    }

    /// Index of the first visible message when not pinned
    pub fn top_index(&self) -> usize {
        self.top_index
    }

    fn shift_for_prepend(&mut self, count: usize) {
        if !self.pinned_to_latest {
            self.top_index += count;
        }
    }
}

/// Outcome of a completed send/reply cycle
#[derive(Debug, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The assistant reply arrived and was appended
    Replied,
    /// The reply task was cancelled or failed; no message was appended
    Missed,
}

struct PendingReply {
    rx: oneshot::Receiver<String>,
    handle: JoinHandle<()>,
}

/// Controller for one open chatroom session
pub struct ChatSession {
    room_id: i64,
    state: SessionState,
    messages: Vec<ChatMessage>,
    page: usize,
    history: DummyHistory,
    responder: Arc<dyn Responder>,
    timing: SessionTiming,
    scroll: ScrollAnchor,
    pending_reply: Option<PendingReply>,
}

impl ChatSession {
    /// Create a session for a room
    ///
    /// The session starts in `LoadingInitial`; call
    /// [`ChatSession::load_initial`] to resolve the first history page.
    pub fn new(
        room_id: i64,
        history: DummyHistory,
        responder: Arc<dyn Responder>,
        timing: SessionTiming,
    ) -> Self {
        Self {
            room_id,
            state: SessionState::LoadingInitial,
            messages: Vec::new(),
            page: 0,
            history,
            responder,
            timing,
            scroll: ScrollAnchor::new(),
            pending_reply: None,
        }
    }

    /// Resolve the initial history page after the simulated loading delay
    ///
    /// No-op when the session has already loaded.
    pub async fn load_initial(&mut self) {
        if self.state != SessionState::LoadingInitial {
            return;
        }

        tokio::time::sleep(self.timing.initial_load_delay).await;

        self.page = 1;
        self.messages.extend_from_slice(self.history.page(1));
        self.scroll.pin_to_latest();
        self.state = SessionState::Ready;
        tracing::debug!(room_id = self.room_id, "initial history page loaded");
    }

    /// Scroll the viewport to the top of loaded history
    ///
    /// When older pages remain this fetches the next one and prepends it,
    /// returning the number of prepended messages; the anchor is shifted by
    /// the same amount so the previously visible messages stay in place.
    pub fn scroll_to_top(&mut self) -> usize {
        self.scroll.move_to_top();
        if self.state == SessionState::LoadingInitial || !self.history.has_more(self.page) {
            return 0;
        }
        self.load_older()
    }

    /// Prepend the next older history page
    ///
    /// Returns the number of messages prepended (0 when history is
    /// exhausted).
    pub fn load_older(&mut self) -> usize {
        if self.state == SessionState::LoadingInitial || !self.history.has_more(self.page) {
            return 0;
        }

        self.page += 1;
        let older = self.history.page(self.page);
        let count = older.len();
        self.messages.splice(0..0, older.iter().cloned());
        self.scroll.shift_for_prepend(count);
        tracing::debug!(
            room_id = self.room_id,
            page = self.page,
            count,
            "older history page prepended"
        );
        count
    }

    /// Send a user message and schedule the simulated reply
    ///
    /// # Arguments
    ///
    /// * `text` - Message text (may be blank when an image is attached)
    /// * `attachment` - Optional image attachment
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Validation` when both text (after
    /// trimming) and image are absent, when the session is still loading,
    /// or when a reply is already pending. State is unchanged on error.
    pub fn send(&mut self, text: &str, attachment: Option<ImageAttachment>) -> Result<()> {
        match self.state {
            SessionState::LoadingInitial => {
                return Err(
                    ChatterboxError::Validation("Chat is still loading".to_string()).into(),
                );
            }
            SessionState::AwaitingReply => {
                return Err(ChatterboxError::Validation(
                    "Wait for the current reply to arrive".to_string(),
                )
                .into());
            }
            SessionState::Ready => {}
        }

        let body = MessageBody::from_parts(text, attachment).ok_or_else(|| {
            ChatterboxError::Validation("Message cannot be empty".to_string())
        })?;

        let prompt = ReplyPrompt::from_body(&body);
        self.messages.push(ChatMessage::user(body));
        self.scroll.pin_to_latest();
        self.state = SessionState::AwaitingReply;
        self.schedule_reply(prompt);
        Ok(())
    }

    /// Wait for the scheduled reply and append it
    ///
    /// Resolves once the randomized delay elapses and the responder
    /// produces its text. Returns `ReplyOutcome::Missed` (and goes back to
    /// `Ready`) if the reply task failed; the session never hangs in
    /// `AwaitingReply` after this returns.
    pub async fn recv_reply(&mut self) -> ReplyOutcome {
        let pending = match self.pending_reply.take() {
            Some(pending) => pending,
            None => return ReplyOutcome::Missed,
        };

        let outcome = match pending.rx.await {
            Ok(text) => {
                self.messages.push(ChatMessage::assistant(text));
                ReplyOutcome::Replied
            }
            Err(_) => {
                tracing::warn!(room_id = self.room_id, "reply task dropped without a reply");
                ReplyOutcome::Missed
            }
        };

        // Typing indicator turns off; the view re-pins to the newest message
        self.scroll.pin_to_latest();
        self.state = SessionState::Ready;
        outcome
    }

    /// Cancel a pending reply, if any
    ///
    /// The scheduled task is aborted and the session returns to `Ready`.
    pub fn cancel_pending_reply(&mut self) {
        if let Some(pending) = self.pending_reply.take() {
            pending.handle.abort();
            if self.state == SessionState::AwaitingReply {
                self.state = SessionState::Ready;
            }
        }
    }

    /// Text of the visible message at `index`, for copy-to-clipboard
    ///
    /// # Errors
    ///
    /// Returns `ChatterboxError::Validation` when the index is out of
    /// range or the message is image-only.
    pub fn copyable_text(&self, index: usize) -> Result<&str> {
        let message = self.messages.get(index).ok_or_else(|| {
            ChatterboxError::Validation(format!("No message #{}", index + 1))
        })?;
        message.body.text().ok_or_else(|| {
            ChatterboxError::Validation("Image messages cannot be copied".to_string()).into()
        })
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the typing indicator should be shown
    pub fn is_typing(&self) -> bool {
        self.state == SessionState::AwaitingReply
    }

    /// The visible message list, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Room this session belongs to
    pub fn room_id(&self) -> i64 {
        self.room_id
    }

    /// Whether older history pages remain
    pub fn has_older(&self) -> bool {
        self.history.has_more(self.page)
    }

    /// Current viewport anchor
    pub fn scroll(&self) -> ScrollAnchor {
        self.scroll
    }

    /// Name of the responder backing this session
    pub fn responder_name(&self) -> &str {
        self.responder.name()
    }

    fn schedule_reply(&mut self, prompt: ReplyPrompt) {
        let delay = self.random_reply_delay();
        let responder = Arc::clone(&self.responder);
        let (tx, rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match responder.reply(&prompt).await {
                Ok(text) => {
                    let _ = tx.send(text);
                }
                Err(e) => {
                    tracing::warn!("responder failed: {}", e);
                }
            }
        });

        self.pending_reply = Some(PendingReply { rx, handle });
    }

    fn random_reply_delay(&self) -> Duration {
        let min = self.timing.reply_delay_min;
        let max = self.timing.reply_delay_max;
        if max <= min {
            return min;
        }
        let millis = rand::rng().random_range(min.as_millis() as u64..max.as_millis() as u64);
        Duration::from_millis(millis)
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        // A destroyed session must not leave a reply task running
        if let Some(pending) = self.pending_reply.take() {
            pending.handle.abort();
        }
    }
}
