//! # Chatterbox
//!
//! A terminal chat demo: mock phone/OTP login, a locally persisted
//! chatroom dashboard, and per-room chat sessions with paginated dummy
//! history and simulated assistant replies.
//!
//! ## Features
//!
//! - Mock authentication with country dial codes and a locally generated OTP
//! - Chatroom list persisted in an embedded sled database
//! - Reverse-paginated synthetic backlog (newest page first)
//! - Pluggable responders producing delayed simulated replies
//! - Image attachments stored inline as base64 data
//! - Copy message text to the system clipboard
//!
//! ## Example
//!
//! ```no_run
//! use chatterbox::config::Config;
//! use chatterbox::history::DummyHistory;
//! use chatterbox::responders::create_responder;
//! use chatterbox::session::ChatSession;
//!
//! # async fn demo() -> chatterbox::error::Result<()> {
//! let config = Config::default();
//! let responder = create_responder("echo")?;
//! let history = DummyHistory::generate(
//!     config.history.total_messages,
//!     config.history.page_size,
//!     config.history_interval(),
//! );
//! let mut session = ChatSession::new(1, history, responder, config.session_timing());
//! session.load_initial().await;
//! session.send("hello", None)?;
//! session.recv_reply().await;
//! # Ok(())
//! # }
//! ```

pub mod attachment;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod message;
pub mod responders;
pub mod rooms;
pub mod session;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use cli::{Cli, Commands, RoomCommand};
pub use config::Config;
pub use error::{ChatterboxError, Result};
pub use history::DummyHistory;
pub use message::{ChatMessage, ImageAttachment, MessageBody, Sender};
pub use responders::{create_responder, Responder};
pub use rooms::{Chatroom, RoomList};
pub use session::{ChatSession, SessionState, SessionTiming};
pub use store::RoomStore;
