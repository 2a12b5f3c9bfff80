//! Echo responder
//!
//! The default (and only built-in) reply generator: it echoes the user's
//! text back, with a fixed placeholder for image-only messages.

use super::base::{ReplyPrompt, Responder};
use crate::error::Result;
use async_trait::async_trait;

/// Reply prefix used by the echo responder
const REPLY_PREFIX: &str = "Echo says:";

/// Placeholder reply for image-only messages
const IMAGE_PLACEHOLDER: &str = "Nice image!";

/// Responder that echoes the user's message back
#[derive(Debug, Default)]
pub struct EchoResponder;

impl EchoResponder {
    /// Create a new echo responder
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Responder for EchoResponder {
    fn name(&self) -> &str {
        "echo"
    }

    async fn reply(&self, prompt: &ReplyPrompt) -> Result<String> {
        let text = prompt
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(IMAGE_PLACEHOLDER);
        Ok(format!("{} {}", REPLY_PREFIX, text))
    }
}
