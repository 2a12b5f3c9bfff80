//! Base responder trait and prompt type
//!
//! A responder turns the user's latest message into the simulated
//! assistant reply. The trait seam exists so the echo behavior shipped by
//! default can be swapped for a real reply generator without touching the
//! session controller.

use crate::error::Result;
use crate::message::MessageBody;
use async_trait::async_trait;

/// What the user sent, as seen by a responder
///
/// Carries only what reply generation needs: the text portion (if any) and
/// whether an image was attached. The image bytes themselves are not
/// exposed to responders.
#[derive(Debug, Clone)]
pub struct ReplyPrompt {
    /// Text portion of the user's message
    pub text: Option<String>,
    /// Whether the message carried an image attachment
    pub has_image: bool,
}

impl ReplyPrompt {
    /// Build a prompt from a message body
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterbox::message::MessageBody;
    /// use chatterbox::responders::ReplyPrompt;
    ///
    /// let body = MessageBody::Text("hi".to_string());
    /// let prompt = ReplyPrompt::from_body(&body);
    /// assert_eq!(prompt.text.as_deref(), Some("hi"));
    /// assert!(!prompt.has_image);
    /// ```
    pub fn from_body(body: &MessageBody) -> Self {
        Self {
            text: body.text().map(str::to_string),
            has_image: body.image().is_some(),
        }
    }
}

/// Trait implemented by all reply generators
#[async_trait]
pub trait Responder: Send + Sync {
    /// Short identifier for this responder (shown in the chat header)
    fn name(&self) -> &str;

    /// Produce the assistant reply text for the given prompt
    async fn reply(&self, prompt: &ReplyPrompt) -> Result<String>;
}
