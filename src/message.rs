//! Chat message domain model
//!
//! Messages are session-scoped: they are created when sent (or produced by
//! the dummy history source) and dropped when the session ends. A message
//! body is a tagged variant so that text-only, image-only, and mixed
//! messages each carry exactly the fields they need.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The local user
    User,
    /// The simulated assistant
    Assistant,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Assistant => write!(f, "assistant"),
        }
    }
}

/// An inline-encoded image payload attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    /// MIME type of the encoded image (e.g. `image/png`)
    pub mime: String,
    /// Base64-encoded image bytes
    pub data: String,
}

impl ImageAttachment {
    /// Render the attachment as a `data:` URL
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterbox::message::ImageAttachment;
    ///
    /// let att = ImageAttachment {
    ///     mime: "image/png".to_string(),
    ///     data: "aGVsbG8=".to_string(),
    /// };
    /// assert_eq!(att.data_url(), "data:image/png;base64,aGVsbG8=");
    /// ```
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.data)
    }
}

/// Message content as a tagged variant
///
/// A user-originated message must carry non-whitespace text, an image, or
/// both; [`MessageBody::from_parts`] enforces this by returning `None` when
/// neither is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum MessageBody {
    /// Plain text message
    Text(String),
    /// Image-only message
    Image(ImageAttachment),
    /// Text with an attached image
    Mixed {
        /// The text portion
        text: String,
        /// The attached image
        image: ImageAttachment,
    },
}

impl MessageBody {
    /// Build a body from optional text and image parts
    ///
    /// Whitespace-only text counts as absent. Returns `None` when both
    /// parts are missing, which callers must treat as a validation failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterbox::message::MessageBody;
    ///
    /// assert!(MessageBody::from_parts("   ", None).is_none());
    /// let body = MessageBody::from_parts("hello", None).unwrap();
    /// assert_eq!(body.text(), Some("hello"));
    /// ```
    pub fn from_parts(text: &str, image: Option<ImageAttachment>) -> Option<Self> {
        let text = text.trim();
        match (text.is_empty(), image) {
            (true, None) => None,
            (true, Some(image)) => Some(Self::Image(image)),
            (false, None) => Some(Self::Text(text.to_string())),
            (false, Some(image)) => Some(Self::Mixed {
                text: text.to_string(),
                image,
            }),
        }
    }

    /// Returns the text portion, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
            Self::Mixed { text, .. } => Some(text),
        }
    }

    /// Returns the image portion, if any
    pub fn image(&self) -> Option<&ImageAttachment> {
        match self {
            Self::Text(_) => None,
            Self::Image(image) => Some(image),
            Self::Mixed { image, .. } => Some(image),
        }
    }
}

/// A single message in a chat session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message identifier (ULID, unique within the session window)
    pub id: String,
    /// Who produced the message
    pub sender: Sender,
    /// Message content
    pub body: MessageBody,
    /// Creation instant
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a new user message stamped with the current time
    ///
    /// # Examples
    ///
    /// ```
    /// use chatterbox::message::{ChatMessage, MessageBody, Sender};
    ///
    /// let msg = ChatMessage::user(MessageBody::Text("hi".to_string()));
    /// assert_eq!(msg.sender, Sender::User);
    /// ```
    pub fn user(body: MessageBody) -> Self {
        Self {
            id: new_message_id(),
            sender: Sender::User,
            body,
            timestamp: Utc::now(),
        }
    }

    /// Creates a new assistant text message stamped with the current time
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            id: new_message_id(),
            sender: Sender::Assistant,
            body: MessageBody::Text(text.into()),
            timestamp: Utc::now(),
        }
    }

    /// Creates a message with an explicit timestamp
    ///
    /// Used by the dummy history source, which backdates its messages.
    pub fn backdated(sender: Sender, body: MessageBody, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: new_message_id(),
            sender,
            body,
            timestamp,
        }
    }

    /// Whether this message can be copied to the clipboard
    ///
    /// Only messages with a text portion are copyable; image-only messages
    /// are not.
    pub fn is_copyable(&self) -> bool {
        self.body.text().is_some()
    }
}

/// Generate a new ULID for a message
///
/// ULIDs are sortable by timestamp, so message ids within a session sort in
/// creation order as a side benefit of uniqueness.
pub fn new_message_id() -> String {
    Ulid::new().to_string()
}
