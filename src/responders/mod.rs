//! Responder module
//!
//! Contains the reply-generation abstraction used for simulated assistant
//! replies, and the built-in echo implementation.

pub mod base;
pub mod echo;

pub use base::{ReplyPrompt, Responder};
pub use echo::EchoResponder;

use crate::error::{ChatterboxError, Result};
use std::sync::Arc;

/// Create a responder instance by kind
///
/// # Arguments
///
/// * `kind` - Responder identifier (currently only "echo")
///
/// # Errors
///
/// Returns `ChatterboxError::Responder` for an unknown kind
pub fn create_responder(kind: &str) -> Result<Arc<dyn Responder>> {
    match kind {
        "echo" => Ok(Arc::new(EchoResponder::new())),
        _ => Err(ChatterboxError::Responder(format!("Unknown responder type: {}", kind)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_echo_responder() {
        let responder = create_responder("echo").expect("echo responder");
        assert_eq!(responder.name(), "echo");
    }

    #[test]
    fn test_create_responder_invalid_kind() {
        let result = create_responder("gpt-12");
        assert!(result.is_err());
    }
}
