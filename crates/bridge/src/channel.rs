//! The one-shot message channel port.
//!
//! The host platform offers a "send one message, receive exactly one reply"
//! primitive between the restricted context and the background context. This
//! crate never talks to it directly; implementations of [`MessageChannel`] are
//! supplied by infrastructure crates (or by tests).

use async_trait::async_trait;
use serde_json::Value;

use crate::ChannelError;

/// Sends one message to the background context and awaits its single reply.
///
/// ## Contract
///
/// - Each call delivers the message at most once and resolves at most once.
/// - Implementations must not retry.
/// - No timeout is implied: if the background never replies and never closes
///   the port, the returned future never completes.
/// - A background that replies with nothing (JavaScript `undefined`) is
///   represented as [`Value::Null`].
#[async_trait]
pub trait MessageChannel: Send + Sync {
    /// Delivers `message` and returns the raw reply.
    async fn send_message(&self, message: Value) -> Result<Value, ChannelError>;
}
