//! In-process runtime message channel.
//!
//! Implements the [`bridge::MessageChannel`] trait with the same delivery
//! semantics as a browser extension's runtime messaging: every message gets
//! its own one-shot reply slot, the background side replies at most once, and
//! delivery failures surface with the platform's own error messages.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Queueing, reply slots, and task spawning live here. The
//! [`bridge`] crate sees only [`bridge::MessageChannel`].
//!
//! ## Halves
//!
//! | Half | Owner | Role |
//! |------|-------|------|
//! | [`RuntimeChannel`] | restricted context | sends messages, awaits replies |
//! | [`BackgroundPort`] | background dispatcher | receives messages, replies via [`Responder`] |
//!
//! ## Failure Semantics
//!
//! - Port dropped before the send: [`NO_RECEIVER_MESSAGE`].
//! - Message dropped without a reply: [`PORT_CLOSED_MESSAGE`].
//!
//! Sending never waits: messages are queued without bound until the port
//! receives them. The only suspension point is waiting for the reply, and no
//! timeout is applied to it. A message that is received but neither answered
//! nor dropped keeps its sender waiting.

use std::sync::Arc;

use async_trait::async_trait;
use bridge::{ChannelError, MessageChannel};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

/// Reported when no background port is listening.
pub const NO_RECEIVER_MESSAGE: &str =
    "Could not establish connection. Receiving end does not exist.";

/// Reported when the background side drops a message without replying,
/// including messages still queued when the port itself is dropped.
pub const PORT_CLOSED_MESSAGE: &str = "The message port closed before a response was received.";

/// Creates a connected channel pair.
pub fn runtime_channel() -> (RuntimeChannel, BackgroundPort) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (RuntimeChannel { sender }, BackgroundPort { receiver })
}

/// A message in flight together with its reply slot.
#[derive(Debug)]
struct Delivery {
    message: Value,
    reply: oneshot::Sender<Value>,
}

// ---------------------------------------------------------------------------
// Sending half
// ---------------------------------------------------------------------------

/// The sending half, used by the restricted context.
///
/// Clones share the same background port.
#[derive(Debug, Clone)]
pub struct RuntimeChannel {
    sender: mpsc::UnboundedSender<Delivery>,
}

impl RuntimeChannel {
    /// Returns `false` once the background port has been dropped.
    pub fn is_connected(&self) -> bool {
        !self.sender.is_closed()
    }
}

#[async_trait]
impl MessageChannel for RuntimeChannel {
    async fn send_message(&self, message: Value) -> Result<Value, ChannelError> {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(Delivery { message, reply })
            .map_err(|_| ChannelError::transport(NO_RECEIVER_MESSAGE))?;
        debug!("Message queued for background port");

        response
            .await
            .map_err(|_| ChannelError::transport(PORT_CLOSED_MESSAGE))
    }
}

// ---------------------------------------------------------------------------
// Receiving half
// ---------------------------------------------------------------------------

/// A received message and the means to answer it.
#[derive(Debug)]
pub struct IncomingMessage {
    /// The message exactly as sent.
    pub message: Value,
    /// Single-use reply handle. Dropping it closes the port for this message.
    pub responder: Responder,
}

/// Answers exactly one message.
#[derive(Debug)]
pub struct Responder {
    reply: oneshot::Sender<Value>,
}

impl Responder {
    /// Sends `reply` to the waiting caller.
    ///
    /// Returns `false` if the caller has already gone away; the reply is then
    /// discarded.
    pub fn respond(self, reply: Value) -> bool {
        let delivered = self.reply.send(reply).is_ok();
        if !delivered {
            debug!("Caller no longer waiting; reply discarded");
        }
        delivered
    }

    /// Returns `true` while the caller is still waiting for a reply.
    pub fn is_waiting(&self) -> bool {
        !self.reply.is_closed()
    }
}

/// Handles messages arriving at a [`BackgroundPort`].
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// Produces the reply for `message`, or `None` to close the port without
    /// replying.
    async fn handle(&self, message: Value) -> Option<Value>;
}

/// The receiving half, owned by the background dispatcher.
#[derive(Debug)]
pub struct BackgroundPort {
    receiver: mpsc::UnboundedReceiver<Delivery>,
}

impl BackgroundPort {
    /// Waits for the next message.
    ///
    /// Returns `None` once every [`RuntimeChannel`] clone has been dropped and
    /// the queue is drained.
    pub async fn recv(&mut self) -> Option<IncomingMessage> {
        let Delivery { message, reply } = self.receiver.recv().await?;
        Some(IncomingMessage {
            message,
            responder: Responder { reply },
        })
    }

    /// Runs `handler` for every incoming message until all senders are gone.
    ///
    /// Each message is handled on its own task, so replies may complete in any
    /// order.
    pub async fn serve<H>(mut self, handler: Arc<H>)
    where
        H: MessageHandler + ?Sized + 'static,
    {
        while let Some(IncomingMessage { message, responder }) = self.recv().await {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                match handler.handle(message).await {
                    Some(reply) => {
                        responder.respond(reply);
                    }
                    None => debug!("Handler produced no reply; closing port"),
                }
            });
        }
        debug!("All senders dropped; background port stopped");
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
