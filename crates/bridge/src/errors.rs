//! Error types for the extension bridge.
//!
//! [`BridgeError`] is what callers of [`crate::BridgeClient`] see. Its three
//! variants separate failures of the message channel itself, failures
//! reported by the background dispatcher, and everything else.
//!
//! [`ChannelError`] is what [`crate::MessageChannel`] implementations produce;
//! the client maps it onto [`BridgeError`].
//!
//! None of these errors is retried by the bridge.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ---------------------------------------------------------------------------
// Client-facing errors
// ---------------------------------------------------------------------------

/// Errors returned by [`crate::BridgeClient`].
///
/// `Display` renders exactly the carried message so callers can surface it
/// without further formatting.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The message channel failed: the receiving context does not exist, the
    /// extension was reloaded, or the port closed before a reply arrived.
    ///
    /// The message is the one reported by the host platform.
    #[error("{message}")]
    Transport {
        /// Platform-reported failure message.
        message: String,
    },

    /// The background dispatcher replied with a truthy `error` field.
    #[error("{message}")]
    Application {
        /// The dispatcher's error field, as text.
        message: String,
    },

    /// Any other failure while building, sending, or decoding the request.
    #[error("{message}")]
    Unexpected {
        /// Description of what went wrong.
        message: String,
        /// Underlying cause, when one exists.
        #[source]
        source: Option<BoxError>,
    },
}

impl BridgeError {
    /// Creates an [`BridgeError::Unexpected`] with no underlying cause.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an [`BridgeError::Unexpected`] wrapping `source`.
    pub fn unexpected_from<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Unexpected {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the carried message.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message }
            | Self::Application { message }
            | Self::Unexpected { message, .. } => message,
        }
    }

    /// Returns `true` for [`BridgeError::Transport`].
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns `true` for [`BridgeError::Application`].
    pub fn is_application(&self) -> bool {
        matches!(self, Self::Application { .. })
    }
}

// ---------------------------------------------------------------------------
// Channel errors
// ---------------------------------------------------------------------------

/// Errors produced by a [`crate::MessageChannel`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The channel reported a delivery failure (no receiver, port closed).
    #[error("{message}")]
    Transport {
        /// Platform-reported failure message.
        message: String,
    },

    /// The message could not be handed to the channel at all, e.g. because
    /// the platform rejected it synchronously.
    #[error("{message}")]
    Send {
        /// Description of the rejection.
        message: String,
    },
}

impl ChannelError {
    /// Creates a [`ChannelError::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a [`ChannelError::Send`].
    pub fn send(message: impl Into<String>) -> Self {
        Self::Send {
            message: message.into(),
        }
    }
}

impl From<ChannelError> for BridgeError {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::Transport { message } => Self::Transport { message },
            send @ ChannelError::Send { .. } => Self::unexpected_from(send.to_string(), send),
        }
    }
}
