//! Core domain for the extension bridge.
//!
//! A browser extension's restricted contexts (content scripts, popup UI) cannot
//! perform arbitrary cross-origin requests. They instead ask the background
//! context to perform the request on their behalf. This crate contains the
//! request/response envelopes for that exchange, the error taxonomy, the
//! [`MessageChannel`] port through which messages travel, and the
//! [`BridgeClient`] that ties them together.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies. It
//! defines *what* a message channel must do; infrastructure crates (such as
//! `runtime-channel`) define *how*.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | The [`Endpoint`] newtype |
//! | [`types`] | Request/response envelopes and domain response shapes |
//! | [`errors`] | [`BridgeError`] and [`ChannelError`] |
//! | [`channel`] | The [`MessageChannel`] port trait |
//! | [`client`] | [`BridgeClient`] and [`ApiRequest`] |

pub mod channel;
pub mod client;
pub mod errors;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use channel::MessageChannel;
pub use client::{ApiRequest, BridgeClient};
pub use errors::{BridgeError, ChannelError};
pub use identifiers::Endpoint;
pub use types::{
    AddressDuration, ApiRequestMessage, ApiResponse, CommutePayload, CommuteResponse,
    DomainResponse, MessageKind, ParseRequestMethodError, RequestMethod, ResponseStatus,
};
