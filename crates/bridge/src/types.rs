//! Envelope and response value types exchanged across the bridge.
//!
//! The request side is fixed: every call produces one [`ApiRequestMessage`].
//! The response side is generic over the payload type so the same client can
//! serve endpoints with unrelated response shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::Endpoint;

// ---------------------------------------------------------------------------
// Request side
// ---------------------------------------------------------------------------

/// HTTP verb the background dispatcher should use for the request.
///
/// Serialised in uppercase (`"GET"`, `"POST"`, ...). Defaults to [`RequestMethod::Get`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    /// Read; payload travels as `params` (query parameters).
    #[default]
    Get,
    /// Create; payload travels as `body`.
    Post,
    /// Replace; payload travels as `body`.
    Put,
    /// Partial update; payload travels as `body`.
    Patch,
    /// Remove.
    Delete,
}

impl RequestMethod {
    /// Returns the canonical uppercase verb.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a supported [`RequestMethod`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported request method: {0}")]
pub struct ParseRequestMethodError(String);

impl std::str::FromStr for RequestMethod {
    type Err = ParseRequestMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            _ => Err(ParseRequestMethodError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------

/// Discriminant placed in the `type` field of every outbound message.
///
/// The background dispatcher uses it to tell API requests apart from any
/// other traffic on the same channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// An API request to be performed by the background context.
    #[default]
    #[serde(rename = "API_REQUEST")]
    ApiRequest,
}

/// The wire message sent to the background context for one API call.
///
/// `body` and `params` are forwarded exactly as supplied. Both may be present;
/// which one is meaningful depends on `method`, and that decision belongs to
/// the dispatcher. An absent payload is omitted from the serialised object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequestMessage {
    /// Always [`MessageKind::ApiRequest`].
    #[serde(rename = "type")]
    pub kind: MessageKind,

    /// Endpoint path to call.
    pub endpoint: Endpoint,

    /// HTTP verb.
    pub method: RequestMethod,

    /// Request body for mutating methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    /// Query parameters for read methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl ApiRequestMessage {
    /// Creates an API request message with no payload.
    pub fn new(endpoint: Endpoint, method: RequestMethod) -> Self {
        Self {
            kind: MessageKind::ApiRequest,
            endpoint,
            method,
            body: None,
            params: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Response side
// ---------------------------------------------------------------------------

/// Generic response envelope produced by the background dispatcher.
///
/// Exactly one of `data` and `error` is expected to be non-null. The client
/// never requires this shape: it only checks the raw reply for a truthy
/// `error` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Successful payload, `null` on failure.
    pub data: Option<T>,

    /// Human-readable failure description, `null` on success.
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Builds a success envelope.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Builds a failure envelope.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    /// Converts the envelope into a `Result`, treating any `error` as a failure.
    ///
    /// `data` may legitimately be `None` on success (e.g. a `DELETE` with no
    /// body), hence the `Option`.
    pub fn into_result(self) -> Result<Option<T>, String> {
        match self.error {
            Some(message) => Err(message),
            None => Ok(self.data),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain response shapes
// ---------------------------------------------------------------------------

/// Status tag carried by domain responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The external API produced a payload.
    Success,
    /// The external API failed; `message` usually explains why.
    Error,
}

/// A domain response passed through from the external API unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainResponse<P> {
    /// Outcome reported by the external API.
    pub status: ResponseStatus,

    /// Endpoint-specific data.
    pub payload: P,

    /// Optional explanation, usually present when `status` is `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<P> DomainResponse<P> {
    /// Returns `true` when the external API reported success.
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

/// Travel duration information for one address.
///
/// Only `address` is interpreted here, and only when present; every other
/// field is kept verbatim because its shape is owned by the commute API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressDuration {
    /// The destination address the durations were computed for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Remaining fields (durations per travel mode, etc.).
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// Payload of the commute durations endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommutePayload {
    /// One entry per requested address, in the order the API returned them.
    pub address_durations: Vec<AddressDuration>,
}

/// Response of the `/commute/durations` endpoint.
pub type CommuteResponse = DomainResponse<CommutePayload>;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
