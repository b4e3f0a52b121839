//! The bridge client: performs API requests through the background context.
//!
//! A restricted context (content script, popup) cannot make arbitrary
//! cross-origin requests. [`BridgeClient`] turns an API call into a single
//! [`ApiRequestMessage`], hands it to the injected [`MessageChannel`], and
//! turns the one reply back into a `Result`.
//!
//! ## Failure mapping
//!
//! | Condition | Result |
//! |-----------|--------|
//! | Channel reports a delivery failure | [`BridgeError::Transport`] |
//! | Reply has a truthy `error` field | [`BridgeError::Application`] |
//! | Empty endpoint, send rejected, reply does not decode into `T` | [`BridgeError::Unexpected`] |
//!
//! Every failure is logged once at `error` level and returned. Nothing is
//! retried or cached, and concurrent calls share no state.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::{ApiRequestMessage, BridgeError, Endpoint, MessageChannel, RequestMethod};

// ---------------------------------------------------------------------------
// Request description
// ---------------------------------------------------------------------------

/// One logical API call, before it is turned into a wire message.
///
/// The method defaults to [`RequestMethod::Get`]. `body` and `params` are
/// opaque to the bridge and forwarded verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Endpoint path (e.g. `"/commute/durations"`). Must not be empty.
    pub endpoint: String,
    /// HTTP verb.
    pub method: RequestMethod,
    /// Request body, usually for mutating methods.
    pub body: Option<Value>,
    /// Query parameters, usually for `GET`.
    pub params: Option<Value>,
}

impl ApiRequest {
    /// Creates a `GET` request for `endpoint` with no payload.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: RequestMethod::default(),
            body: None,
            params: None,
        }
    }

    /// Sets the HTTP verb.
    pub fn with_method(mut self, method: RequestMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the request body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the request parameters.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Serialises `body` and sets it as the request body.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Unexpected`] if `body` cannot be represented as JSON.
    pub fn with_json_body<B: Serialize + ?Sized>(self, body: &B) -> Result<Self, BridgeError> {
        let value = serde_json::to_value(body)
            .map_err(|e| BridgeError::unexpected_from("Request body is not valid JSON", e))?;
        Ok(self.with_body(value))
    }

    /// Serialises `params` and sets them as the request parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Unexpected`] if `params` cannot be represented as JSON.
    pub fn with_json_params<P: Serialize + ?Sized>(self, params: &P) -> Result<Self, BridgeError> {
        let value = serde_json::to_value(params)
            .map_err(|e| BridgeError::unexpected_from("Request params are not valid JSON", e))?;
        Ok(self.with_params(value))
    }

    /// Builds the wire message for this request.
    fn into_message(self) -> Result<ApiRequestMessage, BridgeError> {
        let endpoint = Endpoint::new(self.endpoint)
            .ok_or_else(|| BridgeError::unexpected("Endpoint must not be empty"))?;
        Ok(ApiRequestMessage {
            body: self.body,
            params: self.params,
            ..ApiRequestMessage::new(endpoint, self.method)
        })
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Performs API requests by messaging the background context.
///
/// Cheap to clone; clones share the underlying channel.
#[derive(Clone)]
pub struct BridgeClient {
    channel: Arc<dyn MessageChannel>,
}

impl BridgeClient {
    /// Creates a client that sends every request over `channel`.
    pub fn new(channel: Arc<dyn MessageChannel>) -> Self {
        Self { channel }
    }

    /// Performs `request` and decodes the reply into `T`.
    ///
    /// No shape validation happens beyond what decoding into `T` requires;
    /// use [`BridgeClient::perform_request_raw`] to receive the reply untouched.
    ///
    /// # Errors
    ///
    /// See the module documentation for the failure mapping.
    #[tracing::instrument(
        name = "extension_fetch",
        skip_all,
        fields(endpoint = %request.endpoint, method = %request.method)
    )]
    pub async fn perform_request<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, BridgeError> {
        self.exchange(request)
            .await
            .and_then(|reply| {
                serde_json::from_value(reply).map_err(|e| {
                    BridgeError::unexpected_from(format!("Response could not be decoded: {e}"), e)
                })
            })
            .inspect_err(|e| error!(error = %e, "Extension API request failed"))
    }

    /// Performs `request` and returns the reply exactly as received.
    ///
    /// # Errors
    ///
    /// See the module documentation for the failure mapping.
    #[tracing::instrument(
        name = "extension_fetch",
        skip_all,
        fields(endpoint = %request.endpoint, method = %request.method)
    )]
    pub async fn perform_request_raw(&self, request: ApiRequest) -> Result<Value, BridgeError> {
        self.exchange(request)
            .await
            .inspect_err(|e| error!(error = %e, "Extension API request failed"))
    }

    /// Sends one message and classifies the one reply.
    async fn exchange(&self, request: ApiRequest) -> Result<Value, BridgeError> {
        let message = request.into_message()?;
        let message = serde_json::to_value(&message)
            .map_err(|e| BridgeError::unexpected_from("Request could not be serialised", e))?;

        let reply = self.channel.send_message(message).await?;
        debug!("Reply received from background context");

        match reply_error(&reply) {
            Some(message) => Err(BridgeError::Application { message }),
            None => Ok(reply),
        }
    }
}

impl std::fmt::Debug for BridgeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeClient").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Reply classification
// ---------------------------------------------------------------------------

/// Returns the failure message if `reply` carries a truthy `error` field.
///
/// Only object replies can carry one. A string error is used as-is; any other
/// truthy value is rendered as JSON text.
pub(crate) fn reply_error(reply: &Value) -> Option<String> {
    let error = reply.get("error").filter(|v| is_truthy(v))?;
    Some(match error {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// JavaScript truthiness for a JSON value.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
