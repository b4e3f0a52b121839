//! Newtype identifiers.
//!
//! An [`Endpoint`] is the only identity carried across the bridge. It wraps a
//! `String` so an arbitrary string can never be mistaken for a validated API
//! path.

use serde::{Deserialize, Serialize};

/// An API endpoint path as understood by the background dispatcher
/// (e.g. `"/commute/durations"`).
///
/// Never empty. No other shape is enforced; the dispatcher owns routing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint(String);

impl Endpoint {
    /// Creates a new endpoint, returning `None` if the value is empty.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the endpoint as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Endpoint {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("endpoint must not be empty")
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.0
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
