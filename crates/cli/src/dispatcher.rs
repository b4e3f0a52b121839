//! A background dispatcher that answers from the routes file.

use async_trait::async_trait;
use bridge::ApiRequestMessage;
use runtime_channel::MessageHandler;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::config::Route;

/// Answers API request messages with canned replies.
///
/// The first route matching the request's method and endpoint wins. Requests
/// with no matching route get a failure envelope; messages that are not API
/// requests are left unanswered.
#[derive(Debug, Clone, Default)]
pub struct FixtureDispatcher {
    routes: Vec<Route>,
}

impl FixtureDispatcher {
    /// Creates a dispatcher answering from `routes`, first match wins.
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }
}

#[async_trait]
impl MessageHandler for FixtureDispatcher {
    async fn handle(&self, message: Value) -> Option<Value> {
        let request: ApiRequestMessage = match serde_json::from_value(message) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Ignoring message that is not an API request");
                return None;
            }
        };

        let Some(route) = self
            .routes
            .iter()
            .find(|r| r.matches(request.method, &request.endpoint))
        else {
            warn!(endpoint = %request.endpoint, method = %request.method, "No route matched");
            return Some(json!({
                "data": null,
                "error": format!("No route for {} {}", request.method, request.endpoint),
            }));
        };

        info!(
            endpoint = %request.endpoint,
            method = %request.method,
            replies = route.reply.is_some(),
            "Route matched"
        );
        route.reply.clone()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
