//! Extension bridge CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: command-line arguments plus the routes file
//!    given by `--routes`.
//! 2. **Wire observability**: install a `tracing-subscriber` layer (pretty or
//!    JSON) on stderr. Spans and events from every crate flow through it.
//! 3. **Construct infrastructure**: create a runtime channel pair, serve the
//!    background half with a [`dispatcher::FixtureDispatcher`], and hand the
//!    other half to a [`bridge::BridgeClient`].
//! 4. **Perform one request**: print the raw reply as JSON on stdout, or exit
//!    with the bridge error.

mod config;
mod dispatcher;

use std::sync::Arc;

use anyhow::Context;
use bridge::BridgeClient;
use clap::Parser;
use runtime_channel::runtime_channel;
use tracing::info;

use crate::config::{init_tracing, CliArgs, RoutesFile};
use crate::dispatcher::FixtureDispatcher;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut routes_file = RoutesFile::load(&args.routes)?;
    routes_file.logging.apply_overrides(&args);
    init_tracing(&routes_file.logging)?;

    info!(
        path = %args.routes.display(),
        routes = routes_file.routes.len(),
        "Routes loaded"
    );

    let (channel, port) = runtime_channel();
    let background = tokio::spawn(port.serve(Arc::new(FixtureDispatcher::new(
        routes_file.routes,
    ))));

    let client = BridgeClient::new(Arc::new(channel));
    let result = client.perform_request_raw(args.to_request()).await;

    // Dropping the only sender lets the background port drain and stop.
    drop(client);
    background
        .await
        .context("background dispatcher task failed")?;

    let reply = result?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}
