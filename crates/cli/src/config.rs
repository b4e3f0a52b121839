//! Command-line arguments, the routes file, and logging setup.

use std::path::{Path, PathBuf};

use anyhow::Context;
use bridge::{ApiRequest, Endpoint, RequestMethod};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Perform one API request through the extension bridge.
#[derive(Debug, Parser)]
#[command(name = "bridge-cli", version)]
pub struct CliArgs {
    /// Endpoint path to request (e.g. `/commute/durations`).
    pub endpoint: String,

    /// HTTP verb.
    #[arg(short, long, default_value_t = RequestMethod::Get)]
    pub method: RequestMethod,

    /// Request body as JSON.
    #[arg(long, value_parser = parse_json)]
    pub body: Option<Value>,

    /// Request parameters as JSON.
    #[arg(long, value_parser = parse_json)]
    pub params: Option<Value>,

    /// TOML file describing the background dispatcher's replies.
    #[arg(short, long)]
    pub routes: PathBuf,

    /// Log level or filter directive; overrides the routes file.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log output format; overrides the routes file.
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl CliArgs {
    /// Builds the bridge request described by the arguments.
    pub fn to_request(&self) -> ApiRequest {
        let mut request = ApiRequest::new(self.endpoint.clone()).with_method(self.method);
        request.body = self.body.clone();
        request.params = self.params.clone();
        request
    }
}

fn parse_json(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw)
}

// ---------------------------------------------------------------------------
// Routes file
// ---------------------------------------------------------------------------

/// Contents of the routes file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutesFile {
    /// Logging defaults.
    pub logging: LoggingConfig,
    /// Canned replies, matched in order.
    pub routes: Vec<Route>,
}

impl RoutesFile {
    /// Reads and parses a routes file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read routes file: {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parse routes file: {}", path.display()))
    }

    /// Parses routes file contents.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// One canned reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Route {
    /// Endpoint this route answers.
    pub endpoint: Endpoint,
    /// Verb this route answers.
    #[serde(default)]
    pub method: RequestMethod,
    /// Reply sent back. Without one the port closes unanswered.
    #[serde(default)]
    pub reply: Option<Value>,
}

impl Route {
    /// Returns `true` if this route answers `method` on `endpoint`.
    pub fn matches(&self, method: RequestMethod, endpoint: &Endpoint) -> bool {
        self.method == method && &self.endpoint == endpoint
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or `EnvFilter` directive. `RUST_LOG` takes precedence.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Applies command-line overrides.
    pub fn apply_overrides(&mut self, args: &CliArgs) {
        if let Some(level) = &args.log_level {
            self.level = level.clone();
        }
        if let Some(format) = args.log_format {
            self.format = format;
        }
    }
}

/// Installs the global tracing subscriber. Output goes to stderr so stdout
/// carries only the reply.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("invalid log level: {}", config.level))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_target(true).with_writer(std::io::stderr))
            .try_init(),
    };
    installed.context("install tracing subscriber")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
