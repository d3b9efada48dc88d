//! Core logic of the `mapgl-document` and `mapgl-inspect` binaries.

use crate::channel::Outbox;
use crate::config::BridgeConfig;
use crate::document::WebContent;
use crate::error::BridgeError;
use crate::events::{route, MapCallbacks, Route};
use crate::session::MapSession;
use mapgl_protocol::RawCommand;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug)]
pub enum CliError {
    Bridge(BridgeError),
    Io(std::io::Error),
    Usage(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Bridge(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Usage(e) => write!(f, "usage: {e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<BridgeError> for CliError {
    fn from(e: BridgeError) -> Self {
        CliError::Bridge(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Logs to stderr, filtered by `RUST_LOG` (default `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Loads the config at `path` (defaults when `None`) with environment
/// overrides applied.
pub fn load_config(path: Option<&Path>) -> Result<BridgeConfig, CliError> {
    let mut config = match path {
        Some(path) => BridgeConfig::from_path(path)?,
        None => BridgeConfig::default(),
    };
    config.apply_env_overrides();
    Ok(config)
}

/// Renders the bootstrap document. The SDK is inlined from `sdk_path` when
/// given, otherwise the page loads it from `config.sdk_url`.
pub fn render_document(config: &BridgeConfig, sdk_path: Option<&Path>) -> Result<String, CliError> {
    let sdk_script = match sdk_path {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::new(),
    };
    Ok(WebContent::from_config(config, sdk_script).render())
}

/// The `init` command a session built from `config` sends on load end.
pub fn init_message(config: &BridgeConfig) -> Result<String, CliError> {
    let outbox = Outbox::new();
    let mut session = MapSession::from_config(config, outbox.clone(), MapCallbacks::new());
    session.on_load_end()?;
    outbox
        .pop()
        .ok_or_else(|| CliError::Usage("session produced no init command".to_string()))
}

/// One-line description of how a wire message would be handled.
pub fn inspect_line(line: &str) -> String {
    if let Ok(raw) = RawCommand::parse(line) {
        let function = raw.function.clone();
        let params = raw.params.to_string();
        return match raw.into_command() {
            Ok(_) => format!("command {function} {params}"),
            Err(e) => format!("invalid command: {e}"),
        };
    }
    match route(line) {
        Route::Inited => "event inited".to_string(),
        Route::MapEvent { kind, .. } => {
            format!("event mapEvent {} -> {}", kind.name(), kind.callback_name())
        }
        Route::Press { unique_id } => format!("event markerClick {unique_id}"),
        Route::Error(data) => format!("event error {}: {}", data.target, data.message),
        Route::Dropped { reason } => format!("dropped: {reason}"),
    }
}
