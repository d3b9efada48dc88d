use mapgl_protocol::{Function, ProtocolError};
use thiserror::Error;

/// Failure reported by the embedded map SDK while executing a call.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct SdkError(pub String);

impl SdkError {
    pub fn new(message: impl Into<String>) -> Self {
        SdkError(message.into())
    }
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("session is closed")]
    SessionClosed,

    #[error("map is not created; cannot run \"{0}\"")]
    MapNotCreated(Function),

    #[error("map is already created")]
    MapAlreadyCreated,

    #[error(transparent)]
    Sdk(#[from] SdkError),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::Protocol(ProtocolError::from(e))
    }
}
