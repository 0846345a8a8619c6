use payglocal_engine::{gateway::CallbackError, helpers::ResponseError, EnvelopeError, GatewayError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid configuration. {0}")]
    ConfigurationError(String),
    #[error("Could not read {0}. {1}")]
    ReadError(String, std::io::Error),
    #[error("The input is not valid JSON. {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error(transparent)]
    GatewayError(#[from] GatewayError),
    #[error(transparent)]
    EnvelopeError(#[from] EnvelopeError),
    #[error(transparent)]
    CallbackError(#[from] CallbackError),
    #[error(transparent)]
    ResponseError(#[from] ResponseError),
}
