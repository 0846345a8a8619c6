use thiserror::Error;

use crate::{envelope::EnvelopeError, helpers::ValidationError};

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Could not build the request envelope. {0}")]
    EnvelopeError(#[from] EnvelopeError),
    #[error("Invalid request payload. {0}")]
    ValidationError(#[from] ValidationError),
    #[error("The {0} operation needs a gid, but the payload does not contain one")]
    MissingGid(String),
    #[error("Invalid gid. {0}")]
    InvalidGid(String),
    #[error("Invalid gateway environment. {0}")]
    InvalidEnvironment(String),
    #[error("Unknown gateway operation: {0}")]
    UnsupportedOperation(String),
}
