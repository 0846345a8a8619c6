//! # Gateway requests
//!
//! Everything between "I have a payload" and "I have an HTTP request to send". A [`GatewayConfig`] holds the merchant's
//! identity and keys; [`GatewayConfig::prepare`] validates a payload for a [`GatewayOperation`], builds the token
//! envelope and returns a [`GatewayRequest`] describing the method, URL, body and headers. Sending it is up to the
//! caller.
//!
//! The [`callback`] module handles the other direction: the token the gateway posts back to the merchant.
pub mod callback;
mod config;
mod environment;
mod errors;
mod operations;
mod request;

pub use callback::{CallbackError, CallbackToken, SUCCESS_STATUS};
pub use config::GatewayConfig;
pub use environment::{GatewayEnvironment, PROD_BASE_URL, UAT_BASE_URL};
pub use errors::GatewayError;
pub use operations::{GatewayOperation, HttpMethod};
pub use request::{GatewayRequest, CONTENT_TYPE_HEADER, TOKEN_CONTENT_TYPE, TOKEN_HEADER};
