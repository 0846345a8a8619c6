//! The gateway's response shape varies by operation, API version and SDK, so rather than deserializing into a fixed
//! type we try a short, ordered list of lookup paths and take the first one that holds a value.
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::helpers::lookup_path;

const PAYMENT_LINK_PATHS: [&str; 8] = [
    "data.redirectUrl",
    "data.redirect_url",
    "data.payment_link",
    "redirectUrl",
    "redirect_url",
    "payment_link",
    "data.paymentLink",
    "paymentLink",
];
const GID_PATHS: [&str; 4] = ["gid", "data.gid", "transactionId", "data.transactionId"];
const STATUS_PATHS: [&str; 2] = ["status", "data.status"];
const CAPTURE_ID_PATHS: [&str; 2] = ["captureId", "data.captureId"];
const ERROR_STATUSES: [&str; 2] = ["REQUEST_ERROR", "ERROR"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    #[error("Gateway error: {0}")]
    GatewayError(String),
}

/// The merchant-facing reshaping of a successful gateway response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_id: Option<String>,
    pub raw_response: Value,
}

impl MerchantResponse {
    pub fn from_gateway(response: &Value) -> Result<Self, ResponseError> {
        if let Some(message) = gateway_error_message(response) {
            warn!("🧾️ Gateway reported an error: {message}");
            return Err(ResponseError::GatewayError(message));
        }
        let payment_link = extract_payment_link(response);
        let gid = extract_gid(response);
        if payment_link.is_none() && gid.is_none() {
            debug!("🧾️ Gateway response has neither a payment link nor a gid");
        }
        Ok(Self {
            status: "SUCCESS".to_string(),
            message: "Payment initiated successfully".to_string(),
            payment_link,
            gid,
            capture_id: extract_capture_id(response),
            raw_response: response.clone(),
        })
    }
}

pub fn extract_payment_link(response: &Value) -> Option<String> {
    first_match(response, &PAYMENT_LINK_PATHS)
}

pub fn extract_gid(response: &Value) -> Option<String> {
    first_match(response, &GID_PATHS)
}

pub fn extract_status(response: &Value) -> Option<String> {
    first_match(response, &STATUS_PATHS)
}

pub fn extract_capture_id(response: &Value) -> Option<String> {
    first_match(response, &CAPTURE_ID_PATHS)
}

/// Empty strings, `null`, `false` and zero are skipped, the same way a chain of `||` fallbacks would skip them.
fn first_match(response: &Value, paths: &[&str]) -> Option<String> {
    paths.iter().filter_map(|path| lookup_path(response, path)).find_map(|v| match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    })
}

fn gateway_error_message(response: &Value) -> Option<String> {
    let status_is_error = response
        .get("status")
        .and_then(Value::as_str)
        .is_some_and(|s| ERROR_STATUSES.contains(&s));
    let error = response.get("error").filter(|e| !e.is_null());
    if !status_is_error && error.is_none() {
        return None;
    }
    let message = response
        .get("message")
        .and_then(Value::as_str)
        .map(String::from)
        .or_else(|| error.map(|e| e.as_str().map(String::from).unwrap_or_else(|| e.to_string())))
        .unwrap_or_else(|| "Unknown error".to_string());
    Some(message)
}
