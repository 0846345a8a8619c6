use log::*;
use payglocal_engine::{
    helpers::{lookup_path, validate_payload},
    GatewayError,
    GatewayOperation,
    GatewayRequest,
};
use serde_json::Value;

use crate::{config::ToolConfig, errors::ToolError, payload::read_json};

/// Accepted in place of `pause` or `activate`; the payload's `standingInstruction.action` picks between them.
pub const SI_ACTION: &str = "si-action";

pub fn resolve_operation(name: &str, payload: &Value) -> Result<GatewayOperation, GatewayError> {
    if !name.eq_ignore_ascii_case(SI_ACTION) {
        return name.parse();
    }
    let action = lookup_path(payload, "standingInstruction.action")
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::UnsupportedOperation("si-action without standingInstruction.action".into()))?;
    GatewayOperation::for_si_action(action)
}

pub fn print_envelope(config: &ToolConfig, op: &str, source: &str) -> Result<(), ToolError> {
    let payload = read_json(source)?;
    let operation = resolve_operation(op, &payload)?;
    let request = config.gateway_config()?.prepare(operation, &payload)?;
    print_request(operation, &request);
    Ok(())
}

pub fn print_status(config: &ToolConfig, gid: &str) -> Result<(), ToolError> {
    let request = config.gateway_config()?.prepare_status(gid)?;
    print_request(GatewayOperation::Status, &request);
    Ok(())
}

pub fn print_validation(op: &str, source: &str) -> Result<(), ToolError> {
    let payload = read_json(source)?;
    let operation = resolve_operation(op, &payload)?;
    println!("----------------------------- Validation -----------------------------");
    println!("Operation: {operation}");
    match validate_payload(&payload, &operation.validation_rules()) {
        Ok(()) => println!("The payload is valid"),
        Err(e) => {
            debug!("🧾️ Validation failed for {operation}: {e}");
            println!("{e}");
        },
    }
    println!("------------------------------------------------------------------------");
    Ok(())
}

fn print_request(operation: GatewayOperation, request: &GatewayRequest) {
    println!("----------------------------- Gateway Request -----------------------------");
    println!("Operation: {operation}");
    println!("{} {}", request.method, request.url);
    for (name, value) in &request.headers {
        println!("{name}: {value}");
    }
    if let Some(body) = &request.body {
        println!("\n{body}");
    }
    println!("------------------------------------------------------------------------");
}
