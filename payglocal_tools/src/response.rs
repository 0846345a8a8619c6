use payglocal_engine::helpers::{extract_status, MerchantResponse};

use crate::{errors::ToolError, payload::read_json};

/// Reshape a saved gateway response the way a merchant backend would hand it to its frontend.
pub fn print_merchant_response(source: &str) -> Result<(), ToolError> {
    let response = read_json(source)?;
    let status = extract_status(&response);
    let merchant = MerchantResponse::from_gateway(&response)?;
    println!("----------------------------- Gateway Response -----------------------------");
    println!("Gateway status: {}", status.as_deref().unwrap_or("(none)"));
    println!("{}", serde_json::to_string_pretty(&merchant)?);
    println!("------------------------------------------------------------------------");
    Ok(())
}
