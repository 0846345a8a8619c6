use payglocal_engine::CallbackToken;

use crate::errors::ToolError;

pub fn print_callback(token: &str, success_url: &str, failure_url: &str) -> Result<(), ToolError> {
    let callback = CallbackToken::decode(token)?;
    let redirect = callback.redirect_url(success_url, failure_url)?;
    println!("----------------------------- Callback -----------------------------");
    println!("Status        : {}", callback.status.as_deref().unwrap_or("(none)"));
    println!("merchantTxnId : {}", callback.merchant_txn_id.as_deref().unwrap_or("(none)"));
    println!("gid           : {}", callback.gid.as_deref().unwrap_or("(none)"));
    println!("Outcome       : {}", if callback.is_success() { "success" } else { "failure" });
    println!("Redirect to   : {redirect}");
    println!("------------------------------------------------------------------------");
    Ok(())
}
