use payglocal_engine::envelope::{decode_protected_header, decode_unverified_digest, segment_count};

use crate::errors::ToolError;

/// Show what is inside a token. Nothing is decrypted or verified.
pub fn print_token_info(token: &str) -> Result<(), ToolError> {
    let token = token.trim();
    let header = decode_protected_header(token)?;
    let is_jwe = segment_count(token) == 5;
    println!("----------------------------- Token -----------------------------");
    println!("Type: {}", if is_jwe { "encrypted token (JWE)" } else { "signed token (JWS)" });
    println!("Header:");
    for (k, v) in &header {
        println!("  {k:<20} {v}");
    }
    if !is_jwe {
        match decode_unverified_digest(token) {
            Ok(digest) => {
                println!("Digest (unverified):");
                println!("  {:<20} {}", "digest", digest.digest);
                println!("  {:<20} {}", "digestAlgorithm", digest.digest_algorithm);
                println!("  {:<20} {}", "iat", digest.iat);
                println!("  {:<20} {}", "exp", digest.exp);
            },
            Err(e) => println!("{e}"),
        }
    }
    println!("------------------------------------------------------------------------");
    Ok(())
}
