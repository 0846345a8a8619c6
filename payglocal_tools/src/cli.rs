use std::{env, env::VarError};

// Only variables that never hold key material
const DISPLAY_ENVS: [&str; 9] = [
    "RUST_LOG",
    "PAYGLOCAL_MERCHANT_ID",
    "PAYGLOCAL_PUBLIC_KEY_ID",
    "PAYGLOCAL_PRIVATE_KEY_ID",
    "PAYGLOCAL_PUBLIC_KEY",
    "PAYGLOCAL_ENV",
    "PAYGLOCAL_BASE_URL",
    "PAYGLOCAL_TOKEN_EXPIRATION",
    "PAYGLOCAL_VALIDATE_PAYLOAD",
];

const SECRET_ENVS: [&str; 3] = ["PAYGLOCAL_PRIVATE_KEY", "PAYGLOCAL_PRIVATE_KEY_CONTENT", "PAYGLOCAL_PUBLIC_KEY_CONTENT"];

pub fn display_envs() {
    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    });
    SECRET_ENVS.iter().for_each(|&name| {
        let val = if env::var_os(name).is_some() { "Set" } else { "Not set" };
        println!("  {name:<35} {val:<15}");
    });
}
