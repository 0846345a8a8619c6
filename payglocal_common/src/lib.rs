//! Small utilities shared by the PayGlocal crates: a [`Secret`] wrapper for key material and a few helpers for
//! tidying up configuration values before they reach the envelope builder.
mod helpers;
mod secret;

pub use helpers::{normalize_pem, parse_boolean_flag, PemError};
pub use secret::Secret;
