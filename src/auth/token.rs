//! Session token generation and keyed hashing.
//!
//! Raw session tokens are handed to the browser once and never stored; the
//! database keeps `HMAC-SHA256(secret, token)`. Passwords use the same primitive
//! with a per-user random salt.

use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Random bytes in a session token before base64 encoding.
const TOKEN_LENGTH_BYTES: usize = 32;

/// Random bytes in a password salt.
const SALT_LENGTH_BYTES: usize = 16;

fn random_bytes<const N: usize>() -> Result<[u8; N], AppError> {
    let mut buffer = [0u8; N];
    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal(
            "Failed to generate random bytes",
            json!({ "reason": e.to_string() }),
        )
    })?;
    Ok(buffer)
}

fn keyed_mac(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length")
}

/// Generates a session token: 32 random bytes, URL-safe base64 without padding.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system RNG fails.
pub fn generate_session_token() -> Result<String, AppError> {
    let buffer = random_bytes::<TOKEN_LENGTH_BYTES>()?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Hashes a raw token with HMAC-SHA256. Returns 64 lowercase hex characters.
pub fn hash_token(secret: &str, token: &str) -> String {
    let mut mac = keyed_mac(secret);
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Hashes a password with a fresh random salt.
///
/// Output format: `<salt-hex>$<mac-hex>`.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system RNG fails.
pub fn hash_password(secret: &str, password: &str) -> Result<String, AppError> {
    let salt = random_bytes::<SALT_LENGTH_BYTES>()?;
    Ok(hash_password_with_salt(secret, password, &salt))
}

fn hash_password_with_salt(secret: &str, password: &str, salt: &[u8]) -> String {
    let mut mac = keyed_mac(secret);
    mac.update(salt);
    mac.update(password.as_bytes());
    format!(
        "{}${}",
        hex::encode(salt),
        hex::encode(mac.finalize().into_bytes())
    )
}

/// Checks `password` against a stored `<salt-hex>$<mac-hex>` hash.
///
/// Malformed stored hashes never verify. The MAC comparison is constant-time.
pub fn verify_password(secret: &str, password: &str, stored: &str) -> bool {
    let Some((salt_hex, mac_hex)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(mac_hex)) else {
        return false;
    };

    let mut mac = keyed_mac(secret);
    mac.update(&salt);
    mac.update(password.as_bytes());
    mac.verify_slice(&expected).is_ok()
}
