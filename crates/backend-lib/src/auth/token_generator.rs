//! Opaque session tokens handed to browsers in the session cookie.
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;

/// 256 bits from the thread-local CSPRNG
const SESSION_TOKEN_BYTES: usize = 32;

/// New session token, cookie-safe without any further encoding
pub fn generate_secure_token() -> String {
    let mut buffer = [0u8; SESSION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut buffer);
    URL_SAFE_NO_PAD.encode(buffer)
}
