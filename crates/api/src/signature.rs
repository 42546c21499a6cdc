//! Webhook payload signature verification.
//!
//! The platform signs each delivery body with HMAC-SHA256 using the app
//! secret and sends the hex digest in `X-Hub-Signature-256` as
//! `sha256=<hex>`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the payload signature.
pub const SIGNATURE_HEADER: &str = "x-hub-signature-256";

const SIGNATURE_PREFIX: &str = "sha256=";

fn mac_for(secret: &str, body: &[u8]) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(body);
    mac
}

/// Compute the expected header value (`sha256=<hex>`) for a body.
pub fn signature_for(secret: &str, body: &[u8]) -> String {
    let digest = mac_for(secret, body).finalize().into_bytes();
    format!("{SIGNATURE_PREFIX}{}", hex::encode(digest))
}

/// Check a presented `X-Hub-Signature-256` value against the body.
///
/// The digest comparison goes through [`Mac::verify_slice`], which is
/// constant-time. Hex case in the presented value is irrelevant after
/// decoding.
pub fn verify(secret: &str, body: &[u8], presented: &str) -> bool {
    let Some(hex_digest) = presented.strip_prefix(SIGNATURE_PREFIX) else {
        return false;
    };
    let Ok(digest) = hex::decode(hex_digest) else {
        return false;
    };
    mac_for(secret, body).verify_slice(&digest).is_ok()
}
