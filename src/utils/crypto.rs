// src/utils/crypto.rs
//! Placeholder "signature" material for unsigned documents.
//!
//! Nothing in this crate holds a private key. The values produced here only
//! mimic the shape of a detached JWS so that front-ends expecting a `proof`
//! block have something to render. They must never be verified.

/// Base64url JOSE header of a detached ES256K JWS (`{"alg":"ES256K","b64":false,"crit":["b64"]}`).
pub const DETACHED_ES256K_HEADER: &str = "eyJhbGciOiJFUzI1NksiLCJiNjQiOmZhbHNlLCJjcml0IjpbImI2NCJdfQ";

/// Builds a detached-JWS-shaped placeholder from the controller identifier.
///
/// # Arguments
/// * `controller` - Controller identifier (usually a `0x` account address)
///
/// # Returns
/// `<header>..<base64 of characters 2..10 of the controller>`
///
/// The output is deterministic for a given controller and carries no
/// cryptographic meaning.
pub fn placeholder_jws(controller: &str) -> String {
    let excerpt: String = controller.chars().skip(2).take(8).collect();
    format!("{}..{}", DETACHED_ES256K_HEADER, base64::encode(excerpt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_jws_is_deterministic() {
        let jws = placeholder_jws("0x52908400098527886e0f7030069857d2e4169ee7");
        assert_eq!(jws, placeholder_jws("0x52908400098527886e0f7030069857d2e4169ee7"));
        // "52908400" in base64
        assert!(jws.ends_with("..NTI5MDg0MDA="));
    }

    #[test]
    fn test_short_controller() {
        assert_eq!(placeholder_jws("0x"), format!("{}..", DETACHED_ES256K_HEADER));
    }
}
