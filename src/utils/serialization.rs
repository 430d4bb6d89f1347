// src/utils/serialization.rs
//! Serialization utilities for the DID system.
//!
//! Provides serialization and deserialization functions for:
//! - Compact JSON (wire responses, determinism checks)
//! - Pretty-printed JSON (exported documents)
//! - Raw JSON text coming from outside the crate

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::error::ParseError;

/// Serializes a value to a compact JSON string.
///
/// # Arguments
/// * `data` - The value to serialize (must implement `Serialize`)
///
/// # Returns
/// - `Ok(String)` with JSON representation on success
/// - `Err(serde_json::Error)` if serialization fails
pub fn serialize<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}

/// Serializes a value to JSON indented with two spaces, the format documents
/// are exported and displayed in.
pub fn to_pretty_json<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

/// Deserializes a value from a JSON string.
///
/// # Arguments
/// * `data` - JSON string to deserialize
///
/// # Returns
/// - `Ok(T)` with deserialized value on success
/// - `Err(serde_json::Error)` if the text is not JSON or does not match `T`
pub fn deserialize<T: DeserializeOwned>(data: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(data)
}

/// Parses untrusted bytes into a generic JSON value.
///
/// Only syntax (including UTF-8 validity) is checked here; shape checks
/// happen later so that the two failure classes stay distinguishable.
pub fn parse_json(data: impl AsRef<[u8]>) -> Result<Value, ParseError> {
    serde_json::from_slice(data.as_ref()).map_err(ParseError::from)
}
