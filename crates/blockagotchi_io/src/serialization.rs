//! JSON and hex envelope helpers.
//!
//! Hosts hand payloads around as `0x`-prefixed hex of UTF-8 JSON. The helpers
//! here validate every step so a bad payload turns into an [`IoError`]
//! instead of a panic.

use crate::error::{IoError, Result};
use serde::{Deserialize, Serialize};

/// Serializes data to JSON with error handling.
pub fn to_json<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    serde_json::to_string(data)
        .map_err(|e| IoError::serialization(format!("JSON serialization failed: {}", e)))
}

/// Deserializes data from a JSON string.
pub fn from_json<T>(json: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    if json.trim().is_empty() {
        return Err(IoError::validation("Empty JSON string"));
    }

    serde_json::from_str(json)
        .map_err(|e| IoError::serialization(format!("JSON deserialization failed: {}", e)))
}

/// Encodes text as a `0x`-prefixed hex payload.
#[must_use]
pub fn str_to_hex(text: &str) -> String {
    format!("0x{}", hex::encode(text.as_bytes()))
}

/// Decodes a hex payload back to text. The `0x` prefix is optional.
pub fn hex_to_str(payload: &str) -> Result<String> {
    let digits = payload.trim();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);
    if digits.is_empty() {
        return Err(IoError::envelope("Empty hex payload"));
    }

    let bytes = hex::decode(digits)
        .map_err(|e| IoError::envelope(format!("Invalid hex encoding: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| IoError::envelope(format!("Invalid UTF-8 in hex: {}", e)))
}

/// Serializes data to a hex-wrapped JSON payload.
pub fn to_hex_payload<T>(data: &T) -> Result<String>
where
    T: Serialize,
{
    Ok(str_to_hex(&to_json(data)?))
}

/// Deserializes data from a hex-wrapped JSON payload.
pub fn from_hex_payload<T>(payload: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    from_json(&hex_to_str(payload)?)
}
