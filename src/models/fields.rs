// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Field deserializers shared by the create-entry request bodies.

use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

/// Trimmed string; blank strings and `null` read as absent.
pub fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Non-negative whole number, accepted as a JSON number or a numeric string.
///
/// Blank strings and `null` read as absent so the required-field check
/// reports them.
pub fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let invalid = || D::Error::custom("expected a non-negative whole number");

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).map(Some).map_err(|_| invalid());
            }
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) => {
                    Ok(Some(f as u32))
                }
                _ => Err(invalid()),
            }
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<u32>().map(Some).map_err(|_| invalid())
        }
        Some(_) => Err(invalid()),
    }
}
