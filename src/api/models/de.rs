//! Lenient deserializers for form-style JSON payloads.
//!
//! Browser forms submit numeric inputs as strings and use `""` for "no value".
//! These helpers accept both shapes and keep "field omitted" distinct from
//! "field explicitly cleared" for partial updates.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

/// Deserialize an optional number given as a JSON number or a numeric string.
///
/// `null` and blank strings become `None`.
pub fn lenient_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid number: {text:?}")))
        }
    }
}

/// Like [`lenient_number`], for update payloads: a present field yields `Some(..)`.
///
/// Use with `#[serde(default)]` so that an omitted field stays `None`.
pub fn patch_number<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
{
    lenient_number(deserializer).map(Some)
}

/// Present-but-null becomes `Some(None)`; use with `#[serde(default)]`.
pub fn patch_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize a pet id given as a number or numeric string.
///
/// `null`, `0` and blank strings are treated as absent, matching how the
/// client reports an unset id.
pub fn pet_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let id: Option<i64> = lenient_number(deserializer)?;
    match id {
        None | Some(0) => Ok(None),
        Some(value) => i32::try_from(value)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("pet id out of range: {value}"))),
    }
}
