use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Error raised when a value is not a well-formed `#RRGGBB` color.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid hex color: {value}")]
pub struct ColorError {
    /// The rejected input.
    pub value: String,
}

/// A validated 6-digit hex color such as `#b624ff`.
///
/// Hex digit casing from the input is preserved; equality is on the stored
/// string form.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct HexColor(String);

impl HexColor {
    /// The string form, including the leading `#`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a candidate string is a well-formed 6-digit hex color.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        let Some(digits) = value.strip_prefix('#') else {
            return false;
        };
        digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl Default for HexColor {
    /// The application's signature purple.
    fn default() -> Self {
        Self("#b624ff".to_owned())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(ColorError { value: s.to_owned() })
        }
    }
}

impl Serialize for HexColor {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
