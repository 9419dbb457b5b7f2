//! Decoded JSON value tree.

use std::fmt;
use std::ops::Index;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::constants::MAX_SAFE_INTEGER;

static NULL: DecodedValue = DecodedValue::Null;

/// 2^64 as an `f64`, the first value that no longer fits in a `u64`.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// A JSON value whose integers are represented per [`super::IntDecoding`].
///
/// Objects keep their members in document order. Indexing with a missing key
/// or out-of-range position yields [`DecodedValue::Null`], like `serde_json`.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedValue {
    Null,
    Bool(bool),
    /// Native number: every non-integer, and integers under the
    /// `default`/`safe` policies or within the safe range under `mixed`.
    Number(f64),
    /// Arbitrary-precision integer.
    BigInt(BigInt),
    String(String),
    Array(Vec<DecodedValue>),
    Object(Vec<(String, DecodedValue)>),
}

impl DecodedValue {
    /// Look up an object member by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DecodedValue> {
        match self {
            Self::Object(members) => members
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[DecodedValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&[(String, DecodedValue)]> {
        match self {
            Self::Object(members) => Some(members),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bigint(&self) -> Option<&BigInt> {
        match self {
            Self::BigInt(n) => Some(n),
            _ => None,
        }
    }

    /// Native numbers are returned as is; big integers are narrowed, possibly
    /// losing precision.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::BigInt(n) => n.to_f64(),
            _ => None,
        }
    }

    /// Returns the value as a `u64` when it is a non-negative whole number
    /// that fits, regardless of which representation decoding chose.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n < U64_LIMIT => {
                Some(*n as u64)
            }
            Self::BigInt(n) => u64::try_from(n).ok(),
            _ => None,
        }
    }

    /// Decimal text of a numeric value.
    #[must_use]
    pub fn to_decimal_string(&self) -> Option<String> {
        match self {
            Self::Number(n) if n.is_finite() => Some(n.to_string()),
            Self::BigInt(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

impl Index<&str> for DecodedValue {
    type Output = DecodedValue;

    fn index(&self, key: &str) -> &Self::Output {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for DecodedValue {
    type Output = DecodedValue;

    fn index(&self, index: usize) -> &Self::Output {
        self.as_array()
            .and_then(|items| items.get(index))
            .unwrap_or(&NULL)
    }
}

/// Whole numbers within the safe range serialize as integers, other native
/// numbers as floats and non-finite ones as `null`. Big integers are written
/// digit for digit, so the output can be re-decoded without loss.
impl Serialize for DecodedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) if !n.is_finite() => serializer.serialize_unit(),
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER as f64 => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::BigInt(n) => serialize_bigint(n, serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => items.serialize(serializer),
            Self::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, value) in members {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

fn serialize_bigint<S: Serializer>(n: &BigInt, serializer: S) -> Result<S::Ok, S::Error> {
    if let Some(n) = n.to_i128() {
        return serializer.serialize_i128(n);
    }
    if let Some(n) = n.to_u128() {
        return serializer.serialize_u128(n);
    }
    RawValue::from_string(n.to_string())
        .map_err(S::Error::custom)?
        .serialize(serializer)
}

/// Renders compact JSON.
impl fmt::Display for DecodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{IntDecoding, decode};

    #[test]
    fn test_indexing_missing_members_yields_null() {
        let value = decode(r#"{"a": [1, {"b": "x"}]}"#, IntDecoding::Default).unwrap();

        assert_eq!(value["a"][1]["b"].as_str(), Some("x"));
        assert!(value["missing"].is_null());
        assert!(value["a"][7].is_null());
        assert!(value["a"]["not-an-object"].is_null());
    }

    #[test]
    fn test_as_u64_across_representations() {
        let value = decode(
            r#"{"small": 1000, "big": 18446744073709551615, "neg": -5, "frac": 1.5}"#,
            IntDecoding::Mixed,
        )
        .unwrap();

        assert_eq!(value["small"].as_u64(), Some(1000));
        assert_eq!(value["big"].as_u64(), Some(u64::MAX));
        assert_eq!(value["neg"].as_u64(), None);
        assert_eq!(value["frac"].as_u64(), None);

        let value = decode(r#"{"over": 18446744073709551616}"#, IntDecoding::BigInt).unwrap();
        assert_eq!(value["over"].as_u64(), None);
    }

    #[test]
    fn test_display_round_trips_big_integers() {
        let text = r#"{"amount":18446744073709551615,"note":"say \"hi\"","rounds":[1,2],"flag":false,"x":null}"#;
        let value = decode(text, IntDecoding::BigInt).unwrap();
        assert_eq!(value.to_string(), text);

        let again = decode(&value.to_string(), IntDecoding::BigInt).unwrap();
        assert_eq!(again, value);
    }

    #[test]
    fn test_display_past_u128() {
        let text = r#"[340282366920938463463374607431768211456,-340282366920938463463374607431768211457]"#;
        let value = decode(text, IntDecoding::BigInt).unwrap();
        assert_eq!(value.to_string(), text);
    }

    #[test]
    fn test_display_native_numbers() {
        let value = decode(r#"{"fee":1000,"ratio":1.5,"neg":-3,"zero":-0}"#, IntDecoding::Default).unwrap();
        insta::assert_snapshot!(value.to_string(), @r#"{"fee":1000,"ratio":1.5,"neg":-3,"zero":0}"#);

        let value = DecodedValue::Array(vec![DecodedValue::Number(f64::NAN), DecodedValue::Number(f64::INFINITY)]);
        assert_eq!(value.to_string(), "[null,null]");
    }

    #[test]
    fn test_pretty_output_keeps_big_integers() {
        let value = decode(r#"{"amount":18446744073709551615}"#, IntDecoding::BigInt).unwrap();
        let pretty = serde_json::to_string_pretty(&value).unwrap();
        assert_eq!(pretty, "{\n  \"amount\": 18446744073709551615\n}");
    }

    #[test]
    fn test_kind_names() {
        let value = decode(r#"[null, true, 1, "s", [], {}]"#, IntDecoding::Default).unwrap();
        let kinds: Vec<&str> = value.as_array().unwrap().iter().map(DecodedValue::kind).collect();
        assert_eq!(kinds, ["null", "boolean", "number", "string", "array", "object"]);

        let value = decode("7", IntDecoding::BigInt).unwrap();
        assert_eq!(value.kind(), "bigint");
        assert_eq!(value.as_f64(), Some(7.0));

        let value = decode("18446744073709551615", IntDecoding::BigInt).unwrap();
        assert_eq!(value.as_f64(), Some(18_446_744_073_709_551_615.0));
    }
}
