//! Precision-aware JSON decoding.
//!
//! Algorand APIs report balances, fees and rounds as unsigned 64-bit integers,
//! which a plain `f64` cannot always hold. [`decode`] walks the document as
//! borrowed [`RawValue`] slices, so every numeric literal is still source text
//! when an [`IntDecoding`] policy decides how to represent it.
//!
//! # Example
//!
//! ```
//! use lora_client::codec::{decode, IntDecoding};
//!
//! let value = decode(r#"{"fee": 9007199254740993}"#, IntDecoding::BigInt).unwrap();
//! assert_eq!(value["fee"].to_decimal_string().as_deref(), Some("9007199254740993"));
//!
//! assert!(decode(r#"{"fee": 9007199254740993}"#, IntDecoding::Safe).is_err());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::BigInt;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

use crate::constants::MAX_SAFE_INTEGER_TEXT;
use crate::domain::error::{DecodeError, JsonPath, PathSegment};

mod value;

pub use value::DecodedValue;

// ============================================================================
// Decoding Policy
// ============================================================================

/// How integer literals are represented after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntDecoding {
    /// Every integer becomes an `f64`; values past 2^53 - 1 silently round.
    #[default]
    Default,
    /// Like `Default`, but any integer past 2^53 - 1 is an error.
    Safe,
    /// Integers within 2^53 - 1 become `f64`, larger ones become `BigInt`.
    Mixed,
    /// Every integer becomes a `BigInt`.
    BigInt,
}

impl IntDecoding {
    /// All policies, in order of increasing precision.
    pub const ALL: [Self; 4] = [Self::Default, Self::Safe, Self::Mixed, Self::BigInt];

    /// Returns the mode string accepted by [`IntDecoding::from_str`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Safe => "safe",
            Self::Mixed => "mixed",
            Self::BigInt => "bigint",
        }
    }
}

impl fmt::Display for IntDecoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IntDecoding {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "safe" => Ok(Self::Safe),
            "mixed" => Ok(Self::Mixed),
            "bigint" => Ok(Self::BigInt),
            _ => Err(DecodeError::configuration(format!(
                "unknown int decoding '{s}', expected one of: default, safe, mixed, bigint"
            ))),
        }
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode JSON text, representing integers according to `policy`.
///
/// # Errors
///
/// Returns [`DecodeError::Parse`] for malformed input and, under
/// [`IntDecoding::Safe`], [`DecodeError::PrecisionLoss`] for the first integer
/// literal outside the safe range.
pub fn decode(text: &str, policy: IntDecoding) -> Result<DecodedValue, DecodeError> {
    let decoder = Decoder { text, policy };
    let root: &RawValue = decoder.parse(text)?;

    let mut path = JsonPath::root();
    decoder.value(root, &mut path)
}

/// Decode JSON text using a policy given by name.
///
/// # Errors
///
/// Returns [`DecodeError::Configuration`] if `mode` is not a known policy,
/// otherwise the errors of [`decode`].
pub fn decode_with_mode(text: &str, mode: &str) -> Result<DecodedValue, DecodeError> {
    decode(text, mode.parse()?)
}

/// Walks a validated document one level at a time. Containers are split into
/// raw member slices borrowed from `text`, scalars are converted in place.
struct Decoder<'t> {
    text: &'t str,
    policy: IntDecoding,
}

impl<'t> Decoder<'t> {
    fn value(&self, raw: &'t RawValue, path: &mut JsonPath) -> Result<DecodedValue, DecodeError> {
        let literal = raw.get();

        Ok(match literal.as_bytes().first() {
            Some(b'{') => {
                let Members(members) = self.parse(literal)?;
                let mut decoded = Vec::with_capacity(members.len());
                for (key, item) in members {
                    path.push(PathSegment::Key(key.clone()));
                    decoded.push((key, self.value(item, path)?));
                    path.pop();
                }
                DecodedValue::Object(decoded)
            }
            Some(b'[') => {
                let items: Vec<&'t RawValue> = self.parse(literal)?;
                let mut decoded = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    path.push(PathSegment::Index(index));
                    decoded.push(self.value(item, path)?);
                    path.pop();
                }
                DecodedValue::Array(decoded)
            }
            Some(b'"') => DecodedValue::String(self.parse(literal)?),
            Some(b't' | b'f') => DecodedValue::Bool(self.parse(literal)?),
            Some(b'n') => DecodedValue::Null,
            _ => self.number(literal, path)?,
        })
    }

    fn number(&self, literal: &str, path: &JsonPath) -> Result<DecodedValue, DecodeError> {
        if !is_integer_literal(literal) {
            return self.native(literal);
        }

        match self.policy {
            IntDecoding::Default => self.native(literal),
            IntDecoding::Safe => {
                if exceeds_safe_range(literal) {
                    Err(DecodeError::precision_loss(path.clone(), literal))
                } else {
                    self.native(literal)
                }
            }
            IntDecoding::Mixed => {
                if exceeds_safe_range(literal) {
                    self.big(literal)
                } else {
                    self.native(literal)
                }
            }
            IntDecoding::BigInt => self.big(literal),
        }
    }

    fn native(&self, literal: &str) -> Result<DecodedValue, DecodeError> {
        literal.parse::<f64>().map(DecodedValue::Number).map_err(|e| {
            DecodeError::parse(self.offset_of(literal), format!("invalid number {literal}: {e}"))
        })
    }

    fn big(&self, literal: &str) -> Result<DecodedValue, DecodeError> {
        literal.parse::<BigInt>().map(DecodedValue::BigInt).map_err(|e| {
            DecodeError::parse(self.offset_of(literal), format!("invalid integer {literal}: {e}"))
        })
    }

    /// Deserialize a slice of the source text, reporting errors at their
    /// position in the whole document.
    fn parse<T: Deserialize<'t>>(&self, fragment: &'t str) -> Result<T, DecodeError> {
        serde_json::from_str(fragment).map_err(|e| {
            let offset = self.offset_of(fragment) + byte_offset(fragment, e.line(), e.column());
            DecodeError::parse(offset.min(self.text.len()), e.to_string())
        })
    }

    /// Position of `fragment`, which borrows from `self.text`.
    fn offset_of(&self, fragment: &str) -> usize {
        (fragment.as_ptr() as usize).saturating_sub(self.text.as_ptr() as usize)
    }
}

/// Object members in document order. A repeated key keeps its first position
/// and takes the last value.
struct Members<'t>(Vec<(String, &'t RawValue)>);

impl<'de: 't, 't> Deserialize<'de> for Members<'t> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MembersVisitor<'t>(std::marker::PhantomData<&'t ()>);

        impl<'de: 't, 't> Visitor<'de> for MembersVisitor<'t> {
            type Value = Members<'t>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
                let mut members: Vec<(String, &'t RawValue)> = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    let value: &'t RawValue = map.next_value()?;
                    match members.iter_mut().find(|(name, _)| *name == key) {
                        Some(existing) => existing.1 = value,
                        None => members.push((key, value)),
                    }
                }
                Ok(Members(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor(std::marker::PhantomData))
    }
}

/// JSON numbers without fraction or exponent are integer literals.
fn is_integer_literal(literal: &str) -> bool {
    !literal.contains(['.', 'e', 'E'])
}

/// Compares the literal's magnitude against 2^53 - 1 on its decimal digits.
pub(crate) fn exceeds_safe_range(literal: &str) -> bool {
    let digits = literal.strip_prefix('-').unwrap_or(literal);
    let digits = digits.trim_start_matches('0');

    match digits.len().cmp(&MAX_SAFE_INTEGER_TEXT.len()) {
        Ordering::Less => false,
        Ordering::Greater => true,
        Ordering::Equal => digits > MAX_SAFE_INTEGER_TEXT,
    }
}

/// Converts serde_json's 1-based line/column into a byte offset.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();

    (line_start + column.saturating_sub(1)).min(text.len())
}

// ============================================================================
// Tests
// ============================================================================
