//! Error types for decoding, validation and client operations.
//!
//! Decoding and resolution report failures as plain values; nothing in the
//! core logs or falls back to a default. [`AlgoError`] wraps both for callers
//! that go through the HTTP clients.

use std::fmt;

use thiserror::Error;

// ============================================================================
// JSON Path
// ============================================================================

/// One step from the document root towards a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member name.
    Key(String),
    /// Array position.
    Index(usize),
}

/// Location of a value inside a JSON document, rendered as `$.a[0].b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    /// The document root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the path segments from the root.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.0.pop();
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Decode Errors
// ============================================================================

/// Failure while turning JSON text into a [`crate::codec::DecodedValue`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The input is not well-formed JSON.
    #[error("Parse error at byte {offset}: {message}")]
    Parse {
        /// Byte offset into the source text where parsing stopped.
        offset: usize,
        /// Parser diagnostic.
        message: String,
    },

    /// An integer literal cannot be represented exactly under `safe` decoding.
    #[error("Precision loss at {path}: {literal} exceeds the safe integer range")]
    PrecisionLoss {
        /// Where the literal sits in the document.
        path: JsonPath,
        /// The literal exactly as written in the source.
        literal: String,
    },

    /// The requested decoding policy is not recognized.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DecodeError {
    #[must_use]
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn precision_loss(path: JsonPath, literal: impl Into<String>) -> Self {
        Self::PrecisionLoss {
            path,
            literal: literal.into(),
        }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

// ============================================================================
// Validation Errors
// ============================================================================

/// A transaction draft violates a field rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable reason.
    pub reason: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

// ============================================================================
// Client Errors
// ============================================================================

/// Error type for client operations against algod and the indexer.
#[derive(Debug, Error)]
pub enum AlgoError {
    /// Network-related errors from HTTP requests.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Request failed with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// Response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Response decoded but does not have the expected shape.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of what failed to parse.
        message: String,
    },

    /// Transaction parameters failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// HTTP client could not be constructed.
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}

impl AlgoError {
    /// Create a new parse error with the given message.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn client_init(message: impl Into<String>) -> Self {
        Self::ClientInit(message.into())
    }

    /// Convert to a `color_eyre::Report` for the command line front end.
    #[must_use = "this converts the error into a Report for display"]
    pub fn into_report(self) -> color_eyre::Report {
        color_eyre::eyre::eyre!("{}", self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_path_display() {
        let mut path = JsonPath::root();
        assert_eq!(path.to_string(), "$");

        path.push(PathSegment::Key("txns".to_string()));
        path.push(PathSegment::Index(2));
        path.push(PathSegment::Key("fee".to_string()));
        assert_eq!(path.to_string(), "$.txns[2].fee");

        path.pop();
        assert_eq!(path.to_string(), "$.txns[2]");
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::parse(8, "expected value");
        insta::assert_snapshot!(err.to_string(), @"Parse error at byte 8: expected value");

        let mut path = JsonPath::root();
        path.push(PathSegment::Key("fee".to_string()));
        let err = DecodeError::precision_loss(path, "9007199254740993");
        insta::assert_snapshot!(
            err.to_string(),
            @"Precision loss at $.fee: 9007199254740993 exceeds the safe integer range"
        );

        let err = DecodeError::configuration("unknown mode");
        assert_eq!(err.to_string(), "Configuration error: unknown mode");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("fee", "500 is below the minimum fee 1000");
        insta::assert_snapshot!(err.to_string(), @"Invalid fee: 500 is below the minimum fee 1000");
        assert_eq!(err.field, "fee");
    }

    #[test]
    fn test_algo_error_wraps_sources() {
        let err: AlgoError = ValidationError::new("sender", "malformed address").into();
        assert_eq!(err.to_string(), "Invalid sender: malformed address");

        let err: AlgoError = DecodeError::configuration("bad").into();
        assert!(matches!(err, AlgoError::Decode(DecodeError::Configuration(_))));

        let err = AlgoError::status(404, "not found");
        assert_eq!(err.to_string(), "Request failed with status 404: not found");

        let err = AlgoError::parse("missing field");
        assert_eq!(err.into_report().to_string(), "Parse error: missing field");
    }
}
