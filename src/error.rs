//! Error types for link parsing, import and config compilation
//!
//! Every failure is a plain value; nothing here is fatal to the process.
//! - **InvalidFormat** / **UrlParseError** / **JsonParseError** / **InvalidField**: a single link is malformed.
//! - **UnsupportedProtocol**: unknown scheme.
//! - **Base64DecodeError**: none of the base64 variants decoded the payload.
//! - **MissingField**: address, port or uuid absent at compile time.
//!
//! [`ProtocolError::kind`] folds these into the coarse [`ErrorKind`] categories.

use std::fmt;

/// Result type for parsing and compilation
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while parsing links or compiling configurations
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// Invalid link structure (e.g. missing uuid or host)
    InvalidFormat(String),
    /// Unsupported or unknown link scheme
    UnsupportedProtocol(String),
    /// Base64 decoding error
    Base64DecodeError(String),
    /// JSON parsing error (VMess body)
    JsonParseError(String),
    /// URL parsing error (VLESS link)
    UrlParseError(String),
    /// Invalid field value (e.g. non-numeric port)
    InvalidField(String),
    /// Missing required field at compile time
    MissingField(String),
}

/// Coarse error categories used when reporting import and compile failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A single line could not be parsed.
    MalformedLink,
    /// The scheme is not one of the supported ones.
    UnsupportedProtocol,
    /// No base64 variant decoded the payload.
    EncodingFailure,
    /// Address, port or uuid missing when compiling.
    MissingRequiredField,
}

impl ProtocolError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProtocolError::InvalidFormat(_)
            | ProtocolError::JsonParseError(_)
            | ProtocolError::UrlParseError(_)
            | ProtocolError::InvalidField(_) => ErrorKind::MalformedLink,
            ProtocolError::UnsupportedProtocol(_) => ErrorKind::UnsupportedProtocol,
            ProtocolError::Base64DecodeError(_) => ErrorKind::EncodingFailure,
            ProtocolError::MissingField(_) => ErrorKind::MissingRequiredField,
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            ProtocolError::UnsupportedProtocol(msg) => write!(f, "Unsupported protocol: {}", msg),
            ProtocolError::Base64DecodeError(msg) => write!(f, "Base64 decode error: {}", msg),
            ProtocolError::JsonParseError(msg) => write!(f, "JSON parse error: {}", msg),
            ProtocolError::UrlParseError(msg) => write!(f, "URL parse error: {}", msg),
            ProtocolError::InvalidField(msg) => write!(f, "Invalid field value: {}", msg),
            ProtocolError::MissingField(msg) => write!(f, "Missing required field: {}", msg),
        }
    }
}

impl std::error::Error for ProtocolError {}

impl From<base64::DecodeError> for ProtocolError {
    fn from(err: base64::DecodeError) -> Self {
        ProtocolError::Base64DecodeError(err.to_string())
    }
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        ProtocolError::JsonParseError(err.to_string())
    }
}

impl From<url::ParseError> for ProtocolError {
    fn from(err: url::ParseError) -> Self {
        ProtocolError::UrlParseError(err.to_string())
    }
}

impl From<std::num::ParseIntError> for ProtocolError {
    fn from(err: std::num::ParseIntError) -> Self {
        ProtocolError::InvalidField(format!("Parse integer error: {}", err))
    }
}

/// A failed line of an import, tagged with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportError {
    /// 1-based line number in the (possibly decoded) input
    pub line: usize,
    /// Why the line failed to parse
    pub error: ProtocolError,
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
