/// Error types for the irc-addressbook library
use std::fmt;

/// Result type alias for address book operations
pub type Result<T> = std::result::Result<T, AddressBookError>;

/// Main error type for address book operations
///
/// The core of this crate is total: pattern compilation, dictionary decoding,
/// and match evaluation never fail. Errors only arise at the JSON text
/// boundary, where the input may not be parseable at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressBookError {
    /// JSON parsing/serialization errors
    Json(String),

    /// Structural errors (e.g., JSON root is not an object)
    Format(String),
}

impl fmt::Display for AddressBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressBookError::Json(msg) => write!(f, "JSON error: {}", msg),
            AddressBookError::Format(msg) => write!(f, "Format error: {}", msg),
        }
    }
}

impl std::error::Error for AddressBookError {}

impl From<serde_json::Error> for AddressBookError {
    fn from(err: serde_json::Error) -> Self {
        AddressBookError::Json(err.to_string())
    }
}
