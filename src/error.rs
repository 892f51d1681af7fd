//! Error types
//!
//! Every failure produced by this crate carries a stable numeric code
//! (see [`Error::code`]) so callers can branch on failure kind without
//! matching message strings.

use crate::connection::Operation;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Stable error codes, one per [`Error`] variant.
pub mod codes {
    /// The connection handle has been closed
    pub const CONNECTION_CLOSED: u32 = 0x2301;

    /// The operation has no equivalent in the engine
    pub const UNSUPPORTED_OPERATION: u32 = 0x2302;

    /// Structurally invalid operation input
    pub const INVALID_ARGUMENT: u32 = 0x2303;

    /// Malformed connection address
    pub const INVALID_ADDRESS: u32 = 0x2304;

    /// Address scheme not recognized by this parser
    pub const SCHEME_MISMATCH: u32 = 0x2305;

    /// Failure reported by the engine binding
    pub const ENGINE: u32 = 0x2306;
}

/// Errors surfaced by the connection layer
#[derive(Error, Debug)]
pub enum Error {
    /// The connection has been closed; the handle is permanently unusable
    #[error("connection already closed")]
    ConnectionClosed,

    /// The engine has no equivalent for the requested operation.
    ///
    /// Permanent for the life of the library version, not retryable.
    #[error("operation not supported by the engine: {0}")]
    Unsupported(Operation),

    /// Structurally invalid operation input; correct the call, not the connection
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed connection address (bad port, irrecoverable structure)
    #[error("invalid connection address: {0}")]
    InvalidAddress(String),

    /// The address scheme matches neither recognized alias.
    ///
    /// Distinct from [`Error::InvalidAddress`] so callers chaining several
    /// drivers can hand the string to the next one.
    #[error("unrecognized address scheme: {0}")]
    SchemeMismatch(String),

    /// Failure reported by the engine binding
    #[error("engine error: {0}")]
    Engine(String),
}

impl Error {
    /// Stable numeric code for this error kind.
    pub fn code(&self) -> u32 {
        match self {
            Self::ConnectionClosed => codes::CONNECTION_CLOSED,
            Self::Unsupported(_) => codes::UNSUPPORTED_OPERATION,
            Self::InvalidArgument(_) => codes::INVALID_ARGUMENT,
            Self::InvalidAddress(_) => codes::INVALID_ADDRESS,
            Self::SchemeMismatch(_) => codes::SCHEME_MISMATCH,
            Self::Engine(_) => codes::ENGINE,
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an invalid-address error.
    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::InvalidAddress(message.into())
    }

    /// Create an engine error.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }

    /// Whether this error means the handle itself is dead and a new
    /// connection must be obtained.
    pub fn is_fatal_for_handle(&self) -> bool {
        matches!(self, Self::ConnectionClosed)
    }
}
