//! Error types for the ledger client

use std::fmt::Debug;
use thiserror::Error;

/// Result type for ledger client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger client errors
#[derive(Error, Debug)]
pub enum Error {
    /// Native value the codec cannot represent on the wire
    #[error("Cannot encode value ({reason}): {value}")]
    UnsupportedType {
        /// Offending value
        value: String,
        /// Why it cannot be encoded
        reason: String,
    },

    /// Wire value whose tag is unset or unknown
    #[error("Cannot decode value, unsupported wire tag{}: {}", context_suffix(.context), .value)]
    UnsupportedWireTag {
        /// Offending value
        value: String,
        /// Where it was found
        context: Option<String>,
    },

    /// Tuple arity outside the well-known `Tuple1..Tuple20` types
    #[error("No tuple type with {0} slots")]
    UnsupportedArity(usize),

    /// Recognized wire shape this client does not handle
    #[error("Not supported ({feature}): {value}")]
    NotSupported {
        /// Offending value
        value: String,
        /// Unsupported feature
        feature: String,
    },

    /// Malformed or unexpected wire value
    #[error("Cannot decode value{}: {}", context_suffix(.context), .value)]
    DecodeFailure {
        /// Offending value
        value: String,
        /// What was being decoded
        context: Option<String>,
    },

    /// Remote call failed; classified by its status code
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::Status),

    /// Channel could not be established
    #[error("Connection error: {0}")]
    Connection(#[from] tonic::transport::Error),

    /// `open()` on a session that is open or closed
    #[error("Session already opened: {0}")]
    AlreadyOpen(String),

    /// Operation on a session that is not open
    #[error("Session not open: {0}")]
    NotOpen(String),

    /// Required local party lookup found nothing
    #[error("No party found for basename: {0}")]
    PartyNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Encode failure for `value`
    pub fn unsupported_type(value: &impl Debug, reason: impl Into<String>) -> Self {
        Error::UnsupportedType {
            value: format!("{:?}", value),
            reason: reason.into(),
        }
    }

    /// Decode failure for `value`, with optional context
    pub fn decode_failure(value: &impl Debug, context: Option<&str>) -> Self {
        Error::DecodeFailure {
            value: format!("{:?}", value),
            context: context.map(str::to_string),
        }
    }

    /// Unset or unknown wire tag in `value`
    pub fn unsupported_wire_tag(value: &impl Debug, context: Option<&str>) -> Self {
        Error::UnsupportedWireTag {
            value: format!("{:?}", value),
            context: context.map(str::to_string),
        }
    }

    /// Recognized but unhandled wire shape
    pub fn not_supported(value: &impl Debug, feature: impl Into<String>) -> Self {
        Error::NotSupported {
            value: format!("{:?}", value),
            feature: feature.into(),
        }
    }

    /// Status code of a transport failure, `None` for every other error
    pub fn status_code(&self) -> Option<tonic::Code> {
        match self {
            Error::Transport(status) => Some(status.code()),
            _ => None,
        }
    }
}

fn context_suffix(context: &Option<String>) -> String {
    match context {
        Some(message) => format!(" ({})", message),
        None => String::new(),
    }
}
