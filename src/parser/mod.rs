pub mod explodes;
pub mod node_manip;
pub mod subparser;

use thiserror::Error;

pub use explodes::explode;
pub use node_manip::deduplicate;
pub use subparser::{aggregate, SourceFetch};

/// Reasons a single link line cannot be turned into a descriptor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unsupported link scheme")]
    UnsupportedScheme,

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("invalid port: {0:?}")]
    InvalidPort(String),

    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
}

impl DecodeError {
    /// Short, stable code for reports and logs.
    pub fn reason(&self) -> &'static str {
        match self {
            DecodeError::UnsupportedScheme => "unsupported-scheme",
            DecodeError::MalformedPayload(_) => "malformed-payload",
            DecodeError::InvalidPort(_) => "invalid-port",
            DecodeError::MissingRequiredField(_) => "missing-field",
        }
    }
}
