use std::net::AddrParseError;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Every way reading a scan file or one of its fields can fail.
///
/// Nothing in the model catches these; they surface at the accessor that
/// triggered them.
#[derive(Debug, Error)]
pub enum NessusError {
    #[error("failed to read scan file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scan file is not well-formed XML: {0}")]
    NotWellFormed(#[from] roxmltree::Error),

    #[error("no matching elements for expression '{expression}'")]
    NoMatches { expression: String },

    #[error("attribute '{attribute}' not found on <{element}>")]
    AttributeNotFound {
        attribute: String,
        element: String,
    },

    #[error("{field} '{value}' is not numeric")]
    NotNumeric {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("host property '{name}' not found")]
    PropertyNotFound { name: String },

    #[error("host property '{name}' is empty")]
    EmptyProperty { name: String },

    #[error("'{value}' is not a valid IP address")]
    InvalidAddress {
        value: String,
        #[source]
        source: AddrParseError,
    },

    #[error("severity '{value}' is not a known level")]
    InvalidSeverity { value: String },
}

pub type Result<T> = std::result::Result<T, NessusError>;
