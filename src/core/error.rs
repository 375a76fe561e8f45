use thiserror::Error;

/// Core error types for FWMS
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Line does not start with the expected `agent ` prefix
    #[error("unrecognized rule format: {line}")]
    UnrecognizedFormat { line: String },

    /// NAT decode attempted on a line lacking the `-t=nat` marker
    #[error("not a NAT rule: {line}")]
    NotNatRule { line: String },

    /// An ICMP name or number could not be resolved by any fallback
    #[error("unknown identifier: {name}")]
    UnknownIdentifier { name: String },
}

impl Error {
    pub fn unrecognized_format(line: &str) -> Self {
        Error::UnrecognizedFormat {
            line: line.to_string(),
        }
    }

    pub fn not_nat_rule(line: &str) -> Self {
        Error::NotNatRule {
            line: line.to_string(),
        }
    }

    pub fn unknown_identifier(name: &str) -> Self {
        Error::UnknownIdentifier {
            name: name.to_string(),
        }
    }
}

/// A decode error tagged with the 1-based line number it occurred on.
///
/// Multi-line parsing never aborts on a bad line; each failure is collected
/// as a `LineError` and reported to the caller for display.
#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct LineError {
    pub line: usize,
    #[source]
    pub source: Error,
}

pub type Result<T> = std::result::Result<T, Error>;
