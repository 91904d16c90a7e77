//! Error types for the LCP core library

use thiserror::Error;

/// Errors raised by I/O, alphabet loading and parameter validation.
///
/// The parsing and deepening algorithms themselves never fail; exhausting
/// the core list is reported through `bool` returns instead.
#[derive(Debug, Error)]
pub enum LcpError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Truncated stream: expected {expected} while reading {context}")]
    Truncated {
        expected: &'static str,
        context: String,
    },

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Alphabet error: {0}")]
    Alphabet(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}

pub type LcpResult<T> = Result<T, LcpError>;

impl LcpError {
    pub(crate) fn truncated(expected: &'static str, context: impl Into<String>) -> Self {
        Self::Truncated {
            expected,
            context: context.into(),
        }
    }
}
