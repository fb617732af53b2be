//! Error kinds for descriptor tokenization and type resolution.
//!
//! Two distinct kinds exist on purpose: [`ParseError`] belongs to the
//! tokenizer and reports malformed descriptor syntax; the resolver's own
//! [`TypeError::InvalidType`] reports a well-formed descriptor that does
//! not map to any recognized type shape.  Tokenizer errors are passed
//! through [`TypeError::Parse`] unchanged.
//!
//! Both are terminal for the `resolve` call that produced them: malformed
//! input is a metadata-authoring mistake, not a transient condition, so
//! nothing is ever caught or retried internally and no partial result is
//! returned alongside an error.

use thiserror::Error;

use crate::token::TypeToken;

/// Malformed descriptor syntax, reported by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parse error at offset {offset}: {message}")]
pub struct ParseError {
    /// Byte offset into the descriptor where the problem was detected.
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        ParseError {
            offset,
            message: message.into(),
        }
    }
}

/// Failure of a single `resolve` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// The descriptor did not tokenize; the tokenizer's error is passed
    /// through unchanged.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The descriptor tokenized but does not map to a recognized type
    /// shape: a container with more than 2 parameters, a parameterized
    /// name that is neither a container nor a temporal type, or a
    /// parameter where a different kind was required.  Carries the
    /// offending token-tree fragment for diagnostics.
    #[error("invalid type `{token}`: {reason}")]
    InvalidType { reason: String, token: TypeToken },
}

impl TypeError {
    pub(crate) fn invalid_type(reason: impl Into<String>, token: &TypeToken) -> Self {
        TypeError::InvalidType {
            reason: reason.into(),
            token: token.clone(),
        }
    }
}
