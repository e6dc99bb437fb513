//! Error types for record loading and parsing.

use thiserror::Error;

/// Convenience type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building record stores or parsing record values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two records in the same store share an identifier.
    #[error("duplicate record id '{id}'")]
    DuplicateId { id: String },

    /// A categorical value did not match any known variant.
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}

impl Error {
    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Error::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}
