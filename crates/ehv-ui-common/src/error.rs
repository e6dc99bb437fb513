//! Error types for UI services.

use thiserror::Error;

/// Result type for UI service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from UI service operations.
///
/// A missing detail payload is not an error; it resolves to a
/// [`Fallback`](crate::navigation::Fallback) view instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The view has no filter dimension with this name.
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    /// The value does not fit the dimension (e.g. a date range for a search box).
    #[error("filter '{filter}' expects {expected}")]
    InvalidFilterValue {
        filter: String,
        expected: &'static str,
    },

    /// A filter or statistic references a field the record type does not have.
    #[error("record type {record} has no field '{field}'")]
    UnknownField { record: &'static str, field: String },

    /// Page sizes must be at least one.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// No record with this id exists in the view's store.
    #[error("no record with id '{0}'")]
    UnknownRecord(String),

    /// Timers need a running tokio runtime.
    #[error("no tokio runtime available to schedule timer")]
    NoRuntime,

    /// Record store construction failed.
    #[error("data error: {0}")]
    Data(#[from] ehv_core::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Channel closed unexpectedly.
    #[error("channel closed")]
    ChannelClosed,
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<tokio::sync::watch::error::RecvError> for Error {
    fn from(_: tokio::sync::watch::error::RecvError) -> Self {
        Error::ChannelClosed
    }
}
