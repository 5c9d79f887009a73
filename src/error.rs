use crate::header::Field;
use thiserror::Error;

/// Error type for different parsing failures
#[derive(Debug, PartialEq, Eq, Clone, Copy, Error)]
pub enum Error {
    /// The input ended before the given header field was complete
    #[error("header truncated while reading {field}")]
    TruncatedHeader {
        /// field that could not be read
        field: Field,
    },
    /// A constant-valued header field did not hold its required value
    #[error("{}: {field} = {value}", .field.rejection())]
    InvalidFormat {
        /// offending field
        field: Field,
        /// value found in the input
        value: u32,
    },
    /// Samples were requested before the header was parsed
    #[error("header has not been parsed")]
    NotOpened,
    /// The input handle was already released
    #[error("input has been closed")]
    Closed,
}

/// Error type for parsing from a reader
#[cfg(feature = "io")]
#[derive(Debug, PartialEq, Error)]
pub enum ReadError<E> {
    /// Error from the underlying reader
    #[error("reader error: {0:?}")]
    Reader(E),
    /// Error from the parser
    #[error(transparent)]
    Parser(#[from] Error),
}
