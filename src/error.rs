//! Contract violations raised by the containers.

/// Errors returned by the fallible container contract.
///
/// All of these are caller logic errors. A failing call never leaves a
/// partially applied mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Mutation attempted through a read-only instance.
    #[error("container is read-only")]
    ReadOnly,
    /// Cursor advanced or used past its last entry.
    #[error("iterator is exhausted")]
    IteratorExhausted,
    /// Cursor removal without a current entry.
    #[error("cursor has no current entry")]
    NoCurrentEntry,
    /// Rejected construction or configuration argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
