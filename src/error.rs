//! Coroutine errors.

use thiserror::Error;

/// The error returned by a coroutine resumption.
///
/// Misuse of a coroutine is reported with the dedicated variants. A failure
/// raised inside a coroutine body is carried unchanged in
/// [`CoroError::Failed`].
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum CoroError<E> {
    /// The coroutine was resumed after it had terminated.
    #[error("coroutine resumed after completion")]
    Exhausted,
    /// The coroutine was resumed while a previous resumption had not returned.
    #[error("coroutine is already running")]
    Running,
    /// A value was sent to a coroutine that had not been started yet.
    #[error("can't send a value to a just-started coroutine")]
    NotStarted,
    /// A coroutine awaiting a delegation result was resumed without one.
    #[error("coroutine awaiting a result was resumed without a value")]
    MissingResult,
    /// The coroutine body failed.
    #[error("{0}")]
    Failed(E),
}

impl<E> CoroError<E> {
    /// Returns the body failure, if this error carries one.
    pub fn into_failure(self) -> Option<E> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Returns `true` if this error reports a misuse of the coroutine rather
    /// than a failure of its body.
    pub fn is_misuse(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// Process configuration error.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    /// The process configuration was already installed or read.
    #[error("coroutine configuration is already initialized")]
    AlreadyInitialized,
}
