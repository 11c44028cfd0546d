use crate::coro::{Code, CoroState, Position, Resume, StepResult, Suspendable};
use crate::delegate::Yielded;
use crate::error::CoroError;
use futures::future::{FutureExt, LocalBoxFuture};
use futures::task::noop_waker_ref;
use std::fmt;
use std::task::{Context, Poll};

/// A native future adapted to the coroutine protocol.
///
/// Each resumption polls the future once. A pending future suspends with
/// [`Yielded::Nothing`], so the driver resumes it again later. Values sent in
/// are ignored because a future has no way to receive them. Throwing into the
/// coroutine drops the future and re-raises the failure.
pub struct Interop<V, E> {
    fut: Option<LocalBoxFuture<'static, Result<V, E>>>,
    position: Position,
    code: Code,
}

impl<V, E> Interop<V, E> {
    /// Creates a new adapter for a boxed future.
    #[inline]
    pub fn from_boxed(code: Code, fut: LocalBoxFuture<'static, Result<V, E>>) -> Self {
        Self { fut: Some(fut), position: Position::Created, code }
    }

    fn finish(&mut self) {
        self.fut = None;
        self.position = Position::Terminated;
    }
}

impl<V, E> Suspendable<V, E> for Interop<V, E> {
    fn step(&mut self, input: Resume<V, E>) -> StepResult<V, E> {
        match (self.position, input) {
            (Position::Running, _) => return Err(CoroError::Running),
            (Position::Terminated, Resume::Throw(err)) => return Err(CoroError::Failed(err)),
            (Position::Terminated, _) => return Err(CoroError::Exhausted),
            (Position::Created, Resume::Send(_)) => return Err(CoroError::NotStarted),
            (_, Resume::Throw(err)) => {
                self.finish();
                return Err(CoroError::Failed(err));
            }
            (Position::Created | Position::Suspended, Resume::Next | Resume::Send(_)) => {}
        }
        let Some(fut) = self.fut.as_mut() else {
            return Err(CoroError::Exhausted);
        };
        self.position = Position::Running;
        let mut cx = Context::from_waker(noop_waker_ref());
        match fut.poll_unpin(&mut cx) {
            Poll::Pending => {
                self.position = Position::Suspended;
                Ok(CoroState::Yielded(Yielded::Nothing))
            }
            Poll::Ready(Ok(value)) => {
                self.finish();
                Ok(CoroState::Complete(value))
            }
            Poll::Ready(Err(err)) => {
                self.finish();
                Err(CoroError::Failed(err))
            }
        }
    }

    fn close(&mut self) -> Result<(), CoroError<E>> {
        if self.position == Position::Running {
            return Err(CoroError::Running);
        }
        self.finish();
        Ok(())
    }

    #[inline]
    fn position(&self) -> Position {
        self.position
    }

    #[inline]
    fn code(&self) -> &Code {
        &self.code
    }
}

impl<V, E> fmt::Debug for Interop<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interop")
            .field("code", &format_args!("{}", self.code))
            .field("position", &self.position)
            .finish()
    }
}
