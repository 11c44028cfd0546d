//! Reference coroutine driver.
//!
//! A [`Task`] drives one coroutine to termination. Whenever the coroutine
//! delegates to a nested coroutine, the nested one is pushed on the task's
//! stack and driven first; its final value is sent back to the delegating
//! coroutine, and its failure is thrown into it. Whenever a coroutine
//! delegates to a [`FutureLike`], the task waits until the future is done.
//!
//! `Task` implements [`Future`], so it can run on any executor:
//!
//! ```
//! use drone_coro::{coroutine_with, Config, CoroutineFn, Task, Value};
//!
//! let add_one: CoroutineFn<i64, Value, String> =
//!     coroutine_with(&Config::new(), "add_one", |n: i64| Value::Int(n + 1));
//! let result = futures::executor::block_on(Task::new(add_one.call(5)));
//! assert_eq!(result, Ok(Value::Int(6)));
//! ```

use crate::coro::{CoroState, Coroutine, Resume, Suspendable};
use crate::delegate::Awaitable;
use crate::error::CoroError;
use crate::future::FutureLike;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

/// A coroutine driver.
///
/// When polled as a [`Future`], a task waiting for a future registers the
/// waker with it through [`FutureLike::register_waker`]. A task whose
/// innermost coroutine suspended without a delegation target asks to be polled
/// again at once.
pub struct Task<V, E> {
    stack: Vec<Coroutine<V, E>>,
    waiting: Option<Box<dyn FutureLike<V, E>>>,
    next: Option<Resume<V, E>>,
}

impl<V, E> Task<V, E> {
    /// Creates a new task driving `coro`.
    #[inline]
    pub fn new(coro: Coroutine<V, E>) -> Self {
        Self { stack: vec![coro], waiting: None, next: None }
    }

    /// Returns the number of coroutines in the delegation chain.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns `true` if the task is waiting for a future.
    #[inline]
    pub fn is_waiting(&self) -> bool {
        self.waiting.is_some()
    }

    /// Returns `true` if the task has terminated.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }

    /// Drives the coroutines until the task terminates, waits for a pending
    /// future, or the innermost coroutine suspends without a delegation
    /// target.
    ///
    /// Stepping a terminated task fails with [`CoroError::Exhausted`].
    pub fn step(&mut self) -> Poll<Result<V, CoroError<E>>> {
        loop {
            let input = match self.waiting.take() {
                Some(fut) => {
                    if !fut.is_done() {
                        self.waiting = Some(fut);
                        return Poll::Pending;
                    }
                    match fut.result() {
                        Some(Ok(value)) => Resume::Send(value),
                        Some(Err(err)) => Resume::Throw(err),
                        None => {
                            self.waiting = Some(fut);
                            return Poll::Pending;
                        }
                    }
                }
                None => self.next.take().unwrap_or(Resume::Next),
            };
            let Some(coro) = self.stack.last_mut() else {
                return Poll::Ready(Err(CoroError::Exhausted));
            };
            match coro.step(input) {
                Ok(CoroState::Yielded(item)) => match item.into_awaitable() {
                    None => return Poll::Pending,
                    Some(Awaitable::Coroutine(nested)) => self.stack.push(nested),
                    Some(Awaitable::Future(fut)) => self.waiting = Some(fut),
                },
                Ok(CoroState::Complete(value)) => {
                    self.stack.pop();
                    if self.stack.is_empty() {
                        return Poll::Ready(Ok(value));
                    }
                    self.next = Some(Resume::Send(value));
                }
                Err(CoroError::Failed(err)) => {
                    self.stack.pop();
                    if self.stack.is_empty() {
                        return Poll::Ready(Err(CoroError::Failed(err)));
                    }
                    self.next = Some(Resume::Throw(err));
                }
                Err(err) => {
                    self.stack.clear();
                    return Poll::Ready(Err(err));
                }
            }
        }
    }
}

impl<V, E> Unpin for Task<V, E> {}

impl<V, E> Future for Task<V, E> {
    type Output = Result<V, CoroError<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let task = self.get_mut();
        let poll = task.step();
        if poll.is_pending() {
            match &task.waiting {
                Some(fut) => fut.register_waker(cx.waker()),
                None => cx.waker().wake_by_ref(),
            }
        }
        poll
    }
}
