//! Suspendable computations.
//!
//! A coroutine executes until it either suspends, yielding one [`Yielded`]
//! item, or terminates, producing exactly one final value or failing. Every
//! coroutine is single-use: once terminated it can't be resumed again.
//!
//! Coroutines come in three representations, enumerated by [`Kind`]:
//!
//! * [`Generator`] - a [`Routine`] state machine;
//! * [`DebugWrapper`] - a generator instrumented to report being dropped
//!   before its first resumption;
//! * [`Interop`] - a native Rust future adapted to the coroutine protocol.
//!
//! [`Coroutine`] unites them behind the [`Suspendable`] trait.

mod debug;
mod generator;
mod interop;

pub use self::debug::DebugWrapper;
pub use self::generator::{routine, Generator, RoutineFn};
pub use self::interop::Interop;

use crate::delegate::Yielded;
use crate::error::CoroError;
use crate::signal::Signal;
use core::future::Future;
use std::fmt;
use std::panic::Location;

/// An input a coroutine is resumed with.
pub enum Resume<V, E> {
    /// Resumes without a value.
    Next,
    /// Resumes with a value, usually the result of the delegation target the
    /// coroutine suspended on.
    Send(V),
    /// Raises a failure at the suspension point.
    Throw(E),
}

/// The outcome of a [`Routine`] step.
pub enum Step<V, E> {
    /// The routine suspends.
    Yield(Yielded<V, E>),
    /// The routine terminates with a result signal.
    Return(Signal<V>),
}

/// The result of a coroutine resumption.
#[derive(Debug)]
pub enum CoroState<Y, R> {
    /// The coroutine suspended with a value.
    Yielded(Y),
    /// The coroutine completed with a return value.
    Complete(R),
}

/// The result of [`Suspendable::step`].
pub type StepResult<V, E> = Result<CoroState<Yielded<V, E>, V>, CoroError<E>>;

/// Execution position of a coroutine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Position {
    /// Created and never resumed.
    Created,
    /// Suspended at a yield.
    Suspended,
    /// Inside a resumption.
    Running,
    /// Completed or failed.
    Terminated,
}

/// Representation of a coroutine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    /// A [`Generator`].
    Native,
    /// A [`DebugWrapper`].
    Debug,
    /// An [`Interop`] future.
    Interop,
}

/// Identity of the code a coroutine runs: a display name and the place it
/// was defined at.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Code {
    name: &'static str,
    location: &'static Location<'static>,
}

/// A coroutine body written as an explicit state machine.
///
/// Each call to [`resume`](Routine::resume) runs the body until its next
/// suspension point. The body terminates by returning [`Step::Return`] with a
/// [`Signal`], or fails by returning an error, which the driver receives
/// unchanged.
pub trait Routine<V, E> {
    /// Runs the body until the next suspension point.
    fn resume(&mut self, input: Resume<V, E>) -> Result<Step<V, E>, CoroError<E>>;

    /// Called when a suspended coroutine is closed.
    fn close(&mut self) -> Result<(), CoroError<E>> {
        Ok(())
    }
}

/// The resume/send/throw/close contract a driver uses.
pub trait Suspendable<V, E> {
    /// Resumes the coroutine with `input`.
    fn step(&mut self, input: Resume<V, E>) -> StepResult<V, E>;

    /// Terminates the coroutine.
    ///
    /// Closing a coroutine that was never started or already terminated is a
    /// no-op.
    fn close(&mut self) -> Result<(), CoroError<E>>;

    /// Returns the current execution position.
    fn position(&self) -> Position;

    /// Returns the identity of the code this coroutine runs.
    fn code(&self) -> &Code;

    /// Returns `true` if the coroutine is inside a resumption.
    #[inline]
    fn is_running(&self) -> bool {
        self.position() == Position::Running
    }

    /// Returns `true` if the coroutine can't be resumed anymore.
    #[inline]
    fn is_terminated(&self) -> bool {
        self.position() == Position::Terminated
    }

    /// Resumes the coroutine without a value.
    #[inline]
    fn resume(&mut self) -> StepResult<V, E> {
        self.step(Resume::Next)
    }

    /// Resumes the coroutine with `value`.
    #[inline]
    fn send(&mut self, value: V) -> StepResult<V, E> {
        self.step(Resume::Send(value))
    }

    /// Raises `err` at the suspension point of the coroutine.
    #[inline]
    fn throw(&mut self, err: E) -> StepResult<V, E> {
        self.step(Resume::Throw(err))
    }
}

/// A coroutine in any of its representations.
pub enum Coroutine<V, E> {
    /// A routine state machine.
    Native(Generator<V, E>),
    /// A routine state machine with never-driven diagnostics.
    Debug(DebugWrapper<V, E>),
    /// A native future.
    Interop(Interop<V, E>),
}

impl Code {
    /// Creates a code identity defined at the caller's location.
    #[track_caller]
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self { name, location: Location::caller() }
    }

    /// Returns the display name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the definition site.
    #[inline]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}() at {}", self.name, self.location)
    }
}

impl<V, E> Coroutine<V, E> {
    /// Creates a native coroutine running `routine`.
    #[track_caller]
    pub fn new<R>(name: &'static str, routine: R) -> Self
    where
        R: Routine<V, E> + 'static,
    {
        Self::Native(Generator::from_boxed(Code::new(name), Box::new(routine)))
    }

    /// Adapts a native future.
    #[track_caller]
    pub fn from_future<F>(name: &'static str, fut: F) -> Self
    where
        F: Future<Output = Result<V, E>> + 'static,
    {
        Self::Interop(Interop::from_boxed(Code::new(name), Box::pin(fut)))
    }

    /// Returns the representation of this coroutine.
    #[inline]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Native(_) => Kind::Native,
            Self::Debug(_) => Kind::Debug,
            Self::Interop(_) => Kind::Interop,
        }
    }
}

impl<V, E> Suspendable<V, E> for Coroutine<V, E> {
    #[inline]
    fn step(&mut self, input: Resume<V, E>) -> StepResult<V, E> {
        match self {
            Self::Native(gen) => gen.step(input),
            Self::Debug(wrapper) => wrapper.step(input),
            Self::Interop(interop) => interop.step(input),
        }
    }

    #[inline]
    fn close(&mut self) -> Result<(), CoroError<E>> {
        match self {
            Self::Native(gen) => gen.close(),
            Self::Debug(wrapper) => wrapper.close(),
            Self::Interop(interop) => interop.close(),
        }
    }

    #[inline]
    fn position(&self) -> Position {
        match self {
            Self::Native(gen) => gen.position(),
            Self::Debug(wrapper) => wrapper.position(),
            Self::Interop(interop) => interop.position(),
        }
    }

    #[inline]
    fn code(&self) -> &Code {
        match self {
            Self::Native(gen) => gen.code(),
            Self::Debug(wrapper) => wrapper.code(),
            Self::Interop(interop) => interop.code(),
        }
    }
}

impl<V, E> fmt::Debug for Coroutine<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coroutine")
            .field("kind", &self.kind())
            .field("code", &format_args!("{}", self.code()))
            .field("position", &self.position())
            .finish()
    }
}
