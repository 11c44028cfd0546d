//! Coroutine marking.
//!
//! [`coroutine`] turns a plain function into a coroutine function: calling
//! it produces a [`Coroutine`] that, when first resumed, invokes the function.
//! If the function returns an awaitable, the coroutine suspends once,
//! delegating to it, and terminates with the value the awaitable resolves to.
//! Otherwise the coroutine terminates with the returned value right away.
//!
//! [`coroutine_gen`] marks a function that already returns a suspending
//! [`Routine`]; the routine is used as is.
//!
//! Debug mode is captured when the function is marked. Every call of a
//! function marked in debug mode returns a [`Coroutine::Debug`], which logs
//! an error if dropped before it was ever resumed.
//!
//! # Examples
//!
//! ```
//! use drone_coro::{coroutine_with, Config, CoroState, CoroutineFn, Suspendable, Value};
//!
//! let add_one: CoroutineFn<i64, Value, String> =
//!     coroutine_with(&Config::new(), "add_one", |n: i64| Value::Int(n + 1));
//! let mut coro = add_one.call(5);
//! assert!(matches!(coro.resume(), Ok(CoroState::Complete(Value::Int(6)))));
//! ```

use crate::config::{self, Config};
use crate::coro::{Code, Coroutine, DebugWrapper, Generator, Resume, Routine, Step};
use crate::delegate::{delegate_with, Awaitable};
use crate::error::CoroError;
use crate::future::Deferred;
use crate::signal::Signal;
use crate::value::Value;
use std::fmt;
use std::mem;
use std::rc::Rc;

/// What a plain coroutine function produces when invoked.
pub enum Outcome<V, E> {
    /// A plain value. The coroutine terminates with it.
    Ready(V),
    /// An awaitable. The coroutine delegates to it and terminates with the
    /// value it resolves to.
    Await(Awaitable<V, E>),
}

/// Conversion of a plain function's return value into an [`Outcome`].
pub trait IntoOutcome<V, E> {
    /// Performs the conversion. An error is raised inside the coroutine.
    fn into_outcome(self) -> Result<Outcome<V, E>, CoroError<E>>;
}

/// A marked coroutine function.
///
/// Calling it produces a new single-use [`Coroutine`]. Cloning produces
/// another handle to the same function.
pub struct CoroutineFn<A, V, E> {
    code: Code,
    debug: bool,
    factory: Rc<dyn Fn(A) -> Box<dyn Routine<V, E>>>,
}

struct Trampoline<V, E> {
    debug: bool,
    state: TrampolineState<V, E>,
}

type Body<V, E> = Box<dyn FnOnce() -> Result<Outcome<V, E>, CoroError<E>>>;

enum TrampolineState<V, E> {
    Init(Body<V, E>),
    Awaiting,
    Done,
}

/// Marks a plain function as a coroutine function, using the process
/// configuration.
///
/// The function returns anything convertible with [`IntoOutcome`]: an
/// awaitable, a [`Value`], or a `Result` of those. A plain value of any other
/// type is returned through [`ready`], because only [`Value`] converts on its
/// own.
#[track_caller]
pub fn coroutine<A, V, E, F, R>(name: &'static str, f: F) -> CoroutineFn<A, V, E>
where
    A: 'static,
    V: 'static,
    E: 'static,
    F: Fn(A) -> R + 'static,
    R: IntoOutcome<V, E>,
{
    coroutine_with(config::get(), name, f)
}

/// Marks a plain function as a coroutine function, using `config`.
#[track_caller]
pub fn coroutine_with<A, V, E, F, R>(config: &Config, name: &'static str, f: F) -> CoroutineFn<A, V, E>
where
    A: 'static,
    V: 'static,
    E: 'static,
    F: Fn(A) -> R + 'static,
    R: IntoOutcome<V, E>,
{
    let debug = config.debug;
    let f = Rc::new(f);
    CoroutineFn::new(Code::new(name), debug, move |args: A| -> Box<dyn Routine<V, E>> {
        let f = Rc::clone(&f);
        Box::new(Trampoline::new(debug, Box::new(move || (*f)(args).into_outcome())))
    })
}

/// Marks a function returning a [`Routine`] as a coroutine function, using
/// the process configuration.
#[track_caller]
pub fn coroutine_gen<A, V, E, F, G>(name: &'static str, f: F) -> CoroutineFn<A, V, E>
where
    F: Fn(A) -> G + 'static,
    G: Routine<V, E> + 'static,
{
    coroutine_gen_with(config::get(), name, f)
}

/// Marks a function returning a [`Routine`] as a coroutine function, using
/// `config`.
#[track_caller]
pub fn coroutine_gen_with<A, V, E, F, G>(
    config: &Config,
    name: &'static str,
    f: F,
) -> CoroutineFn<A, V, E>
where
    F: Fn(A) -> G + 'static,
    G: Routine<V, E> + 'static,
{
    CoroutineFn::new(Code::new(name), config.debug, move |args: A| -> Box<dyn Routine<V, E>> {
        Box::new(f(args))
    })
}

/// Wraps a plain value returned by a coroutine function.
///
/// # Examples
///
/// ```
/// use drone_coro::marker::ready;
/// use drone_coro::{coroutine_with, Config, CoroState, CoroutineFn, Suspendable};
///
/// let add_one: CoroutineFn<i64, i64, String> =
///     coroutine_with(&Config::new(), "add_one", |n: i64| ready(n + 1));
/// assert!(matches!(add_one.call(5).resume(), Ok(CoroState::Complete(6))));
/// ```
#[inline]
pub fn ready<V, E>(value: V) -> Outcome<V, E> {
    Outcome::Ready(value)
}

impl<A, V, E> CoroutineFn<A, V, E> {
    fn new<F>(code: Code, debug: bool, factory: F) -> Self
    where
        F: Fn(A) -> Box<dyn Routine<V, E>> + 'static,
    {
        Self { code, debug, factory: Rc::new(factory) }
    }

    /// Creates a new coroutine for `args`.
    ///
    /// The coroutine body doesn't run until the coroutine is resumed.
    #[track_caller]
    pub fn call(&self, args: A) -> Coroutine<V, E> {
        let gen = Generator::from_boxed(self.code, (self.factory)(args));
        if self.debug {
            Coroutine::Debug(DebugWrapper::new(gen, self.code))
        } else {
            Coroutine::Native(gen)
        }
    }

    /// Returns the display name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.code.name()
    }

    /// Returns the code identity shared by all coroutines of this function.
    #[inline]
    pub fn code(&self) -> &Code {
        &self.code
    }

    /// Returns `true` if the function was marked in debug mode.
    #[inline]
    pub fn is_debug(&self) -> bool {
        self.debug
    }
}

impl<A, V, E> Clone for CoroutineFn<A, V, E> {
    fn clone(&self) -> Self {
        Self { code: self.code, debug: self.debug, factory: Rc::clone(&self.factory) }
    }
}

impl<A, V, E> fmt::Debug for CoroutineFn<A, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoroutineFn")
            .field("code", &format_args!("{}", self.code))
            .field("debug", &self.debug)
            .finish()
    }
}

impl<V, E> Trampoline<V, E> {
    fn new(debug: bool, body: Body<V, E>) -> Self {
        Self { debug, state: TrampolineState::Init(body) }
    }
}

impl<V, E> Routine<V, E> for Trampoline<V, E> {
    fn resume(&mut self, input: Resume<V, E>) -> Result<Step<V, E>, CoroError<E>> {
        match (mem::replace(&mut self.state, TrampolineState::Done), input) {
            (TrampolineState::Done, _) => Err(CoroError::Exhausted),
            (_, Resume::Throw(err)) => Err(CoroError::Failed(err)),
            (TrampolineState::Init(body), Resume::Next) => match body()? {
                Outcome::Ready(value) => Ok(Step::Return(Signal::untracked(value))),
                Outcome::Await(obj) => {
                    self.state = TrampolineState::Awaiting;
                    Ok(Step::Yield(delegate_with(self.debug, obj.into())))
                }
            },
            (TrampolineState::Init(_), Resume::Send(_)) => Err(CoroError::NotStarted),
            (TrampolineState::Awaiting, Resume::Send(value)) => {
                Ok(Step::Return(Signal::untracked(value)))
            }
            (TrampolineState::Awaiting, Resume::Next) => Err(CoroError::MissingResult),
        }
    }
}

impl<V, E> From<Awaitable<V, E>> for Outcome<V, E> {
    #[inline]
    fn from(obj: Awaitable<V, E>) -> Self {
        Self::Await(obj)
    }
}

impl<V, E> IntoOutcome<V, E> for Outcome<V, E> {
    #[inline]
    fn into_outcome(self) -> Result<Outcome<V, E>, CoroError<E>> {
        Ok(self)
    }
}

impl<V, E> IntoOutcome<V, E> for Result<Outcome<V, E>, E> {
    #[inline]
    fn into_outcome(self) -> Result<Outcome<V, E>, CoroError<E>> {
        self.map_err(CoroError::Failed)
    }
}

impl<V, E> IntoOutcome<V, E> for Awaitable<V, E> {
    #[inline]
    fn into_outcome(self) -> Result<Outcome<V, E>, CoroError<E>> {
        Ok(Outcome::Await(self))
    }
}

impl<V, E> IntoOutcome<V, E> for Coroutine<V, E> {
    #[inline]
    fn into_outcome(self) -> Result<Outcome<V, E>, CoroError<E>> {
        Ok(Outcome::Await(Awaitable::Coroutine(self)))
    }
}

impl<V, E> IntoOutcome<V, E> for Deferred<V, E>
where
    V: Clone + 'static,
    E: Clone + 'static,
{
    #[inline]
    fn into_outcome(self) -> Result<Outcome<V, E>, CoroError<E>> {
        Ok(Outcome::Await(self.into()))
    }
}

impl<E> IntoOutcome<Value, E> for Value {
    #[inline]
    fn into_outcome(self) -> Result<Outcome<Value, E>, CoroError<E>> {
        Ok(Outcome::Ready(self))
    }
}

impl<E> IntoOutcome<Value, E> for Result<Value, E> {
    #[inline]
    fn into_outcome(self) -> Result<Outcome<Value, E>, CoroError<E>> {
        self.map(Outcome::Ready).map_err(CoroError::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coro::Suspendable;
    use crate::CoroState;

    #[test]
    fn body_runs_lazily() {
        let calls = Rc::new(std::cell::Cell::new(0));
        let counter = Rc::clone(&calls);
        let double: CoroutineFn<i64, Value, String> =
            coroutine_with(&Config::new(), "double", move |n: i64| {
                counter.set(counter.get() + 1);
                Value::Int(n * 2)
            });
        let mut coro = double.call(4);
        assert_eq!(calls.get(), 0);
        assert!(matches!(coro.resume(), Ok(CoroState::Complete(Value::Int(8)))));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn awaiting_without_result() {
        let wait: CoroutineFn<(), Value, String> =
            coroutine_with(&Config::new(), "wait", |()| Deferred::<Value, String>::new());
        let mut coro = wait.call(());
        assert!(matches!(coro.resume(), Ok(CoroState::Yielded(_))));
        assert!(matches!(coro.resume(), Err(CoroError::MissingResult)));
        assert!(matches!(coro.resume(), Err(CoroError::Exhausted)));
    }

    #[test]
    fn body_failure_propagates() {
        let fail: CoroutineFn<(), Value, String> =
            coroutine_with(&Config::new(), "fail", |()| Err::<Value, _>("boom".to_string()));
        let mut coro = fail.call(());
        assert!(matches!(coro.resume(), Err(CoroError::Failed(err)) if err == "boom"));
        assert!(coro.is_terminated());
    }
}
