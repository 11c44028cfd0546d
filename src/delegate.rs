//! Delegation targets.
//!
//! A coroutine body suspends by yielding either nothing (a bare reschedule) or
//! an [`Awaitable`] to delegate to. In debug mode the awaitable is wrapped into
//! a [`Tagged`] marker so a driver can tell it was yielded deliberately; in
//! non-debug mode [`delegate`] is the identity.

use crate::config;
use crate::coro::Coroutine;
use crate::future::{Deferred, FutureLike};
use std::fmt;

/// An object a coroutine can delegate to.
pub enum Awaitable<V, E> {
    /// A deferred result. The driver feeds its result back once it is done.
    Future(Box<dyn FutureLike<V, E>>),
    /// A nested coroutine. The driver runs it to termination and feeds its
    /// final value back.
    Coroutine(Coroutine<V, E>),
}

/// Delegation tag wrapping exactly one awaitable.
///
/// A tag never contains another tag.
pub struct Tagged<V, E> {
    obj: Awaitable<V, E>,
}

/// An item yielded by a suspending coroutine.
pub enum Yielded<V, E> {
    /// A bare suspension. The driver resumes the coroutine again later.
    Nothing,
    /// An untagged delegation target.
    Bare(Awaitable<V, E>),
    /// A tagged delegation target.
    Tagged(Tagged<V, E>),
}

/// Marks `obj` as a delegation target according to the process configuration.
///
/// Returns `obj` unchanged when debug mode is off. Otherwise returns it as
/// [`Yielded::Tagged`], unwrapping an already tagged `obj` first.
///
/// # Examples
///
/// ```
/// use drone_coro::{delegate::Yielded, Config, Deferred, Value};
///
/// let config = Config { debug: true, ..Config::new() };
/// let fut = Deferred::<Value, String>::new();
/// let once = config.delegate(fut.clone());
/// let twice = config.delegate(config.delegate(fut));
/// assert!(once.is_tagged() && twice.is_tagged());
/// ```
#[inline]
pub fn delegate<V, E>(obj: impl Into<Yielded<V, E>>) -> Yielded<V, E> {
    config::get().delegate(obj)
}

pub(crate) fn delegate_with<V, E>(debug: bool, obj: Yielded<V, E>) -> Yielded<V, E> {
    if !debug {
        return obj;
    }
    match obj {
        Yielded::Nothing => Yielded::Nothing,
        Yielded::Bare(obj) => Yielded::Tagged(Tagged { obj }),
        Yielded::Tagged(Tagged { obj }) => Yielded::Tagged(Tagged { obj }),
    }
}

impl<V, E> Awaitable<V, E> {
    /// Returns `true` if this is a nested coroutine.
    #[inline]
    pub fn is_coroutine(&self) -> bool {
        matches!(self, Self::Coroutine(_))
    }

    /// Returns `true` if this is a deferred result.
    #[inline]
    pub fn is_future(&self) -> bool {
        matches!(self, Self::Future(_))
    }
}

impl<V, E> Tagged<V, E> {
    /// Returns a reference to the wrapped awaitable.
    #[inline]
    pub fn get(&self) -> &Awaitable<V, E> {
        &self.obj
    }

    /// Unwraps the awaitable.
    #[inline]
    pub fn into_inner(self) -> Awaitable<V, E> {
        self.obj
    }
}

impl<V, E> Yielded<V, E> {
    /// Returns a reference to the delegation target, tagged or not.
    pub fn awaitable(&self) -> Option<&Awaitable<V, E>> {
        match self {
            Self::Nothing => None,
            Self::Bare(obj) => Some(obj),
            Self::Tagged(tagged) => Some(tagged.get()),
        }
    }

    /// Unwraps the delegation target, tagged or not.
    pub fn into_awaitable(self) -> Option<Awaitable<V, E>> {
        match self {
            Self::Nothing => None,
            Self::Bare(obj) => Some(obj),
            Self::Tagged(tagged) => Some(tagged.into_inner()),
        }
    }

    /// Returns `true` if the target is wrapped into a delegation tag.
    #[inline]
    pub fn is_tagged(&self) -> bool {
        matches!(self, Self::Tagged(_))
    }

    /// Returns `true` if this is a bare suspension.
    #[inline]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

impl<V, E> From<Coroutine<V, E>> for Awaitable<V, E> {
    #[inline]
    fn from(coro: Coroutine<V, E>) -> Self {
        Self::Coroutine(coro)
    }
}

impl<V, E> From<Deferred<V, E>> for Awaitable<V, E>
where
    V: Clone + 'static,
    E: Clone + 'static,
{
    #[inline]
    fn from(fut: Deferred<V, E>) -> Self {
        Self::Future(Box::new(fut))
    }
}

impl<V, E> From<Awaitable<V, E>> for Yielded<V, E> {
    #[inline]
    fn from(obj: Awaitable<V, E>) -> Self {
        Self::Bare(obj)
    }
}

impl<V, E> From<Tagged<V, E>> for Yielded<V, E> {
    #[inline]
    fn from(tagged: Tagged<V, E>) -> Self {
        Self::Tagged(tagged)
    }
}

impl<V, E> From<Coroutine<V, E>> for Yielded<V, E> {
    #[inline]
    fn from(coro: Coroutine<V, E>) -> Self {
        Self::Bare(coro.into())
    }
}

impl<V, E> From<Deferred<V, E>> for Yielded<V, E>
where
    V: Clone + 'static,
    E: Clone + 'static,
{
    #[inline]
    fn from(fut: Deferred<V, E>) -> Self {
        Self::Bare(fut.into())
    }
}

impl<V, E> fmt::Debug for Awaitable<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Future(_) => f.write_str("Future(..)"),
            Self::Coroutine(coro) => f.debug_tuple("Coroutine").field(coro).finish(),
        }
    }
}

impl<V, E> fmt::Debug for Tagged<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tagged").field(&self.obj).finish()
    }
}

impl<V, E> fmt::Debug for Yielded<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nothing => f.write_str("Nothing"),
            Self::Bare(obj) => f.debug_tuple("Bare").field(obj).finish(),
            Self::Tagged(tagged) => fmt::Debug::fmt(tagged, f),
        }
    }
}
