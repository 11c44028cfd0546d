//! Coroutine classification.
//!
//! A coroutine is recognized by its representation, enumerated by
//! [`Kind`], rather than by inspecting types at run time.

use crate::coro::{Coroutine, DebugWrapper, Generator, Interop, Kind};
use crate::delegate::{Awaitable, Tagged, Yielded};
use crate::future::Deferred;
use crate::marker::CoroutineFn;
use crate::value::Value;
use std::rc::Rc;

/// Objects that may be coroutines.
pub trait Classify {
    /// Returns the coroutine representation of this object, or `None` if it
    /// isn't a coroutine.
    fn coroutine_kind(&self) -> Option<Kind>;
}

/// Callables that may be coroutine functions.
pub trait CoroutineFunction {
    /// Returns `true` if this callable was produced by the marking step.
    fn is_coroutine_function(&self) -> bool;
}

/// Returns `true` if `obj` is a coroutine in any representation.
///
/// # Examples
///
/// ```
/// use drone_coro::delegate::Awaitable;
/// use drone_coro::{is_coroutine, Coroutine, Deferred, Value};
///
/// let coro = Coroutine::<Value, String>::from_future("ready", async { Ok(Value::None) });
/// assert!(is_coroutine(&coro));
/// assert!(!is_coroutine(&Awaitable::from(Deferred::<Value, String>::new())));
/// ```
#[inline]
pub fn is_coroutine<T: Classify + ?Sized>(obj: &T) -> bool {
    obj.coroutine_kind().is_some()
}

/// Returns `true` if `f` was produced by [`coroutine`](crate::coroutine) or
/// [`coroutine_gen`](crate::coroutine_gen).
#[inline]
pub fn is_coroutine_function<F: CoroutineFunction + ?Sized>(f: &F) -> bool {
    f.is_coroutine_function()
}

impl<V, E> Classify for Coroutine<V, E> {
    #[inline]
    fn coroutine_kind(&self) -> Option<Kind> {
        Some(self.kind())
    }
}

impl<V, E> Classify for Generator<V, E> {
    #[inline]
    fn coroutine_kind(&self) -> Option<Kind> {
        Some(Kind::Native)
    }
}

impl<V, E> Classify for DebugWrapper<V, E> {
    #[inline]
    fn coroutine_kind(&self) -> Option<Kind> {
        Some(Kind::Debug)
    }
}

impl<V, E> Classify for Interop<V, E> {
    #[inline]
    fn coroutine_kind(&self) -> Option<Kind> {
        Some(Kind::Interop)
    }
}

impl<V, E> Classify for Awaitable<V, E> {
    #[inline]
    fn coroutine_kind(&self) -> Option<Kind> {
        match self {
            Self::Future(_) => None,
            Self::Coroutine(coro) => coro.coroutine_kind(),
        }
    }
}

/// A delegation tag is a marker around a target, never a coroutine itself.
impl<V, E> Classify for Tagged<V, E> {
    #[inline]
    fn coroutine_kind(&self) -> Option<Kind> {
        None
    }
}

impl<V, E> Classify for Yielded<V, E> {
    #[inline]
    fn coroutine_kind(&self) -> Option<Kind> {
        match self {
            Self::Bare(obj) => obj.coroutine_kind(),
            Self::Nothing | Self::Tagged(_) => None,
        }
    }
}

impl<V, E> Classify for Deferred<V, E> {
    #[inline]
    fn coroutine_kind(&self) -> Option<Kind> {
        None
    }
}

impl Classify for Value {
    #[inline]
    fn coroutine_kind(&self) -> Option<Kind> {
        None
    }
}

impl<A, V, E> CoroutineFunction for CoroutineFn<A, V, E> {
    #[inline]
    fn is_coroutine_function(&self) -> bool {
        true
    }
}

impl<A, R> CoroutineFunction for fn(A) -> R {
    #[inline]
    fn is_coroutine_function(&self) -> bool {
        false
    }
}

impl<A, R> CoroutineFunction for dyn Fn(A) -> R {
    #[inline]
    fn is_coroutine_function(&self) -> bool {
        false
    }
}

impl<T: CoroutineFunction + ?Sized> CoroutineFunction for Box<T> {
    #[inline]
    fn is_coroutine_function(&self) -> bool {
        (**self).is_coroutine_function()
    }
}

impl<T: CoroutineFunction + ?Sized> CoroutineFunction for Rc<T> {
    #[inline]
    fn is_coroutine_function(&self) -> bool {
        (**self).is_coroutine_function()
    }
}
