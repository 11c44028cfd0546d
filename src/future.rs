//! Deferred results.
//!
//! The future state machine belongs to the scheduler. This module only
//! defines the boundary coroutines rely on, [`FutureLike`], and a minimal
//! single-threaded implementation, [`Deferred`].

use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;
use std::task::Waker;

/// A deferred result a coroutine can wait for.
pub trait FutureLike<V, E> {
    /// Returns `true` if the result is available.
    fn is_done(&self) -> bool;

    /// Returns the result, or `None` if it is not available yet.
    fn result(&self) -> Option<Result<V, E>>;

    /// Completes the future with a failure.
    fn set_exception(&self, err: E);

    /// Registers `waker` to be woken when the result becomes available.
    ///
    /// The default implementation wakes `waker` at once, so a driver keeps
    /// polling a future that can't notify it.
    fn register_waker(&self, waker: &Waker) {
        waker.wake_by_ref();
    }
}

/// A single-threaded deferred result.
///
/// Cloning produces another handle to the same result. Completing the
/// result wakes the waker registered last, if any.
pub struct Deferred<V, E> {
    state: Rc<RefCell<State<V, E>>>,
}

struct State<V, E> {
    result: Option<Result<V, E>>,
    waker: Option<Waker>,
}

impl<V, E> Deferred<V, E> {
    /// Creates a new pending result.
    #[inline]
    pub fn new() -> Self {
        Self { state: Rc::new(RefCell::new(State { result: None, waker: None })) }
    }

    /// Creates an already completed result.
    #[inline]
    pub fn ready(value: V) -> Self {
        Self { state: Rc::new(RefCell::new(State { result: Some(Ok(value)), waker: None })) }
    }

    /// Completes the future with `value`.
    ///
    /// Returns `false` and leaves the result untouched if the future is
    /// already done.
    pub fn set_result(&self, value: V) -> bool {
        self.complete(Ok(value))
    }

    fn complete(&self, result: Result<V, E>) -> bool {
        let waker = {
            let mut state = self.state.borrow_mut();
            if state.result.is_some() {
                return false;
            }
            state.result = Some(result);
            mem::take(&mut state.waker)
        };
        if let Some(waker) = waker {
            waker.wake();
        }
        true
    }
}

impl<V, E> Clone for Deferred<V, E> {
    #[inline]
    fn clone(&self) -> Self {
        Self { state: Rc::clone(&self.state) }
    }
}

impl<V, E> Default for Deferred<V, E> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, E: Clone> FutureLike<V, E> for Deferred<V, E> {
    #[inline]
    fn is_done(&self) -> bool {
        self.state.borrow().result.is_some()
    }

    #[inline]
    fn result(&self) -> Option<Result<V, E>> {
        self.state.borrow().result.clone()
    }

    fn set_exception(&self, err: E) {
        self.complete(Err(err));
    }

    fn register_waker(&self, waker: &Waker) {
        let mut state = self.state.borrow_mut();
        if state.result.is_some() {
            drop(state);
            waker.wake_by_ref();
        } else if !state.waker.as_ref().map_or(false, |old| old.will_wake(waker)) {
            state.waker = Some(waker.clone());
        }
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for Deferred<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state.borrow().result {
            None => f.write_str("Deferred(<pending>)"),
            Some(result) => f.debug_tuple("Deferred").field(result).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::task::{waker, ArcWake};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn complete_once() {
        let fut = Deferred::<u32, String>::new();
        let other = fut.clone();
        assert!(!fut.is_done());
        assert_eq!(fut.result(), None);
        assert!(other.set_result(1));
        assert!(!fut.set_result(2));
        fut.set_exception("late".into());
        assert!(fut.is_done());
        assert_eq!(fut.result(), Some(Ok(1)));
    }

    struct Counter(AtomicUsize);

    impl ArcWake for Counter {
        fn wake_by_ref(arc_self: &Arc<Self>) {
            arc_self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn completion_wakes() {
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let waker = waker(Arc::clone(&counter));
        let fut = Deferred::<u32, String>::new();
        fut.register_waker(&waker);
        fut.register_waker(&waker);
        assert_eq!(counter.0.load(Ordering::SeqCst), 0);
        assert!(fut.set_result(1));
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        assert!(!fut.set_result(2));
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
        fut.register_waker(&waker);
        assert_eq!(counter.0.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn exception() {
        let fut = Deferred::<u32, String>::new();
        fut.set_exception("boom".into());
        assert_eq!(fut.result(), Some(Err("boom".to_string())));
    }
}
