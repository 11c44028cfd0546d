//! Result signals.
//!
//! A coroutine body terminates by returning a [`Signal`] carrying its final
//! value. The driver reads the value with [`Signal::into_value`], which marks
//! the signal delivered. A tracked signal dropped before it was delivered
//! means the body constructed its final value but never returned it, and an
//! error is logged:
//!
//! ```
//! use drone_coro::{log, signal::Signal};
//!
//! let capture = log::capture();
//! drop(Signal::tracked(3));
//! assert_eq!(capture.messages(log::STDERR_PORT).len(), 1);
//! assert_eq!(Signal::tracked(3).into_value(), 3);
//! assert_eq!(capture.messages(log::STDERR_PORT).len(), 1);
//! ```

use crate::config::{self, SignalMode};
use std::fmt;

/// A value type able to represent "no value" and ordered aggregates.
pub trait Payload: Sized {
    /// The value carried by a signal constructed from zero values.
    fn none() -> Self;

    /// The value carried by a signal constructed from several values.
    fn aggregate(values: Vec<Self>) -> Self;
}

/// Final value carrier of a terminating coroutine.
#[must_use = "a result signal does nothing unless returned from a coroutine body"]
pub struct Signal<V> {
    value: V,
    tracker: Option<Tracker>,
}

struct Tracker {
    repr: String,
    delivered: bool,
}

impl<V> Signal<V> {
    /// Creates a signal using the process-wide [`SignalMode`].
    #[inline]
    pub fn new(value: V) -> Self
    where
        V: fmt::Debug,
    {
        Self::with_mode(config::get().signals, value)
    }

    /// Creates a signal using the given strategy.
    pub fn with_mode(mode: SignalMode, value: V) -> Self
    where
        V: fmt::Debug,
    {
        match mode {
            SignalMode::Untracked => Self::untracked(value),
            SignalMode::Tracked => Self::tracked(value),
        }
    }

    /// Creates a lightweight signal without leak detection.
    #[inline]
    pub fn untracked(value: V) -> Self {
        Self { value, tracker: None }
    }

    /// Creates a signal that logs an error if dropped without delivery.
    pub fn tracked(value: V) -> Self
    where
        V: fmt::Debug,
    {
        let repr = format!("{:?}", value);
        Self { value, tracker: Some(Tracker { repr, delivered: false }) }
    }

    /// Returns a reference to the carried value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns `true` if this signal reports being dropped without delivery.
    #[inline]
    pub fn is_tracked(&self) -> bool {
        self.tracker.is_some()
    }

    /// Delivers the signal, returning the carried value.
    #[inline]
    pub fn into_value(self) -> V {
        let Self { value, tracker } = self;
        if let Some(mut tracker) = tracker {
            tracker.delivered = true;
        }
        value
    }
}

impl<V: fmt::Debug> fmt::Debug for Signal<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &self.value)
            .field("tracked", &self.is_tracked())
            .finish()
    }
}

impl Drop for Tracker {
    fn drop(&mut self) {
        if !self.delivered {
            crate::eprintln!("result signal ({}) was constructed but never delivered", self.repr);
        }
    }
}

/// Creates a signal from zero, one, or many values.
///
/// Zero values carry [`Payload::none`], one value is carried as is, several
/// values collapse into [`Payload::aggregate`] in their original order.
pub fn make_signal<V>(mut values: Vec<V>) -> Signal<V>
where
    V: Payload + fmt::Debug,
{
    let value = match values.len() {
        0 => V::none(),
        1 => match values.pop() {
            Some(value) => value,
            None => V::none(),
        },
        _ => V::aggregate(values),
    };
    Signal::new(value)
}

/// Creates a [`Signal`] to return from a coroutine body.
///
/// `ret!()` carries no value, `ret!(x)` carries `x`, and `ret!(a, b, ...)`
/// carries an ordered aggregate.
///
/// # Examples
///
/// ```
/// use drone_coro::{ret, signal::Signal, Value};
///
/// let none: Signal<Value> = ret!();
/// assert_eq!(none.into_value(), Value::None);
/// assert_eq!(ret!(Value::Int(1)).into_value(), Value::Int(1));
/// assert_eq!(
///     ret!(Value::Int(1), Value::from("a")).into_value(),
///     Value::Tuple(vec![Value::Int(1), Value::from("a")]),
/// );
/// ```
#[macro_export]
macro_rules! ret {
    () => {
        $crate::signal::Signal::new($crate::signal::Payload::none())
    };
    ($value:expr $(,)?) => {
        $crate::signal::Signal::new($value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::signal::make_signal(vec![$($value),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log;
    use crate::value::Value;

    #[test]
    fn make_signal_arity() {
        assert_eq!(make_signal::<Value>(vec![]).into_value(), Value::None);
        assert_eq!(make_signal(vec![Value::Int(7)]).into_value(), Value::Int(7));
        assert_eq!(
            make_signal(vec![Value::Int(1), Value::Int(2), Value::Int(3)]).into_value(),
            Value::Tuple(vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        );
    }

    #[test]
    fn untracked_drop_is_silent() {
        let capture = log::capture();
        drop(Signal::untracked(Value::Int(1)));
        assert!(capture.records().is_empty());
    }

    #[test]
    fn tracked_drop_reports_once() {
        let capture = log::capture();
        let signal = Signal::tracked(Value::from("lost"));
        assert!(signal.is_tracked());
        drop(signal);
        let messages = capture.messages(log::STDERR_PORT);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("\"lost\""));
        assert!(messages[0].contains("never delivered"));
    }

    #[test]
    fn tracked_delivery_is_silent() {
        let capture = log::capture();
        let signal = Signal::with_mode(SignalMode::Tracked, Value::Int(5));
        assert_eq!(signal.value(), &Value::Int(5));
        assert_eq!(signal.into_value(), Value::Int(5));
        assert!(capture.records().is_empty());
    }
}
