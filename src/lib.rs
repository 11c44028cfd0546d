//! Cooperative coroutines for Drone.
//!
//! This crate lets suspendable computations be driven uniformly by a
//! scheduler that also understands deferred results. A coroutine either
//! suspends on a future ("yield a future and wait for it"), delegates to
//! another coroutine ("yield a coroutine and receive its final value"), or
//! terminates with a [`Signal`](signal::Signal) carrying its final value.
//!
//! * [`coroutine`] and [`coroutine_gen`] mark functions as coroutine
//!   functions. Plain functions get a synthesized trampoline.
//! * [`Signal`](signal::Signal) and [`ret!`] carry final values out of
//!   coroutine bodies.
//! * [`delegate`](delegate()) tags delegation targets in debug mode.
//! * [`DebugWrapper`](coro::DebugWrapper) reports coroutines dropped before
//!   they were ever resumed.
//! * [`is_coroutine`] and [`is_coroutine_function`] classify objects.
//! * [`Task`] is a reference driver implementing [`Future`].
//!
//! Debug mode and the result signal strategy come from the process
//! [configuration](config).
//!
//! # Examples
//!
//! ```
//! use drone_coro::{coroutine_with, Config, CoroutineFn, Deferred, Task, Value};
//! use std::task::Poll;
//!
//! let relay: CoroutineFn<Deferred<Value, String>, Value, String> =
//!     coroutine_with(&Config::new(), "relay", |fut: Deferred<Value, String>| fut);
//! let fut = Deferred::new();
//! let mut task = Task::new(relay.call(fut.clone()));
//! assert_eq!(task.step(), Poll::Pending);
//! fut.set_result(Value::from("x"));
//! assert_eq!(task.step(), Poll::Ready(Ok(Value::from("x"))));
//! ```
//!
//! [`Future`]: core::future::Future

#![warn(missing_docs)]

pub mod classify;
pub mod config;
pub mod coro;
pub mod delegate;
pub mod error;
pub mod future;
pub mod log;
pub mod marker;
pub mod prelude;
pub mod signal;
pub mod task;
pub mod value;

pub use self::classify::{is_coroutine, is_coroutine_function};
pub use self::config::Config;
pub use self::coro::{CoroState, Coroutine, Suspendable};
pub use self::delegate::delegate;
pub use self::error::CoroError;
pub use self::future::Deferred;
pub use self::marker::{coroutine, coroutine_gen, coroutine_gen_with, coroutine_with, CoroutineFn};
pub use self::task::Task;
pub use self::value::Value;
