//! The coroutine prelude.
//!
//! ```
//! use drone_coro::prelude::*;
//! ```

#[doc(no_inline)]
pub use crate::classify::{Classify, CoroutineFunction};
#[doc(no_inline)]
pub use crate::coro::{Routine, Suspendable};
#[doc(no_inline)]
pub use crate::future::FutureLike;
#[doc(no_inline)]
pub use crate::signal::Payload;
