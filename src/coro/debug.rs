use crate::coro::{Code, Generator, Position, Resume, StepResult, Suspendable};
use crate::error::CoroError;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;

/// A generator instrumented to report being dropped before it was ever
/// resumed.
///
/// Every [`Suspendable`] operation is forwarded to the wrapped generator
/// unchanged. When the wrapper is dropped while the generator is still at
/// [`Position::Created`], an error naming the coroutine function and its
/// creation site is logged to [`STDERR_PORT`](crate::log::STDERR_PORT).
///
/// The creation site is the caller of [`DebugWrapper::new`]. The creation-time
/// call stack is always captured and reported starting from the frame that
/// created the coroutine. Frames of this crate's own constructors are left
/// out.
pub struct DebugWrapper<V, E> {
    gen: Generator<V, E>,
    func: Code,
    created_at: &'static Location<'static>,
    backtrace: Backtrace,
}

impl<V, E> DebugWrapper<V, E> {
    /// Wraps `gen` created by the coroutine function `func`.
    #[track_caller]
    pub fn new(gen: Generator<V, E>, func: Code) -> Self {
        Self { gen, func, created_at: Location::caller(), backtrace: Backtrace::force_capture() }
    }

    /// Returns the coroutine function this generator was created by.
    #[inline]
    pub fn func(&self) -> &Code {
        &self.func
    }

    /// Returns the creation site.
    #[inline]
    pub fn created_at(&self) -> &'static Location<'static> {
        self.created_at
    }

    /// Returns a reference to the wrapped generator.
    #[inline]
    pub fn get_ref(&self) -> &Generator<V, E> {
        &self.gen
    }
}

impl<V, E> Suspendable<V, E> for DebugWrapper<V, E> {
    #[inline]
    fn step(&mut self, input: Resume<V, E>) -> StepResult<V, E> {
        self.gen.step(input)
    }

    #[inline]
    fn close(&mut self) -> Result<(), CoroError<E>> {
        self.gen.close()
    }

    #[inline]
    fn position(&self) -> Position {
        self.gen.position()
    }

    #[inline]
    fn code(&self) -> &Code {
        self.gen.code()
    }
}

impl<V, E> Drop for DebugWrapper<V, E> {
    fn drop(&mut self) {
        if self.gen.position() != Position::Created {
            return;
        }
        let stack = caller_frames(&self.backtrace.to_string());
        crate::eprintln!(
            "coroutine {} was never driven\ncoroutine created at {}\n{}",
            self.func,
            self.created_at,
            stack.trim_end()
        );
    }
}

impl<V, E> fmt::Debug for DebugWrapper<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugWrapper")
            .field("gen", &self.gen)
            .field("created_at", &format_args!("{}", self.created_at))
            .finish()
    }
}

/// Symbols of the frames between the backtrace capture and the code creating
/// the coroutine.
const OWN_FRAMES: &[&str] = &[
    "std::backtrace::Backtrace::",
    "drone_coro::coro::debug::DebugWrapper",
    "drone_coro::marker::CoroutineFn",
];

/// Drops the leading frames of a rendered backtrace up to the last frame of
/// [`OWN_FRAMES`]. The rendering is returned unchanged if none matches.
fn caller_frames(rendered: &str) -> String {
    let mut frames: Vec<String> = Vec::new();
    for line in rendered.lines() {
        if is_frame_start(line) || frames.is_empty() {
            frames.push(String::new());
        }
        if let Some(frame) = frames.last_mut() {
            frame.push_str(line);
            frame.push('\n');
        }
    }
    let skip = frames
        .iter()
        .rposition(|frame| {
            frame.lines().next().map_or(false, |symbol| {
                OWN_FRAMES.iter().any(|own| symbol.contains(own))
            })
        })
        .map_or(0, |last| last + 1);
    frames[skip..].concat()
}

fn is_frame_start(line: &str) -> bool {
    let line = line.trim_start();
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    digits > 0 && line[digits..].starts_with(':')
}
