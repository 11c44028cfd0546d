//! Logging support.
//!
//! Records are written to numbered ports. On the host every port is routed to
//! the process standard streams: [`STDOUT_PORT`] goes to stdout, every other
//! port goes to stderr. A [`Capture`] guard installed with [`capture`]
//! redirects the records written on the current thread into memory until it
//! is dropped.
//!
//! Coroutine diagnostics are error-severity records and always go to
//! [`STDERR_PORT`].

mod capture;
mod macros;
mod port;

pub use self::capture::{capture, Capture, Record};
pub use self::port::Port;

use std::fmt;
use std::fmt::Write;
use std::io;
use std::io::Write as _;

/// Number of available ports.
pub const PORTS_COUNT: u8 = 32;

/// Port number of the standard output stream.
pub const STDOUT_PORT: u8 = 0;

/// Port number of the standard error stream.
pub const STDERR_PORT: u8 = 1;

/// Returns port for standard output.
///
/// # Examples
///
/// ```
/// use drone_coro::log;
/// use std::fmt::Write;
///
/// let capture = log::capture();
/// writeln!(log::stdout(), "ready").unwrap();
/// assert_eq!(capture.messages(log::STDOUT_PORT), ["ready"]);
/// ```
#[inline]
pub fn stdout() -> Port {
    Port::new(STDOUT_PORT)
}

/// Returns port for standard error.
///
/// # Examples
///
/// ```
/// use drone_coro::log;
///
/// let capture = log::capture();
/// assert_eq!(log::stderr().number(), log::STDERR_PORT);
/// log::stderr().write_bytes(b"failed\n");
/// assert_eq!(capture.messages(log::STDERR_PORT), ["failed"]);
/// ```
#[inline]
pub fn stderr() -> Port {
    Port::new(STDERR_PORT)
}

/// Writes `string` to the log port number `port`.
///
/// # Examples
///
/// ```
/// use drone_coro::log;
///
/// let capture = log::capture();
/// log::write_str(11, "hello there!\n");
/// assert_eq!(capture.messages(11), ["hello there!"]);
/// ```
#[inline(never)]
pub fn write_str(port: u8, string: &str) {
    Port::new(port).write_str(string).unwrap_or(())
}

/// Writes `args` to the log port number `port`.
///
/// The arguments are formatted into a single record before they reach the
/// sink, so one call always produces one record.
///
/// # Examples
///
/// ```
/// use drone_coro::log;
///
/// let a = 0;
/// let capture = log::capture();
/// log::write_fmt(11, format_args!("a = {}\n", a));
/// assert_eq!(capture.messages(11), ["a = 0"]);
/// ```
#[inline(never)]
pub fn write_fmt(port: u8, args: fmt::Arguments<'_>) {
    match args.as_str() {
        Some(string) => write_str(port, string),
        None => write_str(port, &args.to_string()),
    }
}

/// Blocks until all pending records are written to the standard streams.
///
/// This function is a no-op for records collected by a [`Capture`].
///
/// # Examples
///
/// ```
/// use drone_coro::{log, print};
///
/// print!("progress: 50%\r");
/// log::flush();
/// ```
#[inline]
pub fn flush() {
    io::stdout().flush().unwrap_or(());
    io::stderr().flush().unwrap_or(());
}

fn emit(port: u8, string: &str) {
    if capture::record(port, string) {
        return;
    }
    if port == STDOUT_PORT {
        io::stdout().write_all(string.as_bytes()).unwrap_or(());
    } else {
        io::stderr().write_all(string.as_bytes()).unwrap_or(());
    }
}
