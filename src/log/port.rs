use super::{emit, PORTS_COUNT};
use std::fmt;
use std::fmt::Write;

/// Logger port handle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Port(u8);

impl Port {
    /// Creates a new port handle.
    ///
    /// # Panics
    ///
    /// If `port` is more than or equal to [`PORTS_COUNT`].
    #[inline]
    pub fn new(port: u8) -> Self {
        assert!(port < PORTS_COUNT);
        Self(port)
    }

    /// Returns the port number.
    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }

    /// Writes a sequence of bytes to the port.
    ///
    /// Invalid UTF-8 sequences are replaced with `U+FFFD`.
    ///
    /// # Examples
    ///
    /// ```
    /// use drone_coro::log::{self, Port};
    ///
    /// let capture = log::capture();
    /// Port::new(7).write_bytes(b"ok ").write_bytes(b"\xFF");
    /// assert_eq!(capture.messages(7), ["ok ", "\u{FFFD}"]);
    /// ```
    #[inline]
    pub fn write_bytes(self, bytes: &[u8]) -> Self {
        let Self(port) = self;
        emit(port, &String::from_utf8_lossy(bytes));
        self
    }
}

impl Write for Port {
    #[inline]
    fn write_str(&mut self, string: &str) -> fmt::Result {
        let Self(port) = *self;
        emit(port, string);
        Ok(())
    }
}
