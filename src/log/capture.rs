use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    static FRAMES: RefCell<Vec<Vec<Record>>> = RefCell::new(Vec::new());
}

/// A record written to a log port.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The port number the record was written to.
    pub port: u8,
    /// The record text as written.
    pub text: String,
}

/// An RAII guard collecting the records written on the current thread.
///
/// Guards nest: only the innermost live guard receives records. Records stop
/// being collected when the guard is dropped.
#[must_use]
pub struct Capture {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

/// Starts collecting the records written on the current thread.
///
/// # Examples
///
/// ```
/// use drone_coro::{eprintln, log};
///
/// let capture = log::capture();
/// eprintln!("something went wrong");
/// assert_eq!(capture.messages(log::STDERR_PORT), ["something went wrong"]);
/// ```
pub fn capture() -> Capture {
    let depth = FRAMES.with(|frames| {
        let mut frames = frames.borrow_mut();
        frames.push(Vec::new());
        frames.len() - 1
    });
    Capture { depth, _not_send: PhantomData }
}

impl Capture {
    /// Returns all records collected so far.
    pub fn records(&self) -> Vec<Record> {
        FRAMES.with(|frames| frames.borrow().get(self.depth).cloned().unwrap_or_default())
    }

    /// Returns the texts of the records written to `port`, without trailing
    /// newlines.
    pub fn messages(&self, port: u8) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|record| record.port == port)
            .map(|record| record.text.trim_end_matches('\n').to_string())
            .collect()
    }

    /// Discards the records collected so far.
    pub fn clear(&self) {
        FRAMES.with(|frames| {
            if let Some(frame) = frames.borrow_mut().get_mut(self.depth) {
                frame.clear();
            }
        });
    }
}

impl Drop for Capture {
    fn drop(&mut self) {
        FRAMES.with(|frames| frames.borrow_mut().truncate(self.depth));
    }
}

/// Appends the record to the innermost capture frame. Returns `false` if no
/// capture is active on this thread.
pub(super) fn record(port: u8, text: &str) -> bool {
    FRAMES
        .try_with(|frames| match frames.borrow_mut().last_mut() {
            Some(frame) => {
                frame.push(Record { port, text: text.to_string() });
                true
            }
            None => false,
        })
        .unwrap_or(false)
}
