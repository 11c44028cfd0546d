/// Prints to the log port #0.
///
/// Equivalent to the [`println!`] macro except that a newline is not printed at
/// the end of the message.
///
/// # Examples
///
/// ```
/// use drone_coro::print;
///
/// print!("this ");
/// print!("will ");
/// print!("be ");
/// print!("on ");
/// print!("the ");
/// print!("same ");
/// print!("line\n");
/// ```
#[macro_export]
macro_rules! print {
    ($str:expr) => {
        $crate::log::write_str($crate::log::STDOUT_PORT, $str);
    };
    ($($arg:tt)*) => {
        $crate::log::write_fmt($crate::log::STDOUT_PORT, format_args!($($arg)*));
    };
}

/// Prints to the log port #0, with a newline.
///
/// # Examples
///
/// ```
/// use drone_coro::println;
///
/// println!(); // prints just a newline
/// println!("hello there!");
/// println!("format {} arguments", "some");
/// ```
#[macro_export]
macro_rules! println {
    () => {
        $crate::print!("\n");
    };
    ($fmt:expr) => {
        $crate::print!(concat!($fmt, "\n"));
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::print!(concat!($fmt, "\n"), $($arg)*);
    };
}

/// Prints to the log port #1.
///
/// Equivalent to the [`print!`] macro, except that output goes to the port #1
/// instead of #0. Use `eprint!` only for error and progress messages.
///
/// # Examples
///
/// ```
/// use drone_coro::eprint;
///
/// eprint!("Error: Could not complete task");
/// ```
#[macro_export]
macro_rules! eprint {
    ($str:expr) => {
        $crate::log::write_str($crate::log::STDERR_PORT, $str);
    };
    ($($arg:tt)*) => {
        $crate::log::write_fmt($crate::log::STDERR_PORT, format_args!($($arg)*));
    };
}

/// Prints to the log port #1, with a newline.
///
/// Every coroutine diagnostic of this crate is written with `eprintln!`.
///
/// # Examples
///
/// ```
/// use drone_coro::eprintln;
///
/// eprintln!("Error: Could not complete task");
/// ```
#[macro_export]
macro_rules! eprintln {
    () => {
        $crate::eprint!("\n");
    };
    ($fmt:expr) => {
        $crate::eprint!(concat!($fmt, "\n"));
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::eprint!(concat!($fmt, "\n"), $($arg)*);
    };
}
