//! Process configuration.
//!
//! The configuration is read once. [`init`] installs it explicitly, otherwise
//! the first call to [`get`] reads it from the environment:
//!
//! * `DRONE_CORO_DEBUG` - any non-empty value enables debug mode;
//! * `DRONE_CORO_TRACK_SIGNALS` - any non-empty value selects
//!   [`SignalMode::Tracked`].
//!
//! Marking a function captures the configuration at that moment, so changing
//! it afterwards has no effect on already marked functions. Use
//! [`coroutine_with`](crate::coroutine_with) to mark a function with an
//! explicit configuration.

use crate::delegate::{delegate_with, Yielded};
use crate::error::ConfigError;
use std::env;
use std::sync::OnceLock;

/// Environment variable enabling debug mode.
pub const DEBUG_VAR: &str = "DRONE_CORO_DEBUG";

/// Environment variable enabling tracked result signals.
pub const TRACK_SIGNALS_VAR: &str = "DRONE_CORO_TRACK_SIGNALS";

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Result signal construction strategy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum SignalMode {
    /// Lightweight signals without leak detection.
    #[default]
    Untracked,
    /// Signals that report being dropped without delivery.
    Tracked,
}

/// Coroutine configuration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Config {
    /// Wrap coroutines and tag delegation targets for diagnostics.
    pub debug: bool,
    /// Result signal construction strategy.
    pub signals: SignalMode,
}

impl Config {
    /// Creates the default configuration: no debug mode, untracked signals.
    #[inline]
    pub const fn new() -> Self {
        Self { debug: false, signals: SignalMode::Untracked }
    }

    /// Creates the debug configuration: debug mode with tracked signals.
    #[inline]
    pub const fn debug() -> Self {
        Self { debug: true, signals: SignalMode::Tracked }
    }

    /// Reads the configuration from the environment.
    pub fn from_env() -> Self {
        Self::from_vars(env::var(DEBUG_VAR).ok(), env::var(TRACK_SIGNALS_VAR).ok())
    }

    fn from_vars(debug: Option<String>, track_signals: Option<String>) -> Self {
        let enabled = |value: Option<String>| value.map_or(false, |value| !value.is_empty());
        Self {
            debug: enabled(debug),
            signals: if enabled(track_signals) {
                SignalMode::Tracked
            } else {
                SignalMode::Untracked
            },
        }
    }

    /// Marks `obj` as a delegation target according to this configuration.
    ///
    /// See [`delegate`](crate::delegate()).
    #[inline]
    pub fn delegate<V, E>(&self, obj: impl Into<Yielded<V, E>>) -> Yielded<V, E> {
        delegate_with(self.debug, obj.into())
    }
}

/// Installs the process configuration.
///
/// # Errors
///
/// If the configuration was already installed or read with [`get`].
pub fn init(config: Config) -> Result<(), ConfigError> {
    CONFIG.set(config).map_err(|_| ConfigError::AlreadyInitialized)
}

/// Returns the process configuration, reading it from the environment on the
/// first call.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::from_env)
}
