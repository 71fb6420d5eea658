//! Logging for the simulation engine. This module (re)exports the five `log` macros, `error!`,
//! `warn!`, `info!`, `debug!` and `trace!`, and installs a `log4rs` console logger on demand.
//!
//! Logging is _disabled_ until `set_log_level()` (or `enable_logging()`) is called. The engine
//! logs population construction and run boundaries at `info`, one summary per day at `debug`
//! and individual infections, trips and group passes at `trace`.
//!
//! ```rust
//! use epidemic_core::log::{set_log_level, LevelFilter};
//!
//! set_log_level(LevelFilter::Debug);
//! ```

pub use ::log::{debug, error, info, trace, warn, LevelFilter};
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    Config, Handle,
};
use std::sync::Mutex;

// ISO 8601 timestamp, color coded level tag and the emitting module
const DEFAULT_LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

/// The handle of the installed logger. The global logger can only be set once per process,
/// so later level changes swap the configuration through this handle.
static LOG_HANDLE: Mutex<Option<Handle>> = Mutex::new(None);

fn build_config(level: LevelFilter) -> Config {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(DEFAULT_LOG_PATTERN)))
        .build();

    let root = Root::builder().appender("stdout").build(level);
    match Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(root)
    {
        Ok(config) => config,
        // The configuration is fixed and names a single appender that always exists.
        Err(e) => panic!("failed to build log config: {e}"),
    }
}

/// Sets the global log level, installing the console logger the first time it is called.
pub fn set_log_level(level: LevelFilter) {
    let mut handle = LOG_HANDLE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let config = build_config(level);
    match handle.as_ref() {
        Some(handle) => handle.set_config(config),
        None => match log4rs::init_config(config) {
            Ok(new_handle) => *handle = Some(new_handle),
            // Another logger owns the global slot; only the level filter is ours to change.
            Err(_) => ::log::set_max_level(level),
        },
    }
}

/// Enables all log messages. Equivalent to `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Turns off all log messages.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_can_be_changed_after_install() {
        set_log_level(LevelFilter::Info);
        info!("logger installed");
        set_log_level(LevelFilter::Debug);
        debug!("logger reconfigured");
        assert_eq!(::log::max_level(), LevelFilter::Debug);
        disable_logging();
        assert_eq!(::log::max_level(), LevelFilter::Off);
        assert!(LOG_HANDLE.lock().map(|h| h.is_some()).unwrap_or(false));
    }
}
