//! CKB Rosetta logging facade.
//!
//! The crates of the workspace log through the macros re-exported here, which are the macros of
//! the crate [`log`]. The binary calls [`init`] once, before serving any request.
//!
//! [`log`]: https://docs.rs/log/*/log/index.html
pub use log::{self as internal, debug, error, info, trace, warn, Level, SetLoggerError};

use serde::{Deserialize, Serialize};
use std::{io::Write, panic, thread};

/// The environment variable which overrides the configured filter.
pub const FILTER_ENV: &str = "RUST_LOG";

/// Logger configuration, the `[logger]` section of `rosetta.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// A string which is used to build the [env_logger] filter, e.g. `info,ckb_rosetta_rpc=debug`.
    ///
    /// [env_logger]: https://docs.rs/env_logger/*/env_logger/index.html
    pub filter: String,
    /// Colorize the output.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            filter: "info".to_owned(),
            color: !cfg!(windows),
        }
    }
}

/// Flushes the logger when dropped.
#[must_use]
pub struct LoggerInitGuard;

impl Drop for LoggerInitGuard {
    fn drop(&mut self) {
        flush();
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG`, when set, takes precedence over `config.filter`.
pub fn init(config: Config) -> Result<LoggerInitGuard, SetLoggerError> {
    let filter = std::env::var(FILTER_ENV).unwrap_or(config.filter);
    let style = if config.color {
        env_logger::WriteStyle::Auto
    } else {
        env_logger::WriteStyle::Never
    };
    let logger = env_logger::Builder::new()
        .parse_filters(&filter)
        .write_style(style)
        .format(|buf, record| {
            let thread = thread::current();
            writeln!(
                buf,
                "{} {} {} {}  {}",
                buf.timestamp_millis(),
                thread.name().unwrap_or("unnamed"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .build();
    let max_level = logger.filter();
    log::set_boxed_logger(Box::new(logger)).map(|_| {
        log::set_max_level(max_level);
        setup_panic_logger();
        LoggerInitGuard
    })
}

/// Flushes any buffered records.
pub fn flush() {
    log::logger().flush()
}

// Panics are reported through the logger so they land next to the request logs.
fn setup_panic_logger() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let thread = thread::current();
        let name = thread.name().unwrap_or("unnamed");
        let msg = match info.payload().downcast_ref::<&'static str>() {
            Some(s) => *s,
            None => match info.payload().downcast_ref::<String>() {
                Some(s) => s.as_str(),
                None => "Box<Any>",
            },
        };
        match info.location() {
            Some(location) => error!(
                "thread '{}' panicked at '{}': {}:{}",
                name,
                msg,
                location.file(),
                location.line()
            ),
            None => error!("thread '{}' panicked at '{}'", name, msg),
        }
        flush();
        default_hook(info);
    }));
}
