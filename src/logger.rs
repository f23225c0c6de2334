//! Colored, timestamped console logging.
//!
//! Every macro prefixes its message with a level tag and the current UTC time.
//! The minimum printed level is read once from `ADCS_LOG_LEVEL`
//! (`event`, `log`, `info`, `report`, `warn`, `error`), defaulting to `log`.
//! `fatal!` always panics regardless of the configured level.

use std::sync::LazyLock;
use strum_macros::EnumString;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Level {
    Event,
    Log,
    Info,
    Report,
    Warn,
    Error,
}

static MIN_LEVEL: LazyLock<Level> = LazyLock::new(|| {
    std::env::var("ADCS_LOG_LEVEL").ok().and_then(|lvl| lvl.parse().ok()).unwrap_or(Level::Log)
});

pub fn enabled(level: Level) -> bool { level >= *MIN_LEVEL }

pub fn timestamp() -> String { chrono::Utc::now().format("%H:%M:%S%.3f").to_string() }

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        if $crate::logger::enabled($crate::logger::Level::Info) {
            println!("\x1b[32m[INFO] [{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        if $crate::logger::enabled($crate::logger::Level::Log) {
            println!("\x1b[33m[LOG]  [{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        if $crate::logger::enabled($crate::logger::Level::Warn) {
            println!("\x1b[35m[WARN] [{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        if $crate::logger::enabled($crate::logger::Level::Error) {
            eprintln!("\x1b[31m[ERROR][{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        panic!("\x1b[1;31m[FATAL][{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
    };
}

/// Per tick console report of sensor readings and the current sun vector.
#[macro_export]
macro_rules! report {
    ($($arg:tt)*) => {
        if $crate::logger::enabled($crate::logger::Level::Report) {
            println!("\x1b[1;34m[RPRT] [{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if $crate::logger::enabled($crate::logger::Level::Event) {
            println!("\x1b[36m[EVENT][{}]\x1b[0m {}", $crate::logger::timestamp(), format!($($arg)*))
        }
    };
}
