// Logging setup plus macros that only emit in debug builds

use env_logger::{Builder, Env};

/// Route the `log` facade to stderr through env_logger.
///
/// `RUST_LOG` picks the level; without it only warnings and errors show, so
/// the full-screen interface is not drawn over.
pub fn init_logging() {
    let result = Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}
