//! Logging setup for applications that embed this crate
//!
//! This crate only emits records through the `log` facade. Applications that have no logger of their own can call [`init`].

use env_logger::Env;

/// Install an `env_logger` logger, that shows `info` records unless `RUST_LOG` says otherwise.
///
/// Returns an error if a logger has already been installed
pub fn init() -> Result<(), log::SetLoggerError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init()
}
