//! Logging setup
//! 
//! The crate logs through the `log` facade; binaries install `env_logger`
//! once at startup. `RUST_LOG` wins over the configured level when set.

use log::LevelFilter;

/// Install the global logger. Returns false if one was already installed.
pub fn init_logging(level: LevelFilter) -> bool {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(directives) = std::env::var("RUST_LOG") {
        builder.parse_filters(&directives);
    }
    builder.try_init().is_ok()
}
