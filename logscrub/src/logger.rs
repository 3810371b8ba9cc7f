//! Logger setup for the logscrub binary and its integration tests.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger` once.
///
/// `RUST_LOG` is honored unless `level_override` is given; without either, only
/// warnings and errors are shown. Later calls are ignored.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(true);
    let _ = builder.try_init();
}
