use env_logger::{Builder as LogBuilder, Target};
use log::LevelFilter;

pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Engine diagnostics go to stderr so stdout stays a clean CSV stream.
/// `RUST_LOG` directives override the `-v` level.
pub fn init(verbosity: u8) {
    let _ = LogBuilder::new()
        .filter_level(level_for(verbosity))
        .parse_default_env()
        .target(Target::Stderr)
        .format_timestamp(None)
        .try_init();
}
