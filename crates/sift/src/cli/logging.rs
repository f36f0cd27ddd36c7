//! Logger setup.

use env_logger::Env;
use log::LevelFilter;

/// Maps the `-v` count to a default log level.
fn default_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initializes logging to stderr. `RUST_LOG`, when set, takes precedence.
pub fn init_logger(verbose: u8) {
    let env = Env::default().default_filter_or(default_level(verbose).as_str());
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(default_level(0), LevelFilter::Warn);
        assert_eq!(default_level(1), LevelFilter::Debug);
        assert_eq!(default_level(5), LevelFilter::Trace);
    }
}
