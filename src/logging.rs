use env_logger::{Builder, Env, Target};
use log::LevelFilter;

pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Logs go to stderr so JSON on stdout stays parseable. `RUST_LOG` wins over
/// the verbosity flags when set.
pub fn init(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();
    builder.filter_level(level_for(verbose, quiet));
    builder.parse_env(Env::default());
    builder.target(Target::Stderr);
    // A second init (tests) keeps the first logger.
    let _ = builder.try_init();
}
