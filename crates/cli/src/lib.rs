//! Shared plumbing for the `recast` and `recast-plan` binaries: logging
//! setup, interactive change-request capture, and the prompt history file.

pub mod history;
pub mod input;

/// Initialize env_logger on stderr. Default level is `info`; `--verbose`
/// raises it to `debug`, `--quiet` lowers it to `warn`. Model output goes
/// to stdout and is unaffected.
pub fn init_logging(verbose: bool, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}
