//! Tracing setup.
//!
//! Logs go to stderr so stdout carries only the report. The filter is fixed:
//! `warn` by default, `debug` with `--verbose` (every executed script is
//! logged at debug level).

use std::error::Error;

use tracing_subscriber::EnvFilter;

pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn Error>> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact()
        .try_init()
        .map_err(|err| -> Box<dyn Error> { err })
}
