//! srsgen - SRS generation pipeline
//!
//! Main entry point for the `srsgen` binary.

use std::process::ExitCode;

use clap::Parser;
use srsgen_cli::cli::Cli;
use srsgen_cli::error::handle_result;
use srsgen_common_config::Environment;
use srsgen_common_log::LogConfig;

fn main() -> ExitCode {
    // .env must be loaded before clap reads env-backed flags
    if let Err(e) = Environment::init() {
        eprintln!("warning: {e}");
    }

    let cli = Cli::parse();

    let log_config = LogConfig::from_env().with_verbosity(cli.verbose, cli.quiet);
    if let Err(e) = srsgen_common_log::init(log_config) {
        eprintln!("warning: {e}");
    }

    let format = cli.format;
    let verbose = cli.verbose > 0;
    handle_result(cli.execute(), format, verbose)
}
