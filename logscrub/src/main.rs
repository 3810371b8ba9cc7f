// logscrub/src/main.rs
//! logscrub entry point.

use clap::Parser;
use log::{info, LevelFilter};
use std::io;
use std::process::ExitCode;

use logscrub::cli::Cli;
use logscrub::commands::scrub::{error_msg, run_scrub, ScrubOptions};
use logscrub::logger;

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = if args.quiet {
        Some(LevelFilter::Off)
    } else if args.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);
    info!("logscrub started. Version: {}", env!("CARGO_PKG_VERSION"));

    let opts = ScrubOptions {
        source: args.source,
        output: args.output,
        definitions: args.definitions,
        strip_ansi: args.strip_ansi,
        no_summary: args.no_summary,
        json_file: args.json_file,
    };

    match run_scrub(&opts, &mut io::stdout().lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error_msg(format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
