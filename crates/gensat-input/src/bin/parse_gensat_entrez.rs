//! parse-gensat-entrez - loader input from a GENSAT export file
//!
//! Replaces get-gensat-entrez for sites that receive the gene list as a
//! tab-separated file instead of querying the tool.
//!
//! Exit codes: 0 on success, 1 on any failure, 2 on usage errors.
//!
//! A file that cannot be opened is reported on stdout as
//! `Cannot open input file: <path>` or `Cannot open output file: <path>`,
//! where the load wrappers capture it. Other failures are reported on stderr.

use clap::Parser;
use gensat_common::logging::init_logging;
use gensat_input::cli::{resolve_log_config, FilterArgs};
use gensat_input::filter;
use std::process;
use tracing::{error, info};

fn main() {
    let args = FilterArgs::parse();

    let log_config = resolve_log_config("parse-gensat-entrez", args.verbose);

    // The utility still works without logging
    let guard = init_logging(&log_config).ok();

    let config = args.into_config();
    match filter::run(&config) {
        Ok(summary) => {
            info!(written = summary.written, "Finished");
        },
        Err(e) if e.is_file_open() => {
            error!(error = %e, "Cannot open GENSAT file");
            println!("{}", e);
            drop(guard);
            process::exit(1);
        },
        Err(e) => {
            error!(error = %e, "Filter failed");
            eprintln!("{}", e);
            drop(guard);
            process::exit(1);
        },
    }
}
