//! get-gensat-entrez - loader input from the GENSAT query tool
//!
//! Exit codes: 0 on success, 1 on any failure, 2 on usage errors.
//!
//! A file that cannot be opened is reported on stdout as
//! `Cannot open output file: <path>`, where the load wrappers capture it.
//! Other failures are reported on stderr.

use clap::Parser;
use gensat_common::logging::init_logging;
use gensat_input::cli::{resolve_log_config, FetchArgs};
use gensat_input::fetch;
use std::process;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = FetchArgs::parse();

    let log_config = resolve_log_config("get-gensat-entrez", args.verbose);

    // The utility still works without logging
    let guard = init_logging(&log_config).ok();

    let config = args.into_config();
    match fetch::run(&config).await {
        Ok(summary) => {
            info!(written = summary.written, total = ?summary.total, "Finished");
        },
        Err(e) if e.is_file_open() => {
            error!(error = %e, "Cannot open loader input file");
            println!("{}", e);
            drop(guard);
            process::exit(1);
        },
        Err(e) => {
            error!(error = %e, "Fetch failed");
            eprintln!("{}", e);
            drop(guard);
            process::exit(1);
        },
    }
}
