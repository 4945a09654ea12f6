//! Command-line and environment configuration
//!
//! Load wrappers configure both utilities through environment variables; a
//! flag of the same setting takes precedence over the variable.

use crate::fetch::FetchConfig;
use crate::filter::FilterConfig;
use clap::Parser;
use gensat_common::logging::{LogConfig, LogLevel};
use std::path::PathBuf;

/// Loader input file written by both utilities
pub const ENV_OUTPUT_FILE: &str = "GENSATLOAD_INPUTFILE";
/// Entrez database searched by the Fetcher
pub const ENV_DB: &str = "GENSATTOOL_DB";
/// Maximum number of IDs requested by the Fetcher
pub const ENV_MAX_ROWS: &str = "GENSATTOOL_MAX_ROWS";
/// Query tool endpoint used by the Fetcher
pub const ENV_URL: &str = "GENSATTOOL_URL";
/// Tab-separated export read by the Filter
pub const ENV_INPUT_FILE: &str = "INPUTFILE";

/// Generate the GENSAT load input file from the GENSAT query tool
#[derive(Parser, Debug, Clone)]
#[command(name = "get-gensat-entrez")]
#[command(author, version)]
pub struct FetchArgs {
    /// Loader input file to create
    #[arg(long, env = ENV_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Entrez database to search
    #[arg(long, env = ENV_DB)]
    pub db: String,

    /// Maximum number of IDs to retrieve
    #[arg(long, env = ENV_MAX_ROWS)]
    pub max_rows: u64,

    /// Query tool endpoint, ending in '?'
    #[arg(long, env = ENV_URL)]
    pub url: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl FetchArgs {
    pub fn into_config(self) -> FetchConfig {
        FetchConfig {
            output_file: self.output_file,
            db: self.db,
            max_rows: self.max_rows,
            url: self.url,
        }
    }
}

/// Generate the GENSAT load input file from a tab-separated GENSAT export
#[derive(Parser, Debug, Clone)]
#[command(name = "parse-gensat-entrez")]
#[command(author, version)]
pub struct FilterArgs {
    /// Tab-separated export with EntrezGene IDs in the third column
    #[arg(long, env = ENV_INPUT_FILE)]
    pub input_file: PathBuf,

    /// Loader input file to create
    #[arg(long, env = ENV_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl FilterArgs {
    pub fn into_config(self) -> FilterConfig {
        FilterConfig::new(self.input_file, self.output_file)
    }
}

/// Logging configuration for a binary run
///
/// `GENSAT_LOG_*` variables override the defaults, and `--verbose` wins over
/// `GENSAT_LOG_LEVEL`. An invalid variable is reported on stderr and the
/// defaults are used instead.
pub fn resolve_log_config(log_file_prefix: &str, verbose: bool) -> LogConfig {
    let defaults = LogConfig::builder()
        .level(LogLevel::Info)
        .log_file_prefix(log_file_prefix)
        .build();

    let mut config = match LogConfig::from_env_or(defaults.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Ignoring logging configuration: {}", e);
            defaults
        },
    };

    if verbose {
        config.level = LogLevel::Debug;
    }

    config
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use gensat_common::logging::{LogOutput, ENV_LOG_LEVEL, ENV_LOG_OUTPUT};
    use serial_test::serial;

    fn clear_env() {
        for var in [
            ENV_OUTPUT_FILE,
            ENV_DB,
            ENV_MAX_ROWS,
            ENV_URL,
            ENV_INPUT_FILE,
            ENV_LOG_LEVEL,
            ENV_LOG_OUTPUT,
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_verbose_overrides_env_log_level() {
        clear_env();
        std::env::set_var(ENV_LOG_LEVEL, "error");
        std::env::set_var(ENV_LOG_OUTPUT, "both");

        let verbose = resolve_log_config("get-gensat-entrez", true);
        let quiet = resolve_log_config("get-gensat-entrez", false);
        clear_env();

        assert_eq!(verbose.level, LogLevel::Debug);
        assert_eq!(verbose.output, LogOutput::Both);
        assert_eq!(quiet.level, LogLevel::Error);
        assert_eq!(quiet.log_file_prefix, "get-gensat-entrez");
    }

    #[test]
    #[serial]
    fn test_invalid_log_env_falls_back_to_defaults() {
        clear_env();
        std::env::set_var(ENV_LOG_LEVEL, "chatty");
        std::env::set_var(ENV_LOG_OUTPUT, "file");

        let config = resolve_log_config("parse-gensat-entrez", false);
        clear_env();

        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.output, LogOutput::Console);
        assert_eq!(config.log_file_prefix, "parse-gensat-entrez");
    }

    #[test]
    fn test_command_definitions() {
        FetchArgs::command().debug_assert();
        FilterArgs::command().debug_assert();
    }

    #[test]
    #[serial]
    fn test_fetch_args_from_env() {
        clear_env();
        std::env::set_var(ENV_OUTPUT_FILE, "/data/loads/gensat/input/gensat.input");
        std::env::set_var(ENV_DB, "gene");
        std::env::set_var(ENV_MAX_ROWS, "100000");
        std::env::set_var(
            ENV_URL,
            "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi?",
        );

        let args = FetchArgs::try_parse_from(["get-gensat-entrez"]);
        clear_env();

        let config = args.unwrap().into_config();
        assert_eq!(
            config.output_file,
            PathBuf::from("/data/loads/gensat/input/gensat.input")
        );
        assert_eq!(config.db, "gene");
        assert_eq!(config.max_rows, 100000);
        assert!(config.url.ends_with("esearch.fcgi?"));
    }

    #[test]
    #[serial]
    fn test_flags_override_env() {
        clear_env();
        std::env::set_var(ENV_INPUT_FILE, "/from/env.txt");
        std::env::set_var(ENV_OUTPUT_FILE, "/from/env.input");

        let args = FilterArgs::try_parse_from(["parse-gensat-entrez", "--input-file", "export.txt"]);
        clear_env();

        let config = args.unwrap().into_config();
        assert_eq!(config.input_file, PathBuf::from("export.txt"));
        assert_eq!(config.output_file, PathBuf::from("/from/env.input"));
    }

    #[test]
    #[serial]
    fn test_missing_setting_is_usage_error() {
        clear_env();
        std::env::set_var(ENV_INPUT_FILE, "export.txt");

        let result = FilterArgs::try_parse_from(["parse-gensat-entrez"]);
        clear_env();

        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    #[serial]
    fn test_max_rows_must_be_numeric() {
        clear_env();

        let result = FetchArgs::try_parse_from([
            "get-gensat-entrez",
            "--output-file",
            "gensat.input",
            "--db",
            "gene",
            "--max-rows",
            "lots",
            "--url",
            "http://localhost/esearch.fcgi?",
        ]);

        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ValueValidation
        );
    }
}
