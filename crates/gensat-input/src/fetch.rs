//! Fetcher: loader input from the GENSAT query tool
//!
//! Opens the loader input file first, so an unwritable destination fails the
//! run before any request is made. The file is left empty if the query or the
//! response parsing fails afterwards.

use crate::error::{IngestError, Result};
use crate::esearch::{EsearchClient, EsearchQuery, EsearchResult};
use gensat_common::IdentifierWriter;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

/// Fetcher settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Loader input file to create
    pub output_file: PathBuf,
    /// Entrez database to search (normally "gene")
    pub db: String,
    /// Maximum number of IDs the query tool returns
    pub max_rows: u64,
    /// Query tool endpoint, including its trailing `?`
    pub url: String,
}

/// Outcome of a successful fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    /// Identifiers written to the loader input file
    pub written: usize,
    /// Total matches reported by the query tool, when present
    pub total: Option<u64>,
}

/// Write the `Id` values of `result` to `writer`, returning how many were written
pub fn write_result(result: &EsearchResult, writer: &mut IdentifierWriter) -> Result<usize> {
    for id in &result.ids {
        writer.write_id(id)?;
    }
    Ok(result.ids.len())
}

/// Query the GENSAT tool and write the returned EntrezGene IDs
#[instrument(skip(config), fields(output = %config.output_file.display(), db = %config.db))]
pub async fn run(config: &FetchConfig) -> Result<FetchSummary> {
    let mut writer = IdentifierWriter::create(&config.output_file)
        .map_err(|source| IngestError::output_open(&config.output_file, source))?;

    let client = EsearchClient::new()?;
    let query = EsearchQuery::gensat(&config.db, config.max_rows);
    let body = client.search(&config.url, &query).await?;

    let result = EsearchResult::parse(&body)?;

    for message in &result.errors {
        warn!(error = %message, "Query tool reported an error");
    }

    if result.is_truncated() {
        warn!(
            returned = result.ids.len(),
            total = ?result.count,
            max_rows = config.max_rows,
            "Query matched more IDs than max rows; output is incomplete"
        );
    }

    write_result(&result, &mut writer)?;
    let written = writer.finish()?;

    info!(written, "Wrote EntrezGene IDs");

    Ok(FetchSummary {
        written,
        total: result.count,
    })
}
