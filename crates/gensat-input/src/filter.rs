//! Filter: loader input from a locally supplied GENSAT export
//!
//! The export is tab-separated with the EntrezGene ID in the third column and
//! a header row whose third column is `EntrezGeneID`.

use crate::error::{IngestError, Result};
use gensat_common::IdentifierWriter;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// Field separator of the export
pub const FIELD_SEPARATOR: u8 = b'\t';

/// Third-column value of the header row
pub const HEADER: &str = "EntrezGeneID";

/// Zero-based index of the identifier column
const ID_COLUMN: usize = 2;

/// Filter settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Tab-separated export to read
    pub input_file: PathBuf,
    /// Loader input file to create
    pub output_file: PathBuf,
}

impl FilterConfig {
    pub fn new(input_file: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            output_file: output_file.into(),
        }
    }
}

/// What a single input line contributes to the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome<'a> {
    /// Trimmed third field, to be written
    Identifier(&'a [u8]),
    /// Third field is the header token
    Header,
    /// Fewer than three fields
    TooFewFields,
}

/// ASCII whitespace as stripped from byte strings: space, `\t`, `\n`,
/// vertical tab, form feed and `\r`
fn is_strip_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\x0b' | b'\x0c' | b'\r')
}

fn trim_field(field: &[u8]) -> &[u8] {
    let start = field
        .iter()
        .position(|&b| !is_strip_space(b))
        .unwrap_or(field.len());
    let end = field
        .iter()
        .rposition(|&b| !is_strip_space(b))
        .map_or(start, |i| i + 1);
    &field[start..end]
}

/// Classify one line of the export
///
/// Works on raw bytes: only ASCII whitespace is trimmed and every other byte
/// of the field is kept. The trimmed third field is kept even when it is
/// empty.
pub fn extract_identifier(line: &[u8]) -> LineOutcome<'_> {
    match line.split(|&b| b == FIELD_SEPARATOR).nth(ID_COLUMN) {
        None => LineOutcome::TooFewFields,
        Some(field) => {
            let id = trim_field(field);
            if id == HEADER.as_bytes() {
                LineOutcome::Header
            } else {
                LineOutcome::Identifier(id)
            }
        },
    }
}

/// Counters for one filter run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    /// Lines read from the export
    pub rows_read: usize,
    /// Lines skipped for having fewer than three fields
    pub short_rows: usize,
    /// Lines skipped as header rows
    pub header_rows: usize,
    /// Identifiers written
    pub written: usize,
}

/// Copy the identifier column of `reader` into `writer`
///
/// Lines end at `\n`. Identifiers are copied byte for byte, so input that is
/// not valid UTF-8 passes through unchanged. A final line without a
/// terminator is still processed.
pub fn filter_identifiers<R: BufRead>(
    mut reader: R,
    writer: &mut IdentifierWriter,
) -> Result<FilterSummary> {
    let mut summary = FilterSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        summary.rows_read += 1;

        match extract_identifier(&buf) {
            LineOutcome::Identifier(id) => {
                writer.write_id_bytes(id)?;
                summary.written += 1;
            },
            LineOutcome::Header => {
                debug!(row = summary.rows_read, "Skipping header row");
                summary.header_rows += 1;
            },
            LineOutcome::TooFewFields => summary.short_rows += 1,
        }
    }

    Ok(summary)
}

/// Read the export and write the loader input file
#[instrument(skip(config), fields(input = %config.input_file.display(), output = %config.output_file.display()))]
pub fn run(config: &FilterConfig) -> Result<FilterSummary> {
    let input = File::open(&config.input_file)
        .map_err(|source| IngestError::input_open(&config.input_file, source))?;

    let mut writer = IdentifierWriter::create(&config.output_file)
        .map_err(|source| IngestError::output_open(&config.output_file, source))?;

    let summary = filter_identifiers(BufReader::new(input), &mut writer)?;
    writer.finish()?;

    info!(
        rows_read = summary.rows_read,
        short_rows = summary.short_rows,
        header_rows = summary.header_rows,
        written = summary.written,
        "Wrote EntrezGene IDs"
    );

    Ok(summary)
}
