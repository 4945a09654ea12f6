//! GENSAT Load Input Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Generates the input file for the GENSAT load: a list of EntrezGene IDs,
//! one per line.
//!
//! # Sources
//!
//! - **[`fetch`]**: queries the GENSAT search tool (an Entrez eSearch
//!   endpoint) and extracts the `Id` elements of the XML response
//! - **[`filter`]**: reads a locally supplied tab-separated file and keeps
//!   the third column, skipping the header row
//!
//! # Example
//!
//! ```no_run
//! use gensat_input::filter::{self, FilterConfig};
//!
//! fn main() -> gensat_input::Result<()> {
//!     let config = FilterConfig::new("gensat_export.txt", "gensat.input");
//!     let summary = filter::run(&config)?;
//!     println!("{} identifiers written", summary.written);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod error;
pub mod esearch;
pub mod fetch;
pub mod filter;

pub use error::{IngestError, Result};
