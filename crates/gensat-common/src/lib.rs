//! GENSAT Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared pieces used by the GENSAT load input utilities:
//!
//! - **Logging**: tracing subscriber setup driven by environment variables
//! - **Identifiers**: the loader input file writer (one identifier per line)
//!
//! # Example
//!
//! ```no_run
//! use gensat_common::identifiers::IdentifierWriter;
//!
//! fn write_ids(path: &str) -> std::io::Result<()> {
//!     let mut writer = IdentifierWriter::create(path)?;
//!     writer.write_id("11287")?;
//!     writer.write_id("11298")?;
//!     let count = writer.finish()?;
//!     assert_eq!(count, 2);
//!     Ok(())
//! }
//! ```

pub mod identifiers;
pub mod logging;

pub use identifiers::IdentifierWriter;
