//! Loader input file writer
//!
//! The GENSAT load consumes a plain file with one EntrezGene ID per line: no
//! header, no delimiter, no quoting. Both utilities produce that file through
//! [`IdentifierWriter`] so the format stays identical between them.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Line terminator of the loader input file
pub const LINE_TERMINATOR: &[u8] = b"\n";

/// Buffered writer for a newline-delimited identifier file
#[derive(Debug)]
pub struct IdentifierWriter {
    path: PathBuf,
    inner: BufWriter<File>,
    written: usize,
}

impl IdentifierWriter {
    /// Create (or truncate) the file at `path`
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;

        debug!(path = %path.display(), "Opened loader input file");

        Ok(Self {
            path,
            inner: BufWriter::new(file),
            written: 0,
        })
    }

    /// Append one identifier as its own line
    pub fn write_id(&mut self, id: &str) -> io::Result<()> {
        self.write_id_bytes(id.as_bytes())
    }

    /// Append one identifier, copied byte for byte, as its own line
    pub fn write_id_bytes(&mut self, id: &[u8]) -> io::Result<()> {
        self.inner.write_all(id)?;
        self.inner.write_all(LINE_TERMINATOR)?;
        self.written += 1;
        Ok(())
    }

    /// Number of identifiers written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and close the file, returning the number of identifiers written
    pub fn finish(mut self) -> io::Result<usize> {
        self.inner.flush()?;
        self.inner.get_ref().sync_all()?;

        debug!(
            path = %self.path.display(),
            written = self.written,
            "Closed loader input file"
        );

        Ok(self.written)
    }
}
