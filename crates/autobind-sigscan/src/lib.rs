//! Backend method signature extraction.
//!
//! Scans C++ sources for the macro invocations a frontend uses to call into
//! its backend object, and collects the method signatures the backend must
//! provide. Signatures seen more than once are reconciled: an unknown
//! return type is widened by a concrete one, two different concrete return
//! types are an error.
//!
//! # Example
//!
//! ```ignore
//! let mut table = SignatureTable::new();
//! table.scan_source("audiooutput.cpp", &source)?;
//! print!("{}", table.render());
//! ```

mod cursor;
mod error;
mod lexer;
mod scanner;
mod signatures;
mod token;

pub use error::ScanError;
pub use scanner::Scanner;
pub use signatures::{Signature, SignatureTable};

use std::fs;
use std::path::Path;

use tracing::info;

impl SignatureTable {
    /// Scan one source text into the table, returning the number of
    /// invocations found.
    pub fn scan_source(&mut self, origin: &str, source: &str) -> Result<usize, ScanError> {
        let found = Scanner::new(origin).scan(source);
        let count = found.len();
        for signature in found {
            self.insert(signature)?;
        }
        Ok(count)
    }

    /// Read and scan one file.
    pub fn scan_file(&mut self, path: &Path) -> Result<usize, ScanError> {
        let source = fs::read_to_string(path).map_err(|source| ScanError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = path.display().to_string();
        let count = self.scan_source(&origin, &source)?;
        info!(file = %origin, invocations = count, "scanned");
        Ok(count)
    }
}

/// Scan every file in order into a fresh table.
pub fn scan_files<P: AsRef<Path>>(paths: &[P]) -> Result<SignatureTable, ScanError> {
    let mut table = SignatureTable::new();
    for path in paths {
        table.scan_file(path.as_ref())?;
    }
    Ok(table)
}
