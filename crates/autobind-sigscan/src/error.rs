use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while extracting signatures.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A source file could not be read.
    #[error("unable to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The same signature was seen with two different concrete return types.
    #[error(
        "conflicting return types for {signature}: '{first}' and '{second}' (at {origin}:{line})"
    )]
    ConflictingReturnType {
        signature: String,
        first: String,
        second: String,
        /// Where the second return type was seen.
        origin: String,
        line: u32,
    },
}
