use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while emitting bindings.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An output file could not be created or written.
    #[error("unable to write output binding {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
