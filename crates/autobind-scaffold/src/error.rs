use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// A target file is already present.
    #[error("{} already exists", path.display())]
    TargetExists { path: PathBuf },

    #[error("'{0}' is not a valid C++ class name")]
    InvalidClassName(String),

    #[error("unable to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
