use std::path::PathBuf;

use thiserror::Error;

/// Failures reading Doxygen output. All of them abort the run.
#[derive(Debug, Error)]
pub enum InputError {
    /// A required file could not be opened or read.
    #[error("unable to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file is not well-formed XML.
    #[error("unable to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// A file parsed but lacks an element the reader depends on.
    #[error("{} has no <{element}> element", path.display())]
    MissingElement { path: PathBuf, element: &'static str },

    /// A requested class is not listed in the index.
    #[error("class '{0}' is not listed in the Doxygen index")]
    UnknownClass(String),
}
