use std::path::PathBuf;

use autobind_core::TypeTableError;
use autobind_doxygen::InputError;
use autobind_generator::GenerateError;
use autobind_scaffold::ScaffoldError;
use autobind_sigscan::ScanError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutobindError>;

/// Any failure that aborts a run.
#[derive(Debug, Error)]
pub enum AutobindError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Scaffold(#[from] ScaffoldError),

    #[error("invalid type configuration: {0}")]
    TypeTable(#[from] TypeTableError),

    #[error("unable to read configuration {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unable to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
