//! Generated output for one class.

use std::fs;
use std::path::{Path, PathBuf};

use crate::GenerateError;

/// A member left out of the binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMember {
    /// `Class::name(T1, T2)`.
    pub signature: String,
    pub reason: String,
}

/// What went into a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Bound instance method names, in dispatch table order.
    pub methods: Vec<String>,
    /// Bound static method names.
    pub statics: Vec<String>,
    /// Number of bound constructor overloads.
    pub constructors: usize,
    pub skipped: Vec<SkippedMember>,
    /// Other bound types the definition includes.
    pub external_bindings: Vec<String>,
}

/// Declaration and definition text for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub class_name: String,
    /// File name of the declaration (`Widget_bind.h`).
    pub header_file: String,
    /// File name of the definition (`Widget_bind.cpp`).
    pub source_file: String,
    pub declaration: String,
    pub definition: String,
    pub report: GenerationReport,
}

impl GeneratedArtifact {
    /// Write both files into `dir`, returning their paths.
    pub fn write_to(&self, dir: &Path) -> Result<(PathBuf, PathBuf), GenerateError> {
        let header = dir.join(&self.header_file);
        let source = dir.join(&self.source_file);
        write_file(&header, &self.declaration)?;
        write_file(&source, &self.definition)?;
        Ok((header, source))
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|source| GenerateError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}
