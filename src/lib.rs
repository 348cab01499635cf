//! KJSEmbed binding generator.
//!
//! The tool has three jobs, each exposed here as one entry point:
//! - [`generate_bindings`] reads a Doxygen XML directory and writes a
//!   binding declaration and definition per class
//! - [`scaffold_class`] writes a new class header and source from templates
//! - [`extract_signatures`] lists the backend methods a frontend calls
//!
//! The library crates under `crates/` do the actual work; this crate wires
//! them to the configuration file and the command line.

mod config;
mod error;

pub use config::{ClassesConfig, Config, GeneratorConfig, NamingConfig, TypesConfig};
pub use error::{AutobindError, Result};

pub use autobind_generator::{BindingGenerator, GeneratedArtifact, GenerationReport, SkippedMember};
pub use autobind_scaffold::{ScaffoldOutput, Templates};
pub use autobind_sigscan::SignatureTable;

use std::fs;
use std::path::Path;

use autobind_doxygen::{ClassReader, DoxygenDir, IndexEntry, InputError};
use tracing::info;

/// Generate bindings for the classes of one Doxygen run.
///
/// `config.classes.only` restricts the run to the named classes; naming a
/// class the index does not list is an error. Nothing is generated until
/// every requested class is found.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn generate_bindings(xml_dir: &Path, out_dir: &Path, config: &Config) -> Result<Vec<GeneratedArtifact>> {
    let table = config.type_table()?;
    let variant_classes = config.variant_classes();
    let generator = BindingGenerator::new(&table, config.generator_options());
    let reader = ClassReader::new(&table, &variant_classes);

    let doxygen = DoxygenDir::new(xml_dir);
    let entries = select_classes(doxygen.classes()?, &config.classes.only)?;
    info!(dir = %xml_dir.display(), classes = entries.len(), "loaded index");

    fs::create_dir_all(out_dir).map_err(|source| AutobindError::OutputDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut artifacts = Vec::with_capacity(entries.len());
    for entry in &entries {
        let class = doxygen.load_class(entry, &reader)?;
        let artifact = generator.generate(&class);
        artifact.write_to(out_dir)?;
        artifacts.push(artifact);
    }

    info!(out = %out_dir.display(), bindings = artifacts.len(), "done");
    Ok(artifacts)
}

fn select_classes(entries: Vec<IndexEntry>, only: &[String]) -> Result<Vec<IndexEntry>> {
    if only.is_empty() {
        return Ok(entries);
    }
    if let Some(missing) = only.iter().find(|name| !entries.iter().any(|e| &e.name == *name)) {
        return Err(InputError::UnknownClass(missing.clone()).into());
    }
    Ok(entries.into_iter().filter(|entry| only.contains(&entry.name)).collect())
}

/// Write `<lowercase>.h` and `<lowercase>.cpp` for a new class.
///
/// Uses `template.h` and `template.cpp` from `templates_dir` when given,
/// the built-in templates otherwise.
pub fn scaffold_class(class_name: &str, templates_dir: Option<&Path>, out_dir: &Path) -> Result<ScaffoldOutput> {
    let templates = match templates_dir {
        Some(dir) => Templates::from_dir(dir)?,
        None => Templates::builtin(),
    };
    Ok(autobind_scaffold::scaffold(class_name, &templates, out_dir)?)
}

/// Scan frontend sources and render the backend signature list.
///
/// The list is written to `output` when given and returned either way.
pub fn extract_signatures<P: AsRef<Path>>(files: &[P], output: Option<&Path>) -> Result<String> {
    let table = autobind_sigscan::scan_files(files)?;
    let rendered = table.render();
    info!(files = files.len(), signatures = table.len(), "extracted signatures");

    if let Some(path) = output {
        fs::write(path, &rendered).map_err(|source| AutobindError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(rendered)
}
