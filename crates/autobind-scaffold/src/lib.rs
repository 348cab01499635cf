//! Class file scaffolding.
//!
//! Copies a header and a source template into `<lowercase>.h` and
//! `<lowercase>.cpp`, replacing `Template`, `TEMPLATE` and `template` with
//! the class name, its uppercase and its lowercase form. Nothing is written
//! if either target already exists.

mod error;
pub use error::ScaffoldError;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

const HEADER_TEMPLATE: &str = include_str!("../templates/template.h");
const SOURCE_TEMPLATE: &str = include_str!("../templates/template.cpp");

const PLACEHOLDER: &str = "Template";

/// Header and source template text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub header: String,
    pub source: String,
}

impl Templates {
    /// The templates shipped with the tool.
    pub fn builtin() -> Self {
        Self {
            header: HEADER_TEMPLATE.to_string(),
            source: SOURCE_TEMPLATE.to_string(),
        }
    }

    /// Load `template.h` and `template.cpp` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, ScaffoldError> {
        Ok(Self {
            header: read(&dir.join("template.h"))?,
            source: read(&dir.join("template.cpp"))?,
        })
    }
}

/// Files written by [`scaffold`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOutput {
    pub header: PathBuf,
    pub source: PathBuf,
}

/// Write the class files for `class_name` into `out_dir`.
pub fn scaffold(class_name: &str, templates: &Templates, out_dir: &Path) -> Result<ScaffoldOutput, ScaffoldError> {
    if !is_identifier(class_name) {
        return Err(ScaffoldError::InvalidClassName(class_name.to_string()));
    }

    let lower = class_name.to_lowercase();
    let output = ScaffoldOutput {
        header: out_dir.join(format!("{lower}.h")),
        source: out_dir.join(format!("{lower}.cpp")),
    };

    for path in [&output.header, &output.source] {
        if path.exists() {
            return Err(ScaffoldError::TargetExists { path: path.clone() });
        }
    }

    write(&output.header, &substitute(&templates.header, class_name))?;
    write(&output.source, &substitute(&templates.source, class_name))?;

    info!(class = class_name, header = %output.header.display(), source = %output.source.display(), "scaffolded class");
    Ok(output)
}

/// Replace every placeholder in one pass.
///
/// A replacement is never re-scanned, so class names containing the
/// placeholder are safe.
pub fn substitute(text: &str, class_name: &str) -> String {
    let upper = class_name.to_uppercase();
    let lower = class_name.to_lowercase();
    let placeholder_upper = PLACEHOLDER.to_uppercase();
    let placeholder_lower = PLACEHOLDER.to_lowercase();

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        let replacement = if rest.starts_with(PLACEHOLDER) {
            Some(class_name)
        } else if rest.starts_with(placeholder_upper.as_str()) {
            Some(upper.as_str())
        } else if rest.starts_with(placeholder_lower.as_str()) {
            Some(lower.as_str())
        } else {
            None
        };

        match replacement {
            Some(replacement) => {
                out.push_str(replacement);
                rest = &rest[PLACEHOLDER.len()..];
            }
            None => {
                let mut chars = rest.chars();
                if let Some(c) = chars.next() {
                    out.push(c);
                }
                rest = chars.as_str();
            }
        }
    }
    out
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn read(path: &Path) -> Result<String, ScaffoldError> {
    fs::read_to_string(path).map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    debug!(path = %path.display(), "writing");
    fs::write(path, contents).map_err(|source| ScaffoldError::Io {
        path: path.to_path_buf(),
        source,
    })
}
