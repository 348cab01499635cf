//! Doxygen output directory and `index.xml`.

use std::fs;
use std::path::{Path, PathBuf};

use autobind_core::ClassDescription;
use tracing::debug;

use crate::{ClassReader, DocNode, InputError};

/// Kind attribute of an index compound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CompoundKind {
    Class,
    Struct,
    Namespace,
    File,
    Other(String),
}

impl CompoundKind {
    fn from_doxygen(kind: &str) -> Self {
        match kind {
            "class" => CompoundKind::Class,
            "struct" => CompoundKind::Struct,
            "namespace" => CompoundKind::Namespace,
            "file" => CompoundKind::File,
            other => CompoundKind::Other(other.to_string()),
        }
    }
}

/// One `<compound>` entry of `index.xml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// File stem of the compound's own XML file.
    pub refid: String,
    pub kind: CompoundKind,
    pub name: String,
}

/// A directory of Doxygen XML output.
#[derive(Debug, Clone)]
pub struct DoxygenDir {
    root: PathBuf,
}

impl DoxygenDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read `index.xml` and list every compound in it.
    pub fn index(&self) -> Result<Vec<IndexEntry>, InputError> {
        let path = self.root.join("index.xml");
        let text = read_file(&path)?;
        let doc = parse(&path, &text)?;

        let entries = DocNode::children(&doc.root_element(), "compound")
            .iter()
            .filter_map(|compound| {
                let refid = compound.attribute("refid")?.to_string();
                let kind = CompoundKind::from_doxygen(compound.attribute("kind")?);
                let name = compound.child_text("name")?;
                Some(IndexEntry { refid, kind, name })
            })
            .collect();

        Ok(entries)
    }

    /// List the class compounds of the index.
    pub fn classes(&self) -> Result<Vec<IndexEntry>, InputError> {
        Ok(self
            .index()?
            .into_iter()
            .filter(|entry| entry.kind == CompoundKind::Class)
            .collect())
    }

    /// Load one compound by its index entry.
    pub fn load_class(
        &self,
        entry: &IndexEntry,
        reader: &ClassReader<'_>,
    ) -> Result<ClassDescription, InputError> {
        let path = self.root.join(format!("{}.xml", entry.refid));
        debug!(path = %path.display(), "loading compound");

        let text = read_file(&path)?;
        let doc = parse(&path, &text)?;
        let root = doc.root_element();

        let compound = if DocNode::tag(&root) == "compounddef" {
            Some(root)
        } else {
            let defs = DocNode::children(&root, "compounddef");
            defs.iter()
                .find(|def| def.attribute("id") == Some(entry.refid.as_str()))
                .or_else(|| defs.first())
                .copied()
        };

        compound
            .and_then(|def| reader.read(&def))
            .ok_or(InputError::MissingElement {
                path,
                element: "compounddef",
            })
    }
}

fn read_file(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<'input>(path: &Path, text: &'input str) -> Result<roxmltree::Document<'input>, InputError> {
    roxmltree::Document::parse(text).map_err(|source| InputError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
