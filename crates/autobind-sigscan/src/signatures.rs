//! Extracted signatures and their reconciliation.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::ScanError;

/// One extracted method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub name: String,
    /// Normalised parameter types.
    pub params: Vec<String>,
    /// Normalised return type, empty when the invocation does not say.
    pub return_type: String,
    /// File or label the signature was found in.
    pub origin: String,
    pub line: u32,
}

impl Signature {
    /// `name(T1, T2)`, the de-duplication key.
    pub fn key(&self) -> String {
        format!("{}({})", self.name, self.params.join(", "))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ret = if self.return_type.is_empty() {
            "void"
        } else {
            &self.return_type
        };
        write!(f, "{ret} {}", self.key())
    }
}

/// Signatures keyed by `name(T1, T2)`, sorted.
#[derive(Debug, Default, Clone)]
pub struct SignatureTable {
    entries: BTreeMap<String, Signature>,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a signature, reconciling it with an earlier one of the same key.
    ///
    /// An empty return type is widened by a concrete one. Two different
    /// concrete return types are an error and leave the table unchanged.
    pub fn insert(&mut self, signature: Signature) -> Result<(), ScanError> {
        let key = signature.key();
        let Some(existing) = self.entries.get_mut(&key) else {
            debug!(%key, ret = %signature.return_type, "new signature");
            self.entries.insert(key, signature);
            return Ok(());
        };

        if signature.return_type.is_empty() || existing.return_type == signature.return_type {
            return Ok(());
        }
        if existing.return_type.is_empty() {
            debug!(%key, ret = %signature.return_type, "widened return type");
            existing.return_type = signature.return_type;
            return Ok(());
        }

        Err(ScanError::ConflictingReturnType {
            signature: key,
            first: existing.return_type.clone(),
            second: signature.return_type,
            origin: signature.origin,
            line: signature.line,
        })
    }

    pub fn get(&self, key: &str) -> Option<&Signature> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One `Ret name(T1, T2)` line per signature, sorted by key.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for signature in self.iter() {
            out.push_str(&signature.to_string());
            out.push('\n');
        }
        out
    }
}
