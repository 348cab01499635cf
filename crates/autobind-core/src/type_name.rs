//! Parsing of raw C++ type strings.
//!
//! Doxygen reports types exactly as written in the header, for example
//! `const QString &` or `QWidget *`. [`TypeName::parse`] peels off one
//! `const` qualifier, one trailing reference and one pointer level to get
//! at the core type name the classification table is keyed on.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Qualifiers stripped from a raw type string.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TypeQualifiers: u8 {
        /// A leading `const`.
        const CONST = 0b0001;
        /// A trailing `&`.
        const REFERENCE = 0b0010;
        /// A single `*` on a plain word.
        const POINTER = 0b0100;
    }
}

/// A raw type string split into its core name and qualifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    /// The type as written, with whitespace collapsed.
    pub raw: String,
    /// The type with `const`, `&` and `*` removed.
    pub core: String,
    /// What was removed.
    pub qualifiers: TypeQualifiers,
}

impl TypeName {
    /// Parse a raw type string.
    ///
    /// Strips exactly one leading `const` and one trailing `&`. If what is
    /// left is a single word followed by `*`, the pointer is stripped too.
    pub fn parse(raw: &str) -> Self {
        let raw = collapse_whitespace(raw);
        let mut qualifiers = TypeQualifiers::empty();
        let mut rest = raw.as_str();

        if let Some(stripped) = rest.strip_prefix("const ") {
            qualifiers |= TypeQualifiers::CONST;
            rest = stripped.trim_start();
        }

        if let Some(stripped) = rest.strip_suffix('&') {
            qualifiers |= TypeQualifiers::REFERENCE;
            rest = stripped.trim_end();
        }

        if let Some(stripped) = rest.strip_suffix('*') {
            let pointee = stripped.trim_end();
            if is_word(pointee) {
                qualifiers |= TypeQualifiers::POINTER;
                rest = pointee;
            }
        }

        Self {
            core: rest.to_string(),
            raw,
            qualifiers,
        }
    }

    /// Whether a leading `const` was stripped.
    #[inline]
    pub fn is_const(&self) -> bool {
        self.qualifiers.contains(TypeQualifiers::CONST)
    }

    /// Whether the core type is pointed to.
    #[inline]
    pub fn is_pointer(&self) -> bool {
        self.qualifiers.contains(TypeQualifiers::POINTER)
    }

    /// Whether this is `void` (and not `void*`).
    pub fn is_void(&self) -> bool {
        self.core == "void" && !self.is_pointer()
    }

    /// Whether the core name is a single, possibly `::`-qualified,
    /// identifier. Multi-word builtins such as `unsigned char` are not.
    pub fn is_plain(&self) -> bool {
        self.core.split("::").all(is_identifier)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Collapse runs of whitespace to a single space and trim the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// `word` in the `word*` pointer pattern: identifier characters, `::`, and
/// inner spaces for multi-word builtins such as `unsigned int`.
fn is_word(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':' || c == ' ')
}
