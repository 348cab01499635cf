//! Type classification.
//!
//! Resolves a raw type string against the [`TypeTable`] and the enums of the
//! class being bound. Unknown plain names fall back to object references.

use autobind_core::{ClassDescription, TypeCategory, TypeName, TypeTable};

/// A type resolved to its marshalling category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedType {
    pub name: TypeName,
    pub category: TypeCategory,
    /// Spelling of the core type in generated code. Enums declared on the
    /// bound class are qualified with the class name.
    pub cpp_name: String,
    /// Whether this is an enum declared on the bound class.
    pub class_enum: bool,
}

impl ClassifiedType {
    pub fn core(&self) -> &str {
        &self.name.core
    }

    pub fn is_pointer(&self) -> bool {
        self.name.is_pointer()
    }

    pub fn is_supported(&self) -> bool {
        self.category.is_supported()
    }

    /// Type of a local holding a value of this type.
    pub fn local_decl(&self) -> String {
        match (self.is_pointer(), self.name.is_const()) {
            (true, true) => format!("const {}*", self.cpp_name),
            (true, false) => format!("{}*", self.cpp_name),
            _ => self.cpp_name.clone(),
        }
    }

    /// Rewrite a default value so it compiles outside the class scope.
    ///
    /// Every unqualified mention of a class enum's name or one of its
    /// enumerators gets the owner prefix, so `Fast|Slow` and `Mode(0)` work
    /// as well as a plain `Fast`.
    pub fn qualify_default(&self, default: &str, class: &ClassDescription) -> String {
        let Some(def) = self.class_enum.then(|| class.find_enum(self.core())).flatten() else {
            return default.to_string();
        };

        let mut out = String::with_capacity(default.len() + class.name.len());
        let mut rest = default;
        while let Some(c) = rest.chars().next() {
            if c.is_ascii_alphanumeric() || c == '_' {
                let end = rest
                    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                    .unwrap_or(rest.len());
                let word = &rest[..end];
                let is_enum_name = word == def.name || def.values.iter().any(|v| v == word);
                // Digits start a literal such as `0x1F`, never a name.
                if is_enum_name && !c.is_ascii_digit() && !out.ends_with("::") {
                    out.push_str(&class.name);
                    out.push_str("::");
                }
                out.push_str(word);
                rest = &rest[end..];
            } else {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
        out
    }
}

/// Classifies types in the context of one class.
#[derive(Debug, Clone, Copy)]
pub struct TypeClassifier<'a> {
    table: &'a TypeTable,
    class: &'a ClassDescription,
}

impl<'a> TypeClassifier<'a> {
    pub fn new(table: &'a TypeTable, class: &'a ClassDescription) -> Self {
        Self { table, class }
    }

    /// Classify a raw type string.
    ///
    /// Pointers are only bound for object references; a pointer to anything
    /// else is unsupported.
    pub fn classify(&self, raw: &str) -> ClassifiedType {
        let name = TypeName::parse(raw);
        let mut cpp_name = name.core.clone();
        let mut class_enum = false;

        let category = if let Some(category) = self.table.lookup(&name.core) {
            category
        } else if let Some(def) = self.class.find_enum(&name.core) {
            class_enum = true;
            cpp_name = format!("{}::{}", self.class.name, def.name);
            TypeCategory::Enum
        } else if self.table.is_known_enum(&name.core) {
            TypeCategory::Enum
        } else if name.is_plain() {
            TypeCategory::Object
        } else {
            TypeCategory::Unsupported
        };

        let category = if name.is_pointer() && category != TypeCategory::Object {
            TypeCategory::Unsupported
        } else {
            category
        };

        ClassifiedType {
            name,
            category,
            cpp_name,
            class_enum,
        }
    }
}
