//! Generator options and naming conventions.

/// Suffixes used to derive generated identifiers and file names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Naming {
    /// Appended to the class name for the binding class (`WidgetBinding`).
    pub binding_suffix: String,
    /// Appended to the class name for the static data holder (`WidgetData`).
    pub data_suffix: String,
    /// Appended to the class name for the method namespace (`WidgetNS`).
    pub namespace_suffix: String,
    /// Declaration file suffix (`Widget_bind.h`).
    pub header_suffix: String,
    /// Definition file suffix (`Widget_bind.cpp`).
    pub source_suffix: String,
}

impl Default for Naming {
    fn default() -> Self {
        Self {
            binding_suffix: "Binding".to_string(),
            data_suffix: "Data".to_string(),
            namespace_suffix: "NS".to_string(),
            header_suffix: "_bind.h".to_string(),
            source_suffix: "_bind.cpp".to_string(),
        }
    }
}

/// Options controlling code synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub naming: Naming,
    /// Name prefixes marking setter-shaped methods.
    pub setter_prefixes: Vec<String>,
    /// Write the held value back after every non-const call, not only setters.
    pub write_back_mutators: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            naming: Naming::default(),
            setter_prefixes: vec!["set".to_string()],
            write_back_mutators: false,
        }
    }
}

impl GeneratorOptions {
    /// Whether `name` looks like a setter: a prefix followed by an uppercase letter.
    pub fn is_setter(&self, name: &str) -> bool {
        self.setter_prefixes.iter().any(|prefix| {
            name.strip_prefix(prefix.as_str())
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| c.is_ascii_uppercase())
        })
    }
}
