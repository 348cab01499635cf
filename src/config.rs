//! Configuration file.
//!
//! An optional TOML file extends the built-in type table and adjusts
//! naming and synthesis. Every section and key may be omitted:
//!
//! ```toml
//! [types]
//! value = ["KUrl"]
//! object = ["QPixmap"]
//! unsupported = ["QVariantMap"]
//! enum_namespaces = ["Phonon"]
//! global_enums = ["KGlobalSettings::Completion"]
//!
//! [naming]
//! binding_suffix = "Binding"
//! header_suffix = "_bind.h"
//!
//! [generator]
//! setter_prefixes = ["set", "reset"]
//! write_back_mutators = false
//!
//! [classes]
//! variant = ["QBrush"]
//! only = ["QBrush", "QPen"]
//! ```
//!
//! Command-line flags are applied on top with [`Config::with_overrides`].

use std::fs;
use std::path::Path;

use autobind_core::{TypeCategory, TypeTable};
use autobind_generator::{GeneratorOptions, Naming};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use tracing::debug;

use crate::AutobindError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub types: TypesConfig,
    pub naming: NamingConfig,
    pub generator: GeneratorConfig,
    pub classes: ClassesConfig,
}

/// Additions to the built-in type table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypesConfig {
    /// Types marshalled through `QVariant`.
    pub value: Vec<String>,
    /// Types bound by their own binding class.
    pub object: Vec<String>,
    /// Types never bound; members using them are skipped.
    pub unsupported: Vec<String>,
    /// Namespaces whose qualified members are enums (`Qt` is built in).
    pub enum_namespaces: Vec<String>,
    /// Fully qualified enums declared outside the bound classes.
    pub global_enums: Vec<String>,
}

/// Overrides of generated identifier and file name suffixes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    pub binding_suffix: Option<String>,
    pub data_suffix: Option<String>,
    pub namespace_suffix: Option<String>,
    pub header_suffix: Option<String>,
    pub source_suffix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Replaces the default `["set"]` when present.
    pub setter_prefixes: Option<Vec<String>>,
    pub write_back_mutators: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassesConfig {
    /// Classes bound as `VariantBinding`s.
    pub variant: Vec<String>,
    /// Restrict generation to these classes. Empty means every class.
    pub only: Vec<String>,
}

impl Config {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, AutobindError> {
        let text = fs::read_to_string(path).map_err(|source| AutobindError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| AutobindError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AutobindError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line class selections on top of the file.
    pub fn with_overrides(mut self, only: &[String], variant: &[String]) -> Self {
        if !only.is_empty() {
            self.classes.only = only.to_vec();
        }
        for name in variant {
            if !self.classes.variant.contains(name) {
                self.classes.variant.push(name.clone());
            }
        }
        self
    }

    /// Build the type table: the built-in entries plus the `[types]` section.
    ///
    /// Configured entries override built-in ones. Naming one type in two
    /// configured categories is an error.
    pub fn type_table(&self) -> Result<TypeTable, AutobindError> {
        let mut configured = TypeTable::empty();
        let groups = [
            (&self.types.value, TypeCategory::Value),
            (&self.types.object, TypeCategory::Object),
            (&self.types.unsupported, TypeCategory::Unsupported),
        ];
        for (names, category) in groups {
            for name in names {
                configured.register(name.as_str(), category)?;
            }
        }

        let mut table = TypeTable::builtin();
        for (name, category) in configured.iter() {
            if let Some(previous) = table.reclassify(name, category) {
                if previous != category {
                    debug!(ty = name, %previous, %category, "overriding built-in classification");
                }
            }
        }
        for namespace in &self.types.enum_namespaces {
            table.add_enum_namespace(namespace.as_str());
        }
        for name in &self.types.global_enums {
            table.add_global_enum(name.as_str());
        }
        Ok(table)
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        let defaults = GeneratorOptions::default();
        let naming = &self.naming;
        let base = Naming::default();
        GeneratorOptions {
            naming: Naming {
                binding_suffix: naming.binding_suffix.clone().unwrap_or(base.binding_suffix),
                data_suffix: naming.data_suffix.clone().unwrap_or(base.data_suffix),
                namespace_suffix: naming.namespace_suffix.clone().unwrap_or(base.namespace_suffix),
                header_suffix: naming.header_suffix.clone().unwrap_or(base.header_suffix),
                source_suffix: naming.source_suffix.clone().unwrap_or(base.source_suffix),
            },
            setter_prefixes: self
                .generator
                .setter_prefixes
                .clone()
                .unwrap_or(defaults.setter_prefixes),
            write_back_mutators: self.generator.write_back_mutators,
        }
    }

    pub fn variant_classes(&self) -> FxHashSet<String> {
        self.classes.variant.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn full_file() {
        let config = Config::parse(
            r#"
            [types]
            value = ["KUrl"]
            object = ["QPixmap"]
            enum_namespaces = ["Phonon"]

            [naming]
            binding_suffix = "Glue"

            [generator]
            setter_prefixes = ["set", "reset"]
            write_back_mutators = true

            [classes]
            variant = ["QBrush"]
            "#,
        )
        .unwrap();

        let table = config.type_table().unwrap();
        assert_eq!(table.lookup("KUrl"), Some(TypeCategory::Value));
        assert_eq!(table.lookup("QPixmap"), Some(TypeCategory::Object));
        assert!(table.is_known_enum("Phonon::State"));
        assert!(table.is_known_enum("Qt::Alignment"));

        let options = config.generator_options();
        assert_eq!(options.naming.binding_suffix, "Glue");
        assert_eq!(options.naming.data_suffix, "Data");
        assert!(options.is_setter("resetAll"));
        assert!(options.write_back_mutators);
        assert!(config.variant_classes().contains("QBrush"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::parse("[types]\nvalues = [\"KUrl\"]").is_err());
    }

    #[test]
    fn conflicting_configured_types() {
        let config = Config::parse("[types]\nvalue = [\"KUrl\"]\nobject = [\"KUrl\"]").unwrap();
        let err = config.type_table().unwrap_err();
        assert!(err.to_string().contains("KUrl"));
    }

    #[test]
    fn overrides_apply_on_top() {
        let config = Config::parse("[classes]\nvariant = [\"QBrush\"]\nonly = [\"QPen\"]")
            .unwrap()
            .with_overrides(&["QBrush".to_string()], &["QBrush".to_string(), "QPen".to_string()]);
        assert_eq!(config.classes.only, vec!["QBrush"]);
        assert_eq!(config.classes.variant, vec!["QBrush", "QPen"]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Config::load(Path::new("/nonexistent/autobind.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/autobind.toml"));
    }
}
