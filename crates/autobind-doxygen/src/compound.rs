//! Conversion of a `compounddef` element into a [`ClassDescription`].

use autobind_core::{ClassDescription, EnumDef, Method, Parameter, Protection, TypeTable};
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::DocNode;

/// Specifiers Doxygen sometimes leaves at the front of a return type.
const RETURN_SPECIFIERS: &[&str] = &["virtual", "static", "inline", "explicit", "Q_INVOKABLE"];

/// Reads class descriptions out of Doxygen compound elements.
#[derive(Debug, Clone, Copy)]
pub struct ClassReader<'a> {
    table: &'a TypeTable,
    variant_classes: &'a FxHashSet<String>,
}

impl<'a> ClassReader<'a> {
    /// Create a reader.
    ///
    /// A class is variant-like when the table classifies its name as a value
    /// type or when it is listed in `variant_classes`.
    pub fn new(table: &'a TypeTable, variant_classes: &'a FxHashSet<String>) -> Self {
        Self {
            table,
            variant_classes,
        }
    }

    /// Build a class description from a `compounddef` element.
    ///
    /// Returns `None` when the element has no `compoundname`.
    pub fn read<N: DocNode>(&self, compound: &N) -> Option<ClassDescription> {
        let name = compound.child_text("compoundname")?;
        let is_variant_like = self.table.is_variant(&name) || self.variant_classes.contains(&name);

        let mut class = ClassDescription::new(name).with_variant_like(is_variant_like);
        if let Some(include) = compound.child_text("includes").filter(|inc| !inc.is_empty()) {
            class.include = include;
        }

        for member in compound.descendants("memberdef") {
            match member.attribute("kind") {
                Some("function") => {
                    if let Some(method) = read_function(&member) {
                        debug!(class = %class.name, method = %method.name, "read function");
                        class.push_member(method);
                    }
                }
                Some("enum") => {
                    if let Some(def) = read_enum(&member) {
                        debug!(class = %class.name, enum_name = %def.name, "read enum");
                        class.enums.push(def);
                    }
                }
                _ => {}
            }
        }

        Some(class)
    }
}

fn read_function<N: DocNode>(member: &N) -> Option<Method> {
    let name = member.child_text("name")?;
    let return_type = strip_specifiers(&member.child_text("type").unwrap_or_default());

    let mut method = Method::new(name, return_type)
        .with_protection(protection(member))
        .with_static(flag(member, "static"))
        .with_const(flag(member, "const"));

    for param in member.children("param") {
        let ty = param.child_text("type").unwrap_or_default();
        // `f(void)` is a parameterless function.
        if ty == "void" && param.first_child("declname").is_none() {
            continue;
        }

        let mut parameter = Parameter::new(ty);
        parameter.name = param.child_text("declname").filter(|n| !n.is_empty());
        parameter.default = param.child_text("defval").filter(|d| !d.is_empty());
        method.params.push(parameter);
    }

    Some(method)
}

fn read_enum<N: DocNode>(member: &N) -> Option<EnumDef> {
    let name = member.child_text("name")?;
    let mut def = EnumDef::new(name).with_protection(protection(member));
    def.values = member
        .children("enumvalue")
        .iter()
        .filter_map(|value| value.child_text("name"))
        .collect();
    Some(def)
}

fn protection<N: DocNode>(member: &N) -> Protection {
    member
        .attribute("prot")
        .map(Protection::from_doxygen)
        .unwrap_or_default()
}

fn flag<N: DocNode>(member: &N, attr: &str) -> bool {
    member.attribute(attr) == Some("yes")
}

fn strip_specifiers(ty: &str) -> String {
    let mut rest = ty.trim();
    'outer: loop {
        for spec in RETURN_SPECIFIERS {
            if let Some(stripped) = rest.strip_prefix(spec) {
                if stripped.starts_with(char::is_whitespace) {
                    rest = stripped.trim_start();
                    continue 'outer;
                }
            }
        }
        break;
    }
    rest.to_string()
}
