//! Class descriptions read from Doxygen.
//!
//! A [`ClassDescription`] is built once per compound and never mutated
//! afterwards. Generation only reads it.

use rustc_hash::FxHashSet;

/// Member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Protection {
    #[default]
    Public,
    Protected,
    Private,
    Package,
}

impl Protection {
    /// Parse a Doxygen `prot` attribute value.
    pub fn from_doxygen(prot: &str) -> Self {
        match prot {
            "protected" => Protection::Protected,
            "private" => Protection::Private,
            "package" => Protection::Package,
            _ => Protection::Public,
        }
    }

    pub fn is_public(self) -> bool {
        self == Protection::Public
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Declared type, as written.
    pub ty: String,
    /// Declared name, if the header names the parameter.
    pub name: Option<String>,
    /// Default value expression.
    pub default: Option<String>,
}

impl Parameter {
    /// Create an unnamed parameter without a default.
    pub fn new(ty: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: None,
            default: None,
        }
    }

    /// Set the declared name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// A method or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method {
    pub name: String,
    /// Return type as written. Empty for constructors.
    pub return_type: String,
    pub params: Vec<Parameter>,
    pub protection: Protection,
    pub is_static: bool,
    /// Declared `const` (does not modify the object).
    pub is_const: bool,
}

impl Method {
    /// Create a public, non-static, non-const method without parameters.
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: return_type.into(),
            params: Vec::new(),
            protection: Protection::Public,
            is_static: false,
            is_const: false,
        }
    }

    /// Create a public constructor for `class_name`.
    pub fn constructor(class_name: impl Into<String>) -> Self {
        Self::new(class_name, "")
    }

    // === Builder Methods ===

    pub fn with_param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_protection(mut self, protection: Protection) -> Self {
        self.protection = protection;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    // === Queries ===

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// Number of leading parameters without a default value.
    pub fn required_arity(&self) -> usize {
        self.params
            .iter()
            .position(Parameter::has_default)
            .unwrap_or(self.params.len())
    }

    /// Whether this is an operator overload (`operator==`, `operator[]`, ...).
    pub fn is_operator(&self) -> bool {
        self.name
            .strip_prefix("operator")
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_'))
    }

    /// Whether this is a destructor.
    pub fn is_destructor(&self) -> bool {
        self.name.starts_with('~')
    }

    /// Resolve a unique variable name for every parameter.
    ///
    /// Unnamed parameters become `arg<N>`. A name that collides with an
    /// earlier parameter or with one of `reserved` gets `_<N>` appended
    /// until it is unique.
    pub fn param_names(&self, reserved: &[&str]) -> Vec<String> {
        let mut taken: FxHashSet<String> = reserved.iter().map(|r| r.to_string()).collect();
        let mut names = Vec::with_capacity(self.params.len());

        for (idx, param) in self.params.iter().enumerate() {
            let mut name = match &param.name {
                Some(name) if !name.is_empty() => name.clone(),
                _ => format!("arg{idx}"),
            };
            while taken.contains(&name) {
                name = format!("{name}_{idx}");
            }
            taken.insert(name.clone());
            names.push(name);
        }

        names
    }
}

/// An enumeration declared on a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumDef {
    pub name: String,
    pub protection: Protection,
    /// Enumerator names in declaration order.
    pub values: Vec<String>,
}

impl EnumDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            protection: Protection::Public,
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    pub fn with_protection(mut self, protection: Protection) -> Self {
        self.protection = protection;
        self
    }
}

/// Everything the generator needs to know about one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescription {
    /// Class name, possibly namespace-qualified.
    pub name: String,
    /// Header to include for the class (`qbrush.h`).
    pub include: String,
    /// Non-constructor methods in declaration order.
    pub methods: Vec<Method>,
    pub enums: Vec<EnumDef>,
    pub constructors: Vec<Method>,
    /// Marshal as a `QVariant` value rather than a plain value binding.
    pub is_variant_like: bool,
}

impl ClassDescription {
    /// Create a class with the default include `<lowercase name>.h`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let include = default_include(&name);
        Self {
            name,
            include,
            methods: Vec::new(),
            enums: Vec::new(),
            constructors: Vec::new(),
            is_variant_like: false,
        }
    }

    // === Builder Methods ===

    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    /// Add a method. Methods named after the class become constructors.
    pub fn with_method(mut self, method: Method) -> Self {
        self.push_member(method);
        self
    }

    pub fn with_constructor(mut self, ctor: Method) -> Self {
        self.constructors.push(ctor);
        self
    }

    pub fn with_enum(mut self, def: EnumDef) -> Self {
        self.enums.push(def);
        self
    }

    pub fn with_variant_like(mut self, is_variant_like: bool) -> Self {
        self.is_variant_like = is_variant_like;
        self
    }

    /// File a function member under methods or constructors.
    ///
    /// Destructors are dropped: they are never bound.
    pub fn push_member(&mut self, method: Method) {
        if method.is_destructor() {
            return;
        }
        if method.name == self.short_name() {
            self.constructors.push(method);
        } else {
            self.methods.push(method);
        }
    }

    // === Queries ===

    /// The class name without any namespace qualification.
    pub fn short_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    /// Find a public enum of this class by bare or class-qualified name.
    pub fn find_enum(&self, name: &str) -> Option<&EnumDef> {
        let bare = match name.rsplit_once("::") {
            Some((owner, bare)) if owner == self.name || owner == self.short_name() => bare,
            Some(_) => return None,
            None => name,
        };
        self.enums
            .iter()
            .find(|def| def.protection.is_public() && def.name == bare)
    }

    /// Iterate over public enums.
    pub fn public_enums(&self) -> impl Iterator<Item = &EnumDef> {
        self.enums.iter().filter(|def| def.protection.is_public())
    }
}

fn default_include(name: &str) -> String {
    let short = name.rsplit("::").next().unwrap_or(name);
    format!("{}.h", short.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_param_names() {
        let method = Method::new("resize", "void")
            .with_param(Parameter::new("int").named("w"))
            .with_param(Parameter::new("int"))
            .with_param(Parameter::new("int").named("w"));
        assert_eq!(method.param_names(&[]), vec!["w", "arg1", "w_2"]);
    }

    #[test]
    fn reserved_param_names() {
        let method = Method::new("setValue", "void")
            .with_param(Parameter::new("int").named("value"))
            .with_param(Parameter::new("int").named("value_0"));
        let names = method.param_names(&["value"]);
        assert_eq!(names[0], "value_0");
        assert_eq!(names[1], "value_0_1");
    }

    #[test]
    fn required_arity_stops_at_first_default() {
        let method = Method::new("fill", "void")
            .with_param(Parameter::new("int").named("x"))
            .with_param(Parameter::new("int").named("y").with_default("0"));
        assert_eq!(method.arity(), 2);
        assert_eq!(method.required_arity(), 1);
    }

    #[test]
    fn operator_detection() {
        assert!(Method::new("operator==", "bool").is_operator());
        assert!(Method::new("operator[]", "int").is_operator());
        assert!(Method::new("operator QVariant", "").is_operator());
        assert!(!Method::new("operatorName", "QString").is_operator());
        assert!(!Method::new("setOperator", "void").is_operator());
    }

    #[test]
    fn members_are_partitioned() {
        let class = ClassDescription::new("Widget")
            .with_method(Method::constructor("Widget"))
            .with_method(Method::new("~Widget", ""))
            .with_method(Method::new("getValue", "int"));
        assert_eq!(class.constructors.len(), 1);
        assert_eq!(class.methods.len(), 1);
        assert_eq!(class.include, "widget.h");
    }

    #[test]
    fn find_enum_by_qualified_name() {
        let class = ClassDescription::new("Widget")
            .with_enum(EnumDef::new("Mode").with_value("Fast"))
            .with_enum(EnumDef::new("Hidden").with_protection(Protection::Private));
        assert!(class.find_enum("Mode").is_some());
        assert!(class.find_enum("Widget::Mode").is_some());
        assert!(class.find_enum("Other::Mode").is_none());
        assert!(class.find_enum("Hidden").is_none());
    }
}
