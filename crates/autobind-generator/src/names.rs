//! Identifiers derived from a class name.

use autobind_core::ClassDescription;

use crate::Naming;

/// Every generated identifier for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassNames {
    /// The C++ class, possibly namespace-qualified.
    pub class: String,
    /// Binding class (`WidgetBinding`).
    pub binding: String,
    /// `KJS_BINDING` data holder (`WidgetData`).
    pub data: String,
    /// Namespace of instance method glue (`WidgetNS`).
    pub methods_ns: String,
    /// Namespace of static method glue (`WidgetStaticNS`).
    pub statics_ns: String,
    /// KJSEmbed base of the binding class.
    pub base: &'static str,
    /// KJSEmbed factory whose methods are published next to the class methods.
    pub factory: &'static str,
    pub header_file: String,
    pub source_file: String,
    pub include_guard: String,
}

impl ClassNames {
    pub(crate) fn new(class: &ClassDescription, naming: &Naming) -> Self {
        let short = class.short_name();
        let (base, factory) = if class.is_variant_like {
            ("VariantBinding", "VariantFactory")
        } else {
            ("ValueBinding", "ValueFactory")
        };
        let header_file = format!("{short}{}", naming.header_suffix);

        Self {
            class: class.name.clone(),
            binding: format!("{short}{}", naming.binding_suffix),
            data: format!("{short}{}", naming.data_suffix),
            methods_ns: format!("{short}{}", naming.namespace_suffix),
            statics_ns: format!("{short}Static{}", naming.namespace_suffix),
            base,
            factory,
            source_file: format!("{short}{}", naming.source_suffix),
            include_guard: include_guard(&header_file),
            header_file,
        }
    }

    /// Binding class name of another bound type.
    pub(crate) fn binding_of(core: &str, naming: &Naming) -> String {
        let short = core.rsplit("::").next().unwrap_or(core);
        format!("{short}{}", naming.binding_suffix)
    }
}

fn include_guard(file: &str) -> String {
    file.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_class_names() {
        let names = ClassNames::new(&ClassDescription::new("Widget"), &Naming::default());
        assert_eq!(names.binding, "WidgetBinding");
        assert_eq!(names.data, "WidgetData");
        assert_eq!(names.methods_ns, "WidgetNS");
        assert_eq!(names.base, "ValueBinding");
        assert_eq!(names.header_file, "Widget_bind.h");
        assert_eq!(names.source_file, "Widget_bind.cpp");
        assert_eq!(names.include_guard, "WIDGET_BIND_H");
    }

    #[test]
    fn namespaced_variant_class() {
        let class = ClassDescription::new("KDE::Brush").with_variant_like(true);
        let names = ClassNames::new(&class, &Naming::default());
        assert_eq!(names.class, "KDE::Brush");
        assert_eq!(names.binding, "BrushBinding");
        assert_eq!(names.base, "VariantBinding");
        assert_eq!(names.factory, "VariantFactory");
    }

    #[test]
    fn binding_of_other_type() {
        assert_eq!(ClassNames::binding_of("QWidget", &Naming::default()), "QWidgetBinding");
        assert_eq!(ClassNames::binding_of("KDE::Pen", &Naming::default()), "PenBinding");
    }
}
