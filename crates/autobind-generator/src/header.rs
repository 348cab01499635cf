//! Declaration file.

use autobind_core::ClassDescription;

use crate::code_writer::CodeWriter;
use crate::names::ClassNames;

/// Build the declaration file for a class binding.
///
/// Namespaced classes cannot be forward declared, so their header is
/// included instead.
pub(crate) fn write_header(class: &ClassDescription, names: &ClassNames) -> String {
    let mut w = CodeWriter::new();
    let guard = &names.include_guard;
    let base_header = if class.is_variant_like {
        "variant_binding.h"
    } else {
        "value_binding.h"
    };

    w.push_line(format!("#ifndef {guard}"));
    w.push_line(format!("#define {guard}"));
    w.blank();
    w.push_line(format!("#include <{base_header}>"));
    w.push_line("#include <static_binding.h>");
    w.blank();
    if class.name.contains("::") {
        w.push_line(format!("#include <{}>", class.include));
    } else {
        w.push_line(format!("class {};", class.name));
    }
    w.blank();

    w.push_line("namespace KJSEmbed");
    w.push_line("{");
    w.indent();
    w.push_line(format!("class {} : public {}", names.binding, names.base));
    w.open();
    w.dedent();
    w.push_line("public:");
    w.indent();
    w.push_line(format!(
        "{}( KJS::ExecState *exec, const {} &value );",
        names.binding, names.class
    ));
    w.push_line("static const KJS::ClassInfo info;");
    w.dedent();
    w.push_line("private:");
    w.indent();
    w.push_line("virtual const KJS::ClassInfo* classInfo() const { return &info; }");
    w.close(";");
    w.blank();
    w.push_line(format!("KJS_BINDING( {} )", names.data));
    w.dedent();
    w.push_line("}");
    w.push_line(format!("#endif // {guard}"));

    w.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Naming;

    #[test]
    fn value_binding_header() {
        let class = ClassDescription::new("Widget");
        let names = ClassNames::new(&class, &Naming::default());
        let header = write_header(&class, &names);

        assert!(header.starts_with("#ifndef WIDGET_BIND_H\n#define WIDGET_BIND_H\n"));
        assert!(header.contains("#include <value_binding.h>"));
        assert!(header.contains("class Widget;"));
        assert!(header.contains("    class WidgetBinding : public ValueBinding\n    {\n    public:\n"));
        assert!(header.contains("WidgetBinding( KJS::ExecState *exec, const Widget &value );"));
        assert!(header.contains("    KJS_BINDING( WidgetData )"));
        assert!(header.trim_end().ends_with("#endif // WIDGET_BIND_H"));
    }

    #[test]
    fn namespaced_variant_header() {
        let class = ClassDescription::new("KDE::Brush")
            .with_include("kde/brush.h")
            .with_variant_like(true);
        let names = ClassNames::new(&class, &Naming::default());
        let header = write_header(&class, &names);

        assert!(header.contains("#include <variant_binding.h>"));
        assert!(header.contains("#include <kde/brush.h>"));
        assert!(!header.contains("class KDE::Brush;"));
        assert!(header.contains("class BrushBinding : public VariantBinding"));
    }
}
