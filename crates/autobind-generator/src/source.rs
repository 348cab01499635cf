//! Definition file assembly.

use crate::Naming;
use crate::code_writer::CodeWriter;
use crate::names::ClassNames;
use crate::synth::Synthesizer;

/// Build the definition file for a class binding.
///
/// Sections appear in a fixed order: includes, binding constructor, method
/// glue, enum table, static table, constructor, method table. The includes
/// depend on which other bindings the method glue references, so the body
/// is synthesized before the preamble is written.
pub(crate) fn write_source(
    synth: &mut Synthesizer<'_>,
    names: &ClassNames,
    naming: &Naming,
    include: &str,
) -> String {
    let mut body = CodeWriter::new();
    let (methods, statics) = synth.write_methods(&mut body);
    body.blank();
    synth.write_enum_table(&mut body);
    body.blank();
    synth.write_static_table(&mut body, &statics);
    body.blank();
    synth.write_constructor(&mut body);
    body.blank();
    synth.write_method_table(&mut body, &methods);

    let mut w = CodeWriter::new();
    w.push_line(format!("#include \"{}\"", names.header_file));
    w.push_line(format!("#include <{include}>"));
    w.push_line("#include <object_binding.h>");
    if names.base == "VariantBinding" {
        w.push_line("#include <variant_binding.h>");
    } else {
        w.push_line("#include <value_binding.h>");
    }
    for external in synth.externals() {
        let short = external.rsplit("::").next().unwrap_or(external);
        w.push_line(format!("#include \"{short}{}\"", naming.header_suffix));
        w.push_line(format!("#include <{}.h>", short.to_lowercase()));
    }
    w.blank();

    w.push_line("using namespace KJSEmbed;");
    w.blank();
    w.push_line(format!(
        "const KJS::ClassInfo {}::info = {{ \"{}\", &{}::info, 0, 0 }};",
        names.binding, names.class, names.base
    ));
    w.push_line(format!(
        "{binding}::{binding}( KJS::ExecState *exec, const {class} &value )",
        binding = names.binding,
        class = names.class
    ));
    if names.base == "ValueBinding" {
        w.push_line(format!("   : {}(exec, \"{}\", value)", names.base, names.class));
    } else {
        w.push_line(format!("   : {}(exec, value)", names.base));
    }
    w.open();
    w.push_line(format!("StaticBinding::publish(exec, this, {}::methods() );", names.data));
    w.push_line(format!("StaticBinding::publish(exec, this, {}::methods() );", names.factory));
    w.close("");
    w.blank();

    w.append(body);
    w.into_string()
}
