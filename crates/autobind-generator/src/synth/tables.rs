//! Enum, static and method dispatch tables.

use super::Synthesizer;
use super::method::TableEntry;
use crate::code_writer::CodeWriter;

const MEMBER_FLAGS: &str = "KJS::DontDelete|KJS::ReadOnly";

impl Synthesizer<'_> {
    /// Emit `p_enums`, one entry per value of every public enum.
    pub(crate) fn write_enum_table(&self, w: &mut CodeWriter) {
        let data = &self.names.data;
        let class = &self.names.class;
        let values: Vec<&String> = self
            .class
            .public_enums()
            .flat_map(|def| def.values.iter())
            .collect();

        if values.is_empty() {
            w.push_line(format!("const Enumerator KJSEmbed::{data}::p_enums[] = {{{{0, 0 }}}};"));
            return;
        }

        w.push_line(format!("const Enumerator KJSEmbed::{data}::p_enums[] = {{"));
        w.indent();
        for value in values {
            w.push_line(format!("{{\"{value}\", {class}::{value} }},"));
        }
        w.push_line("{0, 0}");
        w.dedent();
        w.push_line("};");
    }

    /// Emit `p_statics`, or `NO_STATICS` when the class has none.
    pub(crate) fn write_static_table(&self, w: &mut CodeWriter, statics: &[TableEntry]) {
        let data = &self.names.data;
        if statics.is_empty() {
            w.push_line(format!("NO_STATICS( KJSEmbed::{data} )"));
            return;
        }
        self.write_lut(w, "p_statics", &self.names.statics_ns, statics);
    }

    /// Emit `p_methods`, one entry per bound method name.
    pub(crate) fn write_method_table(&self, w: &mut CodeWriter, methods: &[TableEntry]) {
        self.write_lut(w, "p_methods", &self.names.methods_ns, methods);
    }

    fn write_lut(&self, w: &mut CodeWriter, table: &str, ns: &str, entries: &[TableEntry]) {
        w.push_line(format!("const Method KJSEmbed::{}::{table}[] =", self.names.data));
        w.open();
        for entry in entries {
            w.push_line(format!(
                "{{ \"{name}\", {arity}, {MEMBER_FLAGS}, &{ns}::{name} }},",
                name = entry.name,
                arity = entry.arity
            ));
        }
        w.push_line("{0, 0, 0, 0 }");
        w.close(";");
    }
}
