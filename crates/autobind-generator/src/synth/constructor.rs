//! The constructor table entry and `ctorMethod`.

use tracing::debug;

use super::{CallKind, Synthesizer, bucket_members};
use crate::code_writer::CodeWriter;
use crate::overload::group_overloads;

impl Synthesizer<'_> {
    /// Emit `p_constructor` and the `ctorMethod` dispatching on argument count.
    ///
    /// A zero-argument constructor is constructed directly without guards.
    pub(crate) fn write_constructor(&mut self, w: &mut CodeWriter) {
        let class = self.class;
        let names = self.names;
        let data = &names.data;
        let skipped_before = self.skipped_count();

        let mut bound: Vec<_> = class
            .constructors
            .iter()
            .filter_map(|ctor| self.bind(ctor, CallKind::Constructor))
            .collect();
        self.report.constructors = bound.len();

        self.write_skipped(w, skipped_before);
        w.push_line(format!("const Constructor KJSEmbed::{data}::p_constructor ="));
        w.push_line(format!(
            "{{\"{}\", 0, KJS::DontDelete|KJS::ReadOnly, &{data}::ctorMethod, p_statics, p_enums, KJSEmbed::{data}::p_methods }};",
            names.class
        ));
        w.push_line(format!(
            "KJS::JSObject *KJSEmbed::{data}::ctorMethod( KJS::ExecState *exec, const KJS::List &args )"
        ));
        w.open();

        let ctors: Vec<_> = bound.iter().map(|b| b.method).collect();
        for group in group_overloads(ctors) {
            debug!(constructors = group.len(), "processing constructors");
            for (arity, min_args, members) in bucket_members(&group.buckets, &mut bound) {
                self.write_bucket(w, &members, arity, min_args, CallKind::Constructor);
            }
        }

        w.push_line(format!(
            "return KJS::throwError(exec, KJS::SyntaxError, \"Syntax error in parameter list for {}\");",
            names.class
        ));
        w.close("");
    }
}
