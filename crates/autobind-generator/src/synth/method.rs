//! Method glue functions.

use tracing::debug;

use super::{BoundMember, CallKind, Synthesizer, bucket_members};
use crate::code_writer::CodeWriter;
use crate::marshal;
use crate::overload::group_overloads;

/// Dispatch table entry for one method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TableEntry {
    pub name: String,
    /// Parameter count of the first bound overload.
    pub arity: usize,
}

impl Synthesizer<'_> {
    /// Emit the method namespace and return its dispatch table entries.
    ///
    /// Instance methods go in `<Name>NS`, static methods in
    /// `<Name>StaticNS`. Returns `(methods, statics)`.
    pub(crate) fn write_methods(&mut self, w: &mut CodeWriter) -> (Vec<TableEntry>, Vec<TableEntry>) {
        let class = self.class;

        let mut instance = Vec::new();
        let mut statics = Vec::new();
        for method in &class.methods {
            let kind = if method.is_static {
                CallKind::Static
            } else {
                CallKind::Instance
            };
            if let Some(bound) = self.bind(method, kind) {
                if method.is_static {
                    statics.push(bound);
                } else {
                    instance.push(bound);
                }
            }
        }

        let mut body = CodeWriter::new();
        let methods = self.write_namespace_body(&mut body, instance, CallKind::Instance);
        let mut static_body = CodeWriter::new();
        let static_methods = self.write_namespace_body(&mut static_body, statics, CallKind::Static);

        w.push_line(format!("namespace {}", self.names.methods_ns));
        w.push_line("{");
        self.write_skipped(w, 0);
        w.append(body);
        w.push_line("}");

        if !static_methods.is_empty() {
            w.blank();
            w.push_line(format!("namespace {}", self.names.statics_ns));
            w.push_line("{");
            w.append(static_body);
            w.push_line("}");
        }

        self.report.methods = methods.iter().map(|e| e.name.clone()).collect();
        self.report.statics = static_methods.iter().map(|e| e.name.clone()).collect();
        (methods, static_methods)
    }

    fn write_namespace_body(
        &mut self,
        w: &mut CodeWriter,
        mut bound: Vec<BoundMember<'_>>,
        kind: CallKind,
    ) -> Vec<TableEntry> {
        let methods: Vec<_> = bound.iter().map(|b| b.method).collect();
        let groups = group_overloads(methods);

        let mut entries = Vec::with_capacity(groups.len());
        for group in &groups {
            debug!(method = group.name, overloads = group.len(), "processing method");
            let arity = group.first().map(|m| m.arity()).unwrap_or_default();
            let buckets = bucket_members(&group.buckets, &mut bound);
            self.write_function(w, group.name, buckets, kind);
            entries.push(TableEntry {
                name: group.name.to_string(),
                arity,
            });
        }
        entries
    }

    fn write_function(
        &mut self,
        w: &mut CodeWriter,
        name: &str,
        buckets: Vec<(usize, usize, Vec<BoundMember<'_>>)>,
        kind: CallKind,
    ) {
        let names = self.names;
        let base = names.base;
        let class = &names.class;

        w.push_line(format!("//  {name}"));
        w.push_line(format!(
            "KJS::JSValue *{name}( KJS::ExecState *exec, KJS::JSObject *self, const KJS::List &args )"
        ));
        w.open();
        w.push_line("Q_UNUSED(args);");
        w.push_line("KJS::JSValue *result = KJS::Null();");
        if kind == CallKind::Static {
            w.push_line("Q_UNUSED(self);");
        } else {
            w.push_line(format!(
                "KJSEmbed::{base} *imp = KJSEmbed::extractBindingImp<KJSEmbed::{base}>(exec, self);"
            ));
            w.push_line("if( !imp )");
            w.indent();
            w.push_line("return KJS::throwError(exec, KJS::GeneralError, \"No implementation? Huh?\");");
            w.dedent();
            w.blank();
            w.push_line(format!("{class} value = imp->value<{class}>();"));
        }

        for (arity, min_args, members) in &buckets {
            self.write_bucket(w, members, *arity, *min_args, kind);
        }

        w.blank();
        w.push_line(format!(
            "return KJS::throwError(exec, KJS::SyntaxError, \"Syntax error in parameter list for {class}.{name}\");"
        ));
        w.close("");
        w.blank();
    }

    /// Emit the native call for a bound member whose arguments are in scope.
    pub(crate) fn write_call(&self, w: &mut CodeWriter, member: &BoundMember<'_>, kind: CallKind) {
        let args = member.locals.join(", ");
        let name = &member.method.name;
        let class = &self.names.class;

        let call = match kind {
            CallKind::Constructor => {
                w.push_line(format!(
                    "return new KJSEmbed::{}(exec, {class}({args}));",
                    self.names.binding
                ));
                return;
            }
            CallKind::Static => format!("{class}::{name}({args})"),
            CallKind::Instance => format!("value.{name}({args})"),
        };

        match &member.ret {
            Some(ret) => {
                w.push_line(format!("{} tmp = {call};", ret.local_decl()));
                w.push_line(format!("result = {};", marshal::wrap_return(ret)));
            }
            None => w.push_line(format!("{call};")),
        }

        if kind == CallKind::Instance && self.writes_back(member) {
            if self.class.is_variant_like {
                w.push_line("imp->setValue(qVariantFromValue(value));");
            } else {
                w.push_line("imp->setValue(value);");
            }
        }
        w.push_line("return result;");
    }

    fn writes_back(&self, member: &BoundMember<'_>) -> bool {
        let method = member.method;
        self.options.is_setter(&method.name) || (self.options.write_back_mutators && !method.is_const)
    }
}
