//! Method, constructor and table synthesis.
//!
//! The [`Synthesizer`] walks one [`ClassDescription`] and produces the glue
//! functions and lookup tables that make up a binding's definition file:
//! - `method` - instance and static method functions
//! - `constructor` - the constructor table entry and `ctorMethod`
//! - `tables` - enum, static and method dispatch tables
//!
//! Overloads are dispatched by argument count first and then by runtime
//! type guards, tried in declaration order.

mod constructor;
mod method;
mod tables;

use std::collections::BTreeSet;

use autobind_core::{ClassDescription, Method};
use tracing::{debug, warn};

use crate::GeneratorOptions;
use crate::artifact::{GenerationReport, SkippedMember};
use crate::classifier::{ClassifiedType, TypeClassifier};
use crate::code_writer::CodeWriter;
use crate::marshal;
use crate::names::ClassNames;
use crate::overload::ArityBucket;

/// Locals every glue function declares.
const RESERVED_LOCALS: &[&str] = &["value", "imp", "result", "tmp", "exec", "self", "args"];

/// A member whose every type is supported, ready to emit.
#[derive(Debug)]
pub(crate) struct BoundMember<'m> {
    pub method: &'m Method,
    pub params: Vec<ClassifiedType>,
    /// Unique local name per parameter.
    pub locals: Vec<String>,
    /// `None` for `void` and constructors.
    pub ret: Option<ClassifiedType>,
}

/// How a bound member is invoked once its arguments are extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CallKind {
    Instance,
    Static,
    Constructor,
}

/// Synthesizes the definition of one class binding.
pub(crate) struct Synthesizer<'a> {
    class: &'a ClassDescription,
    classifier: TypeClassifier<'a>,
    names: &'a ClassNames,
    options: &'a GeneratorOptions,
    /// Other bound types referenced by object guards.
    externals: BTreeSet<String>,
    report: GenerationReport,
}

impl<'a> Synthesizer<'a> {
    pub(crate) fn new(
        class: &'a ClassDescription,
        classifier: TypeClassifier<'a>,
        names: &'a ClassNames,
        options: &'a GeneratorOptions,
    ) -> Self {
        Self {
            class,
            classifier,
            names,
            options,
            externals: BTreeSet::new(),
            report: GenerationReport::default(),
        }
    }

    /// Other bound types whose headers the definition file must include.
    pub(crate) fn externals(&self) -> &BTreeSet<String> {
        &self.externals
    }

    pub(crate) fn into_report(mut self) -> GenerationReport {
        self.report.external_bindings = self.externals.into_iter().collect();
        self.report
    }

    /// Resolve a member's types, or record why it cannot be bound.
    ///
    /// Non-public members and operators are dropped silently; members with
    /// an unsupported parameter or return type are reported.
    pub(crate) fn bind<'m>(&mut self, method: &'m Method, kind: CallKind) -> Option<BoundMember<'m>> {
        if !method.protection.is_public() || method.is_operator() {
            debug!(method = %method.name, "ignoring non-public or operator member");
            return None;
        }

        let mut params = Vec::with_capacity(method.params.len());
        for param in &method.params {
            let ty = self.classifier.classify(&param.ty);
            if !ty.is_supported() {
                self.skip(method, &param.ty);
                return None;
            }
            params.push(ty);
        }

        let ret = match kind {
            CallKind::Constructor => None,
            CallKind::Instance | CallKind::Static => {
                let ret = self.classifier.classify(&method.return_type);
                if ret.name.is_void() {
                    None
                } else if ret.is_supported() {
                    Some(ret)
                } else {
                    self.skip(method, &method.return_type);
                    return None;
                }
            }
        };

        let mut reserved: Vec<String> = RESERVED_LOCALS.iter().map(|s| s.to_string()).collect();
        for idx in 0..method.arity() {
            reserved.push(format!("value{idx}"));
            reserved.push(format!("object{idx}"));
        }
        let reserved: Vec<&str> = reserved.iter().map(String::as_str).collect();
        let locals = method.param_names(&reserved);

        Some(BoundMember {
            method,
            params,
            locals,
            ret,
        })
    }

    pub(crate) fn skipped_count(&self) -> usize {
        self.report.skipped.len()
    }

    fn skip(&mut self, method: &Method, ty: &str) {
        let signature = signature_of(self.class, method);
        warn!(%signature, ty, "skipping member with unsupported type");
        self.report.skipped.push(SkippedMember {
            signature,
            reason: format!("unsupported type '{}'", ty.trim()),
        });
    }

    /// Emit `// Skipped ...` lines for members skipped since `from`.
    pub(crate) fn write_skipped(&self, w: &mut CodeWriter, from: usize) {
        for skipped in self.report.skipped.iter().skip(from) {
            w.push_line(format!("// Skipped {}: {}", skipped.signature, skipped.reason));
        }
    }

    /// Emit one arity bucket: the argument count test, the shared argument
    /// locals, and one guarded branch per overload.
    pub(crate) fn write_bucket(
        &mut self,
        w: &mut CodeWriter,
        bucket: &[BoundMember<'_>],
        arity: usize,
        min_args: usize,
        kind: CallKind,
    ) {
        if min_args == arity {
            w.push_line(format!("if (args.size() == {arity} )"));
        } else if min_args == 0 {
            w.push_line(format!("if (args.size() <= {arity} )"));
        } else {
            w.push_line(format!(
                "if (args.size() >= {min_args} && args.size() <= {arity} )"
            ));
        }
        w.open();

        if arity == 0 {
            if let Some((first, rest)) = bucket.split_first() {
                for shadowed in rest {
                    debug!(method = %shadowed.method.name, "duplicate zero-argument overload ignored");
                }
                self.write_call(w, first, kind);
            }
            w.close("");
            return;
        }

        for idx in 0..arity {
            w.push_line(format!("KJS::JSValue* value{idx} = args[{idx}];"));
            if bucket.iter().any(|m| marshal::needs_object(&m.params[idx])) {
                w.push_line(format!("KJS::JSObject* object{idx} = value{idx}->getObject();"));
            }
        }

        for member in bucket {
            let guards: Vec<String> = member
                .params
                .iter()
                .zip(&member.method.params)
                .enumerate()
                .map(|(idx, (ty, param))| {
                    self.note_external(ty);
                    marshal::guard(ty, idx, param.has_default(), &self.options.naming)
                })
                .collect();

            w.push_line(format!("if( {} )", guards.join(" && ")));
            w.open();
            for (idx, ((ty, param), local)) in member
                .params
                .iter()
                .zip(&member.method.params)
                .zip(&member.locals)
                .enumerate()
            {
                let default = param
                    .default
                    .as_deref()
                    .map(|d| ty.qualify_default(d, self.class));
                w.push_line(format!(
                    "{} {local} = {};",
                    ty.local_decl(),
                    marshal::extraction(ty, idx, default.as_deref())
                ));
            }
            self.write_call(w, member, kind);
            w.close("");
        }

        w.close("");
    }

    fn note_external(&mut self, ty: &ClassifiedType) {
        if ty.category == autobind_core::TypeCategory::Object && ty.core() != self.class.name {
            self.externals.insert(ty.core().to_string());
        }
    }
}

/// Group bound members into arity buckets, keeping the grouping order.
pub(crate) fn bucket_members<'m>(
    buckets: &[ArityBucket<'m>],
    bound: &mut Vec<BoundMember<'m>>,
) -> Vec<(usize, usize, Vec<BoundMember<'m>>)> {
    buckets
        .iter()
        .map(|bucket| {
            let members: Vec<BoundMember<'m>> = bucket
                .overloads
                .iter()
                .filter_map(|m| {
                    let pos = bound.iter().position(|b| std::ptr::eq(b.method, *m))?;
                    Some(bound.remove(pos))
                })
                .collect();
            (bucket.arity, bucket.min_args(), members)
        })
        .collect()
}

/// `Class::name(T1, T2)` for diagnostics.
fn signature_of(class: &ClassDescription, method: &Method) -> String {
    let params: Vec<&str> = method.params.iter().map(|p| p.ty.trim()).collect();
    format!("{}::{}({})", class.name, method.name, params.join(", "))
}
