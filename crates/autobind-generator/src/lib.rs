//! KJSEmbed binding synthesis.
//!
//! Turns a [`ClassDescription`] into the declaration and definition text of
//! a KJSEmbed binding: a binding class deriving from `ValueBinding` or
//! `VariantBinding`, one glue function per bound method name, a constructor
//! entry point, and the enum, static and method tables KJSEmbed publishes.
//!
//! # Example
//!
//! ```ignore
//! let table = TypeTable::builtin();
//! let generator = BindingGenerator::new(&table, GeneratorOptions::default());
//! let artifact = generator.generate(&class);
//! artifact.write_to(out_dir)?;
//! ```

mod artifact;
mod classifier;
mod code_writer;
mod error;
mod header;
mod marshal;
mod names;
mod options;
mod overload;
mod source;
mod synth;

pub use artifact::{GeneratedArtifact, GenerationReport, SkippedMember};
pub use classifier::{ClassifiedType, TypeClassifier};
pub use error::GenerateError;
pub use options::{GeneratorOptions, Naming};
pub use overload::{ArityBucket, OverloadGroup, group_overloads};

use autobind_core::{ClassDescription, TypeTable};
use tracing::info;

use crate::names::ClassNames;
use crate::synth::Synthesizer;

/// Generates bindings for classes against one type table.
#[derive(Debug, Clone)]
pub struct BindingGenerator<'a> {
    table: &'a TypeTable,
    options: GeneratorOptions,
}

impl<'a> BindingGenerator<'a> {
    pub fn new(table: &'a TypeTable, options: GeneratorOptions) -> Self {
        Self { table, options }
    }

    /// Generate the binding for one class.
    ///
    /// Members that cannot be bound are left out and listed in the
    /// artifact's report; generation itself never fails.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate(&self, class: &ClassDescription) -> GeneratedArtifact {
        let names = ClassNames::new(class, &self.options.naming);
        let classifier = TypeClassifier::new(self.table, class);

        let declaration = header::write_header(class, &names);
        let mut synth = Synthesizer::new(class, classifier, &names, &self.options);
        let definition = source::write_source(&mut synth, &names, &self.options.naming, &class.include);
        let report = synth.into_report();

        info!(
            class = %class.name,
            methods = report.methods.len(),
            statics = report.statics.len(),
            constructors = report.constructors,
            skipped = report.skipped.len(),
            "generated binding"
        );

        GeneratedArtifact {
            class_name: class.name.clone(),
            header_file: names.header_file,
            source_file: names.source_file,
            declaration,
            definition,
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autobind_core::{EnumDef, Method, Parameter, Protection};

    fn generate(class: &ClassDescription) -> GeneratedArtifact {
        let table = TypeTable::builtin();
        BindingGenerator::new(&table, GeneratorOptions::default()).generate(class)
    }

    fn widget() -> ClassDescription {
        ClassDescription::new("Widget")
            .with_include("widget.h")
            .with_constructor(Method::constructor("Widget"))
            .with_method(Method::new("getValue", "int").with_const(true))
    }

    #[test]
    fn widget_binding() {
        let artifact = generate(&widget());
        let def = &artifact.definition;

        assert_eq!(artifact.header_file, "Widget_bind.h");
        assert_eq!(artifact.source_file, "Widget_bind.cpp");
        assert!(def.contains("KJS::JSValue *getValue( KJS::ExecState *exec, KJS::JSObject *self, const KJS::List &args )"));
        assert!(def.contains("        int tmp = value.getValue();\n        result = KJS::Number( tmp );\n"));
        assert!(def.contains("    { \"getValue\", 0, KJS::DontDelete|KJS::ReadOnly, &WidgetNS::getValue },\n    {0, 0, 0, 0 }\n};"));
        assert!(def.contains("const Enumerator KJSEmbed::WidgetData::p_enums[] = {{0, 0 }};"));
        assert!(def.contains("NO_STATICS( KJSEmbed::WidgetData )"));
        assert!(def.contains("return new KJSEmbed::WidgetBinding(exec, Widget());"));
        assert!(!def.contains("imp->setValue"));
    }

    #[test]
    fn sections_in_order() {
        let def = generate(&widget()).definition;
        let order = [
            "#include \"Widget_bind.h\"",
            "using namespace KJSEmbed;",
            "const KJS::ClassInfo WidgetBinding::info",
            "namespace WidgetNS",
            "p_enums[]",
            "NO_STATICS",
            "p_constructor",
            "p_methods[] =",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| def.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn setter_writes_back_without_wrapping() {
        let class = widget().with_method(
            Method::new("setX", "void").with_param(Parameter::new("int").named("x")),
        );
        let def = generate(&class).definition;

        let set_x = &def[def.find("//  setX").unwrap()..];
        let set_x = &set_x[..set_x.find("\n}\n").unwrap()];
        assert!(set_x.contains("value.setX(x);\n"));
        assert!(set_x.contains("imp->setValue(value);"));
        assert!(!set_x.contains("tmp"));
    }

    #[test]
    fn variant_setter_uses_qvariant() {
        let class = widget()
            .with_variant_like(true)
            .with_method(Method::new("setColor", "void").with_param(Parameter::new("const QColor &").named("c")));
        let def = generate(&class).definition;
        assert!(def.contains("imp->setValue(qVariantFromValue(value));"));
        assert!(def.contains("KJSEmbed::VariantBinding *imp = KJSEmbed::extractBindingImp<KJSEmbed::VariantBinding>(exec, self);"));
        assert!(def.contains("   : VariantBinding(exec, value)"));
    }

    #[test]
    fn same_arity_overloads_are_guarded_in_order() {
        let class = widget()
            .with_method(Method::new("move", "void").with_param(Parameter::new("int").named("x")))
            .with_method(Method::new("move", "void").with_param(Parameter::new("const QString &").named("name")))
            .with_method(Method::new("move", "void").with_param(Parameter::new("bool").named("flag")));
        let artifact = generate(&class);
        let def = &artifact.definition;

        let number = def.find("if( value0->isNumber() )").unwrap();
        let string = def.find("if( value0->isString() )").unwrap();
        let boolean = def.find("if( value0->isBoolean() )").unwrap();
        assert!(number < string && string < boolean);
        assert_eq!(def.matches("if (args.size() == 1 )").count(), 1);
        assert_eq!(artifact.report.methods, vec!["getValue", "move"]);
    }

    #[test]
    fn indistinguishable_overloads_keep_declaration_order() {
        let class = widget()
            .with_enum(EnumDef::new("Mode").with_value("Fast"))
            .with_method(Method::new("apply", "void").with_param(Parameter::new("Mode").named("m")))
            .with_method(Method::new("apply", "void").with_param(Parameter::new("int").named("n")))
            .with_method(Method::new("apply", "void").with_param(Parameter::new("qreal").named("r")));
        let def = generate(&class).definition;

        let apply = &def[def.find("//  apply").unwrap()..];
        let apply = &apply[..apply.find("\n}\n").unwrap()];
        assert_eq!(apply.matches("if( value0->isNumber() )").count(), 3);
        let mode = apply.find("value.apply(m);").unwrap();
        let int = apply.find("value.apply(n);").unwrap();
        let real = apply.find("value.apply(r);").unwrap();
        assert!(mode < int && int < real);
        assert!(apply.contains("Widget::Mode m = KJSEmbed::extractInteger<Widget::Mode>(exec, args, 0);"));
    }

    #[test]
    fn multi_word_builtins_are_marshalled_not_bound() {
        let class = widget()
            .with_method(Method::new("setByte", "void").with_param(Parameter::new("unsigned char").named("b")))
            .with_method(Method::new("setPrecise", "void").with_param(Parameter::new("long double").named("d")))
            .with_method(Method::new("setRaw", "void").with_param(Parameter::new("volatile int").named("v")));
        let artifact = generate(&class);
        let def = &artifact.definition;

        assert!(def.contains("if( value0->isString() )"));
        assert!(def.contains("long double d = KJSEmbed::extractNumber<long double>(exec, args, 0);"));
        assert!(!def.contains("charBinding"));
        assert!(!def.contains("double_bind.h"));
        assert!(artifact.report.external_bindings.is_empty());
        assert_eq!(artifact.report.skipped.len(), 1);
        assert_eq!(artifact.report.skipped[0].signature, "Widget::setRaw(volatile int)");
    }

    #[test]
    fn enum_default_expression_is_qualified() {
        let class = widget()
            .with_enum(EnumDef::new("Mode").with_value("Fast").with_value("Slow"))
            .with_method(Method::new("setMode", "void").with_param(Parameter::new("Mode").named("m").with_default("Fast|Slow")));
        let def = generate(&class).definition;
        assert!(def.contains("Widget::Mode m = KJSEmbed::extractInteger<Widget::Mode>(exec, args, 0, Widget::Fast|Widget::Slow);"));
    }

    #[test]
    fn zero_arg_constructor_has_no_guard() {
        let class = widget().with_constructor(
            Method::constructor("Widget").with_param(Parameter::new("int").named("v")),
        );
        let def = generate(&class).definition;
        let ctor = &def[def.find("ctorMethod(").unwrap()..];
        assert!(ctor.contains("if (args.size() == 0 )\n    {\n        return new KJSEmbed::WidgetBinding(exec, Widget());\n    }"));
        assert!(ctor.contains("if( value0->isNumber() )"));
        assert!(ctor.contains("return new KJSEmbed::WidgetBinding(exec, Widget(v));"));
        assert!(ctor.contains("\"Syntax error in parameter list for Widget\""));
    }

    #[test]
    fn default_is_passed_to_extraction() {
        let class = widget().with_method(
            Method::new("fill", "void")
                .with_param(Parameter::new("int").named("count").with_default("5")),
        );
        let def = generate(&class).definition;
        assert!(def.contains("int count = KJSEmbed::extractInteger<int>(exec, args, 0, 5);"));
        assert!(def.contains("if (args.size() <= 1 )"));
        assert!(def.contains("if( ( value0->isNumber() || args.size() <= 0 ) )"));
    }

    #[test]
    fn class_enums_are_tabled_and_qualified() {
        let class = widget()
            .with_enum(EnumDef::new("Mode").with_value("Fast").with_value("Slow"))
            .with_method(Method::new("setMode", "void").with_param(Parameter::new("Mode").named("m").with_default("Fast")))
            .with_method(Method::new("mode", "Mode").with_const(true));
        let def = generate(&class).definition;

        assert!(def.contains("const Enumerator KJSEmbed::WidgetData::p_enums[] = {\n    {\"Fast\", Widget::Fast },\n    {\"Slow\", Widget::Slow },\n    {0, 0}\n};"));
        assert!(def.contains("Widget::Mode m = KJSEmbed::extractInteger<Widget::Mode>(exec, args, 0, Widget::Fast);"));
        assert!(def.contains("Widget::Mode tmp = value.mode();"));
    }

    #[test]
    fn unsupported_members_are_skipped_and_noted() {
        let class = widget()
            .with_method(Method::new("items", "QList<int>"))
            .with_method(Method::new("hidden", "void").with_protection(Protection::Private))
            .with_method(Method::new("operator==", "bool").with_param(Parameter::new("const Widget &")));
        let artifact = generate(&class);

        assert_eq!(artifact.report.methods, vec!["getValue"]);
        assert_eq!(artifact.report.skipped.len(), 1);
        assert!(artifact.definition.contains("// Skipped Widget::items(): unsupported type 'QList<int>'"));
        assert!(!artifact.definition.contains("hidden"));
        assert!(!artifact.definition.contains("operator"));
    }

    #[test]
    fn object_parameters_pull_in_external_bindings() {
        let class = widget().with_method(
            Method::new("setParent", "void").with_param(Parameter::new("QObject *").named("parent")),
        );
        let artifact = generate(&class);
        let def = &artifact.definition;

        assert!(def.contains("#include \"QObject_bind.h\"\n#include <qobject.h>"));
        assert!(def.contains("KJS::JSObject* object0 = value0->getObject();"));
        assert!(def.contains("if( object0 && object0->inherits(&QObjectBinding::info) )"));
        assert!(def.contains("QObject* parent = KJSEmbed::extractObject<QObject>(exec, args, 0, 0);"));
        assert_eq!(artifact.report.external_bindings, vec!["QObject"]);
    }

    #[test]
    fn statics_get_their_own_table() {
        let class = widget().with_method(
            Method::new("fromName", "Widget")
                .with_static(true)
                .with_param(Parameter::new("const QString &").named("name")),
        );
        let def = generate(&class).definition;

        assert!(def.contains("namespace WidgetStaticNS"));
        assert!(def.contains("Widget tmp = Widget::fromName(name);"));
        assert!(def.contains("const Method KJSEmbed::WidgetData::p_statics[] ="));
        assert!(def.contains("{ \"fromName\", 1, KJS::DontDelete|KJS::ReadOnly, &WidgetStaticNS::fromName },"));
        assert!(!def.contains("NO_STATICS"));
    }

    #[test]
    fn mutator_write_back_is_opt_in() {
        let class = widget().with_method(Method::new("clear", "void"));
        let table = TypeTable::builtin();
        let options = GeneratorOptions {
            write_back_mutators: true,
            ..Default::default()
        };
        let def = BindingGenerator::new(&table, options).generate(&class).definition;

        let clear = &def[def.find("//  clear").unwrap()..];
        assert!(clear[..clear.find("\n}\n").unwrap()].contains("imp->setValue(value);"));
        let get = &def[def.find("//  getValue").unwrap()..];
        assert!(!get[..get.find("\n}\n").unwrap()].contains("imp->setValue"));
    }
}
