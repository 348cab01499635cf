//! Per-category marshalling snippets.
//!
//! Each [`TypeCategory`] maps to a runtime guard, an extraction helper and a
//! return wrapper from the KJSEmbed runtime. Only supported categories are
//! passed in here; unsupported members are filtered out before synthesis.

use autobind_core::TypeCategory;

use crate::Naming;
use crate::classifier::ClassifiedType;
use crate::names::ClassNames;

/// Whether the guard for this type inspects `object<idx>`.
pub(crate) fn needs_object(ty: &ClassifiedType) -> bool {
    matches!(ty.category, TypeCategory::Value | TypeCategory::Object)
}

/// Runtime test that `args[idx]` can be converted to `ty`.
///
/// A parameter with a default also accepts an absent argument.
pub(crate) fn guard(ty: &ClassifiedType, idx: usize, has_default: bool, naming: &Naming) -> String {
    // Enums are numbers at runtime; they share the integer guard.
    let test = if ty.category.is_numeric() {
        format!("value{idx}->isNumber()")
    } else {
        match ty.category {
            TypeCategory::Bool => format!("value{idx}->isBoolean()"),
            TypeCategory::String => format!("value{idx}->isString()"),
            TypeCategory::Value => {
                format!("object{idx} && object{idx}->inherits(&VariantBinding::info)")
            }
            _ => format!(
                "object{idx} && object{idx}->inherits(&{}::info)",
                ClassNames::binding_of(ty.core(), naming)
            ),
        }
    };

    if has_default {
        format!("( {test} || args.size() <= {idx} )")
    } else {
        test
    }
}

/// Expression extracting `args[idx]` as `ty`, falling back to `default`.
pub(crate) fn extraction(ty: &ClassifiedType, idx: usize, default: Option<&str>) -> String {
    let cpp = &ty.cpp_name;
    let helper = match ty.category {
        TypeCategory::Bool => "extractBool".to_string(),
        TypeCategory::Integer | TypeCategory::Enum => format!("extractInteger<{cpp}>"),
        TypeCategory::Float => format!("extractNumber<{cpp}>"),
        TypeCategory::String if ty.core() == "QString" => "extractQString".to_string(),
        TypeCategory::String => format!("extractString<{cpp}>"),
        TypeCategory::Value => format!("extractVariant<{cpp}>"),
        TypeCategory::Object if ty.is_pointer() => format!("extractObject<{cpp}>"),
        TypeCategory::Object | TypeCategory::Unsupported => format!("extractValue<{cpp}>"),
    };

    let fallback = match (default, ty.category, ty.is_pointer()) {
        (Some(default), _, _) => format!(", {default}"),
        (None, TypeCategory::Object, true) => ", 0".to_string(),
        (None, _, _) => String::new(),
    };

    format!("KJSEmbed::{helper}(exec, args, {idx}{fallback})")
}

/// Expression wrapping the native result `tmp` as a script value.
pub(crate) fn wrap_return(ty: &ClassifiedType) -> String {
    let core = ty.core();
    match ty.category {
        TypeCategory::Bool => "KJS::Boolean( tmp )".to_string(),
        TypeCategory::Integer | TypeCategory::Float | TypeCategory::Enum => {
            "KJS::Number( tmp )".to_string()
        }
        TypeCategory::String => "KJS::String( tmp )".to_string(),
        TypeCategory::Value => format!("KJSEmbed::createVariant( exec, \"{core}\", tmp )"),
        TypeCategory::Object if ty.is_pointer() && ty.name.is_const() => format!(
            "KJSEmbed::createObject( exec, \"{core}\", const_cast<{}*>(tmp) )",
            ty.cpp_name
        ),
        TypeCategory::Object if ty.is_pointer() => {
            format!("KJSEmbed::createObject( exec, \"{core}\", tmp )")
        }
        TypeCategory::Object | TypeCategory::Unsupported => {
            format!("KJSEmbed::createValue( exec, \"{core}\", tmp )")
        }
    }
}
