//! Marshalling categories for bound C++ types.

use std::fmt;

/// How a C++ type crosses the script/native boundary.
///
/// Every type name the generator sees resolves to exactly one category. The
/// category decides the guard, the extraction call and the return wrapping
/// emitted for a parameter or return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeCategory {
    /// `bool`.
    Bool,
    /// Integral numbers (`int`, `uint`, `qint64`, ...).
    Integer,
    /// Floating point numbers (`float`, `double`, `qreal`).
    Float,
    /// Strings (`QString`) and character types (`char`, `uchar`).
    String,
    /// Enumerations declared on a class or in a known namespace.
    Enum,
    /// Value types marshalled through `QVariant`.
    Value,
    /// Bindable compound types passed by object reference.
    Object,
    /// Types the generator cannot marshal.
    Unsupported,
}

impl TypeCategory {
    /// Get a human-readable name for this category.
    pub const fn name(self) -> &'static str {
        match self {
            TypeCategory::Bool => "boolean",
            TypeCategory::Integer => "integer",
            TypeCategory::Float => "floating-point",
            TypeCategory::String => "string",
            TypeCategory::Enum => "enumerated",
            TypeCategory::Value => "value-type",
            TypeCategory::Object => "object-reference",
            TypeCategory::Unsupported => "unsupported",
        }
    }

    /// Whether values of this category are plain script numbers.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            TypeCategory::Integer | TypeCategory::Float | TypeCategory::Enum
        )
    }

    /// Whether this category can be bound at all.
    pub const fn is_supported(self) -> bool {
        !matches!(self, TypeCategory::Unsupported)
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
