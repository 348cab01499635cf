//! The type classification table.
//!
//! A `TypeTable` maps core type names to their [`TypeCategory`]. It is built
//! once (usually from [`TypeTable::builtin`] plus configuration overrides)
//! and then shared read-only by every class processed in a run.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{TypeCategory, TypeTableError};

const BOOL_TYPES: &[&str] = &["bool"];

const INTEGER_TYPES: &[&str] = &[
    "int",
    "uint",
    "unsigned",
    "unsigned int",
    "short",
    "short int",
    "ushort",
    "unsigned short",
    "long",
    "long int",
    "ulong",
    "unsigned long",
    "unsigned long int",
    "long long",
    "unsigned long long",
    "qint8",
    "qint16",
    "qint32",
    "qint64",
    "quint8",
    "quint16",
    "quint32",
    "quint64",
    "qlonglong",
    "qulonglong",
];

const FLOAT_TYPES: &[&str] = &["float", "double", "long double", "qreal"];

const STRING_TYPES: &[&str] = &["QString", "char", "uchar", "unsigned char", "signed char"];

const VALUE_TYPES: &[&str] = &[
    "QColor",
    "QBrush",
    "QPen",
    "QFont",
    "QPoint",
    "QPointF",
    "QRect",
    "QRectF",
    "QSize",
    "QSizeF",
    "QLine",
    "QLineF",
    "QPixmap",
    "QImage",
    "QBitmap",
    "QIcon",
    "QCursor",
    "QPalette",
    "QRegion",
    "QPolygon",
    "QMatrix",
    "QTransform",
    "QDate",
    "QTime",
    "QDateTime",
    "QUrl",
    "QStringList",
    "QByteArray",
    "QVariant",
    "QKeySequence",
    "QSizePolicy",
    "QRegExp",
    "QTextFormat",
    "QTextLength",
];

const UNSUPPORTED_TYPES: &[&str] = &["void", "va_list", "QPrivateSignal", "Qt::HANDLE", "HANDLE"];

const ENUM_NAMESPACES: &[&str] = &["Qt"];

/// Static mapping from type name to marshalling category.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    categories: FxHashMap<String, TypeCategory>,
    enum_namespaces: Vec<String>,
    global_enums: FxHashSet<String>,
}

impl TypeTable {
    /// Create a table with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create the table of built-in Qt/C++ types.
    pub fn builtin() -> Self {
        let mut table = Self::empty();
        let groups: [(&[&str], TypeCategory); 6] = [
            (BOOL_TYPES, TypeCategory::Bool),
            (INTEGER_TYPES, TypeCategory::Integer),
            (FLOAT_TYPES, TypeCategory::Float),
            (STRING_TYPES, TypeCategory::String),
            (VALUE_TYPES, TypeCategory::Value),
            (UNSUPPORTED_TYPES, TypeCategory::Unsupported),
        ];
        for (names, category) in groups {
            for name in names {
                table.categories.insert((*name).to_string(), category);
            }
        }
        table.enum_namespaces = ENUM_NAMESPACES.iter().map(|ns| ns.to_string()).collect();
        table
    }

    /// Register a type name.
    ///
    /// Registering a name again with the same category is a no-op; a
    /// different category is an error.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        category: TypeCategory,
    ) -> Result<(), TypeTableError> {
        let name = name.into();
        if name.is_empty() {
            return Err(TypeTableError::EmptyName);
        }
        match self.categories.get(&name) {
            Some(&existing) if existing != category => Err(TypeTableError::ConflictingCategory {
                name,
                existing,
                requested: category,
            }),
            Some(_) => Ok(()),
            None => {
                self.categories.insert(name, category);
                Ok(())
            }
        }
    }

    /// Replace the category of a type name, returning the previous one.
    pub fn reclassify(
        &mut self,
        name: impl Into<String>,
        category: TypeCategory,
    ) -> Option<TypeCategory> {
        self.categories.insert(name.into(), category)
    }

    /// Add a namespace whose qualified members are enumerations (`Qt::`).
    pub fn add_enum_namespace(&mut self, namespace: impl Into<String>) {
        let namespace = namespace.into();
        if !self.enum_namespaces.contains(&namespace) {
            self.enum_namespaces.push(namespace);
        }
    }

    /// Add a fully qualified enumeration known outside any class being bound.
    pub fn add_global_enum(&mut self, name: impl Into<String>) {
        self.global_enums.insert(name.into());
    }

    /// Look up the category of a core type name.
    pub fn lookup(&self, name: &str) -> Option<TypeCategory> {
        self.categories.get(name).copied()
    }

    /// Whether `name` is `bool`.
    pub fn is_bool(&self, name: &str) -> bool {
        self.lookup(name) == Some(TypeCategory::Bool)
    }

    /// Whether `name` is an integral number type.
    pub fn is_integer(&self, name: &str) -> bool {
        self.lookup(name) == Some(TypeCategory::Integer)
    }

    /// Whether `name` is a floating point number type.
    pub fn is_number(&self, name: &str) -> bool {
        self.lookup(name) == Some(TypeCategory::Float)
    }

    /// Whether `name` is marshalled as a `QVariant` value.
    pub fn is_variant(&self, name: &str) -> bool {
        self.lookup(name) == Some(TypeCategory::Value)
    }

    /// Whether `name` is an enumeration known independently of any class.
    pub fn is_known_enum(&self, name: &str) -> bool {
        if self.global_enums.contains(name) {
            return true;
        }
        name.split_once("::").is_some_and(|(namespace, member)| {
            !member.is_empty() && self.enum_namespaces.iter().any(|ns| ns == namespace)
        })
    }

    /// Iterate over every registered name and its category.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TypeCategory)> {
        self.categories.iter().map(|(name, cat)| (name.as_str(), *cat))
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
