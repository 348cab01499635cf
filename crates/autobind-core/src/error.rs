//! Error types for the core data model.

use thiserror::Error;

use crate::TypeCategory;

/// Errors raised while building a [`TypeTable`](crate::TypeTable).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeTableError {
    /// A type name was registered twice with different categories.
    #[error("type '{name}' is already classified as {existing}, cannot reclassify as {requested}")]
    ConflictingCategory {
        name: String,
        existing: TypeCategory,
        requested: TypeCategory,
    },

    /// The empty string was registered as a type name.
    #[error("cannot classify an empty type name")]
    EmptyName,
}
