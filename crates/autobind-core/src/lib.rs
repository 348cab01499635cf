//! Autobind core crate.
//!
//! This crate holds the data shared by every stage of binding generation:
//! - The class model read from Doxygen (`ClassDescription`, `Method`, `Parameter`, `EnumDef`)
//! - Type name parsing (`TypeName`, `TypeQualifiers`)
//! - The marshalling category table (`TypeCategory`, `TypeTable`)
//! - Error types shared across crates

mod error;
pub use error::TypeTableError;

mod model;
pub use model::{ClassDescription, EnumDef, Method, Parameter, Protection};

mod type_category;
pub use type_category::TypeCategory;

mod type_name;
pub use type_name::{TypeName, TypeQualifiers};

mod type_table;
pub use type_table::TypeTable;
