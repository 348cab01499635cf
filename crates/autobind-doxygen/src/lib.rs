//! Doxygen XML input.
//!
//! Doxygen writes an `index.xml` listing every compound plus one
//! `<refid>.xml` file per compound. This crate reads both:
//! - [`DocNode`] is the narrow read-only tree interface the readers need
//! - [`ClassReader`] turns a `compounddef` element into a [`ClassDescription`]
//! - [`DoxygenDir`] locates and loads the files of one Doxygen run
//!
//! [`ClassDescription`]: autobind_core::ClassDescription

mod compound;
pub use compound::ClassReader;

mod error;
pub use error::InputError;

mod index;
pub use index::{CompoundKind, DoxygenDir, IndexEntry};

mod node;
pub use node::DocNode;
