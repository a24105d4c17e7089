//! Metadata model for relations and translatable properties.
//!
//! # Architecture
//!
//! - `relation`: Immutable relation descriptors (`Relation`, `Embedded`, `Exclusion`, ...)
//! - `class`: `ClassMetadata`, the per-class aggregate handed to the serializer
//! - `factory`: Cache in front of a metadata driver, invalidated on source changes

mod class;
mod factory;
mod relation;

pub use class::{ClassMetadata, TranslatableProperty};
pub use factory::{MetadataFactory, MetadataSource};
pub use relation::{Embedded, Exclusion, Href, Relation, RelationProvider, Route};
