//! Locale-aware property translation and hypermedia relation metadata for
//! serialization.
//!
//! # Architecture
//!
//! - `annotation`: Annotation values and the `AnnotationReader` seam, with an
//!   in-memory registry
//! - `driver`: Converts a class's annotations into `ClassMetadata`
//! - `metadata`: Relation metadata model and the caching factory
//! - `i18n`: Locales, message catalogs and translators
//! - `serializer`: Contexts, events, the JSON pre-serialize hook and the serializer
//! - `config`: Environment configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use serializer_translation::*;
//!
//! let registry = AnnotationRegistry::new()
//!     .with_annotation::<Article>(Annotation::relation(RelationAnnotation::new(
//!         "self",
//!         "/articles/1",
//!     )))
//!     .with_translatable::<Article>("status", None);
//! let factory = MetadataFactory::new(AnnotationDriver::new(registry));
//! let hook = JsonEventSubscriber::new(Arc::new(translator), Arc::new(factory), &config);
//! let serializer = Serializer::new(EventDispatcher::new().with_subscriber(Arc::new(hook)));
//! let value = serializer.serialize(&article, "json", &mut Context::default())?;
//! ```

pub mod annotation;
pub mod config;
pub mod driver;
pub mod error;
pub mod i18n;
pub mod metadata;
pub mod resource;
pub mod serializer;

pub use annotation::{
    Annotation, AnnotationReader, AnnotationRegistry, EmbeddedAnnotation, ExclusionAnnotation,
    PropertyAnnotation, RelationAnnotation, RouteAnnotation,
};
pub use config::Config;
pub use driver::{AnnotationDriver, MetadataDriver};
pub use error::{
    DriverError, FactoryError, HookError, MetadataError, ReaderError, SerializeError,
    TranslateError,
};
pub use i18n::{Catalog, CatalogTranslator, CatalogValidator, Locale, Translator};
pub use metadata::{ClassMetadata, MetadataFactory, MetadataSource};
pub use resource::{Class, ClassRef, Resource};
pub use serializer::{
    BaseContext, Context, EventDispatcher, JsonEventSubscriber, SerializationContext, Serializer,
};

#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}
