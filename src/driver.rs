//! Annotation driver: turns raw annotations into `ClassMetadata`.
//!
//! Only relation and relation-provider annotations make a class relevant here.
//! A class without any of them yields `None`, even when it carries other
//! annotations or translatable properties.

use crate::annotation::{
    Annotation, AnnotationReader, EmbeddedValue, ExclusionAnnotation, HrefAnnotation,
    PropertyAnnotation, RelationAnnotation,
};
use crate::error::DriverError;
use crate::metadata::{
    ClassMetadata, Embedded, Exclusion, Href, Relation, RelationProvider, Route,
    TranslatableProperty,
};
use crate::resource::ClassRef;
use tracing::{debug, trace};

/// Builds metadata for a class on demand.
pub trait MetadataDriver: Send + Sync {
    /// Load metadata for `class`.
    ///
    /// # Returns
    /// * `Ok(Some(metadata))` when the class declares relations or relation providers
    /// * `Ok(None)` when it declares nothing relevant
    /// * `Err` when the reader fails or the declarations are inconsistent
    fn load_metadata_for_class(&self, class: &ClassRef)
        -> Result<Option<ClassMetadata>, DriverError>;
}

/// Metadata driver backed by an [`AnnotationReader`].
pub struct AnnotationDriver<R> {
    reader: R,
}

impl<R: AnnotationReader> AnnotationDriver<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    fn load_properties_to_translate(
        &self,
        class: &ClassRef,
        metadata: &mut ClassMetadata,
    ) -> Result<(), DriverError> {
        for property in self.reader.property_annotations(class)? {
            for annotation in &property.annotations {
                if let PropertyAnnotation::Translate { domain } = annotation {
                    metadata.add_property_to_translate(TranslatableProperty::new(
                        property.property.clone(),
                        domain.clone(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<R: AnnotationReader> MetadataDriver for AnnotationDriver<R> {
    fn load_metadata_for_class(
        &self,
        class: &ClassRef,
    ) -> Result<Option<ClassMetadata>, DriverError> {
        let annotations = self.reader.class_annotations(class)?;

        if annotations.is_empty() {
            trace!("No annotations on {}", class.name());
            return Ok(None);
        }

        let mut metadata = ClassMetadata::new(class.name());
        metadata.add_file_resource(class.file());

        for annotation in annotations {
            match annotation {
                Annotation::Relation(relation) => {
                    metadata.add_relation(build_relation(relation))?;
                }
                Annotation::RelationProvider(provider) => {
                    metadata.add_relation_provider(RelationProvider::new(provider.name));
                }
                Annotation::Exclusion(_)
                | Annotation::Embedded(_)
                | Annotation::Route(_)
                | Annotation::Other { .. } => {}
            }
        }

        if metadata.is_empty() {
            trace!("No relations declared on {}", class.name());
            return Ok(None);
        }

        self.load_properties_to_translate(class, &mut metadata)?;

        debug!(
            "Built metadata for {}: {} relations, {} providers, {} translatable properties",
            class.name(),
            metadata.relations().len(),
            metadata.relation_providers().len(),
            metadata.properties_to_translate().len()
        );

        Ok(Some(metadata))
    }
}

fn build_relation(relation: RelationAnnotation) -> Relation {
    Relation::new(
        relation.name,
        build_href(relation.href),
        build_embedded(relation.embedded),
        relation.attributes.unwrap_or_default(),
        build_exclusion(relation.exclusion),
    )
}

/// Route-shaped hrefs become `Href::Route`; literals pass through unchanged.
pub fn build_href(href: HrefAnnotation) -> Href {
    match href {
        HrefAnnotation::Route(route) => Href::Route(Route::new(
            route.name,
            route.parameters,
            route.absolute,
            route.generator,
        )),
        HrefAnnotation::Literal(template) => Href::Template(template),
    }
}

/// Resolve an embedded declaration, including its own exclusion.
pub fn build_embedded(embedded: Option<EmbeddedValue>) -> Option<Embedded> {
    embedded.map(|embedded| match embedded {
        EmbeddedValue::Embedded(embedded) => Embedded::new(
            embedded.content,
            embedded.xml_element_name,
            build_exclusion(embedded.exclusion),
        ),
        EmbeddedValue::Content(content) => Embedded::from_content(content),
    })
}

/// Copy an exclusion field for field. Absence stays absence.
pub fn build_exclusion(exclusion: Option<ExclusionAnnotation>) -> Option<Exclusion> {
    exclusion.map(|exclusion| Exclusion {
        groups: exclusion.groups,
        since_version: exclusion.since_version,
        until_version: exclusion.until_version,
        max_depth: exclusion.max_depth,
        exclude_if: exclusion.exclude_if,
    })
}
