//! Declarative annotations and the reader that serves them to metadata drivers.
//!
//! Annotations are registered explicitly against a [`ClassRef`] instead of being
//! parsed from source. The [`AnnotationRegistry`] is the in-memory reader used by
//! default; any other source (files, build scripts) can implement
//! [`AnnotationReader`].

use crate::error::ReaderError;
use crate::resource::{Class, ClassRef};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One class-level annotation, as produced by a reader.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    Relation(RelationAnnotation),
    RelationProvider(RelationProviderAnnotation),
    Exclusion(ExclusionAnnotation),
    Embedded(EmbeddedAnnotation),
    Route(RouteAnnotation),
    /// Annotation owned by another subsystem
    Other { name: String },
}

impl Annotation {
    pub fn relation(relation: RelationAnnotation) -> Self {
        Self::Relation(relation)
    }

    pub fn relation_provider(name: impl Into<String>) -> Self {
        Self::RelationProvider(RelationProviderAnnotation { name: name.into() })
    }

    pub fn other(name: impl Into<String>) -> Self {
        Self::Other { name: name.into() }
    }
}

/// Raw relation declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelationAnnotation {
    pub name: String,
    pub href: HrefAnnotation,
    #[serde(default)]
    pub embedded: Option<EmbeddedValue>,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default)]
    pub exclusion: Option<ExclusionAnnotation>,
}

impl RelationAnnotation {
    pub fn new(name: impl Into<String>, href: impl Into<HrefAnnotation>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
            embedded: None,
            attributes: None,
            exclusion: None,
        }
    }

    pub fn with_embedded(mut self, embedded: impl Into<EmbeddedValue>) -> Self {
        self.embedded = Some(embedded.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_exclusion(mut self, exclusion: ExclusionAnnotation) -> Self {
        self.exclusion = Some(exclusion);
        self
    }
}

/// Raw relation target: a literal URI template or a route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HrefAnnotation {
    Literal(String),
    Route(RouteAnnotation),
}

impl From<&str> for HrefAnnotation {
    fn from(href: &str) -> Self {
        Self::Literal(href.to_string())
    }
}

impl From<String> for HrefAnnotation {
    fn from(href: String) -> Self {
        Self::Literal(href)
    }
}

impl From<RouteAnnotation> for HrefAnnotation {
    fn from(route: RouteAnnotation) -> Self {
        Self::Route(route)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteAnnotation {
    pub name: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub absolute: bool,
    #[serde(default)]
    pub generator: Option<String>,
}

impl RouteAnnotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Map::new(),
            absolute: false,
            generator: None,
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn absolute(mut self, absolute: bool) -> Self {
        self.absolute = absolute;
        self
    }

    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = Some(generator.into());
        self
    }
}

/// Raw embedded value: a full embedding declaration or bare content.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EmbeddedValue {
    Embedded(EmbeddedAnnotation),
    Content(Value),
}

impl From<EmbeddedAnnotation> for EmbeddedValue {
    fn from(embedded: EmbeddedAnnotation) -> Self {
        Self::Embedded(embedded)
    }
}

impl From<Value> for EmbeddedValue {
    fn from(content: Value) -> Self {
        Self::Content(content)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbeddedAnnotation {
    pub content: Value,
    #[serde(default)]
    pub xml_element_name: Option<String>,
    #[serde(default)]
    pub exclusion: Option<ExclusionAnnotation>,
}

impl EmbeddedAnnotation {
    pub fn new(content: impl Into<Value>) -> Self {
        Self {
            content: content.into(),
            xml_element_name: None,
            exclusion: None,
        }
    }

    pub fn with_xml_element_name(mut self, name: impl Into<String>) -> Self {
        self.xml_element_name = Some(name.into());
        self
    }

    pub fn with_exclusion(mut self, exclusion: ExclusionAnnotation) -> Self {
        self.exclusion = Some(exclusion);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExclusionAnnotation {
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub since_version: Option<String>,
    #[serde(default)]
    pub until_version: Option<String>,
    #[serde(default)]
    pub max_depth: Option<u32>,
    #[serde(default)]
    pub exclude_if: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelationProviderAnnotation {
    pub name: String,
}

/// Property-level annotation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyAnnotation {
    /// Translate the property value into the active locale
    Translate {
        #[serde(default)]
        domain: Option<String>,
    },
    Other {
        name: String,
    },
}

/// All annotations attached to one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAnnotations {
    pub property: String,
    pub annotations: Vec<PropertyAnnotation>,
}

/// Source of raw annotations for a class.
pub trait AnnotationReader: Send + Sync {
    /// Class-level annotations in declaration order.
    fn class_annotations(&self, class: &ClassRef) -> Result<Vec<Annotation>, ReaderError>;

    /// Property-level annotations in declaration order.
    fn property_annotations(
        &self,
        _class: &ClassRef,
    ) -> Result<Vec<PropertyAnnotations>, ReaderError> {
        Ok(Vec::new())
    }
}

#[derive(Debug, Clone, Default)]
struct ClassAnnotations {
    class: Vec<Annotation>,
    properties: Vec<PropertyAnnotations>,
}

/// In-memory annotation reader populated through an explicit registration API.
///
/// ```ignore
/// let registry = AnnotationRegistry::new()
///     .with_annotation::<Article>(Annotation::relation(RelationAnnotation::new(
///         "self",
///         "/articles/{id}",
///     )))
///     .with_translatable::<Article>("status", None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnnotationRegistry {
    classes: HashMap<String, ClassAnnotations>,
}

impl AnnotationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a class-level annotation.
    pub fn add_annotation(&mut self, class: &ClassRef, annotation: Annotation) {
        self.classes
            .entry(class.name().to_string())
            .or_default()
            .class
            .push(annotation);
    }

    /// Append a property-level annotation.
    pub fn add_property_annotation(
        &mut self,
        class: &ClassRef,
        property: &str,
        annotation: PropertyAnnotation,
    ) {
        let entry = self.classes.entry(class.name().to_string()).or_default();

        match entry
            .properties
            .iter_mut()
            .find(|existing| existing.property == property)
        {
            Some(existing) => existing.annotations.push(annotation),
            None => entry.properties.push(PropertyAnnotations {
                property: property.to_string(),
                annotations: vec![annotation],
            }),
        }
    }

    pub fn with_annotation<T: Class>(mut self, annotation: Annotation) -> Self {
        self.add_annotation(&T::class(), annotation);
        self
    }

    pub fn with_translatable<T: Class>(mut self, property: &str, domain: Option<&str>) -> Self {
        self.add_property_annotation(
            &T::class(),
            property,
            PropertyAnnotation::Translate {
                domain: domain.map(str::to_string),
            },
        );
        self
    }

    pub fn is_registered(&self, class: &ClassRef) -> bool {
        self.classes.contains_key(class.name())
    }
}

impl AnnotationReader for AnnotationRegistry {
    fn class_annotations(&self, class: &ClassRef) -> Result<Vec<Annotation>, ReaderError> {
        Ok(self
            .classes
            .get(class.name())
            .map(|entry| entry.class.clone())
            .unwrap_or_default())
    }

    fn property_annotations(
        &self,
        class: &ClassRef,
    ) -> Result<Vec<PropertyAnnotations>, ReaderError> {
        Ok(self
            .classes
            .get(class.name())
            .map(|entry| entry.properties.clone())
            .unwrap_or_default())
    }
}
