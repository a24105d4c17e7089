//! Relation descriptors: the immutable, normalized form of relation annotations.

use serde::Serialize;
use serde_json::{Map, Value};

/// Target of a relation link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Href {
    /// Literal URI template (e.g. `/articles/{id}`)
    Template(String),

    /// Reference to a named route, resolved later by a URL generator
    Route(Route),
}

/// Named route reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub name: String,
    pub parameters: Map<String, Value>,
    pub absolute: bool,
    /// Name of the URL generator to use; `None` selects the default generator
    pub generator: Option<String>,
}

impl Route {
    pub fn new(
        name: impl Into<String>,
        parameters: Map<String, Value>,
        absolute: bool,
        generator: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parameters,
            absolute,
            generator,
        }
    }
}

/// Conditions under which a relation or an embedded resource is omitted.
///
/// A descriptor only exists when an exclusion was declared. "No exclusion" is
/// `Option::None` on the owning descriptor, which is not the same thing as an
/// exclusion with no groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    /// Serialization groups the relation belongs to (empty = no group restriction)
    pub groups: Vec<String>,

    /// Inclusive lower version bound
    pub since_version: Option<String>,

    /// Inclusive upper version bound
    pub until_version: Option<String>,

    /// Maximum serialization depth at which the relation is still emitted
    pub max_depth: Option<u32>,

    /// Opaque predicate evaluated against the current object
    pub exclude_if: Option<String>,
}

/// Sub-resource included inline within a relation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embedded {
    /// Property path, expression or literal value producing the embedded content
    pub content: Value,
    pub xml_element_name: Option<String>,
    pub exclusion: Option<Exclusion>,
}

impl Embedded {
    pub fn new(
        content: Value,
        xml_element_name: Option<String>,
        exclusion: Option<Exclusion>,
    ) -> Self {
        Self {
            content,
            xml_element_name,
            exclusion,
        }
    }

    /// Embedded resource with only its content set.
    pub fn from_content(content: Value) -> Self {
        Self::new(content, None, None)
    }
}

/// One declared relation on a class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relation {
    name: String,
    href: Href,
    embedded: Option<Embedded>,
    attributes: Map<String, Value>,
    exclusion: Option<Exclusion>,
}

impl Relation {
    /// Create a relation descriptor.
    ///
    /// Name validation is class-scoped and happens in `ClassMetadata::add_relation`.
    pub fn new(
        name: impl Into<String>,
        href: Href,
        embedded: Option<Embedded>,
        attributes: Map<String, Value>,
        exclusion: Option<Exclusion>,
    ) -> Self {
        Self {
            name: name.into(),
            href,
            embedded,
            attributes,
            exclusion,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn href(&self) -> &Href {
        &self.href
    }

    pub fn embedded(&self) -> Option<&Embedded> {
        self.embedded.as_ref()
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn exclusion(&self) -> Option<&Exclusion> {
        self.exclusion.as_ref()
    }
}

/// External component that computes relations dynamically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationProvider {
    name: String,
}

impl RelationProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
