//! Class metadata: the aggregate of relations, relation providers and
//! translatable properties declared on one class.

use crate::error::MetadataError;
use crate::metadata::{Relation, RelationProvider};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A property whose value is rewritten into the active locale before serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatableProperty {
    /// Property name as it appears in the serialized object
    pub name: String,

    /// Catalog domain the messages live in (`None` = default domain)
    pub domain: Option<String>,
}

impl TranslatableProperty {
    pub fn new(name: impl Into<String>, domain: Option<String>) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }
}

/// Metadata describing one class.
///
/// Built by a metadata driver and then shared read-only; the collections below
/// are only appended to during construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetadata {
    class_name: String,
    file_resources: Vec<PathBuf>,
    relations: Vec<Relation>,
    relation_providers: Vec<RelationProvider>,
    properties_to_translate: Vec<TranslatableProperty>,
}

impl ClassMetadata {
    /// Create empty metadata for `class_name`.
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            file_resources: Vec::new(),
            relations: Vec::new(),
            relation_providers: Vec::new(),
            properties_to_translate: Vec::new(),
        }
    }

    /// Fully qualified name of the described class.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Record a source file whose modification invalidates this metadata.
    pub fn add_file_resource(&mut self, path: impl Into<PathBuf>) {
        self.file_resources.push(path.into());
    }

    /// Source files this metadata was built from, in insertion order.
    pub fn file_resources(&self) -> impl Iterator<Item = &Path> {
        self.file_resources.iter().map(PathBuf::as_path)
    }

    /// Append a relation, preserving declaration order.
    ///
    /// # Errors
    /// * `MetadataError::EmptyRelationName` if the relation has no name
    /// * `MetadataError::DuplicateRelation` if a relation with the same name exists
    pub fn add_relation(&mut self, relation: Relation) -> Result<(), MetadataError> {
        if relation.name().is_empty() {
            return Err(MetadataError::EmptyRelationName {
                class: self.class_name.clone(),
            });
        }

        if self.relation(relation.name()).is_some() {
            return Err(MetadataError::DuplicateRelation {
                class: self.class_name.clone(),
                name: relation.name().to_string(),
            });
        }

        self.relations.push(relation);
        Ok(())
    }

    /// Append a relation provider, preserving declaration order.
    pub fn add_relation_provider(&mut self, provider: RelationProvider) {
        self.relation_providers.push(provider);
    }

    /// Flag a property as translatable. Repeated flags for the same property keep
    /// the first declaration.
    pub fn add_property_to_translate(&mut self, property: TranslatableProperty) {
        if self
            .properties_to_translate
            .iter()
            .any(|existing| existing.name == property.name)
        {
            return;
        }
        self.properties_to_translate.push(property);
    }

    /// Relations in declaration order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Look up a relation by name.
    pub fn relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|relation| relation.name() == name)
    }

    /// Relation providers in declaration order.
    pub fn relation_providers(&self) -> &[RelationProvider] {
        &self.relation_providers
    }

    /// Properties to translate, in first-declaration order.
    pub fn properties_to_translate(&self) -> &[TranslatableProperty] {
        &self.properties_to_translate
    }

    /// Check if at least one relation is declared.
    pub fn has_relations(&self) -> bool {
        !self.relations.is_empty()
    }

    /// Check if at least one relation provider is declared.
    pub fn has_relation_providers(&self) -> bool {
        !self.relation_providers.is_empty()
    }

    /// Check if any property is flagged translatable.
    pub fn has_properties_to_translate(&self) -> bool {
        !self.properties_to_translate.is_empty()
    }

    /// Whether anything relevant to relation handling was declared.
    pub fn is_empty(&self) -> bool {
        !self.has_relations() && !self.has_relation_providers()
    }
}
