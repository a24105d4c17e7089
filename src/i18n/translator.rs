//! Translators rewrite translatable property values into the context locale.

use crate::error::TranslateError;
use crate::i18n::{Catalog, Locale, TranslationMetrics, DEFAULT_DOMAIN};
use crate::metadata::ClassMetadata;
use crate::resource::Resource;
use crate::serializer::{JsonVisitor, SerializationContext};
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Rewrites the translatable properties of one object.
///
/// Implementations record translated values on the visitor; the serializer
/// applies them when it converts the object.
pub trait Translator: Send + Sync {
    fn translate(
        &self,
        metadata: &ClassMetadata,
        visitor: &mut JsonVisitor,
        context: &SerializationContext,
        object: &dyn Resource,
    ) -> Result<(), TranslateError>;
}

/// Translator backed by a [`Catalog`].
///
/// String property values are used as catalog keys. Lookup walks the locale
/// fallback chain (`fr_CA` → `fr` → fallback locale). A value with no message
/// anywhere in the chain is left untouched.
pub struct CatalogTranslator {
    catalog: Catalog,
    fallback_locale: Locale,
    metrics: TranslationMetrics,
}

impl CatalogTranslator {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            fallback_locale: Locale::default_locale(),
            metrics: TranslationMetrics::new(),
        }
    }

    pub fn with_fallback_locale(mut self, locale: Locale) -> Self {
        self.fallback_locale = locale;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Resolve one message through the fallback chain of `locale`.
    pub fn lookup(&self, locale: &Locale, domain: &str, key: &str) -> Option<&str> {
        for (position, candidate) in locale
            .fallback_chain(&self.fallback_locale)
            .into_iter()
            .enumerate()
        {
            if let Some(message) = self.catalog.get(candidate, domain, key) {
                if position == 0 {
                    self.metrics.record_hit();
                } else {
                    trace!("'{}' resolved through fallback locale {}", key, candidate);
                    self.metrics.record_fallback();
                }
                return Some(message);
            }
        }

        self.metrics.record_miss();
        None
    }
}

impl Translator for CatalogTranslator {
    fn translate(
        &self,
        metadata: &ClassMetadata,
        visitor: &mut JsonVisitor,
        context: &SerializationContext,
        object: &dyn Resource,
    ) -> Result<(), TranslateError> {
        let locale = Locale::parse(context.locale())
            .map_err(|_| TranslateError::UnknownLocale(context.locale().to_string()))?;

        let value = object.to_value().map_err(|source| TranslateError::Serialize {
            class: metadata.class_name().to_string(),
            source,
        })?;
        self.metrics.record_object();

        for property in metadata.properties_to_translate() {
            let domain = property.domain.as_deref().unwrap_or(DEFAULT_DOMAIN);

            match value.get(&property.name) {
                Some(Value::String(key)) => match self.lookup(&locale, domain, key) {
                    Some(message) => {
                        visitor.set_translation(&property.name, Value::String(message.to_string()))
                    }
                    None => debug!(
                        "No {} translation for {}.{} = '{}'",
                        locale,
                        metadata.class_name(),
                        property.name,
                        key
                    ),
                },
                Some(Value::Null) | None => {}
                Some(_) => warn!(
                    "Property {}.{} is flagged translatable but is not a string",
                    metadata.class_name(),
                    property.name
                ),
            }
        }

        Ok(())
    }
}
