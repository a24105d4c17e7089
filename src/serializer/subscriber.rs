//! Pre-serialize hook for JSON output.
//!
//! For every object about to be serialized as JSON whose class has
//! translatable properties, the hook makes sure the event carries a
//! locale-bearing context and hands the object to the translator.

use crate::config::Config;
use crate::error::HookError;
use crate::i18n::Translator;
use crate::metadata::{ClassMetadata, MetadataSource};
use crate::resource::Resource;
use crate::serializer::{
    Context, EventKind, EventSubscriber, ObjectEvent, SerializationContext, Subscription,
};
use std::sync::Arc;
use tracing::{debug, trace};

/// Output format the hook is registered for.
pub const JSON_FORMAT: &str = "json";

pub struct JsonEventSubscriber {
    translator: Arc<dyn Translator>,
    metadata: Arc<dyn MetadataSource>,
    locale: Option<String>,
}

impl JsonEventSubscriber {
    /// # Arguments
    /// * `translator` - Receives objects whose class has translatable properties
    /// * `metadata` - Metadata lookup, expected to memoize per class
    /// * `config` - Supplies the configured default locale, if any
    pub fn new(
        translator: Arc<dyn Translator>,
        metadata: Arc<dyn MetadataSource>,
        config: &Config,
    ) -> Self {
        Self {
            translator,
            metadata,
            locale: config.locale.clone(),
        }
    }

    /// Ensure a locale-bearing context.
    ///
    /// An already adapted context is returned untouched. A plain context is
    /// wrapped and gets the configured locale; without one it keeps the locale
    /// the wrapper derived from the plain context.
    pub fn adapt_context(&self, context: Context) -> SerializationContext {
        match context {
            Context::Localized(context) => context,
            Context::Base(inner) => {
                let mut adapted = SerializationContext::new(inner);
                if let Some(locale) = &self.locale {
                    adapted.set_locale(locale.as_str());
                }
                debug!("Adapted serialization context to locale {}", adapted.locale());
                adapted
            }
        }
    }

    /// Handle one pre-serialize event.
    ///
    /// The event's context is only replaced by its adapted form when the
    /// translator runs. Objects without translatable metadata leave the event
    /// exactly as it arrived.
    pub fn on_pre_serialize(&self, event: &mut ObjectEvent<'_>) -> Result<(), HookError> {
        let object = event.object();

        let Some(metadata) = self.translatable_metadata(object)? else {
            return Ok(());
        };

        let context = self.adapt_context(event.take_context());
        let result = self
            .translator
            .translate(&metadata, event.visitor_mut(), &context, object);
        event.set_context(Context::Localized(context));
        result.map_err(HookError::from)
    }

    /// Metadata of the object's class, if it has properties to translate.
    fn translatable_metadata(
        &self,
        object: &dyn Resource,
    ) -> Result<Option<Arc<ClassMetadata>>, HookError> {
        let class = object.class_ref();

        let Some(metadata) = self.metadata.metadata_for_class(&class)? else {
            trace!("No metadata for {}", class.name());
            return Ok(None);
        };

        if !metadata.has_properties_to_translate() {
            trace!("Nothing to translate on {}", class.name());
            return Ok(None);
        }

        Ok(Some(metadata))
    }
}

impl EventSubscriber for JsonEventSubscriber {
    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![Subscription::new(EventKind::PreSerialize).for_format(JSON_FORMAT)]
    }

    fn on_event(&self, kind: EventKind, event: &mut ObjectEvent<'_>) -> Result<(), HookError> {
        match kind {
            EventKind::PreSerialize => self.on_pre_serialize(event),
            EventKind::PostSerialize => Ok(()),
        }
    }
}
