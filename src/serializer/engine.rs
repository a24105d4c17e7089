//! Object-to-JSON serializer that fires events around each object.

use crate::error::SerializeError;
use crate::resource::Resource;
use crate::serializer::{Context, EventDispatcher, EventKind, JsonVisitor, ObjectEvent};
use serde_json::Value;
use tracing::debug;

/// Serializes resources, notifying the dispatcher before and after each object.
///
/// The context is owned by the caller and threaded through every object of a
/// pass, so a context adapted while serializing the first object is seen
/// already adapted by the next one.
#[derive(Default, Clone)]
pub struct Serializer {
    dispatcher: EventDispatcher,
}

impl Serializer {
    pub fn new(dispatcher: EventDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Serialize one object.
    ///
    /// # Arguments
    /// * `object` - The resource to convert
    /// * `format` - Output format name, used to route events (e.g. `json`)
    /// * `context` - Pass context; replaced by whatever the subscribers leave on the event
    ///
    /// # Returns
    /// The object's JSON value with translated properties applied. `null`
    /// properties are dropped unless the context asks to serialize them.
    pub fn serialize(
        &self,
        object: &dyn Resource,
        format: &str,
        context: &mut Context,
    ) -> Result<Value, SerializeError> {
        let mut visitor = JsonVisitor::new();

        let mut event = ObjectEvent::new(object, std::mem::take(context), &mut visitor, format);
        let result = self.dispatcher.dispatch(EventKind::PreSerialize, &mut event);
        *context = event.into_context();
        result?;

        let class = object.class_ref();
        let mut value = object.to_value().map_err(|source| SerializeError::Json {
            class: class.name().to_string(),
            source,
        })?;
        visitor.apply(&mut value);
        if !context.base().serialize_null() {
            drop_null_properties(&mut value);
        }

        if self.dispatcher.has_listeners(EventKind::PostSerialize, format) {
            let mut event =
                ObjectEvent::new(object, std::mem::take(context), &mut visitor, format);
            let result = self.dispatcher.dispatch(EventKind::PostSerialize, &mut event);
            *context = event.into_context();
            result?;
        }

        debug!(
            "Serialized {} as {} ({} translated properties)",
            class.name(),
            format,
            visitor.translations().len()
        );
        Ok(value)
    }

    /// Serialize a sequence of objects sharing one context.
    pub fn serialize_all<'a, I>(
        &self,
        objects: I,
        format: &str,
        context: &mut Context,
    ) -> Result<Vec<Value>, SerializeError>
    where
        I: IntoIterator<Item = &'a dyn Resource>,
    {
        objects
            .into_iter()
            .map(|object| self.serialize(object, format, context))
            .collect()
    }

    /// Serialize one object to a pretty-printed JSON string.
    pub fn to_string_pretty(
        &self,
        object: &dyn Resource,
        format: &str,
        context: &mut Context,
    ) -> Result<String, SerializeError> {
        let value = self.serialize(object, format, context)?;
        serde_json::to_string_pretty(&value).map_err(|source| SerializeError::Json {
            class: object.class_ref().name().to_string(),
            source,
        })
    }
}

fn drop_null_properties(value: &mut Value) {
    if let Value::Object(object) = value {
        object.retain(|_, property| !property.is_null());
    }
}
