//! Serialization contexts.
//!
//! [`BaseContext`] is the generic per-pass context. [`SerializationContext`]
//! wraps it with a resolved locale. [`Context`] is what travels with a
//! serialization event; its `Localized` variant is the explicit marker that a
//! context has already been adapted.

use crate::i18n::DEFAULT_LOCALE;
use serde_json::{Map, Value};
use std::ops::Deref;

/// Attribute name under which a plain context may carry a preferred locale.
pub const LOCALE_ATTRIBUTE: &str = "locale";

/// Generic serialization context for one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaseContext {
    attributes: Map<String, Value>,
    serialize_null: bool,
}

impl BaseContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Keep `null` properties in the output (dropped by default).
    pub fn with_serialize_null(mut self, serialize_null: bool) -> Self {
        self.serialize_null = serialize_null;
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Locale carried as a string attribute, if any.
    pub fn locale(&self) -> Option<&str> {
        self.attribute(LOCALE_ATTRIBUTE).and_then(Value::as_str)
    }

    pub fn serialize_null(&self) -> bool {
        self.serialize_null
    }
}

/// Locale-bearing wrapper around a [`BaseContext`].
///
/// Every non-locale query is delegated to the wrapped context through `Deref`.
#[derive(Debug, Clone, PartialEq)]
pub struct SerializationContext {
    inner: BaseContext,
    locale: String,
}

impl SerializationContext {
    /// Wrap `inner`, taking its locale attribute or [`DEFAULT_LOCALE`].
    pub fn new(inner: BaseContext) -> Self {
        let locale = inner.locale().unwrap_or(DEFAULT_LOCALE).to_string();
        Self { inner, locale }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn inner(&self) -> &BaseContext {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut BaseContext {
        &mut self.inner
    }

    pub fn into_inner(self) -> BaseContext {
        self.inner
    }
}

impl Deref for SerializationContext {
    type Target = BaseContext;

    fn deref(&self) -> &BaseContext {
        &self.inner
    }
}

/// Context attached to a serialization event.
#[derive(Debug, Clone, PartialEq)]
pub enum Context {
    /// Not yet adapted
    Base(BaseContext),

    /// Adapted by the pre-serialize hook
    Localized(SerializationContext),
}

impl Context {
    pub fn is_localized(&self) -> bool {
        matches!(self, Context::Localized(_))
    }

    pub fn as_localized(&self) -> Option<&SerializationContext> {
        match self {
            Context::Localized(context) => Some(context),
            Context::Base(_) => None,
        }
    }

    /// Resolved locale; `None` until the context has been adapted.
    pub fn locale(&self) -> Option<&str> {
        self.as_localized().map(SerializationContext::locale)
    }

    /// The underlying generic context.
    pub fn base(&self) -> &BaseContext {
        match self {
            Context::Base(context) => context,
            Context::Localized(context) => context.inner(),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::Base(BaseContext::default())
    }
}

impl From<BaseContext> for Context {
    fn from(context: BaseContext) -> Self {
        Context::Base(context)
    }
}

impl From<SerializationContext> for Context {
    fn from(context: SerializationContext) -> Self {
        Context::Localized(context)
    }
}
