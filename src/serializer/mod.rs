//! Serialization: contexts, events, the JSON pre-serialize hook and the
//! serializer that drives them.
//!
//! # Architecture
//!
//! - `context`: Plain and locale-bearing contexts
//! - `visitor`: Translated values recorded per object
//! - `event`: Serialization events, subscribers and the dispatcher
//! - `subscriber`: `JsonEventSubscriber`, the pre-serialize translation hook
//! - `engine`: `Serializer`, which fires events and produces JSON values

mod context;
mod engine;
mod event;
mod subscriber;
mod visitor;

pub use context::{BaseContext, Context, SerializationContext, LOCALE_ATTRIBUTE};
pub use engine::Serializer;
pub use event::{EventDispatcher, EventKind, EventSubscriber, ObjectEvent, Subscription};
pub use subscriber::{JsonEventSubscriber, JSON_FORMAT};
pub use visitor::JsonVisitor;
