//! Serialization events and their dispatch to subscribers.

use crate::error::HookError;
use crate::resource::Resource;
use crate::serializer::{Context, JsonVisitor};
use std::sync::Arc;
use tracing::trace;

/// Points in an object's serialization where subscribers are notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Before the object is converted to its wire format
    PreSerialize,

    /// After the object has been converted
    PostSerialize,
}

/// Event fired once per object being serialized.
pub struct ObjectEvent<'a> {
    object: &'a dyn Resource,
    context: Context,
    visitor: &'a mut JsonVisitor,
    format: &'a str,
}

impl<'a> ObjectEvent<'a> {
    pub fn new(
        object: &'a dyn Resource,
        context: Context,
        visitor: &'a mut JsonVisitor,
        format: &'a str,
    ) -> Self {
        Self {
            object,
            context,
            visitor,
            format,
        }
    }

    pub fn object(&self) -> &'a dyn Resource {
        self.object
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Replace the context seen by later subscribers and by the serializer.
    pub fn set_context(&mut self, context: Context) {
        self.context = context;
    }

    /// Move the context out, leaving a default one until `set_context` is called.
    pub fn take_context(&mut self) -> Context {
        std::mem::take(&mut self.context)
    }

    pub fn visitor(&self) -> &JsonVisitor {
        &*self.visitor
    }

    pub fn visitor_mut(&mut self) -> &mut JsonVisitor {
        &mut *self.visitor
    }

    pub fn format(&self) -> &str {
        self.format
    }

    pub fn into_context(self) -> Context {
        self.context
    }
}

/// One `(event, format)` pair a subscriber listens to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub event: EventKind,

    /// Output format the subscription is limited to (`None` = every format)
    pub format: Option<String>,
}

impl Subscription {
    pub fn new(event: EventKind) -> Self {
        Self {
            event,
            format: None,
        }
    }

    pub fn for_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    fn matches(&self, event: EventKind, format: &str) -> bool {
        self.event == event && self.format.as_deref().map_or(true, |f| f == format)
    }
}

/// Receives serialization events.
pub trait EventSubscriber: Send + Sync {
    fn subscribed_events(&self) -> Vec<Subscription>;

    fn on_event(&self, kind: EventKind, event: &mut ObjectEvent<'_>) -> Result<(), HookError>;
}

/// Routes events to the subscribers registered for them, in registration order.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    subscribers: Vec<Arc<dyn EventSubscriber>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_subscriber(&mut self, subscriber: Arc<dyn EventSubscriber>) {
        self.subscribers.push(subscriber);
    }

    pub fn with_subscriber(mut self, subscriber: Arc<dyn EventSubscriber>) -> Self {
        self.add_subscriber(subscriber);
        self
    }

    pub fn has_listeners(&self, kind: EventKind, format: &str) -> bool {
        self.subscribers.iter().any(|subscriber| {
            subscriber
                .subscribed_events()
                .iter()
                .any(|subscription| subscription.matches(kind, format))
        })
    }

    /// Notify every matching subscriber. The first error stops dispatch.
    pub fn dispatch(&self, kind: EventKind, event: &mut ObjectEvent<'_>) -> Result<(), HookError> {
        for subscriber in &self.subscribers {
            let listens = subscriber
                .subscribed_events()
                .iter()
                .any(|subscription| subscription.matches(kind, event.format()));

            if listens {
                trace!("Dispatching {:?} ({})", kind, event.format());
                subscriber.on_event(kind, event)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::BaseContext;
    use serde::Serialize;
    use std::sync::Mutex;

    #[derive(Serialize)]
    struct Tag {
        label: String,
    }

    crate::resource!(Tag);

    /// Subscriber that logs the events it receives.
    struct Recorder {
        name: &'static str,
        subscriptions: Vec<Subscription>,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl EventSubscriber for Recorder {
        fn subscribed_events(&self) -> Vec<Subscription> {
            self.subscriptions.clone()
        }

        fn on_event(&self, kind: EventKind, event: &mut ObjectEvent<'_>) -> Result<(), HookError> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{:?}:{}", self.name, kind, event.format()));
            Ok(())
        }
    }

    fn recorder(
        name: &'static str,
        subscriptions: Vec<Subscription>,
        log: &Arc<Mutex<Vec<String>>>,
    ) -> Arc<dyn EventSubscriber> {
        Arc::new(Recorder {
            name,
            subscriptions,
            log: Arc::clone(log),
        })
    }

    // ==================== ObjectEvent Tests ====================

    #[test]
    fn test_event_context_replacement() {
        let tag = Tag {
            label: "rust".to_string(),
        };
        let mut visitor = JsonVisitor::new();
        let mut event = ObjectEvent::new(&tag, Context::default(), &mut visitor, "json");

        let taken = event.take_context();
        assert_eq!(taken, Context::default());

        let replaced = Context::from(BaseContext::new().with_attribute("tenant", "acme"));
        event.set_context(replaced.clone());
        assert_eq!(event.context(), &replaced);
        assert_eq!(event.into_context(), replaced);
    }

    // ==================== Dispatch Tests ====================

    #[test]
    fn test_dispatch_respects_format_gate() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = EventDispatcher::new()
            .with_subscriber(recorder(
                "json_only",
                vec![Subscription::new(EventKind::PreSerialize).for_format("json")],
                &log,
            ))
            .with_subscriber(recorder(
                "any_format",
                vec![Subscription::new(EventKind::PreSerialize)],
                &log,
            ));

        let tag = Tag {
            label: "rust".to_string(),
        };
        let mut visitor = JsonVisitor::new();
        let mut event = ObjectEvent::new(&tag, Context::default(), &mut visitor, "xml");
        dispatcher
            .dispatch(EventKind::PreSerialize, &mut event)
            .unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["any_format:PreSerialize:xml"]);
        assert!(dispatcher.has_listeners(EventKind::PreSerialize, "json"));
        assert!(!dispatcher.has_listeners(EventKind::PostSerialize, "json"));
    }

    #[test]
    fn test_dispatch_respects_event_kind_and_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = EventDispatcher::new()
            .with_subscriber(recorder(
                "first",
                vec![
                    Subscription::new(EventKind::PreSerialize),
                    Subscription::new(EventKind::PostSerialize),
                ],
                &log,
            ))
            .with_subscriber(recorder(
                "second",
                vec![Subscription::new(EventKind::PostSerialize)],
                &log,
            ));

        let tag = Tag {
            label: "rust".to_string(),
        };
        let mut visitor = JsonVisitor::new();
        let mut event = ObjectEvent::new(&tag, Context::default(), &mut visitor, "json");
        dispatcher
            .dispatch(EventKind::PostSerialize, &mut event)
            .unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:PostSerialize:json", "second:PostSerialize:json"]
        );
    }
}
