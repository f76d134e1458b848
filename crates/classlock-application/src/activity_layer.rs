//! Tracing layer that turns dashboard activity into user-facing notices.
//!
//! Use cases log noteworthy outcomes ("Group Created", "Sync Complete") under
//! the [`ACTIVITY_TARGET`] target. This layer picks those events out of the
//! tracing stream and forwards them over a channel, where the presentation
//! layer shows them as toasts.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Target used by use cases for events meant for the user.
pub const ACTIVITY_TARGET: &str = "classlock::activity";

/// A notice for the presentation layer
#[derive(Debug, Clone, serde::Serialize)]
pub struct ActivityEvent {
    pub target: String,
    /// Log level (INFO, WARN)
    pub level: String,
    /// Notice title, taken from the event message
    pub message: String,
    /// Structured fields from the event
    pub fields: HashMap<String, Value>,
    pub timestamp: String,
}

impl ActivityEvent {
    /// The `detail` field, if the event carried one.
    pub fn detail(&self) -> Option<&str> {
        self.fields.get("detail").and_then(Value::as_str)
    }
}

/// A tracing layer that sends activity events to a channel
pub struct ActivityLayer {
    sender: mpsc::UnboundedSender<ActivityEvent>,
}

impl ActivityLayer {
    pub fn new(sender: mpsc::UnboundedSender<ActivityEvent>) -> Self {
        Self { sender }
    }

    /// Creates a layer together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ActivityEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl<S> Layer<S> for ActivityLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != ACTIVITY_TARGET {
            return;
        }

        let mut fields = HashMap::new();
        let mut visitor = FieldVisitor(&mut fields);
        event.record(&mut visitor);

        let activity = ActivityEvent {
            target: event.metadata().target().to_string(),
            level: event.metadata().level().to_string(),
            message: fields
                .remove("message")
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default(),
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver gone means nobody is displaying notices
        let _ = self.sender.send(activity);
    }
}

/// Field visitor that extracts tracing event fields into a HashMap
struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl tracing::field::Visit for FieldVisitor<'_> {
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        // `message` and `%`-formatted fields arrive here
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_only_activity_events_are_forwarded() {
        let (layer, mut receiver) = ActivityLayer::channel();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("internal detail");
            tracing::info!(target: ACTIVITY_TARGET, detail = "Focus has been created.", "Group Created");
        });

        let event = receiver.try_recv().unwrap();
        assert_eq!(event.message, "Group Created");
        assert_eq!(event.level, "INFO");
        assert_eq!(event.detail(), Some("Focus has been created."));
        assert!(receiver.try_recv().is_err());
    }
}
