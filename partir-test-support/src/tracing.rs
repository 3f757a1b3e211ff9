//! In-memory capture of tracing output.
//!
//! Install a [`TraceCapture`] clone in a subscriber, run the code under test
//! with that subscriber as the default, then query the original handle.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Id, Record};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;

/// Field name to rendered value.
pub type Fields = BTreeMap<String, String>;

/// One entry of the captured log, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Captured {
    /// A span finished.
    Span(ClosedSpan),
    /// An event fired.
    Event(CapturedEvent),
}

/// A span together with every field it carried by the time it closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedSpan {
    /// Span name from its metadata.
    pub name: String,
    /// Fields recorded at creation or later through `Span::record`.
    pub fields: Fields,
}

/// An event with its rendered fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    /// Verbosity of the event.
    pub level: Level,
    /// Module path or explicit target.
    pub target: String,
    /// Rendered fields; the formatted message lives under `message`.
    pub fields: Fields,
}

impl CapturedEvent {
    /// Formatted message, if the event had one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

/// [`Layer`] appending closed spans and events to a shared log.
///
/// # Examples
/// ```
/// use partir_test_support::tracing::TraceCapture;
/// use tracing_subscriber::layer::SubscriberExt;
///
/// let capture = TraceCapture::default();
/// let subscriber = tracing_subscriber::registry().with(capture.clone());
/// tracing::subscriber::with_default(subscriber, || {
///     let _guard = tracing::info_span!("demo", step = 3).entered();
///     tracing::info!("inside");
/// });
/// assert!(capture.has_event(tracing::Level::INFO, "inside"));
/// assert_eq!(
///     capture.span("demo").and_then(|span| span.fields.get("step").cloned()),
///     Some("3".to_owned())
/// );
/// ```
#[derive(Clone, Default)]
pub struct TraceCapture {
    log: Arc<Mutex<Vec<Captured>>>,
}

impl TraceCapture {
    /// Everything captured so far.
    #[must_use]
    pub fn log(&self) -> Vec<Captured> {
        self.lock().clone()
    }

    /// Closed spans in completion order.
    #[must_use]
    pub fn closed_spans(&self) -> Vec<ClosedSpan> {
        self.lock()
            .iter()
            .filter_map(|entry| match entry {
                Captured::Span(span) => Some(span.clone()),
                Captured::Event(_) => None,
            })
            .collect()
    }

    /// Events in emission order.
    #[must_use]
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.lock()
            .iter()
            .filter_map(|entry| match entry {
                Captured::Event(event) => Some(event.clone()),
                Captured::Span(_) => None,
            })
            .collect()
    }

    /// First closed span called `name`.
    #[must_use]
    pub fn span(&self, name: &str) -> Option<ClosedSpan> {
        self.closed_spans().into_iter().find(|span| span.name == name)
    }

    /// Returns `true` when an event at `level` carried `message`.
    #[must_use]
    pub fn has_event(&self, level: Level, message: &str) -> bool {
        self.events()
            .iter()
            .any(|event| event.level == level && event.message() == Some(message))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Captured>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Stored in span extensions until the span closes.
struct OpenSpan(Fields);

impl<S> Layer<S> for TraceCapture
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut fields = Fields::new();
        attrs.record(&mut Renderer(&mut fields));
        span.extensions_mut().insert(OpenSpan(fields));
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(OpenSpan(fields)) = span.extensions_mut().get_mut::<OpenSpan>() {
            values.record(&mut Renderer(fields));
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let fields = span
            .extensions_mut()
            .remove::<OpenSpan>()
            .map(|OpenSpan(fields)| fields)
            .unwrap_or_default();
        self.lock().push(Captured::Span(ClosedSpan {
            name: span.name().to_owned(),
            fields,
        }));
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::new();
        event.record(&mut Renderer(&mut fields));
        let metadata = event.metadata();
        self.lock().push(Captured::Event(CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_owned(),
            fields,
        }));
    }
}

// Numbers, booleans and `%`-formatted values all arrive through
// `record_debug`, whose output matches their `Display` form. Plain strings
// are kept unquoted.
struct Renderer<'a>(&'a mut Fields);

impl Visit for Renderer<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_owned(), format!("{value:?}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use tracing_subscriber::layer::SubscriberExt;

    #[rstest]
    fn late_recorded_fields_are_kept() {
        let capture = TraceCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("work", rows = tracing::field::Empty);
            span.record("rows", 12_u64);
        });
        let span = capture.span("work").expect("span closed");
        assert_eq!(span.fields.get("rows").map(String::as_str), Some("12"));
    }

    #[rstest]
    fn log_preserves_interleaving() {
        let capture = TraceCapture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info_span!("outer").in_scope(|| tracing::warn!(flag = true, "inner"));
            tracing::debug!(stage = "late", "after");
        });
        let log = capture.log();
        assert_eq!(log.len(), 3);
        assert!(matches!(log.first(), Some(Captured::Event(event)) if event.message() == Some("inner")));
        assert!(matches!(log.get(1), Some(Captured::Span(span)) if span.name == "outer"));
        let events = capture.events();
        assert_eq!(
            events.first().and_then(|event| event.fields.get("flag")).map(String::as_str),
            Some("true")
        );
        assert_eq!(
            events.last().and_then(|event| event.fields.get("stage")).map(String::as_str),
            Some("late")
        );
    }
}
