//! Log output with the `tracing` feature enabled.

#![cfg(feature = "tracing")]

use std::sync::{Arc, Mutex};
use std::time::Instant;

use fetchui_core::geometry::{Rect, Size};
use fetchui_tooltip::{Placement, PlacementRequest, TooltipController, compute_placement};
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Clone, Default)]
struct Capture {
    messages: Arc<Mutex<Vec<String>>>,
    spans: Arc<Mutex<Vec<&'static str>>>,
}

impl Capture {
    fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    fn spans(&self) -> Vec<&'static str> {
        self.spans.lock().unwrap().clone()
    }
}

struct MessageVisitor(Option<String>);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for Capture {
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: Context<'_, S>,
    ) {
        self.spans.lock().unwrap().push(attrs.metadata().name());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(None);
        event.record(&mut visitor);
        if let Some(message) = visitor.0 {
            self.messages.lock().unwrap().push(message);
        }
    }
}

#[test]
fn fallback_and_visibility_changes_are_logged() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let request = PlacementRequest::new(
            Rect::new(200.0, 0.0, 40.0, 20.0),
            Placement::Top,
            Size::new(100.0, 40.0),
            Size::new(500.0, 500.0),
        );
        assert_eq!(compute_placement(&request).placement, Placement::Bottom);

        let mut controller = TooltipController::with_defaults();
        controller.focus_in(1, Instant::now());
        controller.viewport_changed();
    });

    let messages = capture.messages();
    for expected in [
        "tooltip candidate clips",
        "tooltip placement fell back",
        "tooltip shown",
        "tooltip dismissed by viewport change",
    ] {
        assert!(
            messages.iter().any(|m| m == expected),
            "missing {expected:?} in {messages:?}"
        );
    }
}

#[test]
fn preferred_placement_logs_nothing() {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let request = PlacementRequest::new(
            Rect::new(200.0, 200.0, 40.0, 20.0),
            Placement::Top,
            Size::new(100.0, 40.0),
            Size::new(500.0, 500.0),
        );
        compute_placement(&request);
    });

    assert!(capture.messages().is_empty());
    // The entry span is still opened, only events are silent.
    assert_eq!(capture.spans(), ["compute_placement"]);
}
