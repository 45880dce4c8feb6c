use crate::host::Host;
use folio_common::InteractionEvent;
use folio_common::formatter::format_event;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// Optional forwarding target for recorded interaction events.
pub trait AnalyticsSink {
    fn forward(&self, event: &InteractionEvent);
}

/// In-memory, session-scoped interaction log.
///
/// Grows without bound unless `max_events` is set, in which case the oldest
/// events are dropped first.
#[derive(Clone, Default)]
pub struct SessionEventLog {
    events: Rc<RefCell<Vec<InteractionEvent>>>,
    sink: Rc<RefCell<Option<Box<dyn AnalyticsSink>>>>,
    max_events: Option<usize>,
}

impl SessionEventLog {
    pub fn new(max_events: Option<usize>) -> Self {
        Self {
            max_events,
            ..Self::default()
        }
    }

    pub fn set_sink(&self, sink: Box<dyn AnalyticsSink>) {
        *self.sink.borrow_mut() = Some(sink);
    }

    /// Build an event stamped with the host's clock, URL and user agent.
    pub fn track(
        &self,
        host: &dyn Host,
        action: &str,
        label: &str,
        value: Option<f64>,
        target: Option<String>,
    ) {
        let event = InteractionEvent {
            timestamp: host.timestamp(),
            action: action.to_string(),
            label: label.to_string(),
            value,
            target,
            url: host.location(),
            user_agent: host.user_agent(),
        };
        self.record(event);
    }

    pub fn record(&self, event: InteractionEvent) {
        info!(event = %format_event(&event), "Analytics event");
        if let Ok(sink) = self.sink.try_borrow()
            && let Some(sink) = sink.as_ref()
        {
            sink.forward(&event);
        }
        let mut events = self.events.borrow_mut();
        if let Some(limit) = self.max_events
            && events.len() >= limit
        {
            let overflow = events.len() - limit + 1;
            events.drain(..overflow);
        }
        events.push(event);
    }

    /// All recorded events in insertion order.
    pub fn events(&self) -> Vec<InteractionEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}
