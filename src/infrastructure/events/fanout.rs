//! Broadcast events to several sinks

use std::sync::Arc;

use crate::domain::ports::{DeployEvent, DeployEventSink};

#[derive(Default)]
pub struct FanoutEventSink {
    sinks: Vec<Arc<dyn DeployEventSink>>,
}

impl FanoutEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: Arc<dyn DeployEventSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl DeployEventSink for FanoutEventSink {
    fn on_event(&self, event: DeployEvent) {
        for sink in &self.sinks {
            sink.on_event(event.clone());
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.sinks.iter().any(|s| s.wants_detailed_events())
    }
}
