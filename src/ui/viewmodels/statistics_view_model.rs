use super::{Property, PropertySubscriber, ViewModel};
use crate::models::{CounterFormat, StatisticKind};
use crate::services::StatisticsProvider;
use std::sync::Arc;
use tracing::trace;

/// One named counter of the statistics panel
pub struct StatisticCounter {
    kind: StatisticKind,
    value: Property<u64>,
}

impl StatisticCounter {
    fn new(kind: StatisticKind) -> Self {
        Self {
            kind,
            value: Property::new(0, kind.label()),
        }
    }

    pub fn kind(&self) -> StatisticKind {
        self.kind
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn format(&self) -> CounterFormat {
        self.kind.format()
    }

    pub fn value(&self) -> u64 {
        self.value.get()
    }

    pub fn text(&self) -> String {
        self.format().format(self.value())
    }

    pub fn subscribe(&self) -> PropertySubscriber {
        self.value.subscribe()
    }
}

/// Render counters mirrored from the statistics provider once per visible frame.
pub struct StatisticsViewModel {
    provider: Arc<dyn StatisticsProvider>,
    counters: Vec<StatisticCounter>,
    visible: Property<bool>,
}

impl StatisticsViewModel {
    pub fn new(provider: Arc<dyn StatisticsProvider>) -> Self {
        Self {
            provider,
            counters: StatisticKind::ALL
                .iter()
                .copied()
                .map(StatisticCounter::new)
                .collect(),
            visible: Property::new(true, "visible"),
        }
    }

    /// Called on every host update tick.
    ///
    /// Hidden panels skip the provider query entirely.
    pub fn on_frame_tick(&self) {
        if !self.visible.get() {
            return;
        }

        let stats = self.provider.render_statistics();
        trace!("Statistics snapshot: {:?}", stats);

        for counter in &self.counters {
            counter.value.set_if_changed(counter.kind.read(&stats));
        }
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.set_if_changed(visible);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn counters(&self) -> &[StatisticCounter] {
        &self.counters
    }

    pub fn counter(&self, kind: StatisticKind) -> Option<&StatisticCounter> {
        self.counters.iter().find(|c| c.kind == kind)
    }

    /// Label and display text of every counter, in panel order
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        self.counters
            .iter()
            .map(|counter| (counter.label(), counter.text()))
            .collect()
    }
}

impl ViewModel for StatisticsViewModel {
    fn subscribe_to_property(&self, property_name: &str) -> Option<PropertySubscriber> {
        if property_name == "visible" {
            return Some(self.visible.subscribe());
        }
        self.counters
            .iter()
            .find(|c| c.label() == property_name)
            .map(StatisticCounter::subscribe)
    }
}
