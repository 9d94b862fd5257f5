use crate::constants::STATISTICS_WIDGET_NAME;
use crate::events::{EventBus, EventKind, SubscriptionSet};
use crate::services::StatisticsProvider;
use crate::ui::adapters;
use crate::ui::viewmodels::StatisticsViewModel;
use crate::utils::PanelResult;
use std::sync::Arc;
use tracing::debug;

/// Scene statistics panel, refreshed on every update frame while visible.
pub struct StatisticsWidget {
    model: Arc<StatisticsViewModel>,
    subscriptions: SubscriptionSet,
}

impl StatisticsWidget {
    pub fn new(bus: &EventBus, provider: Arc<dyn StatisticsProvider>) -> PanelResult<Self> {
        let model = Arc::new(StatisticsViewModel::new(provider));

        let mut subscriptions = SubscriptionSet::new();
        let handler = model.clone();
        subscriptions.subscribe(
            bus,
            EventKind::UpdateFrame,
            "statistics_widget.update_frame",
            move |_| handler.on_frame_tick(),
        )?;

        debug!("{} widget created", STATISTICS_WIDGET_NAME);
        Ok(Self {
            model,
            subscriptions,
        })
    }

    pub fn set_visible(&self, visible: bool) {
        self.model.set_visible(visible);
    }

    pub fn is_visible(&self) -> bool {
        self.model.is_visible()
    }

    pub fn rows(&self) -> Vec<(&'static str, String)> {
        self.model.rows()
    }

    pub fn render(&self) -> String {
        adapters::render_statistics(&self.model)
    }

    pub fn is_subscribed(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn destroy(&mut self) {
        self.subscriptions.release_all();
    }
}

impl Drop for StatisticsWidget {
    fn drop(&mut self) {
        self.destroy();
    }
}
