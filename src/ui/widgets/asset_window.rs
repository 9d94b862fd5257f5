use crate::constants::ASSET_WINDOW_NAME;
use crate::events::{EventBus, EventKind, SubscriptionSet};
use crate::services::SessionProvider;
use crate::ui::adapters::AssetTreeAdapter;
use crate::ui::refresh_controller::{RefreshController, RefreshOutcome};
use crate::ui::viewmodels::AssetListViewModel;
use crate::utils::PanelResult;
use std::sync::Arc;
use tracing::info;

/// Asset browser: a refresh button over a tree of the session's assets.
pub struct AssetWindow {
    assets: Arc<AssetListViewModel>,
    refresh: Arc<RefreshController>,
    tree: AssetTreeAdapter<AssetListViewModel>,
    subscriptions: SubscriptionSet,
}

impl AssetWindow {
    /// Build the window, subscribe to asset updates and kick off a first refresh.
    pub fn new(bus: &EventBus, sessions: Arc<dyn SessionProvider>) -> PanelResult<Self> {
        let assets = Arc::new(AssetListViewModel::new());
        let refresh = Arc::new(RefreshController::new(sessions, assets.clone()));

        let mut subscriptions = SubscriptionSet::new();
        let handler = refresh.clone();
        subscriptions.subscribe(
            bus,
            EventKind::AssetsUpdated,
            "asset_window.assets_updated",
            move |_| {
                handler.on_assets_updated();
            },
        )?;

        let window = Self {
            tree: AssetTreeAdapter::new(assets.clone()),
            assets,
            refresh,
            subscriptions,
        };

        info!("{} window opened", ASSET_WINDOW_NAME);
        window.refresh.request_refresh();
        Ok(window)
    }

    pub fn refresh_clicked(&self) -> RefreshOutcome {
        self.refresh.request_refresh()
    }

    /// Forward a selection of tree rows to the view model
    pub fn selection_changed(&self, rows: &[usize]) {
        let selected = self.tree.records_at(rows);
        self.assets.on_selection_changed(&selected);
    }

    pub fn assets(&self) -> &Arc<AssetListViewModel> {
        &self.assets
    }

    pub fn refresh_controller(&self) -> &Arc<RefreshController> {
        &self.refresh
    }

    pub fn tree(&self) -> &AssetTreeAdapter<AssetListViewModel> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut AssetTreeAdapter<AssetListViewModel> {
        &mut self.tree
    }

    pub fn is_subscribed(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Release every bus subscription. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        self.subscriptions.release_all();
        info!("{} window closed", ASSET_WINDOW_NAME);
    }
}

impl Drop for AssetWindow {
    fn drop(&mut self) {
        self.destroy();
    }
}
