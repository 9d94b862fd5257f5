pub mod adapters;
pub mod refresh_controller;
pub mod viewmodels;
pub mod widgets;

pub use adapters::{AssetRow, AssetTreeAdapter, ItemModel};
pub use refresh_controller::{RefreshController, RefreshOutcome, RefreshState};
pub use viewmodels::{AssetListViewModel, StatisticsViewModel, ViewModel};
pub use widgets::{AssetWindow, StatisticsWidget};
