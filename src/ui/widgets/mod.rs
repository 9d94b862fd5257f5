pub mod asset_window;
pub mod statistics_widget;

pub use asset_window::AssetWindow;
pub use statistics_widget::StatisticsWidget;
