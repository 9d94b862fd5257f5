pub mod asset_list_view_model;
pub mod property;
pub mod statistics_view_model;

pub use asset_list_view_model::AssetListViewModel;
pub use property::{Property, PropertySubscriber};
pub use statistics_view_model::{StatisticCounter, StatisticsViewModel};

pub trait ViewModel: Send + Sync {
    fn subscribe_to_property(&self, property_name: &str) -> Option<PropertySubscriber>;
}
