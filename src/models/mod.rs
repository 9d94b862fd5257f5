pub mod asset;
pub mod statistics;

pub use asset::{AssetCollection, AssetId, AssetRecord, AssetType};
pub use statistics::{CounterFormat, RenderStatistics, StatisticKind};
