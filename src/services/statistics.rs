use crate::models::RenderStatistics;

/// Source of render engine counters, queried once per displayed frame
pub trait StatisticsProvider: Send + Sync {
    fn render_statistics(&self) -> RenderStatistics;
}
