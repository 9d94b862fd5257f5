use crate::constants::labels;
use crate::utils::{format_grouped, format_human_bytes};
use serde::{Deserialize, Serialize};

/// Snapshot of the render engine counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStatistics {
    pub materials_capacity: u64,
    pub materials_loaded: u64,
    pub geometries_capacity: u64,
    pub geometries_loaded: u64,
    pub geometries_rendered: u64,
    pub triangles_loaded: u64,
    pub triangles_rendered: u64,
    pub tileset_cached_bytes: u64,
}

/// How a counter value is turned into display text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterFormat {
    Grouped,
    HumanBytes,
}

impl CounterFormat {
    pub fn format(&self, value: u64) -> String {
        match self {
            CounterFormat::Grouped => format_grouped(value),
            CounterFormat::HumanBytes => format_human_bytes(value),
        }
    }
}

/// The fixed set of counters shown by the statistics panel, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticKind {
    MaterialsCapacity,
    MaterialsLoaded,
    GeometriesCapacity,
    GeometriesLoaded,
    GeometriesRendered,
    TrianglesLoaded,
    TrianglesRendered,
    TilesetCachedBytes,
    TilesetCachedBytesHumanReadable,
}

impl StatisticKind {
    pub const ALL: [StatisticKind; 9] = [
        StatisticKind::MaterialsCapacity,
        StatisticKind::MaterialsLoaded,
        StatisticKind::GeometriesCapacity,
        StatisticKind::GeometriesLoaded,
        StatisticKind::GeometriesRendered,
        StatisticKind::TrianglesLoaded,
        StatisticKind::TrianglesRendered,
        StatisticKind::TilesetCachedBytes,
        StatisticKind::TilesetCachedBytesHumanReadable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatisticKind::MaterialsCapacity => labels::MATERIALS_CAPACITY,
            StatisticKind::MaterialsLoaded => labels::MATERIALS_LOADED,
            StatisticKind::GeometriesCapacity => labels::GEOMETRIES_CAPACITY,
            StatisticKind::GeometriesLoaded => labels::GEOMETRIES_LOADED,
            StatisticKind::GeometriesRendered => labels::GEOMETRIES_RENDERED,
            StatisticKind::TrianglesLoaded => labels::TRIANGLES_LOADED,
            StatisticKind::TrianglesRendered => labels::TRIANGLES_RENDERED,
            StatisticKind::TilesetCachedBytes => labels::TILESET_CACHED_BYTES,
            StatisticKind::TilesetCachedBytesHumanReadable => {
                labels::TILESET_CACHED_BYTES_HUMAN_READABLE
            }
        }
    }

    pub fn format(&self) -> CounterFormat {
        match self {
            StatisticKind::TilesetCachedBytesHumanReadable => CounterFormat::HumanBytes,
            _ => CounterFormat::Grouped,
        }
    }

    /// Source field of the snapshot this counter mirrors
    pub fn read(&self, stats: &RenderStatistics) -> u64 {
        match self {
            StatisticKind::MaterialsCapacity => stats.materials_capacity,
            StatisticKind::MaterialsLoaded => stats.materials_loaded,
            StatisticKind::GeometriesCapacity => stats.geometries_capacity,
            StatisticKind::GeometriesLoaded => stats.geometries_loaded,
            StatisticKind::GeometriesRendered => stats.geometries_rendered,
            StatisticKind::TrianglesLoaded => stats.triangles_loaded,
            StatisticKind::TrianglesRendered => stats.triangles_rendered,
            StatisticKind::TilesetCachedBytes
            | StatisticKind::TilesetCachedBytesHumanReadable => stats.tileset_cached_bytes,
        }
    }
}
