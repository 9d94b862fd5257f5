//! In-process providers used when no remote engine is attached.
//!
//! `LocalSession` serves a fixed asset catalog (from a JSON fixture or a built-in
//! sample) and announces refreshes through the event bus, so completion arrives on a
//! later pump exactly like a remote refresh would. `SimulatedStatistics` produces a
//! plausible, slowly growing counter stream.

use super::session::Session;
use super::statistics::StatisticsProvider;
use crate::events::{Event, EventBus};
use crate::models::{AssetCollection, AssetRecord, AssetType, RenderStatistics};
use crate::utils::{PanelError, PanelResult};
use chrono::{TimeZone, Utc};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, Weak};
use tracing::{debug, info, warn};

pub struct LocalSession {
    bus: Weak<EventBus>,
    catalog: RwLock<Vec<AssetRecord>>,
    published: RwLock<AssetCollection>,
    refresh_count: AtomicU64,
}

impl LocalSession {
    pub fn new(bus: Weak<EventBus>, catalog: Vec<AssetRecord>) -> Self {
        Self {
            bus,
            catalog: RwLock::new(catalog),
            published: RwLock::new(AssetCollection::default()),
            refresh_count: AtomicU64::new(0),
        }
    }

    /// Load the catalog from a JSON file shaped like `{ "items": [...] }`
    pub fn from_fixture(bus: Weak<EventBus>, path: &Path) -> PanelResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let collection: AssetCollection = serde_json::from_str(&contents)
            .map_err(|e| PanelError::Fixture(format!("{}: {}", path.display(), e)))?;

        info!(
            "Loaded {} assets from fixture {:?}",
            collection.items.len(),
            path
        );
        Ok(Self::new(bus, collection.items))
    }

    pub fn with_sample_assets(bus: Weak<EventBus>) -> Self {
        Self::new(bus, sample_assets())
    }

    /// Replace what the next refresh will return
    pub fn set_catalog(&self, items: Vec<AssetRecord>) {
        *self.catalog.write().unwrap_or_else(PoisonError::into_inner) = items;
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count.load(Ordering::Relaxed)
    }
}

impl Session for LocalSession {
    fn refresh_assets(&self) {
        self.refresh_count.fetch_add(1, Ordering::Relaxed);

        let items = self
            .catalog
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        debug!("Local session refreshed {} assets", items.len());
        *self.published.write().unwrap_or_else(PoisonError::into_inner) =
            AssetCollection::new(items);

        match self.bus.upgrade() {
            Some(bus) => bus.post(Event::assets_updated()),
            None => warn!("Event bus gone, assets update not announced"),
        }
    }

    fn assets(&self) -> AssetCollection {
        self.published
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

fn sample_assets() -> Vec<AssetRecord> {
    let date = |y: i32, m: u32, d: u32| {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
            .single()
            .unwrap_or_default()
    };

    vec![
        AssetRecord::new(1, "Cesium World Terrain", AssetType::Terrain, date(2019, 5, 2))
            .with_description("High-resolution global terrain")
            .with_attribution("Data sources: SRTM, GMTED2010, USGS"),
        AssetRecord::new(2, "Bing Maps Aerial", AssetType::Imagery, date(2019, 5, 2))
            .with_description("Global aerial imagery")
            .with_attribution("Microsoft Bing Maps"),
        AssetRecord::new(
            96188,
            "Cesium OSM Buildings",
            AssetType::Tiles3d,
            date(2020, 9, 10),
        )
        .with_description("Global 3D buildings from OpenStreetMap")
        .with_attribution("© OpenStreetMap contributors"),
        AssetRecord::new(
            2275207,
            "Google Photorealistic 3D Tiles",
            AssetType::Tiles3d,
            date(2023, 6, 1),
        )
        .with_description("Photorealistic 3D mesh of the world"),
    ]
}

/// Counter stream that grows a little on every query
#[derive(Debug, Default)]
pub struct SimulatedStatistics {
    queries: AtomicU64,
}

impl SimulatedStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }
}

impl StatisticsProvider for SimulatedStatistics {
    fn render_statistics(&self) -> RenderStatistics {
        let n = self.queries.fetch_add(1, Ordering::Relaxed) + 1;

        let geometries_loaded = 40 + n * 3;
        let geometries_rendered = geometries_loaded * 3 / 4;
        let materials_loaded = geometries_loaded / 2;

        RenderStatistics {
            materials_capacity: materials_loaded.next_power_of_two(),
            materials_loaded,
            geometries_capacity: geometries_loaded.next_power_of_two(),
            geometries_loaded,
            geometries_rendered,
            triangles_loaded: geometries_loaded * 12_500,
            triangles_rendered: geometries_rendered * 12_500,
            tileset_cached_bytes: geometries_loaded * 256 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    #[test]
    fn test_refresh_publishes_and_posts() {
        let bus = Arc::new(EventBus::new(10));
        let session = LocalSession::with_sample_assets(Arc::downgrade(&bus));

        assert!(session.assets().items.is_empty());

        session.refresh_assets();
        assert_eq!(session.assets().items.len(), 4);
        assert_eq!(session.refresh_count(), 1);
        assert_eq!(bus.pending(), 1);
    }

    #[test]
    fn test_catalog_change_visible_after_refresh() {
        let bus = Arc::new(EventBus::new(10));
        let session = LocalSession::with_sample_assets(Arc::downgrade(&bus));
        session.refresh_assets();

        session.set_catalog(Vec::new());
        assert_eq!(session.assets().items.len(), 4);

        session.refresh_assets();
        assert!(session.assets().items.is_empty());
    }

    #[test]
    fn test_from_fixture() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"items":[{{"id":7,"name":"Fixture","type":"GLTF","date_added":"2024-02-03T04:05:06Z"}}]}}"#
        )
        .unwrap();

        let bus = Arc::new(EventBus::new(10));
        let session = LocalSession::from_fixture(Arc::downgrade(&bus), file.path()).unwrap();
        session.refresh_assets();

        let items = session.assets().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Fixture");
        assert_eq!(items[0].asset_type, AssetType::Gltf);
    }

    #[test]
    fn test_from_fixture_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let bus = Arc::new(EventBus::new(10));
        let result = LocalSession::from_fixture(Arc::downgrade(&bus), file.path());
        assert!(matches!(result, Err(PanelError::Fixture(_))));
    }

    #[test]
    fn test_simulated_statistics_are_consistent() {
        let stats = SimulatedStatistics::new();
        let first = stats.render_statistics();
        let second = stats.render_statistics();

        assert_eq!(stats.query_count(), 2);
        assert!(second.geometries_loaded > first.geometries_loaded);
        assert!(first.geometries_rendered <= first.geometries_loaded);
        assert!(first.materials_loaded <= first.materials_capacity);
        assert!(first.geometries_loaded <= first.geometries_capacity);
    }
}
