// Labels and sizing constants shared by the panels

pub const ASSET_WINDOW_NAME: &str = "Cesium Assets";
pub const STATISTICS_WIDGET_NAME: &str = "Statistics";

/// Capacity of the property change channels; lagging receivers just see "changed"
pub const PROPERTY_CHANNEL_CAPACITY: usize = 100;

pub mod labels {
    pub const MATERIALS_CAPACITY: &str = "Materials capacity";
    pub const MATERIALS_LOADED: &str = "Materials loaded";
    pub const GEOMETRIES_CAPACITY: &str = "Geometries capacity";
    pub const GEOMETRIES_LOADED: &str = "Geometries loaded";
    pub const GEOMETRIES_RENDERED: &str = "Geometries rendered";
    pub const TRIANGLES_LOADED: &str = "Triangles loaded";
    pub const TRIANGLES_RENDERED: &str = "Triangles rendered";
    pub const TILESET_CACHED_BYTES: &str = "Tileset cached bytes";
    pub const TILESET_CACHED_BYTES_HUMAN_READABLE: &str = "Tileset cached bytes (Human-readable)";
}

pub mod columns {
    pub const NAME: &str = "Name";
    pub const TYPE: &str = "Type";
    pub const DATE_ADDED: &str = "Date Added";
}
