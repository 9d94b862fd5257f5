use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a remotely hosted asset, stable within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(i64);

impl AssetId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AssetId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Asset category as reported by the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetType {
    Tiles3d,
    Gltf,
    Imagery,
    Terrain,
    Kml,
    Czml,
    GeoJson,
    Other(String),
}

impl AssetType {
    pub fn as_str(&self) -> &str {
        match self {
            AssetType::Tiles3d => "3DTILES",
            AssetType::Gltf => "GLTF",
            AssetType::Imagery => "IMAGERY",
            AssetType::Terrain => "TERRAIN",
            AssetType::Kml => "KML",
            AssetType::Czml => "CZML",
            AssetType::GeoJson => "GEOJSON",
            AssetType::Other(name) => name,
        }
    }

    pub fn parse(name: &str) -> Self {
        match name {
            "3DTILES" => AssetType::Tiles3d,
            "GLTF" => AssetType::Gltf,
            "IMAGERY" => AssetType::Imagery,
            "TERRAIN" => AssetType::Terrain,
            "KML" => AssetType::Kml,
            "CZML" => AssetType::Czml,
            "GEOJSON" => AssetType::GeoJson,
            other => AssetType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AssetType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AssetType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(AssetType::parse(&name))
    }
}

/// One asset known to the session. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    pub id: AssetId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub attribution: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    pub date_added: DateTime<Utc>,
}

impl AssetRecord {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        asset_type: AssetType,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AssetId(id),
            name: name.into(),
            description: String::new(),
            attribution: String::new(),
            asset_type,
            date_added,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = attribution.into();
        self
    }
}

/// Asset list as returned by the session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetCollection {
    pub items: Vec<AssetRecord>,
}

impl AssetCollection {
    pub fn new(items: Vec<AssetRecord>) -> Self {
        Self { items }
    }
}
