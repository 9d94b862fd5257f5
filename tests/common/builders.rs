use chrono::{DateTime, TimeZone, Utc};
use tilescope::models::{AssetRecord, AssetType};

pub struct AssetRecordBuilder {
    id: i64,
    name: String,
    description: String,
    attribution: String,
    asset_type: AssetType,
    date_added: DateTime<Utc>,
}

impl AssetRecordBuilder {
    pub fn tileset(id: i64, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: String::new(),
            attribution: String::new(),
            asset_type: AssetType::Tiles3d,
            date_added: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        }
    }

    pub fn imagery(id: i64, name: &str) -> Self {
        Self {
            asset_type: AssetType::Imagery,
            ..Self::tileset(id, name)
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_attribution(mut self, attribution: &str) -> Self {
        self.attribution = attribution.to_string();
        self
    }

    pub fn build(self) -> AssetRecord {
        AssetRecord::new(self.id, self.name, self.asset_type, self.date_added)
            .with_description(self.description)
            .with_attribution(self.attribution)
    }
}

/// `count` tilesets with ids starting at `first_id`
pub fn tilesets(first_id: i64, count: usize) -> Vec<AssetRecord> {
    (0..count as i64)
        .map(|i| {
            let id = first_id + i;
            AssetRecordBuilder::tileset(id, &format!("Tileset {}", id)).build()
        })
        .collect()
}
