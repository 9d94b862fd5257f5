use super::{Property, PropertySubscriber, ViewModel};
use crate::models::AssetRecord;
use tracing::{debug, trace};

/// Latest asset list known to the session, in the order the provider returned it.
pub struct AssetListViewModel {
    items: Property<Vec<AssetRecord>>,
    total_items: Property<usize>,
}

impl AssetListViewModel {
    pub fn new() -> Self {
        Self {
            items: Property::new(Vec::new(), "items"),
            total_items: Property::new(0, "total_items"),
        }
    }

    /// Swap in a whole new list and tell attached adapters about it.
    ///
    /// Nothing from the previous list survives, even records with the same id.
    pub fn replace_all(&self, records: Vec<AssetRecord>) {
        debug!("Replacing asset list with {} records", records.len());
        let count = records.len();
        self.items.set(records);
        self.total_items.set(count);
    }

    pub fn current_items(&self) -> Vec<AssetRecord> {
        self.items.get()
    }

    pub fn item_count(&self) -> usize {
        self.items.with(Vec::len)
    }

    pub fn item_at(&self, index: usize) -> Option<AssetRecord> {
        self.items.with(|items| items.get(index).cloned())
    }

    /// Selection hook for the display layer. Reserved, does nothing yet.
    pub fn on_selection_changed(&self, selected: &[AssetRecord]) {
        trace!("Asset selection changed ({} selected)", selected.len());
    }

    pub fn total_items(&self) -> &Property<usize> {
        &self.total_items
    }

    pub fn subscribe_changes(&self) -> PropertySubscriber {
        self.items.subscribe()
    }
}

impl Default for AssetListViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel for AssetListViewModel {
    fn subscribe_to_property(&self, property_name: &str) -> Option<PropertySubscriber> {
        match property_name {
            "items" => Some(self.items.subscribe()),
            "total_items" => Some(self.total_items.subscribe()),
            _ => None,
        }
    }
}
