//! Display adapters: map view models onto rows a front end can draw.
//!
//! The adapters here render plain text, which is what the headless binary prints.

use super::viewmodels::{AssetListViewModel, PropertySubscriber, StatisticsViewModel};
use crate::constants::columns;
use crate::models::AssetRecord;
use std::fmt::Write;
use std::sync::Arc;

/// Contract a list-like view model offers to a display adapter
pub trait ItemModel: Send + Sync {
    type Item;

    fn item_count(&self) -> usize;

    fn item_at(&self, index: usize) -> Option<Self::Item>;

    /// Fires after every structural change of the list
    fn subscribe_changes(&self) -> PropertySubscriber;
}

impl ItemModel for AssetListViewModel {
    type Item = AssetRecord;

    fn item_count(&self) -> usize {
        AssetListViewModel::item_count(self)
    }

    fn item_at(&self, index: usize) -> Option<AssetRecord> {
        AssetListViewModel::item_at(self, index)
    }

    fn subscribe_changes(&self) -> PropertySubscriber {
        AssetListViewModel::subscribe_changes(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRow {
    pub name: String,
    pub asset_type: String,
    pub date_added: String,
}

impl AssetRow {
    fn from_record(record: &AssetRecord) -> Self {
        Self {
            name: record.name.clone(),
            asset_type: record.asset_type.to_string(),
            date_added: record.date_added.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Tree-view style adapter over an asset list: one row per asset with
/// Name, Type and Date Added columns.
pub struct AssetTreeAdapter<M: ItemModel<Item = AssetRecord>> {
    model: Arc<M>,
    changes: PropertySubscriber,
    rows: Vec<AssetRow>,
}

impl<M: ItemModel<Item = AssetRecord>> AssetTreeAdapter<M> {
    pub fn new(model: Arc<M>) -> Self {
        let changes = model.subscribe_changes();
        let mut adapter = Self {
            model,
            changes,
            rows: Vec::new(),
        };
        adapter.rebuild();
        adapter
    }

    /// Rebuild rows if the model changed since the last sync. Returns whether it did.
    pub fn sync(&mut self) -> bool {
        if !self.changes.drain() {
            return false;
        }
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        self.rows = (0..self.model.item_count())
            .filter_map(|i| self.model.item_at(i))
            .map(|record| AssetRow::from_record(&record))
            .collect();
    }

    pub fn rows(&self) -> &[AssetRow] {
        &self.rows
    }

    /// Records behind the given row indices; out of range indices are ignored
    pub fn records_at(&self, indices: &[usize]) -> Vec<AssetRecord> {
        indices
            .iter()
            .filter_map(|&i| self.model.item_at(i))
            .collect()
    }

    pub fn render(&self) -> String {
        let name_width = self
            .rows
            .iter()
            .map(|r| r.name.chars().count())
            .chain(std::iter::once(columns::NAME.len()))
            .max()
            .unwrap_or(0);
        let type_width = self
            .rows
            .iter()
            .map(|r| r.asset_type.len())
            .chain(std::iter::once(columns::TYPE.len()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<type_width$}  {}",
            columns::NAME,
            columns::TYPE,
            columns::DATE_ADDED
        );
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{:<name_width$}  {:<type_width$}  {}",
                row.name, row.asset_type, row.date_added
            );
        }
        out
    }
}

/// Label/value table for the statistics panel
pub fn render_statistics(model: &StatisticsViewModel) -> String {
    let rows = model.rows();
    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, text) in rows {
        let _ = writeln!(out, "{:<label_width$}  {}", label, text);
    }
    out
}
