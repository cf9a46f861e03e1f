use std::collections::BTreeMap;

use log::info;

use crate::align::{merge_with_tolerance, symmetrize_with};
use crate::config::{MergeOptions, SymmetrizeOptions};
use crate::data::model::Dataset;
use crate::error::{AlignError, Result};

// ---------------------------------------------------------------------------
// Named dataset store
// ---------------------------------------------------------------------------

/// Measurement name → most recently loaded dataset.
///
/// The store is owned by the caller; the alignment operations never reach
/// into it on their own. The helpers below only look datasets up and hand
/// them to the pure functions.
#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    datasets: BTreeMap<String, Dataset>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `dataset` under `name`, returning whatever it replaced.
    pub fn insert(&mut self, name: impl Into<String>, dataset: Dataset) -> Option<Dataset> {
        let name = name.into();
        info!("storing '{name}' ({} rows, {} columns)", dataset.len(), dataset.columns().len());
        self.datasets.insert(name, dataset)
    }

    pub fn get(&self, name: &str) -> Option<&Dataset> {
        self.datasets.get(name)
    }

    /// Like [`DatasetStore::get`], but an absent name is an error.
    pub fn require(&self, name: &str) -> Result<&Dataset> {
        self.get(name)
            .ok_or_else(|| AlignError::UnknownDataset(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Option<Dataset> {
        self.datasets.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.datasets.contains_key(name)
    }

    /// Stored names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.datasets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Rename columns of a stored dataset in place (old → new).
    pub fn rename_columns(&mut self, name: &str, mapping: &BTreeMap<String, String>) -> Result<()> {
        let renamed = self.require(name)?.rename_columns(mapping)?;
        info!("renamed {} column(s) of '{name}'", mapping.len());
        self.datasets.insert(name.to_string(), renamed);
        Ok(())
    }

    /// Tolerance-merge two stored datasets. The store is left unchanged.
    pub fn merge(&self, left: &str, right: &str, on: &str, options: &MergeOptions) -> Result<Dataset> {
        merge_with_tolerance(self.require(left)?, self.require(right)?, on, options)
    }

    /// Symmetrize a stored dataset. The store is left unchanged.
    pub fn symmetrize(
        &self,
        name: &str,
        index_column: &str,
        objective_columns: &[&str],
        options: &SymmetrizeOptions,
    ) -> Result<(Dataset, Dataset)> {
        symmetrize_with(self.require(name)?, index_column, objective_columns, options)
    }
}
