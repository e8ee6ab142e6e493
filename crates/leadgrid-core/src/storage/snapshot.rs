//! JSON snapshots of the workbook registry, including the upgrade from the
//! single-table format.

use super::KeyValueStore;
use crate::error::{LeadgridError, Result};
use crate::workbook::Workbook;
use leadgrid_engine::Grid;
use serde::de::DeserializeOwned;

/// Storage keys for persisted state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    /// Current multi-sheet registry.
    pub registry: String,
    /// Saved scoring configurations.
    pub saved_scores: String,
    /// Single-table snapshot written by older versions.
    pub legacy: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        StorageKeys {
            registry: "leadgrid.sheets".to_string(),
            saved_scores: "leadgrid.savedScores".to_string(),
            legacy: "leadgrid.table".to_string(),
        }
    }
}

/// Read and decode a JSON value.
///
/// Returns `Ok(None)` when the key is absent. A value that does not decode
/// is reported as [`LeadgridError::CorruptPersistedState`].
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(text) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| LeadgridError::CorruptPersistedState {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Like [`read_json`], but a corrupt value is logged, removed and treated as
/// absent.
pub fn read_json_or_discard<T: DeserializeOwned>(
    store: &mut dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>> {
    match read_json(&*store, key) {
        Err(LeadgridError::CorruptPersistedState { key, message }) => {
            log::warn!("Discarding corrupt data under '{}': {}", key, message);
            store.remove(&key)?;
            Ok(None)
        }
        other => other,
    }
}

/// Restore the workbook.
///
/// Order of preference: the registry snapshot, then a legacy single-table
/// snapshot (upgraded in place: the registry is written and the legacy key
/// removed), then a fresh workbook.
pub fn load_workbook(store: &mut dyn KeyValueStore, keys: &StorageKeys) -> Result<Workbook> {
    if let Some(workbook) = read_json_or_discard::<Workbook>(store, &keys.registry)? {
        log::debug!("Restored {} sheet(s)", workbook.sheets().len());
        return Ok(workbook);
    }

    if let Some(grid) = read_json_or_discard::<Grid>(store, &keys.legacy)? {
        log::info!("Upgrading single-table snapshot to a sheet registry");
        let workbook = Workbook::from_legacy(grid);
        save_workbook(store, keys, &workbook)?;
        store.remove(&keys.legacy)?;
        return Ok(workbook);
    }

    Ok(Workbook::new())
}

pub fn save_workbook(store: &mut dyn KeyValueStore, keys: &StorageKeys, workbook: &Workbook) -> Result<()> {
    let json = serde_json::to_string(workbook)?;
    store.set(&keys.registry, &json)
}
