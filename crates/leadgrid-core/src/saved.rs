//! Named scoring configurations kept independently of sheets.

use crate::error::{LeadgridError, Result};
use crate::storage::{KeyValueStore, read_json_or_discard};
use chrono::{DateTime, Utc};
use leadgrid_engine::{EngineError, ScoringConfig};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedScore {
    /// Opaque unique id.
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub config: ScoringConfig,
}

/// The saved list, oldest first. Names need not be unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SavedScores {
    entries: Vec<SavedScore>,
}

impl SavedScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the list stored under `key`. Corrupt data is discarded.
    pub fn load(store: &mut dyn KeyValueStore, key: &str) -> Result<Self> {
        let entries: Vec<SavedScore> = read_json_or_discard(store, key)?.unwrap_or_default();
        log::debug!("Restored {} saved score(s)", entries.len());
        Ok(SavedScores { entries })
    }

    pub fn persist(&self, store: &mut dyn KeyValueStore, key: &str) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        store.set(key, &json)
    }

    /// Save a snapshot of `config`. Only a valid configuration can be saved.
    pub fn save(&mut self, name: &str, config: &ScoringConfig) -> Result<&SavedScore> {
        if !config.is_valid() {
            return Err(LeadgridError::Engine(EngineError::InvalidWeight {
                total: config.total_weight(),
                included: config.included_columns.len(),
            }));
        }
        let entry = SavedScore {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            created_at: Utc::now(),
            config: config.clone(),
        };
        log::info!("Saved scoring configuration '{}' ({})", entry.name, entry.id);
        self.entries.push(entry);
        let idx = self.entries.len() - 1;
        Ok(&self.entries[idx])
    }

    pub fn get(&self, id: &str) -> Result<&SavedScore> {
        self.entries
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| LeadgridError::UnknownSavedScore(id.to_string()))
    }

    pub fn delete(&mut self, id: &str) -> Result<SavedScore> {
        let idx = self
            .entries
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| LeadgridError::UnknownSavedScore(id.to_string()))?;
        let removed = self.entries.remove(idx);
        log::info!("Deleted saved scoring configuration '{}'", removed.name);
        Ok(removed)
    }

    pub fn list(&self) -> &[SavedScore] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use leadgrid_engine::{Importance, ScoringEngine};

    fn valid_config() -> ScoringConfig {
        let mut engine = ScoringEngine::new();
        engine.include("Size");
        engine.include("Industry");
        engine
            .set_importance("Size", "Large", Importance::VeryImportant)
            .unwrap();
        engine.config().clone()
    }

    #[test]
    fn test_save_requires_valid_config() {
        let mut saved = SavedScores::new();
        let err = saved.save("Empty", &ScoringConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            LeadgridError::Engine(EngineError::InvalidWeight { total: 0, included: 0 })
        ));
        assert!(saved.is_empty());
    }

    #[test]
    fn test_save_get_delete() {
        let mut saved = SavedScores::new();
        let first = saved.save("Enterprise", &valid_config()).unwrap().id.clone();
        let second = saved.save("Enterprise", &valid_config()).unwrap().id.clone();
        assert_ne!(first, second);
        assert_eq!(saved.len(), 2);

        assert_eq!(saved.get(&first).unwrap().config, valid_config());
        saved.delete(&first).unwrap();
        assert!(matches!(
            saved.get(&first),
            Err(LeadgridError::UnknownSavedScore(_))
        ));
        assert!(saved.delete(&first).is_err());
        assert_eq!(saved.list()[0].id, second);
    }

    #[test]
    fn test_persist_and_load() {
        let mut store = MemoryStore::new();
        let mut saved = SavedScores::new();
        saved.save("Enterprise", &valid_config()).unwrap();
        saved.persist(&mut store, "leadgrid.savedScores").unwrap();

        let text = store.get("leadgrid.savedScores").unwrap().unwrap();
        assert!(text.contains("\"createdAt\""));
        assert!(text.contains("\"includedColumns\""));

        let restored = SavedScores::load(&mut store, "leadgrid.savedScores").unwrap();
        assert_eq!(restored, saved);
    }

    #[test]
    fn test_load_discards_corrupt_list() {
        let mut store = MemoryStore::new();
        store.set("leadgrid.savedScores", "{\"oops\":").unwrap();
        let restored = SavedScores::load(&mut store, "leadgrid.savedScores").unwrap();
        assert!(restored.is_empty());
        assert!(!store.contains_key("leadgrid.savedScores"));
    }
}
