use crate::config::Settings;
use crate::error::{Result, SessionError};
use leadgrid_core::storage::{load_workbook, save_workbook};
use leadgrid_core::{FileStore, KeyValueStore, SavedScores, StorageKeys, Workbook};
use leadgrid_engine::{Contribution, Score, ScoringEngine};

/// Everything a front end edits, plus the store it is persisted to.
pub struct Session {
    pub(crate) workbook: Workbook,
    pub(crate) scoring: ScoringEngine,
    pub(crate) saved: SavedScores,
    pub(crate) keys: StorageKeys,
    pub(crate) store: Box<dyn KeyValueStore>,
}

impl Session {
    /// Restore the workbook and saved scores from `store`.
    ///
    /// A legacy single-table snapshot is upgraded on the way in. Corrupt
    /// entries are dropped and replaced with defaults.
    pub fn open(mut store: Box<dyn KeyValueStore>, settings: &Settings) -> Result<Self> {
        let keys = settings.keys.clone();
        let workbook = load_workbook(store.as_mut(), &keys)?;
        let saved = SavedScores::load(store.as_mut(), &keys.saved_scores)?;
        log::info!(
            "Opened session: {} sheet(s), {} saved score(s)",
            workbook.sheets().len(),
            saved.len()
        );
        Ok(Session {
            workbook,
            scoring: ScoringEngine::new(),
            saved,
            keys,
            store,
        })
    }

    /// Open a session backed by a [`FileStore`] in the configured data dir.
    pub fn open_default(settings: &Settings) -> Result<Self> {
        let dir = settings.resolved_data_dir().ok_or(SessionError::NoDataDir)?;
        Self::open(Box::new(FileStore::new(dir)), settings)
    }

    pub fn workbook(&self) -> &Workbook {
        &self.workbook
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn saved_scores(&self) -> &SavedScores {
        &self.saved
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Active sheet headers that are not yet part of the scoring.
    pub fn available_columns(&self) -> Vec<String> {
        self.workbook
            .active_grid()
            .map(|g| self.scoring.available_columns(g.headers()))
            .unwrap_or_default()
    }

    /// Distinct non-blank values of a column in the active sheet, for grading.
    /// Empty when the column is not in the table.
    pub fn column_values(&self, column: &str) -> Vec<String> {
        let Some(grid) = self.workbook.active_grid() else {
            return Vec::new();
        };
        grid.column_index(column)
            .and_then(|col| grid.distinct_values(col).ok())
            .unwrap_or_default()
    }

    /// Scores the current configuration would give each active row.
    pub fn preview_scores(&self) -> Vec<Score> {
        self.workbook
            .active_grid()
            .map(|g| self.scoring.score_grid(g))
            .unwrap_or_default()
    }

    /// Per-column breakdown of one active row's score.
    pub fn score_breakdown(&self, row: usize) -> Vec<Contribution> {
        self.workbook
            .active_grid()
            .and_then(|g| g.rows().get(row).map(|r| self.scoring.breakdown(g.headers(), r)))
            .unwrap_or_default()
    }

    pub(crate) fn persist_workbook(&mut self) -> Result<()> {
        save_workbook(self.store.as_mut(), &self.keys, &self.workbook)?;
        Ok(())
    }

    pub(crate) fn persist_saved(&mut self) -> Result<()> {
        self.saved
            .persist(self.store.as_mut(), &self.keys.saved_scores)?;
        Ok(())
    }
}
