//! Weighted row scoring.
//!
//! A [`ScoringConfig`] picks the columns that count, gives each an integer
//! weight (the weights of a usable config total exactly 100), and optionally
//! grades individual cell values with an [`Importance`]. The score of a row is
//!
//! ```text
//! sum over included columns C of (weight[C] / 100) * points[C][row[C]]
//! ```
//!
//! where a blank cell contributes nothing and an ungraded value is worth 50.
//! All inputs are integers, so scores are computed exactly in hundredths and
//! need no further rounding.

use crate::error::{EngineError, Result};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Header of the column written by [`ScoringEngine::apply_to`].
pub const LEAD_SCORE_COLUMN: &str = "Lead Score";

/// Total the column weights must reach.
pub const TOTAL_WEIGHT: u32 = 100;

/// Highest weight a single column or value can carry.
pub const MAX_WEIGHT: u32 = 100;

/// Named grade for a cell value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Importance {
    VeryImportant,
    Important,
    #[default]
    Normal,
    ALittleImportant,
    NotImportant,
}

impl Importance {
    pub const ALL: [Importance; 5] = [
        Importance::VeryImportant,
        Importance::Important,
        Importance::Normal,
        Importance::ALittleImportant,
        Importance::NotImportant,
    ];

    pub const fn points(self) -> u32 {
        match self {
            Importance::VeryImportant => 100,
            Importance::Important => 75,
            Importance::Normal => 50,
            Importance::ALittleImportant => 25,
            Importance::NotImportant => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Importance::VeryImportant => "Very Important",
            Importance::Important => "Important",
            Importance::Normal => "Normal",
            Importance::ALittleImportant => "A Little Important",
            Importance::NotImportant => "Not Important",
        }
    }

    /// The level worth exactly `points`, if any.
    pub fn from_points(points: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.points() == points)
    }
}

/// Column inclusion plus column and value weights.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub included_columns: Vec<String>,
    #[serde(default)]
    pub column_weights: BTreeMap<String, u32>,
    #[serde(default)]
    pub value_weights: BTreeMap<String, BTreeMap<String, u32>>,
}

impl ScoringConfig {
    pub fn total_weight(&self) -> u32 {
        self.included_columns
            .iter()
            .map(|c| self.column_weights.get(c).copied().unwrap_or(0))
            .sum()
    }

    /// Weights total 100 and at least one column is included.
    pub fn is_valid(&self) -> bool {
        !self.included_columns.is_empty() && self.total_weight() == TOTAL_WEIGHT
    }

    pub fn column_weight(&self, column: &str) -> u32 {
        self.column_weights.get(column).copied().unwrap_or(0)
    }

    /// Points for a raw value in a column; ungraded values are worth
    /// [`Importance::Normal`].
    pub fn value_points(&self, column: &str, value: &str) -> u32 {
        self.value_weights
            .get(column)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(Importance::Normal.points())
    }
}

/// A row score, held exactly in hundredths.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score {
    hundredths: u64,
}

impl Score {
    pub fn from_hundredths(hundredths: u64) -> Self {
        Score { hundredths }
    }

    pub fn hundredths(self) -> u64 {
        self.hundredths
    }

    pub fn value(self) -> f64 {
        self.hundredths as f64 / 100.0
    }
}

/// Shortest decimal form: `80`, `80.5`, `37.25`.
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.hundredths / 100;
        let frac = self.hundredths % 100;
        if frac == 0 {
            write!(f, "{}", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}", whole, frac)
        }
    }
}

/// One column's share of a row score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contribution {
    pub column: String,
    pub value: String,
    pub column_weight: u32,
    /// `None` for blank cells and columns missing from the table.
    pub points: Option<u32>,
    pub score: Score,
}

/// Editable scoring state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Replace the whole configuration (loading a saved preset).
    pub fn load(&mut self, config: ScoringConfig) {
        self.config = config;
    }

    pub fn reset(&mut self) {
        self.config = ScoringConfig::default();
    }

    pub fn included_columns(&self) -> &[String] {
        &self.config.included_columns
    }

    pub fn is_included(&self, column: &str) -> bool {
        self.config.included_columns.iter().any(|c| c == column)
    }

    /// Headers not yet included, without duplicates, in table order.
    pub fn available_columns(&self, headers: &[String]) -> Vec<String> {
        let mut seen = HashSet::new();
        headers
            .iter()
            .filter(|h| !self.is_included(h) && seen.insert(h.as_str()))
            .cloned()
            .collect()
    }

    pub fn total_weight(&self) -> u32 {
        self.config.total_weight()
    }

    pub fn is_valid(&self) -> bool {
        self.config.is_valid()
    }

    /// Include a column and share the weight equally again.
    pub fn include(&mut self, column: &str) {
        if self.is_included(column) {
            return;
        }
        self.config.included_columns.push(column.to_string());
        self.redistribute();
    }

    /// Drop a column together with its weights, then share the weight equally
    /// among the rest.
    pub fn exclude(&mut self, column: &str) {
        let before = self.config.included_columns.len();
        self.config.included_columns.retain(|c| c != column);
        if self.config.included_columns.len() == before {
            return;
        }
        self.config.column_weights.remove(column);
        self.config.value_weights.remove(column);
        self.redistribute();
    }

    /// Manually set a column weight (clamped to 100). The config may become
    /// invalid until the weights total 100 again.
    pub fn set_column_weight(&mut self, column: &str, weight: u32) -> Result<()> {
        self.require_included(column)?;
        self.config
            .column_weights
            .insert(column.to_string(), weight.min(MAX_WEIGHT));
        Ok(())
    }

    pub fn set_importance(&mut self, column: &str, value: &str, importance: Importance) -> Result<()> {
        self.require_included(column)?;
        self.config
            .value_weights
            .entry(column.to_string())
            .or_default()
            .insert(value.to_string(), importance.points());
        Ok(())
    }

    /// Forget a value's grade so it falls back to [`Importance::Normal`].
    pub fn clear_importance(&mut self, column: &str, value: &str) {
        if let Some(values) = self.config.value_weights.get_mut(column) {
            values.remove(value);
            if values.is_empty() {
                self.config.value_weights.remove(column);
            }
        }
    }

    /// Grade of a value, if its stored points match one of the levels.
    pub fn importance(&self, column: &str, value: &str) -> Option<Importance> {
        Importance::from_points(self.config.value_points(column, value))
    }

    pub fn score_row(&self, headers: &[String], row: &[String]) -> Score {
        let total = self
            .breakdown(headers, row)
            .iter()
            .map(|c| c.score.hundredths())
            .sum();
        Score::from_hundredths(total)
    }

    /// Per-column contributions to a row's score, in inclusion order.
    pub fn breakdown(&self, headers: &[String], row: &[String]) -> Vec<Contribution> {
        self.config
            .included_columns
            .iter()
            .map(|column| {
                let column_weight = self.config.column_weight(column);
                let value = headers
                    .iter()
                    .position(|h| h == column)
                    .and_then(|idx| row.get(idx))
                    .cloned()
                    .unwrap_or_default();
                let points = if value.trim().is_empty() {
                    None
                } else {
                    Some(self.config.value_points(column, &value))
                };
                let hundredths = u64::from(column_weight) * u64::from(points.unwrap_or(0));
                Contribution {
                    column: column.clone(),
                    value,
                    column_weight,
                    points,
                    score: Score::from_hundredths(hundredths),
                }
            })
            .collect()
    }

    pub fn score_grid(&self, grid: &Grid) -> Vec<Score> {
        grid.rows()
            .iter()
            .map(|row| self.score_row(grid.headers(), row))
            .collect()
    }

    /// Write every row's score into the `Lead Score` column.
    ///
    /// An existing column with that exact header keeps its position and has
    /// its values overwritten; otherwise a new column is appended.
    pub fn apply_to(&self, grid: &Grid) -> Result<Grid> {
        if !self.is_valid() {
            return Err(EngineError::InvalidWeight {
                total: self.total_weight(),
                included: self.config.included_columns.len(),
            });
        }
        let values = self
            .score_grid(grid)
            .into_iter()
            .map(|score| score.to_string())
            .collect();
        let existing = grid.column_index(LEAD_SCORE_COLUMN);
        log::info!(
            "Applying scores to {} row(s) ({})",
            grid.row_count(),
            if existing.is_some() { "overwrite" } else { "new column" }
        );
        Ok(grid.with_column_values(existing, LEAD_SCORE_COLUMN, values))
    }

    fn require_included(&self, column: &str) -> Result<()> {
        if self.is_included(column) {
            Ok(())
        } else {
            Err(EngineError::UnknownColumn(column.to_string()))
        }
    }

    /// Equal split with the remainder on the first included column.
    fn redistribute(&mut self) {
        self.config.column_weights = equal_weights(&self.config.included_columns);
    }
}

/// `floor(100 / n)` per column, with the remainder added to the first.
pub fn equal_weights(columns: &[String]) -> BTreeMap<String, u32> {
    let mut weights = BTreeMap::new();
    let n = columns.len() as u32;
    if n == 0 {
        return weights;
    }
    let share = TOTAL_WEIGHT / n;
    let remainder = TOTAL_WEIGHT - share * n;
    for (i, column) in columns.iter().enumerate() {
        let weight = if i == 0 { share + remainder } else { share };
        weights.insert(column.clone(), weight);
    }
    weights
}
