//! Level wire format exchanged with the level store, plus run completion scoring
//! and exit-condition resolution.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{CellKind, Direction, Grid, PlayerState, Position, RunStatus};
use crate::plugins::maze::config::{DEFAULT_START_DIR, default_grid};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("level json is invalid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level grid has no cells")]
    EmptyGrid,
    #[error("level grid row {row} has {found} cells, expected {expected}")]
    RaggedGrid { row: usize, expected: usize, found: usize },
    #[error("level grid has {0} start cells")]
    MultipleStarts(usize),
    #[error("start position ({x}, {y}) is outside the grid")]
    StartOutOfBounds { x: i32, y: i32 },
    #[error("level {0} not found")]
    NotFound(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPos {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<i32>,
}

impl StartPos {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Missing headings default to South.
    pub fn direction(&self) -> Direction {
        Direction::normalize(self.dir.unwrap_or(DEFAULT_START_DIR))
    }
}

impl Default for StartPos {
    fn default() -> Self {
        Self { x: 1, y: 1, dir: Some(DEFAULT_START_DIR) }
    }
}

/// Plugin payload of a level. Fields this crate does not know are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(default)]
    pub start_pos: StartPos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_blocks: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LevelData {
    pub fn grid(&self) -> &Grid {
        self.grid.as_ref().unwrap_or_else(|| default_grid())
    }

    pub fn initial_player(&self) -> PlayerState {
        PlayerState::at(self.start_pos.position(), self.start_pos.direction())
    }

    /// Merges an editor update; fields absent from the patch are left alone.
    pub fn apply(&self, patch: LevelDataPatch) -> LevelData {
        let mut next = self.clone();
        if let Some(grid) = patch.grid {
            next.grid = Some(grid);
        }
        if let Some(start_pos) = patch.start_pos {
            next.start_pos = start_pos;
        }
        if let Some(start_blocks) = patch.start_blocks {
            next.start_blocks = Some(start_blocks);
        }
        next
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        let grid = self.grid();
        let cols = grid.cols();
        if grid.rows() == 0 || cols == 0 {
            return Err(LevelError::EmptyGrid);
        }
        if let Some((row, r)) = grid.row_slices().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(LevelError::RaggedGrid { row, expected: cols, found: r.len() });
        }
        let starts = grid.count(CellKind::Start);
        if starts > 1 {
            return Err(LevelError::MultipleStarts(starts));
        }
        let StartPos { x, y, .. } = self.start_pos;
        if grid.cell(x, y).is_none() {
            return Err(LevelError::StartOutOfBounds { x, y });
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LevelDataPatch {
    pub grid: Option<Grid>,
    pub start_pos: Option<StartPos>,
    pub start_blocks: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKey {
    Score,
    TimeMs,
    Moves,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Comparison {
    LessThan,
    GreaterThan,
    Equals,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsCondition {
    pub metric_key: MetricKey,
    pub operator: Comparison,
    pub value: f64,
}

impl MetricsCondition {
    pub fn holds(&self, metrics: &PluginMetrics) -> bool {
        let actual = metrics.get(self.metric_key);
        match self.operator {
            Comparison::LessThan => actual < self.value,
            Comparison::GreaterThan => actual > self.value,
            Comparison::Equals => actual == self.value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitCondition {
    pub result_outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stars: Option<u8>,
    pub next_level_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_condition: Option<MetricsCondition>,
}

impl ExitCondition {
    pub fn matches(&self, result: &LevelCompletionResult) -> bool {
        self.result_outcome == result.outcome
            && self.min_stars.is_none_or(|min| result.stars >= min)
            && self
                .metrics_condition
                .as_ref()
                .is_none_or(|c| c.holds(&result.metrics))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: String,
    pub plugin_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub level_data: LevelData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_blocks: Option<u32>,
    #[serde(default)]
    pub exit_conditions: Vec<ExitCondition>,
}

impl Level {
    pub fn from_json(raw: &str) -> Result<Level, LevelError> {
        let level: Level = serde_json::from_str(raw)?;
        level.level_data.validate()?;
        Ok(level)
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// First exit condition satisfied by the result, in authored order.
    pub fn next_level_id(&self, result: &LevelCompletionResult) -> Option<&str> {
        self.exit_conditions
            .iter()
            .find(|c| c.matches(result))
            .map(|c| c.next_level_id.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginMetrics {
    pub score: u32,
    pub time_ms: u64,
    pub moves: u32,
}

impl PluginMetrics {
    pub fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::Score => self.score as f64,
            MetricKey::TimeMs => self.time_ms as f64,
            MetricKey::Moves => self.moves as f64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelCompletionResult {
    pub outcome: Outcome,
    pub stars: u8,
    pub metrics: PluginMetrics,
}

impl LevelCompletionResult {
    /// Scores a finished run. Errors and unfinished runs have no result.
    pub fn from_run(
        level: &Level,
        player: &PlayerState,
        blocks_used: u32,
        tick_ms: u32,
    ) -> Option<LevelCompletionResult> {
        let time_ms = player.step_index as u64 * tick_ms as u64;
        let (outcome, stars) = match player.status {
            RunStatus::Success => {
                let data = &level.level_data;
                let mut stars = 2;
                if level.max_blocks.is_none_or(|max| blocks_used <= max) {
                    stars += 1;
                }
                if data.grid().shortest_path_len(data.start_pos.position()) == Some(player.moves as usize) {
                    stars += 1;
                }
                (Outcome::Win, stars)
            }
            RunStatus::Failure => (Outcome::Lose, 1),
            RunStatus::Idle | RunStatus::Running | RunStatus::Error => return None,
        };
        let score = if outcome == Outcome::Win { 100 * stars as u32 } else { 0 };
        Some(LevelCompletionResult {
            outcome,
            stars,
            metrics: PluginMetrics { score, time_ms, moves: player.moves },
        })
    }
}
