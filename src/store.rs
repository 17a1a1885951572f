//! Level catalogue. Builtin levels stand in for a backend; the browser store
//! overlays levels saved from the editor in localStorage.

use thiserror::Error;

use crate::level::{
    Comparison, ExitCondition, Level, LevelData, LevelError, MetricKey, MetricsCondition, Outcome,
    StartPos,
};
use crate::model::Grid;
use crate::plugins::maze::MAZE_PLUGIN_ID;
use crate::plugins::maze::config::default_grid;
use crate::util::{clog, cwarn, local_storage};

const LEVEL_KEY_PREFIX: &str = "bm_level_";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("browser storage is unavailable")]
    Unavailable,
    #[error("storage write failed for {0}")]
    Write(String),
    #[error(transparent)]
    Level(#[from] LevelError),
}

pub trait LevelStore {
    fn get(&self, id: &str) -> Result<Level, LevelError>;
    fn list(&self) -> Vec<Level>;
}

pub struct BuiltinLevels {
    levels: Vec<Level>,
}

impl Default for BuiltinLevels {
    fn default() -> Self {
        Self { levels: builtin_levels() }
    }
}

impl LevelStore for BuiltinLevels {
    fn get(&self, id: &str) -> Result<Level, LevelError> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or_else(|| LevelError::NotFound(id.to_string()))
    }

    fn list(&self) -> Vec<Level> {
        self.levels.clone()
    }
}

/// Builtin catalogue with editor saves layered on top.
#[derive(Default)]
pub struct BrowserLevelStore {
    builtin: BuiltinLevels,
}

impl BrowserLevelStore {
    fn saved(&self, id: &str) -> Option<Level> {
        let raw = local_storage()?.get_item(&format!("{LEVEL_KEY_PREFIX}{id}")).ok().flatten()?;
        match Level::from_json(&raw) {
            Ok(level) => Some(level),
            Err(e) => {
                cwarn(&format!("saved level {id} ignored: {e}"));
                None
            }
        }
    }

    fn saved_ids(&self) -> Vec<String> {
        let Some(store) = local_storage() else { return Vec::new() };
        let len = store.length().unwrap_or(0);
        let mut ids: Vec<String> = (0..len)
            .filter_map(|i| store.key(i).ok().flatten())
            .filter_map(|k| k.strip_prefix(LEVEL_KEY_PREFIX).map(str::to_string))
            .collect();
        ids.sort();
        ids
    }

    /// Drops every editor save; returns how many were removed.
    pub fn clear_saved(&self) -> usize {
        let Some(store) = local_storage() else { return 0 };
        let ids = self.saved_ids();
        let removed = remove_each(&ids, |id| store.remove_item(&format!("{LEVEL_KEY_PREFIX}{id}")));
        if removed < ids.len() {
            cwarn(&format!("{} saved levels could not be removed", ids.len() - removed));
        }
        clog(&format!("removed {removed} saved levels"));
        removed
    }

    pub fn save(&self, level: &Level) -> Result<(), StoreError> {
        level.level_data.validate()?;
        let raw = level.to_json()?;
        let store = local_storage().ok_or(StoreError::Unavailable)?;
        store
            .set_item(&format!("{LEVEL_KEY_PREFIX}{}", level.id), &raw)
            .map_err(|_| StoreError::Write(level.id.clone()))?;
        clog(&format!("saved level {}", level.id));
        Ok(())
    }
}

impl LevelStore for BrowserLevelStore {
    fn get(&self, id: &str) -> Result<Level, LevelError> {
        match self.saved(id) {
            Some(level) => Ok(level),
            None => self.builtin.get(id),
        }
    }

    fn list(&self) -> Vec<Level> {
        let mut levels: Vec<Level> = self
            .builtin
            .list()
            .into_iter()
            .map(|l| self.saved(&l.id).unwrap_or(l))
            .collect();
        for id in self.saved_ids() {
            if levels.iter().all(|l| l.id != id) {
                if let Some(level) = self.saved(&id) {
                    levels.push(level);
                }
            }
        }
        levels
    }
}

/// Runs `remove` for every id and counts the ones that succeeded.
fn remove_each<E>(ids: &[String], mut remove: impl FnMut(&str) -> Result<(), E>) -> usize {
    ids.iter().filter(|id| remove(id.as_str()).is_ok()).count()
}

fn maze_level(
    id: &str,
    name: &str,
    description: &str,
    grid: Grid,
    start_pos: StartPos,
    max_blocks: Option<u32>,
    exit_conditions: Vec<ExitCondition>,
) -> Level {
    Level {
        id: id.to_string(),
        plugin_id: MAZE_PLUGIN_ID.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        level_data: LevelData {
            grid: Some(grid),
            start_pos,
            start_blocks: Some(r#"{"blocks":[{"type":"MOVE_FORWARD"}]}"#.to_string()),
            ..Default::default()
        },
        max_blocks,
        exit_conditions,
    }
}

fn on_win(next: &str) -> ExitCondition {
    ExitCondition {
        result_outcome: Outcome::Win,
        min_stars: None,
        next_level_id: next.to_string(),
        metrics_condition: None,
    }
}

fn codes(rows: &[&[u8]]) -> Grid {
    Grid::from_codes(rows).unwrap_or_else(|_| default_grid().clone())
}

pub fn builtin_levels() -> Vec<Level> {
    vec![
        maze_level(
            "lvl_a1",
            "My First Maze",
            "Use the move and turn blocks to reach the flag 🏁.",
            default_grid().clone(),
            StartPos { x: 1, y: 1, dir: Some(1) },
            Some(5),
            vec![on_win("lvl_a2")],
        ),
        maze_level(
            "lvl_a2",
            "Around the Corner",
            "The path bends. Turn at the right moment.",
            codes(&[
                &[4, 4, 4, 4, 4, 4],
                &[4, 2, 1, 1, 4, 4],
                &[4, 4, 4, 1, 4, 4],
                &[4, 4, 4, 1, 1, 4],
                &[4, 4, 4, 4, 3, 4],
                &[4, 4, 4, 4, 4, 4],
            ]),
            StartPos { x: 1, y: 1, dir: Some(0) },
            Some(8),
            vec![
                ExitCondition {
                    result_outcome: Outcome::Win,
                    min_stars: Some(4),
                    next_level_id: "lvl_a3".to_string(),
                    metrics_condition: None,
                },
                ExitCondition {
                    result_outcome: Outcome::Win,
                    min_stars: None,
                    next_level_id: "lvl_a3".to_string(),
                    metrics_condition: Some(MetricsCondition {
                        metric_key: MetricKey::Moves,
                        operator: Comparison::LessThan,
                        value: 10.0,
                    }),
                },
            ],
        ),
        maze_level(
            "lvl_a3",
            "Follow the Wall",
            "Too long to spell out. Loop until the goal and check for a path.",
            codes(&[
                &[4, 4, 4, 4, 4, 4, 4],
                &[4, 2, 1, 1, 1, 1, 4],
                &[4, 4, 4, 4, 4, 1, 4],
                &[4, 1, 1, 1, 1, 1, 4],
                &[4, 1, 4, 4, 4, 4, 4],
                &[4, 1, 1, 1, 1, 3, 4],
                &[4, 4, 4, 4, 4, 4, 4],
            ]),
            StartPos { x: 1, y: 1, dir: Some(0) },
            Some(8),
            Vec::new(),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RunStatus, Side};
    use crate::plugins::maze::logic::execute_step;
    use crate::program::{Block, PathDirection, Program, compile};

    #[test]
    fn builtin_levels_validate() {
        for level in builtin_levels() {
            assert!(level.level_data.validate().is_ok(), "{} invalid", level.id);
            assert_eq!(level.plugin_id, MAZE_PLUGIN_ID);
        }
    }

    #[test]
    fn failed_removals_are_not_counted() {
        let ids: Vec<String> = ["lvl_a1", "lvl_x", "lvl_y"].iter().map(|s| s.to_string()).collect();
        let mut seen = Vec::new();
        let removed = remove_each(&ids, |id| {
            seen.push(id.to_string());
            if id == "lvl_x" { Err(()) } else { Ok(()) }
        });
        assert_eq!(removed, 2);
        assert_eq!(seen, ids);
    }

    #[test]
    fn lookup_by_id() {
        let store = BuiltinLevels::default();
        assert_eq!(store.get("lvl_a2").unwrap().name, "Around the Corner");
        assert!(matches!(store.get("nope"), Err(LevelError::NotFound(_))));
        assert_eq!(store.list().len(), 3);
    }

    #[test]
    fn exit_conditions_point_at_known_levels() {
        let store = BuiltinLevels::default();
        for level in store.list() {
            for cond in &level.exit_conditions {
                assert!(store.get(&cond.next_level_id).is_ok());
            }
        }
    }

    #[test]
    fn corridor_follower_fits_the_last_level() {
        let level = BuiltinLevels::default().get("lvl_a3").unwrap();
        let program = Program {
            blocks: vec![Block::RepeatUntilGoal {
                body: vec![
                    Block::IfPath { direction: PathDirection::Ahead, body: vec![Block::MoveForward] },
                    Block::IfPath { direction: PathDirection::Right, body: vec![Block::Turn { side: Side::Right }] },
                    Block::IfPath { direction: PathDirection::Left, body: vec![Block::Turn { side: Side::Left }] },
                ],
            }],
        };
        let compiled = compile(&program, &level).unwrap();
        assert_eq!(compiled.blocks_used, 7);
        let end = compiled
            .actions
            .iter()
            .fold(level.level_data.initial_player(), |s, a| execute_step(&s, a, &level.level_data));
        assert_eq!(end.status, RunStatus::Success);
    }
}
