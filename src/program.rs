//! Block programs and their compilation to a flat action trace.
//!
//! The run loop only replays finished traces. Loops and path checks are resolved
//! here by dry-running the executor while the trace is generated, so the replay
//! reproduces the dry run exactly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level::Level;
use crate::model::{Action, PlayerState, ScanTarget, Side};
use crate::plugins::maze::logic::{execute_step, is_path};

/// Upper bound on generated trace length; keeps unbounded loops finite.
pub const MAX_TRACE_LEN: usize = 500;

/// Upper bound on blocks visited during one dry run, emitting or not.
pub const MAX_BLOCK_VISITS: usize = 100_000;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("program text is invalid: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("program is empty")]
    EmptyProgram,
    #[error("program uses {used} blocks, the level allows {max}")]
    TooManyBlocks { used: u32, max: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PathDirection {
    Ahead,
    Left,
    Right,
}

impl PathDirection {
    fn scan_target(self) -> ScanTarget {
        match self {
            PathDirection::Ahead => ScanTarget::Ahead,
            PathDirection::Left => ScanTarget::Left,
            PathDirection::Right => ScanTarget::Right,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Block {
    MoveForward,
    Turn { side: Side },
    Scan { target: ScanTarget },
    Repeat { times: u32, body: Vec<Block> },
    IfPath { direction: PathDirection, body: Vec<Block> },
    RepeatUntilGoal { body: Vec<Block> },
}

impl Block {
    pub fn count(&self) -> u32 {
        match self {
            Block::MoveForward | Block::Turn { .. } | Block::Scan { .. } => 1,
            Block::Repeat { body, .. } | Block::IfPath { body, .. } | Block::RepeatUntilGoal { body } => {
                1 + count_blocks(body)
            }
        }
    }
}

fn count_blocks(blocks: &[Block]) -> u32 {
    blocks.iter().map(Block::count).sum()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub blocks: Vec<Block>,
}

impl Program {
    pub fn block_count(&self) -> u32 {
        count_blocks(&self.blocks)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompiledProgram {
    pub actions: Vec<Action>,
    pub blocks_used: u32,
    /// Generation hit `MAX_TRACE_LEN` before the dry run finished.
    pub truncated: bool,
}

/// What the program panel hands over: a block program or a ready-made trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgramSource {
    Blocks(Program),
    Trace(Vec<Action>),
}

impl ProgramSource {
    /// JSON arrays are traces; JSON objects are block programs.
    pub fn parse(text: &str) -> Result<ProgramSource, CompileError> {
        if text.trim_start().starts_with('[') {
            Ok(ProgramSource::Trace(serde_json::from_str(text)?))
        } else {
            Ok(ProgramSource::Blocks(serde_json::from_str(text)?))
        }
    }

    pub fn compile(&self, level: &Level) -> Result<CompiledProgram, CompileError> {
        match self {
            ProgramSource::Blocks(program) => compile(program, level),
            ProgramSource::Trace(actions) => {
                if actions.is_empty() {
                    return Err(CompileError::EmptyProgram);
                }
                let used = actions.len() as u32;
                if let Some(max) = level.max_blocks {
                    if used > max {
                        return Err(CompileError::TooManyBlocks { used, max });
                    }
                }
                Ok(CompiledProgram { actions: actions.clone(), blocks_used: used, truncated: false })
            }
        }
    }
}

struct Tracer<'a> {
    level: &'a Level,
    state: PlayerState,
    actions: Vec<Action>,
    visits: usize,
    truncated: bool,
}

impl Tracer<'_> {
    fn done(&self) -> bool {
        self.truncated || self.state.status.is_terminal()
    }

    fn emit(&mut self, action: Action) {
        if self.done() {
            return;
        }
        if self.actions.len() >= MAX_TRACE_LEN {
            self.truncated = true;
            return;
        }
        self.state = execute_step(&self.state, &action, &self.level.level_data);
        self.actions.push(action);
    }

    fn run(&mut self, blocks: &[Block]) {
        for block in blocks {
            if self.done() {
                return;
            }
            self.visits += 1;
            if self.visits > MAX_BLOCK_VISITS {
                self.truncated = true;
                return;
            }
            match block {
                Block::MoveForward => self.emit(Action::Move),
                Block::Turn { side } => self.emit(Action::Turn { side: *side }),
                Block::Scan { target } => self.emit(Action::Scan { target: *target }),
                Block::Repeat { times, body } => {
                    // An iteration that emits nothing leaves the state unchanged, so all later ones would too.
                    for _ in 0..*times {
                        if self.done() {
                            break;
                        }
                        let before = self.actions.len();
                        self.run(body);
                        if self.actions.len() == before {
                            break;
                        }
                    }
                }
                Block::IfPath { direction, body } => {
                    if is_path(self.level.level_data.grid(), &self.state, direction.scan_target()) {
                        self.run(body);
                    }
                }
                Block::RepeatUntilGoal { body } => {
                    while !self.done() {
                        let before = self.actions.len();
                        self.run(body);
                        if self.actions.len() == before {
                            break;
                        }
                    }
                }
            }
        }
    }
}

/// Flattens a block program into the trace the run loop replays.
pub fn compile(program: &Program, level: &Level) -> Result<CompiledProgram, CompileError> {
    let used = program.block_count();
    if used == 0 {
        return Err(CompileError::EmptyProgram);
    }
    if let Some(max) = level.max_blocks {
        if used > max {
            return Err(CompileError::TooManyBlocks { used, max });
        }
    }
    let mut tracer = Tracer {
        level,
        state: level.level_data.initial_player(),
        actions: Vec::new(),
        visits: 0,
        truncated: false,
    };
    tracer.run(&program.blocks);
    Ok(CompiledProgram { actions: tracer.actions, blocks_used: used, truncated: tracer.truncated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelData, StartPos};
    use crate::model::{Grid, RunStatus};

    fn level(codes: &[&[u8]], start: (i32, i32, i32), max_blocks: Option<u32>) -> Level {
        Level {
            id: "t".into(),
            plugin_id: "MAZE".into(),
            name: "t".into(),
            description: String::new(),
            level_data: LevelData {
                grid: Some(Grid::from_codes(codes).unwrap()),
                start_pos: StartPos { x: start.0, y: start.1, dir: Some(start.2) },
                ..Default::default()
            },
            max_blocks,
            exit_conditions: Vec::new(),
        }
    }

    fn final_state(level: &Level, actions: &[Action]) -> PlayerState {
        actions.iter().fold(level.level_data.initial_player(), |s, a| {
            execute_step(&s, a, &level.level_data)
        })
    }

    const SNAKE: &[&[u8]] = &[
        &[4, 4, 4, 4, 4],
        &[4, 2, 1, 1, 4],
        &[4, 4, 4, 1, 4],
        &[4, 3, 1, 1, 4],
        &[4, 4, 4, 4, 4],
    ];

    #[test]
    fn repeat_unrolls() {
        let lvl = level(&[&[4, 4, 4, 4, 4], &[4, 2, 1, 3, 4], &[4, 4, 4, 4, 4]], (1, 1, 0), None);
        let program = Program { blocks: vec![Block::Repeat { times: 2, body: vec![Block::MoveForward] }] };
        let compiled = compile(&program, &lvl).unwrap();
        assert_eq!(compiled.actions, vec![Action::Move, Action::Move]);
        assert_eq!(compiled.blocks_used, 2);
        assert!(!compiled.truncated);
    }

    #[test]
    fn wall_follower_solves_the_snake() {
        let lvl = level(SNAKE, (1, 1, 0), None);
        let program = Program {
            blocks: vec![Block::RepeatUntilGoal {
                body: vec![
                    Block::IfPath { direction: PathDirection::Ahead, body: vec![Block::MoveForward] },
                    Block::IfPath { direction: PathDirection::Right, body: vec![Block::Turn { side: Side::Right }] },
                ],
            }],
        };
        let compiled = compile(&program, &lvl).unwrap();
        assert_eq!(final_state(&lvl, &compiled.actions).status, RunStatus::Success);
        assert!(!compiled.truncated);
    }

    #[test]
    fn trace_stops_at_first_terminal_action() {
        let lvl = level(SNAKE, (1, 1, 3), None);
        let program = Program { blocks: vec![Block::MoveForward, Block::MoveForward] };
        let compiled = compile(&program, &lvl).unwrap();
        assert_eq!(compiled.actions, vec![Action::Move]);
        assert_eq!(final_state(&lvl, &compiled.actions).status, RunStatus::Failure);
    }

    #[test]
    fn spinning_forever_is_truncated() {
        let lvl = level(SNAKE, (1, 1, 0), None);
        let program = Program {
            blocks: vec![Block::RepeatUntilGoal { body: vec![Block::Turn { side: Side::Left }] }],
        };
        let compiled = compile(&program, &lvl).unwrap();
        assert!(compiled.truncated);
        assert_eq!(compiled.actions.len(), MAX_TRACE_LEN);
    }

    #[test]
    fn loop_without_progress_ends() {
        let lvl = level(SNAKE, (1, 1, 3), None);
        let program = Program {
            blocks: vec![Block::RepeatUntilGoal {
                body: vec![Block::IfPath { direction: PathDirection::Ahead, body: vec![Block::MoveForward] }],
            }],
        };
        let compiled = compile(&program, &lvl).unwrap();
        assert!(compiled.actions.is_empty());
        assert!(!compiled.truncated);
    }

    #[test]
    fn nested_repeats_with_nothing_to_do_finish_quickly() {
        let lvl = level(SNAKE, (1, 1, 3), None);
        let src = ProgramSource::parse(
            r#"{"blocks":[{"type":"REPEAT","times":4000000000,"body":[{"type":"REPEAT","times":4000000000,"body":[{"type":"IF_PATH","direction":"AHEAD","body":[]}]}]}]}"#,
        )
        .unwrap();
        let compiled = src.compile(&lvl).unwrap();
        assert!(compiled.actions.is_empty());
        assert_eq!(compiled.blocks_used, 3);
    }

    #[test]
    fn repeat_stops_once_its_path_check_fails() {
        let lvl = level(SNAKE, (1, 1, 0), None);
        let program = Program {
            blocks: vec![Block::Repeat {
                times: 1_000_000,
                body: vec![Block::IfPath { direction: PathDirection::Ahead, body: vec![Block::MoveForward] }],
            }],
        };
        let compiled = compile(&program, &lvl).unwrap();
        assert_eq!(compiled.actions, vec![Action::Move, Action::Move]);
        assert!(!compiled.truncated);
    }

    #[test]
    fn traces_respect_the_block_cap() {
        let lvl = level(SNAKE, (1, 1, 0), Some(5));
        let trace = ProgramSource::Trace(vec![Action::Turn { side: Side::Left }; 40]);
        assert!(matches!(trace.compile(&lvl), Err(CompileError::TooManyBlocks { used: 40, max: 5 })));
        let short = ProgramSource::Trace(vec![Action::Move; 5]);
        assert_eq!(short.compile(&lvl).unwrap().blocks_used, 5);
    }

    #[test]
    fn block_cap_is_enforced() {
        let lvl = level(SNAKE, (1, 1, 0), Some(2));
        let program = Program {
            blocks: vec![Block::Repeat { times: 2, body: vec![Block::MoveForward, Block::MoveForward] }],
        };
        assert!(matches!(compile(&program, &lvl), Err(CompileError::TooManyBlocks { used: 3, max: 2 })));
        assert!(matches!(compile(&Program::default(), &lvl), Err(CompileError::EmptyProgram)));
    }

    #[test]
    fn parses_programs_and_traces() {
        let lvl = level(SNAKE, (1, 1, 0), None);
        let blocks = ProgramSource::parse(
            r#"{"blocks":[{"type":"REPEAT","times":2,"body":[{"type":"MOVE_FORWARD"}]},{"type":"TURN","side":"RIGHT"}]}"#,
        )
        .unwrap();
        assert_eq!(
            blocks.compile(&lvl).unwrap().actions,
            vec![Action::Move, Action::Move, Action::Turn { side: Side::Right }]
        );

        let trace = ProgramSource::parse(r#"[{"type":"MOVE"},{"type":"WARP"}]"#).unwrap();
        assert_eq!(trace, ProgramSource::Trace(vec![Action::Move, Action::Unrecognized]));
        assert!(matches!(ProgramSource::parse("{not json"), Err(CompileError::Parse(_))));
        assert!(matches!(ProgramSource::Trace(vec![]).compile(&lvl), Err(CompileError::EmptyProgram)));
    }
}
