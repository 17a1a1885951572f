//! Core data models for the block maze.
//! Grid cells, compass directions, actions and the player state the executor advances.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const MIN_GRID_DIM: usize = 3;
pub const MAX_GRID_DIM: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, (dx, dy): (i32, i32)) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// Semantic category of one grid square. Serialized as its integer code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CellKind {
    Empty,
    Floor,
    Start,
    Goal,
    Wall,
}

impl CellKind {
    pub fn code(self) -> u8 {
        match self {
            CellKind::Empty => 0,
            CellKind::Floor => 1,
            CellKind::Start => 2,
            CellKind::Goal => 3,
            CellKind::Wall => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CellKind::Empty => "Empty",
            CellKind::Floor => "Floor",
            CellKind::Start => "Start",
            CellKind::Goal => "Goal",
            CellKind::Wall => "Wall",
        }
    }
}

impl TryFrom<u8> for CellKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(CellKind::Empty),
            1 => Ok(CellKind::Floor),
            2 => Ok(CellKind::Start),
            3 => Ok(CellKind::Goal),
            4 => Ok(CellKind::Wall),
            other => Err(format!("unknown cell code {other}")),
        }
    }
}

impl From<CellKind> for u8 {
    fn from(kind: CellKind) -> Self {
        kind.code()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveClass {
    Blocked,
    Goal,
    Ok,
}

/// Row-major cell grid; `y` indexes rows, `x` indexes columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<CellKind>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<CellKind>>) -> Self {
        Self { rows }
    }

    /// Builds a grid from raw cell codes. Unknown codes are rejected.
    pub fn from_codes(codes: &[&[u8]]) -> Result<Self, String> {
        let rows = codes
            .iter()
            .map(|row| row.iter().map(|&c| CellKind::try_from(c)).collect::<Result<Vec<_>, _>>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows })
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn cols(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn row_slices(&self) -> impl Iterator<Item = &[CellKind]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<CellKind> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    /// Out-of-bounds coordinates read as walls.
    pub fn lookup(&self, x: i32, y: i32) -> CellKind {
        self.cell(x, y).unwrap_or(CellKind::Wall)
    }

    pub fn classify_move(&self, x: i32, y: i32) -> MoveClass {
        match self.lookup(x, y) {
            CellKind::Wall | CellKind::Empty => MoveClass::Blocked,
            CellKind::Goal => MoveClass::Goal,
            CellKind::Floor | CellKind::Start => MoveClass::Ok,
        }
    }

    /// Dimensions clamp to [3, 50]; the overlap keeps its cells and new cells are walls.
    pub fn resize(&self, new_rows: usize, new_cols: usize) -> Grid {
        let new_rows = new_rows.clamp(MIN_GRID_DIM, MAX_GRID_DIM);
        let new_cols = new_cols.clamp(MIN_GRID_DIM, MAX_GRID_DIM);
        let rows = (0..new_rows)
            .map(|r| {
                (0..new_cols)
                    .map(|c| {
                        self.rows
                            .get(r)
                            .and_then(|row| row.get(c))
                            .copied()
                            .unwrap_or(CellKind::Wall)
                    })
                    .collect()
            })
            .collect();
        Grid { rows }
    }

    /// Returns a copy with one cell replaced. Placing a start clears any previous start to floor.
    pub fn paint(&self, x: i32, y: i32, kind: CellKind) -> Grid {
        let mut next = self.clone();
        if self.cell(x, y).is_none() {
            return next;
        }
        if kind == CellKind::Start {
            for row in next.rows.iter_mut() {
                for cell in row.iter_mut() {
                    if *cell == CellKind::Start {
                        *cell = CellKind::Floor;
                    }
                }
            }
        }
        next.rows[y as usize][x as usize] = kind;
        next
    }

    pub fn start_cell(&self) -> Option<Position> {
        self.positions_of(CellKind::Start).next()
    }

    pub fn count(&self, kind: CellKind) -> usize {
        self.positions_of(kind).count()
    }

    pub fn positions_of(&self, kind: CellKind) -> impl Iterator<Item = Position> + '_ {
        self.rows.iter().enumerate().flat_map(move |(y, row)| {
            row.iter()
                .enumerate()
                .filter(move |(_, c)| **c == kind)
                .map(move |(x, _)| Position::new(x as i32, y as i32))
        })
    }

    /// Number of moves from `from` to the nearest goal, walking only through non-blocked cells.
    pub fn shortest_path_len(&self, from: Position) -> Option<usize> {
        let rows = self.rows();
        let cols = self.cols();
        if self.cell(from.x, from.y).is_none() || cols == 0 {
            return None;
        }
        let idx = |p: Position| p.y as usize * cols + p.x as usize;
        let mut dist: Vec<Option<usize>> = vec![None; rows * cols];
        let mut q: VecDeque<Position> = VecDeque::new();
        dist[idx(from)] = Some(0);
        q.push_back(from);
        while let Some(p) = q.pop_front() {
            let d = dist[idx(p)].unwrap_or(0);
            if p != from && self.lookup(p.x, p.y) == CellKind::Goal {
                return Some(d);
            }
            for dir in Direction::ALL {
                let n = p.offset(dir.delta());
                if n.x < 0 || n.y < 0 || n.x as usize >= cols || n.y as usize >= rows {
                    continue;
                }
                if self.classify_move(n.x, n.y) == MoveClass::Blocked || dist[idx(n)].is_some() {
                    continue;
                }
                dist[idx(n)] = Some(d + 1);
                q.push_back(n);
            }
        }
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanTarget {
    Ahead,
    Left,
    Right,
    #[serde(rename = "SELF")]
    Itself,
}

/// Compass heading in rotation order East, South, West, North.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    East,
    South,
    West,
    North,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::East, Direction::South, Direction::West, Direction::North];

    pub fn normalize(d: i32) -> Direction {
        Self::ALL[d.rem_euclid(4) as usize]
    }

    pub fn index(self) -> i32 {
        match self {
            Direction::East => 0,
            Direction::South => 1,
            Direction::West => 2,
            Direction::North => 3,
        }
    }

    /// South increases the row, matching authored level grids.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
            Direction::North => (0, -1),
        }
    }

    pub fn rotate(self, side: Side) -> Direction {
        match side {
            Side::Left => Direction::normalize(self.index() - 1),
            Side::Right => Direction::normalize(self.index() + 1),
        }
    }

    /// Heading looked at by a scan, without turning.
    pub fn facing(self, target: ScanTarget) -> Direction {
        match target {
            ScanTarget::Left => self.rotate(Side::Left),
            ScanTarget::Right => self.rotate(Side::Right),
            ScanTarget::Ahead | ScanTarget::Itself => self,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
            Direction::North => "North",
        }
    }
}

/// One discrete instruction of a replayable program trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Move,
    Turn { side: Side },
    Scan { target: ScanTarget },
    /// Any tag the executor does not know. Ends the run with an error.
    #[serde(other)]
    Unrecognized,
}

impl Action {
    pub fn describe(&self) -> String {
        match self {
            Action::Move => "move forward".to_string(),
            Action::Turn { side: Side::Left } => "turn left".to_string(),
            Action::Turn { side: Side::Right } => "turn right".to_string(),
            Action::Scan { target } => format!("scan {}", scan_label(*target)),
            Action::Unrecognized => "unrecognized action".to_string(),
        }
    }
}

fn scan_label(target: ScanTarget) -> &'static str {
    match target {
        ScanTarget::Ahead => "ahead",
        ScanTarget::Left => "left",
        ScanTarget::Right => "right",
        ScanTarget::Itself => "self",
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Success,
    Failure,
    Error,
}

impl RunStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Success | RunStatus::Failure | RunStatus::Error)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Idle => "IDLE",
            RunStatus::Running => "RUNNING",
            RunStatus::Success => "SUCCESS",
            RunStatus::Failure => "FAILURE",
            RunStatus::Error => "ERROR",
        }
    }
}

/// Cell highlighted by the last scan. Presentation only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sensed {
    pub target: ScanTarget,
    pub position: Position,
    pub cell: CellKind,
    pub open: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerState {
    pub position: Position,
    pub direction: Direction,
    pub status: RunStatus,
    pub action_log: Vec<Action>,
    /// Index of the next action to play in `action_log`.
    pub step_index: usize,
    /// Successful moves so far.
    pub moves: u32,
    pub sensed: Option<Sensed>,
}

impl PlayerState {
    pub fn at(position: Position, direction: Direction) -> Self {
        Self { position, direction, ..Default::default() }
    }

    pub fn next_action(&self) -> Option<&Action> {
        self.action_log.get(self.step_index)
    }

    pub fn last_action(&self) -> Option<&Action> {
        self.step_index.checked_sub(1).and_then(|i| self.action_log.get(i))
    }
}
