//! Maze executor: advances the player by exactly one action.

use crate::level::LevelData;
use crate::model::{Action, Grid, MoveClass, PlayerState, RunStatus, ScanTarget, Sensed};

/// Pure transition. The caller must not feed actions to a finished run.
pub fn execute_step(state: &PlayerState, action: &Action, level: &LevelData) -> PlayerState {
    let grid = level.grid();
    let mut next = state.clone();
    next.step_index += 1;
    next.sensed = None;
    if next.status == RunStatus::Idle {
        next.status = RunStatus::Running;
    }
    match action {
        Action::Move => {
            let target = next.position.offset(next.direction.delta());
            match grid.classify_move(target.x, target.y) {
                MoveClass::Blocked => next.status = RunStatus::Failure,
                MoveClass::Goal => {
                    next.position = target;
                    next.moves += 1;
                    next.status = RunStatus::Success;
                }
                MoveClass::Ok => {
                    next.position = target;
                    next.moves += 1;
                }
            }
        }
        Action::Turn { side } => {
            next.direction = next.direction.rotate(*side);
        }
        Action::Scan { target } => {
            next.sensed = Some(sense(grid, &next, *target));
        }
        Action::Unrecognized => {
            next.status = RunStatus::Error;
        }
    }
    next
}

/// Cell a scan looks at, relative to the player's heading.
pub fn sense(grid: &Grid, state: &PlayerState, target: ScanTarget) -> Sensed {
    let position = match target {
        ScanTarget::Itself => state.position,
        other => state.position.offset(state.direction.facing(other).delta()),
    };
    Sensed {
        target,
        position,
        cell: grid.lookup(position.x, position.y),
        open: grid.classify_move(position.x, position.y) != MoveClass::Blocked,
    }
}

/// Whether a move in the scanned direction would not be blocked.
pub fn is_path(grid: &Grid, state: &PlayerState, target: ScanTarget) -> bool {
    sense(grid, state, target).open
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::StartPos;
    use crate::model::{CellKind, Direction, Position, Side};

    fn level(dir: i32) -> LevelData {
        LevelData {
            grid: Some(Grid::from_codes(&[&[4, 4, 4], &[4, 1, 3], &[4, 4, 4]]).unwrap()),
            start_pos: StartPos { x: 1, y: 1, dir: Some(dir) },
            ..Default::default()
        }
    }

    fn replay(level: &LevelData, actions: &[Action]) -> Vec<PlayerState> {
        let mut state = level.initial_player();
        state.action_log = actions.to_vec();
        let mut trail = vec![state.clone()];
        for action in actions {
            if state.status.is_terminal() {
                break;
            }
            state = execute_step(&state, action, level);
            trail.push(state.clone());
        }
        trail
    }

    #[test]
    fn move_east_into_goal_succeeds() {
        let data = level(0);
        let end = execute_step(&data.initial_player(), &Action::Move, &data);
        assert_eq!(end.status, RunStatus::Success);
        assert_eq!(end.position, Position::new(2, 1));
        assert_eq!(end.moves, 1);
    }

    #[test]
    fn move_north_into_wall_fails_in_place() {
        let data = level(3);
        let end = execute_step(&data.initial_player(), &Action::Move, &data);
        assert_eq!(end.status, RunStatus::Failure);
        assert_eq!(end.position, Position::new(1, 1));
        assert_eq!(end.direction, Direction::North);
        assert_eq!(end.moves, 0);
    }

    #[test]
    fn moving_onto_empty_cell_fails() {
        let mut data = level(1);
        data.grid = Some(data.grid().paint(1, 2, CellKind::Empty));
        let end = execute_step(&data.initial_player(), &Action::Move, &data);
        assert_eq!(end.status, RunStatus::Failure);
        assert_eq!(end.position, Position::new(1, 1));
    }

    #[test]
    fn move_onto_floor_keeps_running() {
        let mut data = level(2);
        data.grid = Some(data.grid().paint(0, 1, CellKind::Floor));
        let end = execute_step(&data.initial_player(), &Action::Move, &data);
        assert_eq!(end.status, RunStatus::Running);
        assert_eq!(end.position, Position::new(0, 1));
    }

    #[test]
    fn turn_right_from_east_faces_south() {
        let data = level(0);
        let end = execute_step(&data.initial_player(), &Action::Turn { side: Side::Right }, &data);
        assert_eq!(end.direction, Direction::South);
        assert_eq!(end.position, Position::new(1, 1));
        assert_eq!(end.status, RunStatus::Running);
        assert_eq!(end.step_index, 1);
    }

    #[test]
    fn turn_left_wraps_to_north() {
        let data = level(0);
        let end = execute_step(&data.initial_player(), &Action::Turn { side: Side::Left }, &data);
        assert_eq!(end.direction, Direction::North);
    }

    #[test]
    fn scan_reports_target_without_moving() {
        let data = level(1);
        let start = data.initial_player();
        let left = execute_step(&start, &Action::Scan { target: ScanTarget::Left }, &data);
        // facing south, left is east
        let sensed = left.sensed.unwrap();
        assert_eq!(sensed.position, Position::new(2, 1));
        assert_eq!(sensed.cell, CellKind::Goal);
        assert!(sensed.open);
        assert_eq!(left.position, start.position);
        assert_eq!(left.direction, start.direction);
        assert_eq!(left.status, RunStatus::Running);

        let me = execute_step(&start, &Action::Scan { target: ScanTarget::Itself }, &data);
        assert_eq!(me.sensed.unwrap().position, Position::new(1, 1));
        let ahead = execute_step(&start, &Action::Scan { target: ScanTarget::Ahead }, &data);
        assert!(!ahead.sensed.unwrap().open);
        // facing south, right is west
        let right = execute_step(&start, &Action::Scan { target: ScanTarget::Right }, &data);
        let sensed = right.sensed.unwrap();
        assert_eq!(sensed.position, Position::new(0, 1));
        assert_eq!(sensed.cell, CellKind::Wall);
        assert!(!sensed.open);
        assert_eq!(right.position, start.position);
    }

    #[test]
    fn scan_highlight_clears_on_next_action() {
        let data = level(0);
        let scanned = execute_step(&data.initial_player(), &Action::Scan { target: ScanTarget::Ahead }, &data);
        let turned = execute_step(&scanned, &Action::Turn { side: Side::Left }, &data);
        assert!(turned.sensed.is_none());
    }

    #[test]
    fn unrecognized_action_is_a_terminal_error() {
        let data = level(0);
        let end = execute_step(&data.initial_player(), &Action::Unrecognized, &data);
        assert_eq!(end.status, RunStatus::Error);
        assert_eq!(end.position, Position::new(1, 1));
        assert_eq!(end.step_index, 1);
    }

    #[test]
    fn missing_grid_uses_default() {
        let data = LevelData { start_pos: StartPos { x: 5, y: 1, dir: Some(0) }, ..Default::default() };
        let end = execute_step(&data.initial_player(), &Action::Move, &data);
        assert_eq!(end.status, RunStatus::Success);
        assert_eq!(end.position, Position::new(6, 1));
    }

    #[test]
    fn replay_is_deterministic() {
        let mut data = level(2);
        data.grid = Some(
            Grid::from_codes(&[&[4, 4, 4, 4], &[1, 1, 1, 4], &[4, 1, 3, 4], &[4, 4, 4, 4]]).unwrap(),
        );
        let program = [
            Action::Scan { target: ScanTarget::Ahead },
            Action::Turn { side: Side::Left },
            Action::Move,
            Action::Turn { side: Side::Left },
            Action::Move,
        ];
        let first = replay(&data, &program);
        let second = replay(&data, &program);
        assert_eq!(first, second);
        let last = first.last().unwrap();
        assert_eq!(last.status, RunStatus::Success);
        assert_eq!(last.position, Position::new(2, 2));
    }
}
