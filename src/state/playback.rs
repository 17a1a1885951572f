//! Run loop: replays an action trace one tick at a time against the level snapshot.

use std::rc::Rc;

use yew::Reducible;

use crate::level::LevelData;
use crate::model::{Action, PlayerState, RunStatus};
use crate::plugins::maze::logic::execute_step;
use crate::util::{clog, cwarn};

#[derive(Clone, Debug, PartialEq)]
pub struct Playback {
    /// Grid snapshot for the current session; editor changes land on the next `LoadLevel`.
    pub level: Rc<LevelData>,
    pub player: PlayerState,
    pub paused: bool,
    /// Identifies the tick schedule of the current run. Ticks from older schedules are dropped.
    pub generation: u32,
}

#[derive(Clone, Debug)]
pub enum PlaybackAction {
    LoadLevel(Rc<LevelData>),
    Start(Vec<Action>),
    Pause,
    Resume,
    TogglePause,
    /// Advance one action while paused.
    Step,
    Reset,
    /// The program is being replaced; pending ticks must not touch the new state.
    ProgramChanged,
    Tick { generation: u32 },
}

impl Playback {
    pub fn new(level: Rc<LevelData>) -> Self {
        let player = level.initial_player();
        Self { level, player, paused: false, generation: 0 }
    }

    /// Whether the UI should keep a tick interval alive.
    pub fn is_ticking(&self) -> bool {
        self.player.status == RunStatus::Running && !self.paused
    }

    fn reset(&mut self) {
        self.player = self.level.initial_player();
        self.paused = false;
        self.generation = self.generation.wrapping_add(1);
    }

    fn advance(&mut self) {
        if self.player.status != RunStatus::Running {
            return;
        }
        let Some(action) = self.player.next_action().cloned() else {
            clog(&format!("program ended after {} actions without reaching the goal", self.player.step_index));
            self.player.status = RunStatus::Failure;
            return;
        };
        self.player = execute_step(&self.player, &action, &self.level);
        match self.player.status {
            RunStatus::Success => clog(&format!("goal reached at step {}", self.player.step_index)),
            RunStatus::Failure => clog(&format!(
                "blocked at ({}, {}) on step {}",
                self.player.position.x, self.player.position.y, self.player.step_index
            )),
            RunStatus::Error => cwarn(&format!(
                "malformed action at step {}: {:?}",
                self.player.step_index, action
            )),
            RunStatus::Idle | RunStatus::Running => {}
        }
    }
}

impl Reducible for Playback {
    type Action = PlaybackAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use PlaybackAction::*;
        let mut new = (*self).clone();
        match action {
            LoadLevel(level) => {
                new.level = level;
                new.reset();
            }
            Start(actions) => {
                if new.player.status == RunStatus::Running {
                    return self;
                }
                new.reset();
                clog(&format!("run started with {} actions", actions.len()));
                new.player.action_log = actions;
                new.player.status = RunStatus::Running;
            }
            Pause => {
                if new.player.status != RunStatus::Running {
                    return self;
                }
                new.paused = true;
            }
            Resume => new.paused = false,
            TogglePause => {
                if new.player.status != RunStatus::Running {
                    return self;
                }
                new.paused = !new.paused;
            }
            Step => {
                if !new.paused {
                    return self;
                }
                new.advance();
            }
            Reset | ProgramChanged => new.reset(),
            Tick { generation } => {
                if generation != new.generation || !new.is_ticking() {
                    return self;
                }
                new.advance();
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::StartPos;
    use crate::model::{Grid, Position, Side};

    fn level(dir: i32) -> Rc<LevelData> {
        Rc::new(LevelData {
            grid: Some(Grid::from_codes(&[&[4, 4, 4, 4], &[4, 1, 1, 3], &[4, 4, 4, 4]]).unwrap()),
            start_pos: StartPos { x: 1, y: 1, dir: Some(dir) },
            ..Default::default()
        })
    }

    fn dispatch(state: Rc<Playback>, actions: impl IntoIterator<Item = PlaybackAction>) -> Rc<Playback> {
        actions.into_iter().fold(state, |s, a| s.reduce(a))
    }

    fn tick(state: &Playback) -> PlaybackAction {
        PlaybackAction::Tick { generation: state.generation }
    }

    fn run_to_end(mut state: Rc<Playback>) -> Rc<Playback> {
        for _ in 0..32 {
            let t = tick(&state);
            state = state.reduce(t);
        }
        state
    }

    #[test]
    fn starts_idle_at_level_start() {
        let pb = Playback::new(level(0));
        assert_eq!(pb.player.status, RunStatus::Idle);
        assert_eq!(pb.player.position, Position::new(1, 1));
        assert!(!pb.is_ticking());
    }

    #[test]
    fn ticks_replay_the_log_to_success() {
        let pb = dispatch(Rc::new(Playback::new(level(0))), [PlaybackAction::Start(vec![Action::Move, Action::Move])]);
        assert!(pb.is_ticking());
        let pb = run_to_end(pb);
        assert_eq!(pb.player.status, RunStatus::Success);
        assert_eq!(pb.player.position, Position::new(3, 1));
        assert_eq!(pb.player.step_index, 2);
        assert!(!pb.is_ticking());
    }

    #[test]
    fn exhausted_log_fails() {
        let pb = Rc::new(Playback::new(level(0))).reduce(PlaybackAction::Start(vec![Action::Move]));
        let pb = run_to_end(pb);
        assert_eq!(pb.player.status, RunStatus::Failure);
        assert_eq!(pb.player.position, Position::new(2, 1));
    }

    #[test]
    fn empty_log_fails_on_first_tick() {
        let pb = Rc::new(Playback::new(level(0))).reduce(PlaybackAction::Start(Vec::new()));
        let t = tick(&pb);
        let pb = pb.reduce(t);
        assert_eq!(pb.player.status, RunStatus::Failure);
        assert_eq!(pb.player.step_index, 0);
    }

    #[test]
    fn turn_keeps_running() {
        let pb = Rc::new(Playback::new(level(0))).reduce(PlaybackAction::Start(vec![Action::Turn { side: Side::Right }]));
        let t = tick(&pb);
        let pb = pb.reduce(t);
        assert_eq!(pb.player.status, RunStatus::Running);
        assert_eq!(pb.player.direction, crate::model::Direction::South);
    }

    #[test]
    fn malformed_action_ends_in_error() {
        let pb = Rc::new(Playback::new(level(0))).reduce(PlaybackAction::Start(vec![Action::Unrecognized, Action::Move]));
        let pb = run_to_end(pb);
        assert_eq!(pb.player.status, RunStatus::Error);
        assert_eq!(pb.player.step_index, 1);
    }

    #[test]
    fn start_is_ignored_while_running() {
        let pb = Rc::new(Playback::new(level(0))).reduce(PlaybackAction::Start(vec![Action::Move, Action::Move]));
        let again = Rc::clone(&pb).reduce(PlaybackAction::Start(vec![Action::Unrecognized]));
        assert!(Rc::ptr_eq(&pb, &again));
    }

    #[test]
    fn start_after_finish_restarts_from_the_level_start() {
        let pb = run_to_end(Rc::new(Playback::new(level(0))).reduce(PlaybackAction::Start(vec![Action::Move])));
        assert_eq!(pb.player.status, RunStatus::Failure);
        let pb = pb.reduce(PlaybackAction::Start(vec![Action::Move, Action::Move]));
        assert_eq!(pb.player.position, Position::new(1, 1));
        assert_eq!(pb.player.step_index, 0);
        assert_eq!(run_to_end(pb).player.status, RunStatus::Success);
    }

    #[test]
    fn pause_holds_state_and_step_advances_once() {
        let pb = Rc::new(Playback::new(level(0))).reduce(PlaybackAction::Start(vec![Action::Move, Action::Move]));
        let pb = pb.reduce(PlaybackAction::Pause);
        let t = tick(&pb);
        let pb = pb.reduce(t);
        assert_eq!(pb.player.step_index, 0);
        let pb = pb.reduce(PlaybackAction::Step);
        assert_eq!(pb.player.step_index, 1);
        assert!(pb.paused);
        let pb = pb.reduce(PlaybackAction::Resume);
        let pb = run_to_end(pb);
        assert_eq!(pb.player.status, RunStatus::Success);
    }

    #[test]
    fn stale_ticks_are_dropped_after_program_change() {
        let pb = Rc::new(Playback::new(level(0))).reduce(PlaybackAction::Start(vec![Action::Move]));
        let stale = tick(&pb);
        let pb = pb.reduce(PlaybackAction::ProgramChanged);
        assert_eq!(pb.player.status, RunStatus::Idle);
        assert!(pb.player.action_log.is_empty());
        let pb = pb.reduce(PlaybackAction::Start(vec![Action::Turn { side: Side::Left }]));
        let after = Rc::clone(&pb).reduce(stale);
        assert!(Rc::ptr_eq(&pb, &after));
    }

    #[test]
    fn reset_returns_to_initial_from_any_status() {
        let finished = run_to_end(Rc::new(Playback::new(level(0))).reduce(PlaybackAction::Start(vec![Action::Move, Action::Move])));
        let pb = finished.reduce(PlaybackAction::Reset);
        assert_eq!(pb.player, level(0).initial_player());
    }

    #[test]
    fn load_level_swaps_the_snapshot() {
        let pb = Rc::new(Playback::new(level(0))).reduce(PlaybackAction::LoadLevel(level(1)));
        assert_eq!(pb.player.direction, crate::model::Direction::South);
        assert_eq!(pb.player.status, RunStatus::Idle);
    }
}
