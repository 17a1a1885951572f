//! Game plugin contract and the registry that maps plugin ids to implementations.

pub mod maze;

use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;
use yew::prelude::*;

use crate::level::{LevelData, LevelDataPatch};
use crate::model::{Action, Direction, PlayerState, Position, Sensed};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PluginError {
    #[error("no plugin registered for id {0}")]
    Missing(String),
}

/// One entry of the block palette a plugin offers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockDefinition {
    pub kind: &'static str,
    pub label: &'static str,
    pub tooltip: &'static str,
    pub colour: u16,
    /// JSON inserted into the program when the palette entry is used.
    pub template: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolboxCategory {
    pub name: &'static str,
    pub colour: &'static str,
    pub blocks: Vec<&'static str>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Toolbox {
    pub categories: Vec<ToolboxCategory>,
}

#[derive(Properties, Clone, PartialEq)]
pub struct RenderProps {
    pub level_data: LevelData,
    pub player_position: Position,
    pub player_direction: Direction,
    #[prop_or_default]
    pub last_action: Option<Action>,
    #[prop_or_default]
    pub sensed: Option<Sensed>,
    /// Bumps on every step so scan pulses replay.
    #[prop_or_default]
    pub step: usize,
}

#[derive(Properties, Clone, PartialEq)]
pub struct EditorProps {
    pub level_data: LevelData,
    pub on_update: Callback<LevelDataPatch>,
}

pub trait GamePlugin {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;
    fn icon(&self) -> &'static str;

    fn simulate_step(&self, state: &PlayerState, action: &Action, level: &LevelData) -> PlayerState;

    fn describe_toolbox(&self) -> Toolbox;
    fn block_definitions(&self) -> Vec<BlockDefinition>;

    fn render(&self, props: RenderProps) -> Html;
    fn editor(&self, props: EditorProps) -> Html;
}

/// Immutable id -> plugin table, filled once at startup.
pub struct PluginRegistry {
    plugins: BTreeMap<&'static str, Rc<dyn GamePlugin>>,
}

impl PluginRegistry {
    pub fn new(plugins: Vec<Rc<dyn GamePlugin>>) -> Self {
        Self { plugins: plugins.into_iter().map(|p| (p.id(), p)).collect() }
    }

    pub fn builtin() -> Self {
        Self::new(vec![Rc::new(maze::MazePlugin)])
    }

    pub fn lookup(&self, id: &str) -> Result<Rc<dyn GamePlugin>, PluginError> {
        self.plugins
            .get(id)
            .cloned()
            .ok_or_else(|| PluginError::Missing(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.plugins.keys().copied()
    }
}

/// Shared registry handed down the component tree.
#[derive(Clone)]
pub struct RegistryContext(pub Rc<PluginRegistry>);

impl PartialEq for RegistryContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A resolved plugin passed as a component prop.
#[derive(Clone)]
pub struct PluginHandle(pub Rc<dyn GamePlugin>);

impl PartialEq for PluginHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RunStatus;

    #[test]
    fn builtin_registry_serves_the_maze() {
        let registry = PluginRegistry::builtin();
        let maze = registry.lookup("MAZE").unwrap();
        assert_eq!(maze.id(), "MAZE");
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["MAZE"]);
    }

    #[test]
    fn unknown_plugin_is_reported_missing() {
        let registry = PluginRegistry::builtin();
        assert_eq!(registry.lookup("SOKOBAN").err(), Some(PluginError::Missing("SOKOBAN".into())));
    }

    #[test]
    fn plugin_step_goes_through_the_executor() {
        let registry = PluginRegistry::builtin();
        let maze = registry.lookup("MAZE").unwrap();
        let data = LevelData::default();
        let next = maze.simulate_step(&data.initial_player(), &Action::Unrecognized, &data);
        assert_eq!(next.status, RunStatus::Error);
    }

    #[test]
    fn toolbox_only_lists_defined_blocks() {
        let registry = PluginRegistry::builtin();
        let maze = registry.lookup("MAZE").unwrap();
        let defined: Vec<_> = maze.block_definitions().iter().map(|b| b.kind).collect();
        let toolbox = maze.describe_toolbox();
        assert!(!toolbox.categories.is_empty());
        for category in &toolbox.categories {
            for kind in &category.blocks {
                assert!(defined.contains(kind), "{kind} missing from definitions");
            }
        }
    }
}
