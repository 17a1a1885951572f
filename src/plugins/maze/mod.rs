pub mod config;
pub mod editor;
pub mod logic;
pub mod render;

use yew::prelude::*;

use super::{BlockDefinition, EditorProps, GamePlugin, RenderProps, Toolbox, ToolboxCategory};
use crate::level::LevelData;
use crate::model::{Action, PlayerState};
use editor::MazeEditor;
use render::MazeRender;

pub const MAZE_PLUGIN_ID: &str = "MAZE";

pub struct MazePlugin;

impl GamePlugin for MazePlugin {
    fn id(&self) -> &'static str {
        MAZE_PLUGIN_ID
    }

    fn name(&self) -> &'static str {
        "Labyrinth"
    }

    fn icon(&self) -> &'static str {
        "🏰"
    }

    fn simulate_step(&self, state: &PlayerState, action: &Action, level: &LevelData) -> PlayerState {
        logic::execute_step(state, action, level)
    }

    fn describe_toolbox(&self) -> Toolbox {
        Toolbox {
            categories: vec![
                ToolboxCategory {
                    name: "Movement",
                    colour: "#5b67a5",
                    blocks: vec!["MOVE_FORWARD", "TURN_LEFT", "TURN_RIGHT", "SCAN_AHEAD"],
                },
                ToolboxCategory {
                    name: "Control",
                    colour: "#4c979a",
                    blocks: vec!["REPEAT", "IF_PATH", "REPEAT_UNTIL_GOAL"],
                },
            ],
        }
    }

    fn block_definitions(&self) -> Vec<BlockDefinition> {
        vec![
            BlockDefinition {
                kind: "MOVE_FORWARD",
                label: "move forward",
                tooltip: "Moves the robot one cell.",
                colour: 290,
                template: r#"{"type":"MOVE_FORWARD"}"#,
            },
            BlockDefinition {
                kind: "TURN_LEFT",
                label: "turn left",
                tooltip: "Turns the robot 90 degrees left.",
                colour: 290,
                template: r#"{"type":"TURN","side":"LEFT"}"#,
            },
            BlockDefinition {
                kind: "TURN_RIGHT",
                label: "turn right",
                tooltip: "Turns the robot 90 degrees right.",
                colour: 290,
                template: r#"{"type":"TURN","side":"RIGHT"}"#,
            },
            BlockDefinition {
                kind: "SCAN_AHEAD",
                label: "scan ahead",
                tooltip: "Highlights the cell in front of the robot.",
                colour: 290,
                template: r#"{"type":"SCAN","target":"AHEAD"}"#,
            },
            BlockDefinition {
                kind: "REPEAT",
                label: "repeat 4 times",
                tooltip: "Runs the inner blocks a fixed number of times.",
                colour: 120,
                template: r#"{"type":"REPEAT","times":4,"body":[]}"#,
            },
            BlockDefinition {
                kind: "IF_PATH",
                label: "if path ahead",
                tooltip: "Runs the inner blocks when the way is open.",
                colour: 210,
                template: r#"{"type":"IF_PATH","direction":"AHEAD","body":[]}"#,
            },
            BlockDefinition {
                kind: "REPEAT_UNTIL_GOAL",
                label: "repeat until goal",
                tooltip: "Loops until the robot reaches the flag.",
                colour: 120,
                template: r#"{"type":"REPEAT_UNTIL_GOAL","body":[]}"#,
            },
        ]
    }

    fn render(&self, props: RenderProps) -> Html {
        html! { <MazeRender ..props /> }
    }

    fn editor(&self, props: EditorProps) -> Html {
        html! { <MazeEditor ..props /> }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Block;

    #[test]
    fn block_templates_parse_as_blocks() {
        for def in MazePlugin.block_definitions() {
            let parsed: Result<Block, _> = serde_json::from_str(def.template);
            assert!(parsed.is_ok(), "{} template does not parse", def.kind);
        }
    }
}
