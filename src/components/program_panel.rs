use crate::plugins::{BlockDefinition, Toolbox};
use crate::program::{Block, Program, ProgramSource};
use crate::util::cwarn;
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProgramPanelProps {
    pub text: String,
    pub toolbox: Toolbox,
    pub definitions: Vec<BlockDefinition>,
    pub on_change: Callback<String>,
    #[prop_or(false)]
    pub locked: bool,
}

/// Appends a palette block to the top level of the program in `text`.
/// Blank text starts a new program. Traces and unreadable text are left
/// untouched and yield `None`.
pub fn append_block(text: &str, template: &str) -> Option<String> {
    let block: Block = match serde_json::from_str(template) {
        Ok(b) => b,
        Err(e) => {
            cwarn(&format!("bad palette template {template}: {e}"));
            return None;
        }
    };
    let mut program = if text.trim().is_empty() {
        Program::default()
    } else {
        match ProgramSource::parse(text) {
            Ok(ProgramSource::Blocks(program)) => program,
            Ok(ProgramSource::Trace(_)) => {
                cwarn("palette blocks cannot be added to an action trace");
                return None;
            }
            Err(e) => {
                cwarn(&format!("palette block not added: {e}"));
                return None;
            }
        }
    };
    program.blocks.push(block);
    Some(program.to_json())
}

#[function_component]
pub fn ProgramPanel(props: &ProgramPanelProps) -> Html {
    let input_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            cb.emit(area.value());
        })
    };
    let clear_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(Program::default().to_json()))
    };

    let palette = props.toolbox.categories.iter().map(|cat| {
        let buttons = cat.blocks.iter().filter_map(|kind| props.definitions.iter().find(|d| d.kind == *kind)).map(|def| {
            let cb = props.on_change.clone();
            let text = props.text.clone();
            let template = def.template;
            let onclick = Callback::from(move |_: MouseEvent| {
                if let Some(next) = append_block(&text, template) {
                    cb.emit(next);
                }
            });
            html! {
                <button key={def.kind} title={def.tooltip} disabled={props.locked} onclick={onclick}
                    style={format!("border-left:4px solid hsl({}, 60%, 50%); text-align:left;", def.colour)}>
                    { def.label }
                </button>
            }
        });
        html! {
            <div key={cat.name} style="display:flex; flex-direction:column; gap:4px;">
                <div style={format!("font-size:12px; font-weight:600; color:{};", cat.colour)}>{ cat.name }</div>
                { for buttons }
            </div>
        }
    });

    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:10px; min-height:260px;">
        <div style="display:flex; flex-direction:column; gap:10px; min-width:150px;">
            { for palette }
            <button onclick={clear_cb} disabled={props.locked}>{"Clear"}</button>
        </div>
        <textarea
            style="flex:1; min-width:280px; font-family:monospace; font-size:12px; background:#0d1117; color:#c9d1d9; border:1px solid #30363d; border-radius:6px; padding:6px;"
            value={props.text.clone()}
            readonly={props.locked}
            oninput={input_cb}
        />
    </div>}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_block_is_appended() {
        let start = r#"{"blocks":[{"type":"MOVE_FORWARD"}]}"#;
        let next = append_block(start, r#"{"type":"TURN","side":"LEFT"}"#).unwrap();
        let program: Program = serde_json::from_str(&next).unwrap();
        assert_eq!(program.blocks.len(), 2);
    }

    #[test]
    fn blank_text_starts_a_new_program() {
        let next = append_block("  ", r#"{"type":"MOVE_FORWARD"}"#).unwrap();
        let program: Program = serde_json::from_str(&next).unwrap();
        assert_eq!(program.blocks, vec![Block::MoveForward]);
    }

    #[test]
    fn traces_and_unreadable_text_are_kept() {
        assert_eq!(append_block(r#"[{"type":"MOVE"}]"#, r#"{"type":"MOVE_FORWARD"}"#), None);
        assert_eq!(append_block("not json", r#"{"type":"MOVE_FORWARD"}"#), None);
    }

    #[test]
    fn bad_template_is_rejected() {
        assert_eq!(append_block("{}", r#"{"type":"JUMP"}"#), None);
    }
}
