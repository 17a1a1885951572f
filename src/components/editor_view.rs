use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::content_unavailable::ContentUnavailable;
use super::legend_panel::LegendPanel;
use crate::level::{Level, LevelData, LevelDataPatch};
use crate::plugins::maze::MAZE_PLUGIN_ID;
use crate::plugins::maze::config::default_grid;
use crate::plugins::{EditorProps, RegistryContext, RenderProps};
use crate::state::Route;
use crate::store::{BrowserLevelStore, LevelStore};
use crate::util::cwarn;

#[derive(Properties, PartialEq, Clone)]
pub struct EditorViewProps {
    pub level_id: String,
    pub navigate: Callback<Route>,
}

fn blank_level() -> Level {
    Level {
        id: format!("lvl_{}", js_sys::Date::now() as u64),
        plugin_id: MAZE_PLUGIN_ID.to_string(),
        name: "Untitled Maze".to_string(),
        description: String::new(),
        level_data: LevelData { grid: Some(default_grid().clone()), ..Default::default() },
        max_blocks: None,
        exit_conditions: Vec::new(),
    }
}

/// Parses the max-blocks field; blank means uncapped.
pub fn parse_max_blocks(raw: &str) -> Result<Option<u32>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<u32>() {
        Ok(0) => Err("max blocks must be at least 1".to_string()),
        Ok(n) => Ok(Some(n)),
        Err(_) => Err(format!("'{}' is not a block count", raw)),
    }
}

#[function_component]
pub fn EditorView(props: &EditorViewProps) -> Html {
    let registry = use_context::<RegistryContext>();
    let draft = {
        let id = props.level_id.clone();
        use_state(move || BrowserLevelStore::default().get(&id).ok())
    };
    let revision = use_state(|| 0u32);
    let catalogue = use_memo(*revision, |_| BrowserLevelStore::default().list());
    let feedback = use_state(|| None::<String>);
    let max_blocks_error = use_state(|| None::<String>);

    let Some(level) = (*draft).clone() else {
        return html! { <ContentUnavailable reason={format!("no level with id {}", props.level_id)} /> };
    };
    let plugin = match registry.map(|RegistryContext(r)| r.lookup(&level.plugin_id)) {
        Some(Ok(p)) => p,
        Some(Err(e)) => {
            cwarn(&format!("editor for {}: {e}", level.id));
            return html! { <ContentUnavailable reason={e.to_string()} /> };
        }
        None => return html! { <ContentUnavailable reason="no plugin registry" /> },
    };

    let on_update = {
        let draft = draft.clone();
        let level = level.clone();
        Callback::from(move |patch: LevelDataPatch| {
            draft.set(Some(Level { level_data: level.level_data.apply(patch), ..level.clone() }));
        })
    };
    let on_name = {
        let draft = draft.clone();
        let level = level.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            draft.set(Some(Level { name: input.value(), ..level.clone() }));
        })
    };
    let on_description = {
        let draft = draft.clone();
        let level = level.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            draft.set(Some(Level { description: area.value(), ..level.clone() }));
        })
    };
    let on_max_blocks = {
        let draft = draft.clone();
        let level = level.clone();
        let max_blocks_error = max_blocks_error.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match parse_max_blocks(&input.value()) {
                Ok(max_blocks) => {
                    max_blocks_error.set(None);
                    draft.set(Some(Level { max_blocks, ..level.clone() }));
                }
                Err(msg) => max_blocks_error.set(Some(msg)),
            }
        })
    };
    let validation = level.level_data.validate();
    let on_save = {
        let level = level.clone();
        let feedback = feedback.clone();
        let revision = revision.clone();
        let navigate = props.navigate.clone();
        let route_id = props.level_id.clone();
        Callback::from(move |_: MouseEvent| match BrowserLevelStore::default().save(&level) {
            Ok(()) => {
                feedback.set(Some(format!("Saved {}", level.name)));
                revision.set(*revision + 1);
                if level.id != route_id {
                    navigate.emit(Route::ProfessorEditor(level.id.clone()));
                }
            }
            Err(e) => {
                cwarn(&format!("save failed: {e}"));
                feedback.set(Some(format!("Save failed: {e}")));
            }
        })
    };
    let on_new = {
        let draft = draft.clone();
        let feedback = feedback.clone();
        Callback::from(move |_: MouseEvent| {
            let fresh = blank_level();
            feedback.set(Some(format!("New level {} (not saved yet)", fresh.id)));
            draft.set(Some(fresh));
        })
    };

    let preview_player = level.level_data.initial_player();
    let preview = plugin.render(RenderProps {
        level_data: level.level_data.clone(),
        player_position: preview_player.position,
        player_direction: preview_player.direction,
        last_action: None,
        sensed: None,
        step: 0,
    });
    let editor = plugin.editor(EditorProps { level_data: level.level_data.clone(), on_update });

    let level_list = catalogue.iter().map(|l| {
        let navigate = props.navigate.clone();
        let id = l.id.clone();
        let current = l.id == level.id;
        let onclick = Callback::from(move |_: MouseEvent| navigate.emit(Route::ProfessorEditor(id.clone())));
        html! {
            <button key={l.id.clone()} onclick={onclick} disabled={current}
                style={format!("text-align:left; {}", if current { "border-color:#58a6ff;" } else { "" })}>
                { format!("{} ({})", l.name, l.id) }
            </button>
        }
    });

    html! {
        <div style="display:flex; gap:12px; padding:12px; align-items:flex-start; flex-wrap:wrap;">
            <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
                <div style="font-weight:600;">{"Levels"}</div>
                { for level_list }
                <button onclick={on_new}>{"+ New Level"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px; min-width:320px;">
                <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; flex-direction:column; gap:6px;">
                    <div style="font-weight:600;">{ format!("{} {} · {}", plugin.icon(), plugin.name(), level.id) }</div>
                    <label style="display:flex; flex-direction:column; gap:2px;">
                        <span style="font-size:12px;">{"Name"}</span>
                        <input type="text" value={level.name.clone()} oninput={on_name} />
                    </label>
                    <label style="display:flex; flex-direction:column; gap:2px;">
                        <span style="font-size:12px;">{"Description"}</span>
                        <textarea rows="3" value={level.description.clone()} oninput={on_description} />
                    </label>
                    <label style="display:flex; flex-direction:column; gap:2px;">
                        <span style="font-size:12px;">{"Max blocks (blank = no limit)"}</span>
                        <input type="number" min="1" value={level.max_blocks.map(|m| m.to_string()).unwrap_or_default()} onchange={on_max_blocks} />
                    </label>
                    { if let Some(msg) = &*max_blocks_error { html!{ <div style="font-size:11px; color:#f85149;">{ msg.clone() }</div> } } else { html!{} } }
                    { match &validation {
                        Ok(()) => html!{},
                        Err(e) => html!{ <div style="font-size:11px; color:#f85149;">{ e.to_string() }</div> },
                    } }
                    <button onclick={on_save} disabled={validation.is_err()}>{"💾 Save"}</button>
                    { if let Some(msg) = &*feedback { html!{ <div style="font-size:11px; opacity:0.8;">{ msg.clone() }</div> } } else { html!{} } }
                </div>
                { editor }
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <div style="width:50vmin; height:40vmin;">{ preview }</div>
                <LegendPanel grid={level.level_data.grid().clone()} />
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_blocks_field() {
        assert_eq!(parse_max_blocks(""), Ok(None));
        assert_eq!(parse_max_blocks(" 7 "), Ok(Some(7)));
        assert!(parse_max_blocks("0").is_err());
        assert!(parse_max_blocks("lots").is_err());
    }
}
