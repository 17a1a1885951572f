use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

use super::content_unavailable::ContentUnavailable;
use super::controls_panel::ControlsPanel;
use super::legend_panel::LegendPanel;
use super::program_panel::ProgramPanel;
use super::result_overlay::ResultOverlay;
use super::stats_panel::StatsPanel;
use crate::level::{Level, LevelCompletionResult};
use crate::model::RunStatus;
use crate::plugins::{PluginHandle, RegistryContext, RenderProps};
use crate::program::{Program, ProgramSource};
use crate::state::{Playback, PlaybackAction, Route, Settings};
use crate::store::{BrowserLevelStore, LevelStore};
use crate::util::{clog, cwarn};

#[derive(Properties, PartialEq, Clone)]
pub struct LevelViewProps {
    pub level_id: String,
    pub settings: Settings,
    pub navigate: Callback<Route>,
    pub on_open_settings: Callback<()>,
}

/// Resolves the level and its plugin, then hands over to the runner.
#[function_component]
pub fn LevelView(props: &LevelViewProps) -> Html {
    let registry = use_context::<RegistryContext>();
    let loaded = use_memo(props.level_id.clone(), |id| {
        BrowserLevelStore::default().get(id).map(Rc::new)
    });

    let level = match &*loaded {
        Ok(level) => level.clone(),
        Err(e) => {
            cwarn(&format!("level {} unavailable: {e}", props.level_id));
            return html! { <ContentUnavailable reason={e.to_string()} /> };
        }
    };
    let Some(RegistryContext(registry)) = registry else {
        return html! { <ContentUnavailable reason="no plugin registry" /> };
    };
    let plugin = match registry.lookup(&level.plugin_id) {
        Ok(p) => PluginHandle(p),
        Err(e) => {
            cwarn(&format!("level {}: {e}", level.id));
            return html! { <ContentUnavailable reason={e.to_string()} /> };
        }
    };

    html! {
        <LevelRunner
            key={level.id.clone()}
            level={level.clone()}
            plugin={plugin}
            settings={props.settings.clone()}
            navigate={props.navigate.clone()}
            on_open_settings={props.on_open_settings.clone()}
        />
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct LevelRunnerProps {
    pub level: Rc<Level>,
    pub plugin: PluginHandle,
    pub settings: Settings,
    pub navigate: Callback<Route>,
    pub on_open_settings: Callback<()>,
}

fn initial_program_text(level: &Level) -> String {
    level
        .level_data
        .start_blocks
        .clone()
        .unwrap_or_else(|| Program::default().to_json())
}

#[function_component]
pub fn LevelRunner(props: &LevelRunnerProps) -> Html {
    let playback = {
        let data = Rc::new(props.level.level_data.clone());
        use_reducer(move || Playback::new(data))
    };
    let program_text = {
        let level = props.level.clone();
        use_state(move || initial_program_text(&level))
    };
    let blocks_used = use_state(|| None::<u32>);
    let feedback = use_state(|| None::<String>);

    // Snapshot the level whenever a new copy arrives.
    {
        let dispatcher = playback.dispatcher();
        use_effect_with(props.level.clone(), move |level| {
            dispatcher.dispatch(PlaybackAction::LoadLevel(Rc::new(level.level_data.clone())));
            || ()
        });
    }

    // One interval per active run; cleared on pause, finish, restart or cadence change.
    {
        let dispatcher = playback.dispatcher();
        let deps = (playback.is_ticking(), playback.generation, props.settings.tick_ms);
        use_effect_with(deps, move |&(ticking, generation, tick_ms)| {
            let mut scheduled: Option<(i32, Closure<dyn FnMut()>)> = None;
            if ticking {
                if let Some(win) = web_sys::window() {
                    let tick = Closure::wrap(Box::new(move || {
                        dispatcher.dispatch(PlaybackAction::Tick { generation });
                    }) as Box<dyn FnMut()>);
                    match win.set_interval_with_callback_and_timeout_and_arguments_0(
                        tick.as_ref().unchecked_ref(),
                        tick_ms as i32,
                    ) {
                        Ok(id) => scheduled = Some((id, tick)),
                        Err(_) => cwarn("could not schedule run ticks"),
                    }
                }
            }
            move || {
                if let Some((id, _tick)) = scheduled {
                    if let Some(win) = web_sys::window() {
                        win.clear_interval_with_handle(id);
                    }
                }
            }
        });
    }

    // Space toggles pause unless the user is typing.
    {
        let dispatcher = playback.dispatcher();
        use_effect_with((), move |_| {
            let keydown = Closure::wrap(Box::new(move |e: web_sys::KeyboardEvent| {
                let typing = e.target().is_some_and(|t| {
                    t.dyn_ref::<HtmlTextAreaElement>().is_some() || t.dyn_ref::<HtmlInputElement>().is_some()
                });
                if typing {
                    return;
                }
                if e.code() == "Space" || e.key() == " " {
                    e.prevent_default();
                    dispatcher.dispatch(PlaybackAction::TogglePause);
                }
            }) as Box<dyn FnMut(_)>);
            let win = web_sys::window();
            if let Some(win) = &win {
                if win
                    .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
                    .is_err()
                {
                    cwarn("could not install keyboard shortcuts");
                }
            }
            move || {
                if let Some(win) = win {
                    let _ = win.remove_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
                }
            }
        });
    }

    let run = {
        let playback = playback.clone();
        let program_text = program_text.clone();
        let blocks_used = blocks_used.clone();
        let feedback = feedback.clone();
        let level = props.level.clone();
        Callback::from(move |_: ()| {
            match ProgramSource::parse(&program_text).and_then(|src| src.compile(&level)) {
                Ok(compiled) => {
                    feedback.set(compiled.truncated.then(|| {
                        "Program stopped after too many steps; only the first part will run.".to_string()
                    }));
                    blocks_used.set(Some(compiled.blocks_used));
                    playback.dispatch(PlaybackAction::Start(compiled.actions));
                }
                Err(e) => {
                    cwarn(&format!("program rejected: {e}"));
                    feedback.set(Some(e.to_string()));
                }
            }
        })
    };
    let toggle_pause = {
        let playback = playback.clone();
        Callback::from(move |_: ()| {
            let action = if playback.paused { PlaybackAction::Resume } else { PlaybackAction::Pause };
            playback.dispatch(action);
        })
    };
    let open_settings = {
        let playback = playback.clone();
        let cb = props.on_open_settings.clone();
        Callback::from(move |_: ()| {
            playback.dispatch(PlaybackAction::Pause);
            cb.emit(());
        })
    };
    let step = {
        let playback = playback.clone();
        Callback::from(move |_: ()| playback.dispatch(PlaybackAction::Step))
    };
    let reset = {
        let playback = playback.clone();
        let feedback = feedback.clone();
        Callback::from(move |_: ()| {
            feedback.set(None);
            playback.dispatch(PlaybackAction::Reset);
        })
    };
    let on_program_change = {
        let playback = playback.clone();
        let program_text = program_text.clone();
        Callback::from(move |text: String| {
            program_text.set(text);
            playback.dispatch(PlaybackAction::ProgramChanged);
        })
    };
    let to_next = {
        let navigate = props.navigate.clone();
        Callback::from(move |id: String| {
            clog(&format!("advancing to level {id}"));
            navigate.emit(Route::StudentLevel(id));
        })
    };

    let player = &playback.player;
    let tick_ms = props.settings.tick_ms;
    let result = LevelCompletionResult::from_run(&props.level, player, (*blocks_used).unwrap_or(0), tick_ms);
    let next_level_id = result.and_then(|r| props.level.next_level_id(&r).map(str::to_string));
    let plugin = &props.plugin.0;
    let board = plugin.render(RenderProps {
        level_data: (*playback.level).clone(),
        player_position: player.position,
        player_direction: player.direction,
        last_action: player.last_action().cloned(),
        sensed: if props.settings.show_scan_pulse { player.sensed } else { None },
        step: player.step_index,
    });
    let last = player
        .last_action()
        .map(|a| a.describe())
        .unwrap_or_else(|| "-".to_string());

    html! {
        <div style="display:flex; flex-direction:column; gap:12px; padding:12px;">
            <div>
                <h2 style="margin:0;">{ format!("{} {}", plugin.icon(), props.level.name) }</h2>
                <div style="font-size:13px; opacity:0.8;">{ props.level.description.clone() }</div>
            </div>
            <div style="display:flex; gap:12px; align-items:flex-start; flex-wrap:wrap;">
                <div style="position:relative; flex:1; min-width:320px; height:60vmin;">
                    { board }
                    <ResultOverlay result={result} next_level_id={next_level_id} retry={reset.clone()} to_next={to_next} />
                </div>
                <div style="display:flex; flex-direction:column; gap:10px;">
                    <ControlsPanel
                        status={player.status}
                        paused={playback.paused}
                        on_run={run}
                        on_toggle_pause={toggle_pause}
                        on_step={step}
                        on_reset={reset}
                        on_open_settings={open_settings}
                        feedback={(*feedback).clone()}
                    />
                    <StatsPanel
                        step={player.step_index}
                        total_steps={player.action_log.len()}
                        moves={player.moves}
                        elapsed_ms={player.step_index as u64 * tick_ms as u64}
                        blocks_used={*blocks_used}
                        max_blocks={props.level.max_blocks}
                    />
                    <div style="font-size:12px; opacity:0.8;">{ format!("Last action: {}", last) }</div>
                    <LegendPanel grid={playback.level.grid().clone()} />
                </div>
            </div>
            <ProgramPanel
                text={(*program_text).clone()}
                toolbox={plugin.describe_toolbox()}
                definitions={plugin.block_definitions()}
                on_change={on_program_change}
                locked={player.status == RunStatus::Running}
            />
        </div>
    }
}
