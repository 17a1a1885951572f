use crate::model::RunStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub status: RunStatus,
    pub paused: bool,
    pub on_run: Callback<()>,
    pub on_toggle_pause: Callback<()>,
    pub on_step: Callback<()>,
    pub on_reset: Callback<()>,
    pub on_open_settings: Callback<()>,
    pub feedback: Option<String>,
}

fn status_color(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Idle => "#8b949e",
        RunStatus::Running => "#58a6ff",
        RunStatus::Success => "#2ea043",
        RunStatus::Failure => "#f0883e",
        RunStatus::Error => "#f85149",
    }
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let running = props.status == RunStatus::Running;
    let run_cb = {
        let cb = props.on_run.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let pause_cb = {
        let cb = props.on_toggle_pause.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let step_cb = {
        let cb = props.on_step.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let settings_cb = {
        let cb = props.on_open_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let pause_label = if props.paused { "Resume" } else { "Pause" };
    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:200px; display:flex; flex-direction:column; gap:6px;">
        <div style={format!("font-weight:600; color:{};", status_color(props.status))}>
            { if running && props.paused { "PAUSED".to_string() } else { props.status.as_str().to_string() } }
        </div>
        <button onclick={run_cb} disabled={running}>{"▶ Run"}</button>
        <button onclick={pause_cb} disabled={!running}>{ pause_label }</button>
        <button onclick={step_cb} disabled={!(running && props.paused)}>{"Step"}</button>
        <button onclick={reset_cb}>{"Reset"}</button>
        <button onclick={settings_cb}>{"Settings"}</button>
        <div style="font-size:11px; opacity:0.7;">{"Hotkey: Space pause/resume"}</div>
        { if let Some(txt) = &props.feedback { if !txt.is_empty() { html!{ <div style="font-size:11px; line-height:1.2; background:#1c2128; border:1px solid #30363d; padding:4px 6px; border-radius:6px;">{ txt.clone() }</div> } } else { html!{} } } else { html!{} } }
    </div>}
}
