use crate::state::Settings;
use crate::state::settings::{MAX_TICK_MS, MIN_TICK_MS};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsModalProps {
    pub show: bool,
    pub settings: Settings,
    pub on_change: Callback<Settings>,
    pub on_close: Callback<()>,
    pub on_clear_saved_levels: Callback<()>,
}

#[function_component]
pub fn SettingsModal(props: &SettingsModalProps) -> Html {
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let tick_cb = {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<u32>() {
                cb.emit(Settings { tick_ms: v, ..current.clone() }.sanitized());
            }
        })
    };
    let toggle_pulse_cb = {
        let cb = props.on_change.clone();
        let current = props.settings.clone();
        Callback::from(move |_| {
            cb.emit(Settings { show_scan_pulse: !current.show_scan_pulse, ..current.clone() })
        })
    };
    let clear_cb = {
        let cb = props.on_clear_saved_levels.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message("This removes every level saved from the editor. Continue?")
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; flex-direction:column; gap:4px;">
                    <span>{ format!("Step delay: {} ms", props.settings.tick_ms) }</span>
                    <input type="range" min={MIN_TICK_MS.to_string()} max={MAX_TICK_MS.to_string()} step="50"
                        value={props.settings.tick_ms.to_string()} oninput={tick_cb} />
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={props.settings.show_scan_pulse} onclick={toggle_pulse_cb} />
                    <span>{"Show Scan Pulse"}</span>
                </label>
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={clear_cb} style="background:#f85149; border:1px solid #b62324; color:#fff; flex:1;">{"Delete Saved Levels"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
            <div style="font-size:11px; line-height:1.4; opacity:0.7;">{"Builtin levels come back as shipped once their saved copies are deleted."}</div>
        </div>
    </div>}
}
