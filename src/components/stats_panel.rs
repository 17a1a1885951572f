use crate::util::format_time;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct StatsPanelProps {
    pub step: usize,
    pub total_steps: usize,
    pub moves: u32,
    pub elapsed_ms: u64,
    pub blocks_used: Option<u32>,
    pub max_blocks: Option<u32>,
}

#[function_component]
pub fn StatsPanel(props: &StatsPanelProps) -> Html {
    let row_style = "display:flex; align-items:center; gap:8px;"; // icon | label | value
    let icon_style = "width:20px; text-align:center; flex-shrink:0;";
    let label_style = "flex:1; font-weight:500;";
    let value_style =
        "min-width:70px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let blocks = match (props.blocks_used, props.max_blocks) {
        (Some(used), Some(max)) => format!("{} / {}", used, max),
        (Some(used), None) => used.to_string(),
        (None, Some(max)) => format!("- / {}", max),
        (None, None) => "-".to_string(),
    };
    let over_budget = matches!((props.blocks_used, props.max_blocks), (Some(u), Some(m)) if u > m);
    html! {
        <div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; min-width:230px; display:flex; flex-direction:column; gap:10px; font-size:14px;">
            <div style={row_style}>
                <span style={format!("{} color:#58a6ff;", icon_style)}>{"👣"}</span>
                <span style={format!("{} color:#58a6ff;", label_style)}>{"Step"}</span>
                <span style={format!("{} color:#58a6ff;", value_style)}>{ format!("{} / {}", props.step, props.total_steps) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#2ea043;", icon_style)}>{"➡"}</span>
                <span style={format!("{} color:#2ea043;", label_style)}>{"Moves"}</span>
                <span style={format!("{} color:#2ea043;", value_style)}>{ props.moves }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:#d4af37;", icon_style)}>{"⏱"}</span>
                <span style={format!("{} color:#d4af37;", label_style)}>{"Time"}</span>
                <span style={format!("{} color:#d4af37;", value_style)}>{ format_time(props.elapsed_ms) }</span>
            </div>
            <div style={row_style}>
                <span style={format!("{} color:{};", icon_style, if over_budget { "#f85149" } else { "#c9d1d9" })}>{"🧩"}</span>
                <span style={format!("{} color:{};", label_style, if over_budget { "#f85149" } else { "#c9d1d9" })}>{"Blocks"}</span>
                <span style={format!("{} color:{};", value_style, if over_budget { "#f85149" } else { "#c9d1d9" })}>{ blocks }</span>
            </div>
        </div>
    }
}
