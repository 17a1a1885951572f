use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LegendRowProps {
    pub color: &'static str,
    pub glyph: &'static str,
    pub label: &'static str,
    pub count: usize,
}

#[function_component(LegendRow)]
pub fn legend_row(props: &LegendRowProps) -> Html {
    html! { <div style="display:flex; align-items:center; gap:8px; margin:3px 0;"> <span style={format!("display:inline-flex; justify-content:center; width:16px; height:16px; font-size:11px; background:{}; border:1px solid #30363d; border-radius:2px;", props.color)}>{ props.glyph }</span> <span style="flex:1;">{ props.label }</span> <span style="opacity:0.6; font-variant-numeric:tabular-nums;">{ props.count }</span> </div> }
}
