use super::legend::LegendRow;
use crate::model::{CellKind, Grid};
use crate::plugins::maze::config::{cell_color, cell_glyph};
use yew::prelude::*;

const KINDS: [CellKind; 5] = [
    CellKind::Start,
    CellKind::Goal,
    CellKind::Floor,
    CellKind::Wall,
    CellKind::Empty,
];

#[derive(Properties, PartialEq, Clone)]
pub struct LegendPanelProps {
    pub grid: Grid,
}

/// Cell kinds present on the grid, with how many cells of each.
#[function_component]
pub fn LegendPanel(props: &LegendPanelProps) -> Html {
    html! {<div style="background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; min-width:170px;">
        <div style="font-weight:600; margin-bottom:4px;">{"Legend"}</div>
        { for KINDS.iter().filter_map(|&kind| {
            let count = props.grid.count(kind);
            (count > 0).then(|| html!{ <LegendRow key={kind.label()} color={cell_color(kind)} glyph={cell_glyph(kind)} label={kind.label()} count={count}/> })
        }) }
    </div>}
}
