use yew::prelude::*;

use super::config::{PLAYER_GLYPH, cell_color, cell_glyph, sprite_rotation};
use crate::model::CellKind;
use crate::plugins::RenderProps;

const PULSE_CSS: &str = "@keyframes radarPing { 0% { transform: scale(0.2); opacity: 0.8; } 100% { transform: scale(1.5); opacity: 0; } }";

#[function_component(MazeRender)]
pub fn maze_render(props: &RenderProps) -> Html {
    let grid = props.level_data.grid();
    let rows = grid.rows();
    let cols = grid.cols();
    let rotation = sprite_rotation(props.player_direction.index());
    let font_size = format!("min(40px, {}vmin)", 60 / rows.max(cols).max(1));
    let scanned = props.sensed.map(|s| s.position);

    html! {
        <div style="display:flex; justify-content:center; align-items:center; background:#2c3e50; padding:10px; border-radius:8px; width:100%; height:100%; overflow:hidden;">
            <style>{ PULSE_CSS }</style>
            <div style={format!("display:grid; gap:1px; background:#34495e; border:4px solid #34495e; grid-template-columns:repeat({}, 1fr); aspect-ratio:{} / {}; max-width:100%; max-height:100%; margin:auto;", cols, cols, rows)}>
                { for grid.row_slices().enumerate().flat_map(|(y, row)| {
                    let font_size = font_size.clone();
                    row.iter().enumerate().map(move |(x, cell)| {
                        let here = props.player_position.x == x as i32 && props.player_position.y == y as i32;
                        let pulse = scanned.is_some_and(|p| p.x == x as i32 && p.y == y as i32);
                        let glyph = if *cell == CellKind::Start { "" } else { cell_glyph(*cell) };
                        html! {
                            <div key={format!("{}-{}", y, x)} style={format!("width:100%; height:100%; display:flex; justify-content:center; align-items:center; position:relative; background:{}; overflow:visible;", cell_color(*cell))}>
                                <span style={format!("z-index:1; font-size:{};", font_size)}>{ glyph }</span>
                                { if here { html!{
                                    <div style={format!("position:absolute; z-index:10; display:flex; justify-content:center; align-items:center; width:100%; height:100%; transition:transform 0.2s ease; transform:rotate({}deg); font-size:{};", rotation, font_size)}>
                                        { PLAYER_GLYPH }
                                    </div>
                                } } else { html!{} } }
                                { if pulse { html!{
                                    <div key={props.step} style="position:absolute; inset:0; background:rgba(46,204,113,0.5); border-radius:50%; animation:radarPing 0.5s ease-out forwards; z-index:5;"></div>
                                } } else { html!{} } }
                            </div>
                        }
                    })
                }) }
            </div>
        </div>
    }
}
