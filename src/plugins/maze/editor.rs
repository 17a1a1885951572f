use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::config::{PLAYER_GLYPH, cell_color, cell_glyph, sprite_rotation};
use crate::level::{LevelDataPatch, StartPos};
use crate::model::CellKind;
use crate::plugins::EditorProps;

const TOOLS: [CellKind; 5] = [CellKind::Start, CellKind::Floor, CellKind::Wall, CellKind::Goal, CellKind::Empty];

/// Reads a grid dimension field. Blank or garbled input is no resize at all.
fn parse_dimension(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

#[function_component(MazeEditor)]
pub fn maze_editor(props: &EditorProps) -> Html {
    let selected = use_state(|| CellKind::Wall);
    let grid = props.level_data.grid().clone();
    let start = props.level_data.start_pos;
    let rows = grid.rows();
    let cols = grid.cols();
    let rotation = sprite_rotation(start.direction().index());
    let font_size = format!("min(40px, {}vmin)", 60 / rows.max(cols).max(1));

    let on_resize = {
        let on_update = props.on_update.clone();
        let grid = grid.clone();
        Callback::from(move |(next_rows, next_cols): (usize, usize)| {
            let next = grid.resize(next_rows, next_cols);
            if next.rows() == grid.rows() && next.cols() == grid.cols() {
                return;
            }
            on_update.emit(LevelDataPatch { grid: Some(next), ..Default::default() });
        })
    };
    let on_cols = {
        let on_resize = on_resize.clone();
        Callback::from(move |e: Event| {
            let v = e.target_unchecked_into::<HtmlInputElement>().value();
            if let Some(next_cols) = parse_dimension(&v) {
                on_resize.emit((rows, next_cols));
            }
        })
    };
    let on_rows = {
        let on_resize = on_resize.clone();
        Callback::from(move |e: Event| {
            let v = e.target_unchecked_into::<HtmlInputElement>().value();
            if let Some(next_rows) = parse_dimension(&v) {
                on_resize.emit((next_rows, cols));
            }
        })
    };
    let on_dir = {
        let on_update = props.on_update.clone();
        Callback::from(move |e: InputEvent| {
            let v = e.target_unchecked_into::<HtmlInputElement>().value();
            if let Ok(dir) = v.parse::<i32>() {
                on_update.emit(LevelDataPatch { start_pos: Some(StartPos { dir: Some(dir), ..start }), ..Default::default() });
            }
        })
    };
    let on_cell = {
        let on_update = props.on_update.clone();
        let selected = selected.clone();
        let grid = grid.clone();
        Callback::from(move |(x, y): (i32, i32)| {
            let tool = *selected;
            let next = grid.paint(x, y, tool);
            let start_pos = (tool == CellKind::Start).then_some(StartPos { x, y, ..start });
            on_update.emit(LevelDataPatch { grid: Some(next), start_pos, ..Default::default() });
        })
    };

    html! {
        <div style="display:flex; flex-direction:column; height:100%;">
            <div style="background:#161b22; padding:10px; border-bottom:1px solid #30363d; display:flex; flex-direction:column; gap:8px;">
                <div style="display:flex; justify-content:center; gap:16px; align-items:center; font-size:13px;">
                    <label>{"Cols "}<input type="number" min="3" max="50" value={cols.to_string()} onchange={on_cols} style="width:48px;" /></label>
                    <label>{"Rows "}<input type="number" min="3" max="50" value={rows.to_string()} onchange={on_rows} style="width:48px;" /></label>
                    <label>{"Direction "}<input type="range" min="0" max="3" step="1" value={start.direction().index().to_string()} oninput={on_dir} style="width:64px;" /></label>
                    <span style={format!("display:inline-block; transform:rotate({}deg); transition:transform 0.2s;", rotation)}>{ PLAYER_GLYPH }</span>
                    <span style="opacity:0.7;">{ start.direction().label() }</span>
                </div>
                <div style="display:flex; justify-content:center; gap:6px;">
                    { for TOOLS.iter().map(|tool| {
                        let tool = *tool;
                        let active = *selected == tool;
                        let onclick = {
                            let selected = selected.clone();
                            Callback::from(move |_: MouseEvent| selected.set(tool))
                        };
                        let border = if active { "#58a6ff" } else { "#30363d" };
                        html! {
                            <button {onclick} style={format!("padding:4px 10px; border:2px solid {}; border-radius:6px;", border)}>
                                { format!("{} {}", if tool == CellKind::Start { PLAYER_GLYPH } else { cell_glyph(tool) }, tool.label()) }
                            </button>
                        }
                    }) }
                </div>
            </div>
            <div style="flex:1; padding:16px; display:flex; justify-content:center; align-items:center; background:#0d1117; overflow:hidden;">
                <div style={format!("display:grid; grid-template-columns:repeat({}, 1fr); gap:1px; padding:2px; background:#34495e; aspect-ratio:{} / {}; width:100%; max-height:100%; margin:auto;", cols, cols, rows)}>
                    { for grid.row_slices().enumerate().flat_map(|(y, row)| {
                        let on_cell = on_cell.clone();
                        let font_size = font_size.clone();
                        row.iter().enumerate().map(move |(x, cell)| {
                            let onclick = {
                                let on_cell = on_cell.clone();
                                let (x, y) = (x as i32, y as i32);
                                Callback::from(move |_: MouseEvent| on_cell.emit((x, y)))
                            };
                            let is_start = *cell == CellKind::Start;
                            html! {
                                <div key={format!("{}-{}", y, x)} {onclick} style={format!("display:flex; justify-content:center; align-items:center; cursor:pointer; position:relative; background:{};", cell_color(*cell))}>
                                    <span style={format!("font-size:{}; opacity:{};", font_size, if is_start { "0.3" } else { "1" })}>
                                        { if is_start { "" } else { cell_glyph(*cell) } }
                                    </span>
                                    { if is_start { html!{
                                        <div style={format!("position:absolute; transform:rotate({}deg); font-size:{}; transition:transform 0.2s;", rotation, font_size)}>{ PLAYER_GLYPH }</div>
                                    } } else { html!{} } }
                                </div>
                            }
                        })
                    }) }
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Grid;

    #[test]
    fn unreadable_dimensions_leave_the_grid_alone() {
        assert_eq!(parse_dimension(""), None);
        assert_eq!(parse_dimension("abc"), None);
        assert_eq!(parse_dimension("-4"), None);
        assert_eq!(parse_dimension(" 12 "), Some(12));
    }

    #[test]
    fn readable_dimensions_are_still_clamped_by_resize() {
        let grid = Grid::from_codes(&[&[4, 4, 4, 4], &[4, 2, 3, 4], &[4, 4, 4, 4]]).unwrap();
        let next = grid.resize(3, parse_dimension("1").unwrap());
        assert_eq!(next.cols(), 3);
    }
}
