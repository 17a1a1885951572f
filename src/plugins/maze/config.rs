//! Maze constants: fallback grid, start heading and cell glyphs.

use std::sync::OnceLock;

use crate::model::{CellKind, Grid};

/// South. Used when a level's start position carries no heading.
pub const DEFAULT_START_DIR: i32 = 1;

const DEFAULT_GRID_CODES: [[u8; 8]; 5] = [
    [4, 4, 4, 4, 4, 4, 4, 4],
    [4, 2, 1, 1, 1, 1, 3, 4],
    [4, 4, 4, 4, 4, 4, 4, 4],
    [4, 4, 4, 4, 4, 4, 4, 4],
    [4, 4, 4, 4, 4, 4, 4, 4],
];

/// Grid used by levels that do not supply their own.
pub fn default_grid() -> &'static Grid {
    static GRID: OnceLock<Grid> = OnceLock::new();
    GRID.get_or_init(|| {
        Grid::from_rows(
            DEFAULT_GRID_CODES
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|&c| CellKind::try_from(c).unwrap_or(CellKind::Wall))
                        .collect()
                })
                .collect(),
        )
    })
}

pub const PLAYER_GLYPH: &str = "🤖";

pub fn cell_glyph(kind: CellKind) -> &'static str {
    match kind {
        CellKind::Empty => "⬛",
        CellKind::Floor => "⬜",
        CellKind::Start => "🟩",
        CellKind::Goal => "🏁",
        CellKind::Wall => "🧱",
    }
}

pub fn cell_color(kind: CellKind) -> &'static str {
    match kind {
        CellKind::Empty => "#0d1117",
        CellKind::Floor => "#ecf0f1",
        CellKind::Start => "#2ecc71",
        CellKind::Goal => "#e74c3c",
        CellKind::Wall => "#2c3e50",
    }
}

/// Player sprite rotation in degrees for a heading index.
pub fn sprite_rotation(dir_index: i32) -> i32 {
    dir_index * 90 + 90
}
