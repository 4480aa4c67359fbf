//! Scoring module - line clear points, drop points and level speed
//!
//! Line clears award a fixed table value multiplied by the current level.
//! Levels advance every ten lines and each level maps to a gravity interval;
//! levels past the end of the table use the fastest interval.

use crate::types::{
    HARD_DROP_POINTS, LEVEL_SPEEDS_MS, LINES_PER_LEVEL, LINE_SCORES, SOFT_DROP_POINTS,
};

/// Points for clearing `lines` rows at `level`
///
/// Anything other than 1-4 lines scores nothing.
pub fn line_clear_points(lines: usize, level: u32) -> u32 {
    match LINE_SCORES.get(lines) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn drop_points(cells: u32, is_hard_drop: bool) -> u32 {
    let per_cell = if is_hard_drop {
        HARD_DROP_POINTS
    } else {
        SOFT_DROP_POINTS
    };
    cells.saturating_mul(per_cell)
}

/// Level reached after clearing `total_lines`, counting up from `start_level`
pub fn level_for_lines(total_lines: u32, start_level: u32) -> u32 {
    start_level
        .max(1)
        .saturating_add(total_lines / LINES_PER_LEVEL)
}

/// Gravity interval for a level (in milliseconds)
pub fn drop_interval_ms(level: u32) -> u32 {
    let idx = (level.max(1) as usize - 1).min(LEVEL_SPEEDS_MS.len() - 1);
    LEVEL_SPEEDS_MS[idx]
}
