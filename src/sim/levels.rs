//! Built-in level catalogue
//!
//! Codes: 0 floor, 1 wall, 2 quiz trigger, 9 player start.

use glam::Vec2;

use super::grid::GridMap;
use crate::consts::{CELL_SIZE, ORIGIN_OFFSET};
use crate::error::{Error, Result};

/// Number of built-in levels; the last one is the final level
pub const LEVEL_COUNT: u32 = 3;

const LEVEL_1: [[u8; 12]; 11] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 9, 0, 0, 0, 0, 1, 2, 0, 0, 2, 1],
    [1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 1, 2, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 2, 0, 0, 0, 2, 0, 1],
    [1, 2, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 0, 0, 2, 1, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 0, 1, 1, 1, 2, 1, 1, 0, 1],
    [1, 2, 0, 0, 0, 0, 0, 0, 0, 2, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const LEVEL_2: [[u8; 14]; 9] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 9, 0, 2, 2, 0, 1, 0, 0, 0, 2, 0, 0, 1],
    [1, 1, 1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 0, 1],
    [1, 2, 0, 0, 1, 0, 0, 0, 0, 0, 0, 2, 0, 1],
    [1, 0, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 1, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 1],
    [1, 2, 0, 0, 0, 0, 0, 2, 0, 0, 0, 2, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

const LEVEL_3: [[u8; 12]; 11] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 9, 0, 2, 0, 0, 0, 0, 2, 0, 0, 1],
    [1, 0, 1, 1, 1, 1, 1, 1, 1, 1, 0, 1],
    [1, 0, 1, 2, 0, 0, 0, 0, 2, 1, 0, 1],
    [1, 0, 1, 0, 1, 1, 1, 1, 0, 1, 0, 1],
    [1, 2, 0, 0, 1, 2, 0, 1, 0, 0, 0, 1],
    [1, 1, 1, 0, 1, 2, 0, 1, 0, 1, 2, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1],
    [1, 2, 1, 1, 1, 1, 1, 1, 2, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// Parse built-in level `index` (1-based)
pub fn builtin(index: u32) -> Result<GridMap> {
    let offset = Vec2::splat(ORIGIN_OFFSET);
    match index {
        1 => GridMap::from_codes(&LEVEL_1, CELL_SIZE, offset),
        2 => GridMap::from_codes(&LEVEL_2, CELL_SIZE, offset),
        3 => GridMap::from_codes(&LEVEL_3, CELL_SIZE, offset),
        _ => Err(Error::UnknownLevel(index)),
    }
}
