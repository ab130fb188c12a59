//! Collision and hit testing
//!
//! Two flavours: exact cell equality on the grid (walls, body, obstacles),
//! and distance checks between a pointer sample and circular entities.

use glam::Vec2;

use super::grid::Cell;
use crate::wrap_coord;

/// Whether `cell` lies inside `[0, grid_size)²`
#[inline]
pub fn cell_in_bounds(cell: Cell, grid_size: i32) -> bool {
    (0..grid_size).contains(&cell.x) && (0..grid_size).contains(&cell.y)
}

/// Wrap a cell onto the torus `[0, grid_size)²`
#[inline]
pub fn wrap_cell(cell: Cell, grid_size: i32) -> Cell {
    Cell::new(wrap_coord(cell.x, grid_size), wrap_coord(cell.y, grid_size))
}

/// Whether `cell` coincides with any of `cells`
pub fn cell_hits<'a>(cell: Cell, cells: impl IntoIterator<Item = &'a Cell>) -> bool {
    cells.into_iter().any(|&c| c == cell)
}

/// Signed distance from `p` to a circle (negative inside)
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Strict point-in-circle test: on the rim is a miss
#[inline]
pub fn point_hits_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    sd_circle(p, center, radius) < 0.0
}
