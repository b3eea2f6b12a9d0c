//! Fixed-size square cell grid.
//!
//! Every operation borrows the grid and returns a fresh one, so a caller that
//! is still iterating the old snapshot never observes a half-applied change.

mod fill;
mod transform;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Side length used when no size is configured.
pub const DEFAULT_GRID_SIZE: usize = 21;

/// Largest side length a grid can have.
pub const MAX_GRID_SIZE: usize = 4096;

/// Paint colors a cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paint {
    /// Stroke color for rasterized shapes ("blue")
    Primary,
    /// Region fill color ("purple")
    Fill,
}

impl Paint {
    pub fn glyph(&self) -> char {
        match self {
            Self::Primary => '#',
            Self::Fill => '@',
        }
    }
}

/// Cell state: `None` is empty.
pub type Cell = Option<Paint>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty `size` x `size` grid. Sizes above [`MAX_GRID_SIZE`]
    /// are clamped to it.
    pub fn new(size: usize) -> Self {
        if size > MAX_GRID_SIZE {
            log::warn!("grid size {} clamped to {}", size, MAX_GRID_SIZE);
        }
        let size = size.min(MAX_GRID_SIZE);
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if (row, col) lies inside the grid
    #[inline]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    #[inline]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        self.in_bounds(row, col)
            .then(|| row as usize * self.size + col as usize)
    }

    /// Cell at (row, col), `None` when out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Cell at a point (`x` = row, `y` = col)
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.get(p.x, p.y)
    }

    /// Write a cell; returns false and leaves the grid alone when out of bounds
    pub(crate) fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            },
            None => false,
        }
    }

    /// Painted cells in row-major order as (row, col, paint)
    pub fn painted(&self) -> impl Iterator<Item = (i32, i32, Paint)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|paint| ((i / self.size) as i32, (i % self.size) as i32, paint))
        })
    }

    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Return a copy with every in-bounds point set to `paint`.
    /// Out-of-range points are dropped.
    pub fn paint(&self, points: &[Point], paint: Paint) -> Grid {
        let mut out = self.clone();
        let dropped = points
            .iter()
            .filter(|p| !out.set(p.x, p.y, Some(paint)))
            .count();
        if dropped > 0 {
            log::debug!("paint: dropped {} of {} points outside the grid", dropped, points.len());
        }
        out
    }

    /// Empty grid of the same size
    pub fn cleared(&self) -> Grid {
        Grid::new(self.size)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size.max(1)) {
            let line: String = row
                .iter()
                .map(|cell| cell.map_or('.', |p| p.glyph()))
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_drops_out_of_range_points() {
        let grid = Grid::new(5);
        let out = grid.paint(
            &[Point::new(0, 0), Point::new(4, 4), Point::new(5, 0), Point::new(-1, 2)],
            Paint::Primary,
        );
        assert_eq!(out.painted_count(), 2);
        assert_eq!(out.get(0, 0), Some(Some(Paint::Primary)));
        assert_eq!(out.get(4, 4), Some(Some(Paint::Primary)));
        // Source snapshot untouched
        assert_eq!(grid.painted_count(), 0);
    }

    #[test]
    fn test_paint_keeps_existing_cells() {
        let grid = Grid::new(5).paint(&[Point::new(1, 1)], Paint::Fill);
        let out = grid.paint(&[Point::new(2, 2)], Paint::Primary);
        assert_eq!(out.get(1, 1), Some(Some(Paint::Fill)));
        assert_eq!(out.get(2, 2), Some(Some(Paint::Primary)));
    }

    #[test]
    fn test_cleared_empties_everything() {
        let grid = Grid::new(4).paint(&[Point::new(0, 3), Point::new(3, 0)], Paint::Primary);
        let out = grid.cleared();
        assert_eq!(out.size(), 4);
        assert_eq!(out.painted_count(), 0);
    }

    #[test]
    fn test_display_renders_rows() {
        let grid = Grid::new(3)
            .paint(&[Point::new(0, 1)], Paint::Primary)
            .paint(&[Point::new(2, 2)], Paint::Fill);
        assert_eq!(grid.to_string(), ".#.\n...\n..@\n");
    }

    #[test]
    fn test_default_size() {
        assert_eq!(Grid::default().size(), DEFAULT_GRID_SIZE);
        assert_eq!(Grid::default().get(21, 0), None);
    }

    #[test]
    fn test_oversized_grid_is_clamped() {
        let grid = Grid::new(usize::MAX);
        assert_eq!(grid.size(), MAX_GRID_SIZE);
        let edge = MAX_GRID_SIZE as i32 - 1;
        let grid = grid.paint(&[Point::new(edge, edge), Point::new(edge + 1, 0)], Paint::Primary);
        assert_eq!(grid.painted().collect::<Vec<_>>(), vec![(edge, edge, Paint::Primary)]);
    }
}
