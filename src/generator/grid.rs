/*
grid.rs

Copyright 2025 Hervé Quatremain

This file is part of Hashigen.

Hashigen is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Hashigen is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Hashigen. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Island degrees and bridge occupancy on the square lattice.
//!
//! Coordinates are 1-based: `(1, 1)` is the first cell and `(size, size)` the last one.
//! The `x` coordinate is the row in the emitted instance.

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

use crate::config::MAX_DEGREE;

/// Cell coordinates `(x, y)`.
pub type Coord = (usize, usize);

/// Axis of a bridge.
///
/// - a `Horizontal` bridge keeps `y` and runs along `x`.
/// - a `Vertical` bridge keeps `x` and runs along `y`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Bridge passing through a cell.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BridgeCell {
    pub orientation: Orientation,
    pub multiplicity: usize,
}

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GridError {
    /// The island would carry more than [`MAX_DEGREE`] bridges.
    CapacityExceeded { x: usize, y: usize, degree: usize },

    /// The cell is not on the lattice.
    OutOfBounds { x: usize, y: usize },

    /// The number of cells overflows.
    TooLarge { size: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::CapacityExceeded { x, y, degree } => write!(
                f,
                "island ({x}, {y}) has degree {degree}, more than {MAX_DEGREE} bridges"
            ),
            GridError::OutOfBounds { x, y } => write!(f, "cell ({x}, {y}) is outside the grid"),
            GridError::TooLarge { size } => write!(f, "a {size}x{size} grid is too large"),
        }
    }
}

impl Error for GridError {}

/// Grid state shared by the generators.
#[derive(Debug, Clone)]
pub struct GridState {
    /// Number of cells on each side.
    size: usize,

    /// Island degree for each cell, in row-major order. Zero means no island.
    degrees: Vec<usize>,

    /// Bridge occupancy for each cell, in row-major order.
    bridges: Vec<Option<BridgeCell>>,
}

impl GridState {
    /// Create an empty `size × size` grid.
    pub fn new(size: usize) -> Result<Self, GridError> {
        let cells: usize = size
            .checked_mul(size)
            .ok_or(GridError::TooLarge { size })?;
        Ok(Self {
            size,
            degrees: vec![0; cells],
            bridges: vec![None; cells],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell is on the lattice.
    pub fn contains(&self, cell: Coord) -> bool {
        (1..=self.size).contains(&cell.0) && (1..=self.size).contains(&cell.1)
    }

    fn index(&self, cell: Coord) -> Option<usize> {
        if self.contains(cell) {
            Some((cell.0 - 1) * self.size + cell.1 - 1)
        } else {
            None
        }
    }

    fn checked_index(&self, cell: Coord) -> Result<usize, GridError> {
        self.index(cell).ok_or(GridError::OutOfBounds {
            x: cell.0,
            y: cell.1,
        })
    }

    /// Degree of the island at the given cell. Cells outside the grid have no island.
    pub fn degree_at(&self, cell: Coord) -> usize {
        self.index(cell).map_or(0, |i| self.degrees[i])
    }

    /// Add `by` bridges to the island at the given cell and return its new degree.
    ///
    /// # Errors
    ///
    /// The degree is left untouched if the result would exceed [`MAX_DEGREE`]. Callers check the
    /// capacity beforehand, so this error reveals a generator bug.
    pub fn increment_degree(&mut self, cell: Coord, by: usize) -> Result<usize, GridError> {
        let i: usize = self.checked_index(cell)?;
        let degree: usize = self.degrees[i] + by;
        if degree > MAX_DEGREE {
            return Err(GridError::CapacityExceeded {
                x: cell.0,
                y: cell.1,
                degree,
            });
        }
        self.degrees[i] = degree;
        Ok(degree)
    }

    /// Add `by` bridges to the island at the given cell without checking the degree bound.
    pub fn accumulate_degree(&mut self, cell: Coord, by: usize) -> Result<usize, GridError> {
        let i: usize = self.checked_index(cell)?;
        self.degrees[i] += by;
        if self.degrees[i] > MAX_DEGREE {
            debug!(
                "Island ({}, {}) now over capacity with degree {}",
                cell.0, cell.1, self.degrees[i]
            );
        }
        Ok(self.degrees[i])
    }

    /// Whether a bridge with the given orientation passes through the cell.
    pub fn is_occupied(&self, cell: Coord, orientation: Orientation) -> bool {
        matches!(self.bridge_at(cell), Some(b) if b.orientation == orientation)
    }

    /// Whether any bridge passes through the cell.
    pub fn is_bridge(&self, cell: Coord) -> bool {
        self.is_occupied(cell, Orientation::Horizontal)
            || self.is_occupied(cell, Orientation::Vertical)
    }

    /// Return the bridge passing through the cell.
    pub fn bridge_at(&self, cell: Coord) -> Option<BridgeCell> {
        self.index(cell).and_then(|i| self.bridges[i])
    }

    /// Record a bridge through all the given cells.
    ///
    /// # Errors
    ///
    /// Nothing is marked if one of the cells is outside the grid.
    pub fn mark_occupied(
        &mut self,
        cells: &[Coord],
        orientation: Orientation,
        multiplicity: usize,
    ) -> Result<(), GridError> {
        let indices: Vec<usize> = cells
            .iter()
            .map(|c| self.checked_index(*c))
            .collect::<Result<_, _>>()?;
        for i in indices {
            self.bridges[i] = Some(BridgeCell {
                orientation,
                multiplicity,
            });
        }
        Ok(())
    }

    /// Remove and return the bridge passing through the cell.
    pub fn clear_bridge(&mut self, cell: Coord) -> Option<BridgeCell> {
        self.index(cell).and_then(|i| self.bridges[i].take())
    }

    /// Iterate over the islands in row-major order.
    ///
    /// Items are `(x, y, degree)` for the cells with a positive degree.
    pub fn islands(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.degrees
            .iter()
            .enumerate()
            .filter(|(_, d)| **d > 0)
            .map(|(i, d)| (i / self.size + 1, i % self.size + 1, *d))
    }

    /// Sum of the degrees of all the islands.
    pub fn total_degree(&self) -> usize {
        self.degrees.iter().sum()
    }

    /// Print the grid.
    pub fn debug(&self) {
        let mut s: String = String::new();
        for x in 1..=self.size {
            s.clear();
            for y in 1..=self.size {
                match (self.degree_at((x, y)), self.bridge_at((x, y))) {
                    (0, None) => s.push_str(" ."),
                    (0, Some(b)) => match (b.orientation, b.multiplicity) {
                        (Orientation::Horizontal, 1) => s.push_str(" |"),
                        (Orientation::Horizontal, _) => s.push_str(" H"),
                        (Orientation::Vertical, 1) => s.push_str(" -"),
                        (Orientation::Vertical, _) => s.push_str(" ="),
                    },
                    (d, _) => s.push_str(&format!("{d:>2}")),
                }
            }
            debug!("{s}");
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_grid_is_empty() {
        let grid = GridState::new(4).unwrap();
        assert_eq!(grid.size(), 4);
        assert_eq!(grid.islands().count(), 0);
        assert_eq!(grid.total_degree(), 0);
        assert!(!grid.is_bridge((2, 2)));
    }

    #[test]
    fn cell_count_overflow() {
        assert_eq!(
            GridState::new(1 << 33).map(|g| g.size()),
            Err(GridError::TooLarge { size: 1 << 33 })
        );
        assert_eq!(
            GridState::new(usize::MAX).map(|g| g.size()),
            Err(GridError::TooLarge { size: usize::MAX })
        );
    }

    #[test]
    fn bounds() {
        let grid = GridState::new(3).unwrap();
        assert!(grid.contains((1, 1)));
        assert!(grid.contains((3, 3)));
        assert!(!grid.contains((0, 1)));
        assert!(!grid.contains((1, 4)));
        assert_eq!(grid.degree_at((0, 0)), 0);
        assert_eq!(grid.degree_at((4, 1)), 0);
    }

    #[test]
    fn increment_respects_capacity() {
        let mut grid = GridState::new(3).unwrap();
        assert_eq!(grid.increment_degree((2, 3), 2), Ok(2));
        assert_eq!(grid.increment_degree((2, 3), 6), Ok(8));
        assert_eq!(
            grid.increment_degree((2, 3), 1),
            Err(GridError::CapacityExceeded {
                x: 2,
                y: 3,
                degree: 9
            })
        );
        // Unchanged after the failure
        assert_eq!(grid.degree_at((2, 3)), 8);
        assert_eq!(
            grid.increment_degree((4, 1), 1),
            Err(GridError::OutOfBounds { x: 4, y: 1 })
        );
    }

    #[test]
    fn accumulate_ignores_capacity() {
        let mut grid = GridState::new(3).unwrap();
        assert_eq!(grid.accumulate_degree((1, 1), 7), Ok(7));
        assert_eq!(grid.accumulate_degree((1, 1), 4), Ok(11));
        assert_eq!(grid.degree_at((1, 1)), 11);
    }

    #[test]
    fn occupancy_keeps_orientation() {
        let mut grid = GridState::new(5).unwrap();
        grid.mark_occupied(&[(2, 1), (3, 1)], Orientation::Horizontal, 2)
            .unwrap();
        assert!(grid.is_occupied((2, 1), Orientation::Horizontal));
        assert!(!grid.is_occupied((2, 1), Orientation::Vertical));
        assert!(grid.is_bridge((3, 1)));
        assert!(!grid.is_bridge((4, 1)));
        assert_eq!(
            grid.clear_bridge((3, 1)),
            Some(BridgeCell {
                orientation: Orientation::Horizontal,
                multiplicity: 2
            })
        );
        assert!(!grid.is_bridge((3, 1)));
        assert_eq!(grid.clear_bridge((3, 1)), None);
    }

    #[test]
    fn mark_outside_marks_nothing() {
        let mut grid = GridState::new(3).unwrap();
        assert_eq!(
            grid.mark_occupied(&[(1, 2), (1, 4)], Orientation::Vertical, 1),
            Err(GridError::OutOfBounds { x: 1, y: 4 })
        );
        assert!(!grid.is_bridge((1, 2)));
    }

    #[test]
    fn islands_in_row_major_order() {
        let mut grid = GridState::new(4).unwrap();
        grid.increment_degree((3, 1), 1).unwrap();
        grid.increment_degree((1, 4), 2).unwrap();
        grid.increment_degree((1, 2), 3).unwrap();
        let islands: Vec<(usize, usize, usize)> = grid.islands().collect();
        assert_eq!(islands, vec![(1, 2, 3), (1, 4, 2), (3, 1, 1)]);
        assert_eq!(grid.total_degree(), 6);
    }
}
