/*
segment.rs

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

//! Plan and place a bridge segment from an island.
//!
//! Three rules keep the puzzle valid while growing it:
//!
//! - the scan stops on the first existing island, so that new bridges can land on islands that
//!   are already part of the puzzle,
//! - two islands are never adjacent (at least one cell between them),
//! - a bridge never crosses or overlaps another one, and an island is never created on a
//!   bridge.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::grid::{Coord, GridError, GridState, Orientation};
use crate::config::{MAX_DEGREE, MIN_SPAN};

/// Vertical bridges draw their span from `[3, max_span - VERTICAL_SPAN_SHRINK]`.
pub const VERTICAL_SPAN_SHRINK: usize = 1;

/// Growth direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    PlusX,
    MinusX,
    PlusY,
    MinusY,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::PlusX,
        Direction::MinusX,
        Direction::PlusY,
        Direction::MinusY,
    ];

    /// Axis of the bridges grown in this direction.
    pub fn orientation(&self) -> Orientation {
        match self {
            Direction::PlusX | Direction::MinusX => Orientation::Horizontal,
            Direction::PlusY | Direction::MinusY => Orientation::Vertical,
        }
    }

    /// Next cell in this direction. `None` when leaving the grid through the low border; the
    /// high border is checked by the caller against the grid size.
    pub fn step(&self, cell: Coord) -> Option<Coord> {
        let (x, y) = cell;
        match self {
            Direction::PlusX => Some((x + 1, y)),
            Direction::MinusX => x.checked_sub(1).map(|x| (x, y)),
            Direction::PlusY => Some((x, y + 1)),
            Direction::MinusY => y.checked_sub(1).map(|y| (x, y)),
        }
    }

    /// Return the four directions in a random order.
    pub fn shuffled(rng: &mut impl Rng) -> [Direction; 4] {
        let mut order: [Direction; 4] = Self::ALL;
        order.shuffle(rng);
        order
    }
}

/// Bridge between two islands.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct BridgeSegment {
    /// Island the bridge starts from.
    pub from: Coord,

    /// Island the bridge ends on.
    pub to: Coord,

    pub orientation: Orientation,

    /// Number of parallel bridges, 1 or 2.
    pub multiplicity: usize,
}

impl BridgeSegment {
    /// Create a segment between two cells on the same row or column.
    pub fn new(from: Coord, to: Coord, multiplicity: usize) -> Self {
        let orientation: Orientation = if from.1 == to.1 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        Self {
            from,
            to,
            orientation,
            multiplicity,
        }
    }

    /// Distance between the two islands.
    pub fn length(&self) -> usize {
        self.from.0.abs_diff(self.to.0) + self.from.1.abs_diff(self.to.1)
    }

    /// Cells strictly between the two islands.
    pub fn interior(&self) -> Vec<Coord> {
        match self.orientation {
            Orientation::Horizontal => {
                let y: usize = self.from.1;
                let (lo, hi) = (self.from.0.min(self.to.0), self.from.0.max(self.to.0));
                (lo + 1..hi).map(|x| (x, y)).collect()
            }
            Orientation::Vertical => {
                let x: usize = self.from.0;
                let (lo, hi) = (self.from.1.min(self.to.1), self.from.1.max(self.to.1));
                (lo + 1..hi).map(|y| (x, y)).collect()
            }
        }
    }
}

/// Segment planner object.
#[derive(Debug, Clone)]
pub struct SegmentPlanner {
    /// Upper bound of the span drawn for horizontal bridges.
    max_span: usize,
}

impl SegmentPlanner {
    /// Create the object.
    pub fn new(max_span: usize) -> Self {
        Self { max_span }
    }

    /// Range of the target span for the given orientation.
    pub fn span_range(&self, orientation: Orientation) -> RangeInclusive<usize> {
        let upper: usize = match orientation {
            Orientation::Horizontal => self.max_span,
            Orientation::Vertical => self.max_span.saturating_sub(VERTICAL_SPAN_SHRINK),
        };
        MIN_SPAN..=upper.max(MIN_SPAN)
    }

    /// Try to place a bridge from `origin` in the given direction.
    ///
    /// Return `None` when no valid bridge exists for the drawn span. In that case the grid is not
    /// modified.
    ///
    /// # Errors
    ///
    /// A [`GridError`] means that the grid invariants are broken and the generation must stop.
    pub fn try_extend(
        &self,
        grid: &mut GridState,
        origin: Coord,
        direction: Direction,
        rng: &mut impl Rng,
    ) -> Result<Option<BridgeSegment>, GridError> {
        let span: usize = rng.random_range(self.span_range(direction.orientation()));

        let Some(terminator) = Self::scan(grid, origin, direction, span) else {
            debug!("    {origin:?} {direction:?}: too close to an island or the border");
            return Ok(None);
        };

        // Neither the interior nor the terminator can already hold a bridge
        let mut segment: BridgeSegment = BridgeSegment::new(origin, terminator, 0);
        let interior: Vec<Coord> = segment.interior();
        if interior
            .iter()
            .chain(std::iter::once(&terminator))
            .any(|c| grid.is_bridge(*c))
        {
            debug!("    {origin:?} {direction:?}: crossing a bridge before {terminator:?}");
            return Ok(None);
        }

        segment.multiplicity = rng.random_range(1..=2);
        if grid.degree_at(origin) + segment.multiplicity > MAX_DEGREE
            || grid.degree_at(terminator) + segment.multiplicity > MAX_DEGREE
        {
            debug!("    {origin:?} {direction:?}: island capacity exceeded");
            return Ok(None);
        }

        grid.mark_occupied(&interior, segment.orientation, segment.multiplicity)?;
        grid.increment_degree(origin, segment.multiplicity)?;
        grid.increment_degree(terminator, segment.multiplicity)?;
        debug!(
            "    Bridge {origin:?} -> {terminator:?} x{}",
            segment.multiplicity
        );
        Ok(Some(segment))
    }

    /// Walk from `origin` for at most `span` cells and return the terminator.
    ///
    /// The walk stops early on the grid border or on an existing island.
    /// Return `None` if the terminator is adjacent to the origin.
    fn scan(grid: &GridState, origin: Coord, direction: Direction, span: usize) -> Option<Coord> {
        let mut current: Coord = origin;
        let mut steps: usize = 0;

        while steps < span {
            let Some(next) = direction.step(current).filter(|c| grid.contains(*c)) else {
                break;
            };
            current = next;
            steps += 1;
            if grid.degree_at(current) > 0 {
                break;
            }
        }

        if steps <= 1 { None } else { Some(current) }
    }
}
