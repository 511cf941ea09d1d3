/*
instance.rs

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

//! Solver-facing representation of a generated puzzle.
//!
//! The instance is written as logic program facts:
//!
//! ```text
//! % puzzle with 13 bridges
//! % instance is sat
//! % seed 42
//!
//! start(1, 1).
//! vertex(1, 1, 3). vertex(1, 4, 2).
//! vertex(4, 1, 3). vertex(4, 4, 4).
//! ```
//!
//! There is one line for each grid row `x` that holds at least one island.
//! The start island is the first island in row-major order.
//! The output only depends on the final grid, not on the order in which the bridges were placed.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::generation::{Generation, Mode};
use super::grid::{Coord, GridError};
use super::segment::BridgeSegment;
use crate::config::MAX_DEGREE;

/// Island of the puzzle.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Island {
    pub x: usize,
    pub y: usize,

    /// Number of bridges the solver must connect to this island.
    pub degree: usize,
}

/// Generated puzzle instance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Instance {
    pub mode: Mode,

    pub seed: u64,

    pub size: usize,

    /// Number of bridges, counting double bridges twice.
    pub bridges: usize,

    /// Start island, `None` if the grid has no island.
    pub start: Option<Coord>,

    /// Islands in row-major order.
    pub islands: Vec<Island>,

    /// Bridges placed by the generator. For a `sat` instance, they are a solution.
    pub segments: Vec<BridgeSegment>,
}

impl Instance {
    /// Build the instance from the final state of a generator.
    ///
    /// # Errors
    ///
    /// An island with more than [`MAX_DEGREE`] bridges cannot be solved and reveals a generator
    /// bug. Such an instance is never produced.
    pub fn from_generation(generation: &Generation) -> Result<Self, GridError> {
        let islands: Vec<Island> = generation
            .grid
            .islands()
            .map(|(x, y, degree)| {
                if degree > MAX_DEGREE {
                    Err(GridError::CapacityExceeded { x, y, degree })
                } else {
                    Ok(Island { x, y, degree })
                }
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            mode: generation.mode,
            seed: generation.seed,
            size: generation.grid.size(),
            bridges: generation.bridges,
            start: islands.first().map(|i| (i.x, i.y)),
            islands,
            segments: generation.segments.clone(),
        })
    }

    /// Render the instance as a JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render the instance as facts.
impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "% puzzle with {} bridges", self.bridges)?;
        match self.mode {
            Mode::Sat => writeln!(f, "% instance is sat")?,
            Mode::Unsat => writeln!(f, "% instance which is most probably unsat")?,
        }
        writeln!(f, "% seed {}", self.seed)?;
        writeln!(f)?;

        if let Some((x, y)) = self.start {
            writeln!(f, "start({x}, {y}).")?;
        }
        for row in self.islands.chunk_by(|a, b| a.x == b.x) {
            let facts: Vec<String> = row
                .iter()
                .map(|i| format!("vertex({}, {}, {}).", i.x, i.y, i.degree))
                .collect();
            writeln!(f, "{}", facts.join(" "))?;
        }
        Ok(())
    }
}
