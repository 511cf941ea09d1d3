/*
scatterer.rs

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

//! Scatter short bridges over the grid.
//!
//! The bridges are independent from each other: the islands are not connected and their degrees
//! add up pressure that most probably cannot be satisfied.
//! An endpoint dropped on a cell crossed by an earlier bridge absorbs that bridge's multiplicity.
//! Degrees are not checked during placement. They stay within the limit because an island that
//! absorbed a bridge can only receive new bridges from the two perpendicular directions, and
//! [`super::instance::Instance::from_generation`] verifies it.

use log::{Level, debug, info, log_enabled};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use super::generation::{Generation, Mode};
use super::grid::{Coord, GridError, GridState, Orientation};
use super::segment::BridgeSegment;
use crate::config::ScatterSettings;

/// [`SaturatingScatterer`] object.
pub struct SaturatingScatterer {
    settings: ScatterSettings,

    /// Time when the generation started. Used to compute [`Generation::duration`].
    start: Instant,
}

impl SaturatingScatterer {
    /// Create the object.
    pub fn new(settings: &ScatterSettings) -> Self {
        Self {
            settings: *settings,
            start: Instant::now(),
        }
    }

    /// Scatter bridges until the target is reached or the retry budget is exhausted.
    ///
    /// Exhausting the budget is not an error: the returned [`Generation`] is flagged as
    /// [`Generation::stalled`] and holds the bridges placed so far.
    ///
    /// # Errors
    ///
    /// A [`GridError`] is only returned for a grid too large to allocate or for cells outside the
    /// grid, which reveals a bug.
    pub fn generate(&mut self, seed: u64) -> Result<Generation, GridError> {
        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        let mut grid: GridState = GridState::new(self.settings.size)?;
        let mut segments: Vec<BridgeSegment> = Vec::new();
        let mut bridges: usize = 0;
        let mut attempts: usize = 0;
        let mut failures: usize = 0;
        let mut stalled: bool = false;
        self.start = Instant::now();

        while segments.len() < self.settings.target_segments {
            if failures > self.settings.retry_budget {
                debug!(
                    "Giving up after {failures} failed attempts ({} segments placed)",
                    segments.len()
                );
                stalled = true;
                break;
            }
            attempts += 1;
            match self.try_scatter(&mut grid, &mut rng)? {
                Some(segment) => {
                    failures = 0;
                    bridges += segment.multiplicity;
                    segments.push(segment);
                }
                None => failures += 1,
            }
        }

        let duration: f32 = self.start.elapsed().as_secs_f32();
        info!(
            "Scattered {} segments ({bridges} bridges) in {attempts} attempts",
            segments.len()
        );
        if log_enabled!(Level::Debug) {
            grid.debug();
        }

        Ok(Generation {
            mode: Mode::Unsat,
            seed,
            grid,
            segments,
            bridges,
            attempts,
            stalled,
            duration,
        })
    }

    /// Draw one segment and place it if the cells between its endpoints are free.
    fn try_scatter(
        &self,
        grid: &mut GridState,
        rng: &mut impl Rng,
    ) -> Result<Option<BridgeSegment>, GridError> {
        let size: usize = self.settings.size;
        let line: usize = rng.random_range(1..=size);
        let t2: usize = rng.random_range(1..=size);
        let t3: usize = self.draw_near(t2, rng);
        let orientation: Orientation = if rng.random_bool(0.5) {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };

        let Some((from, to)) = Self::plan(grid, orientation, line, t2, t3) else {
            return Ok(None);
        };
        let multiplicity: usize = rng.random_range(1..=2);
        Self::place(grid, from, to, multiplicity).map(Some)
    }

    /// Return the endpoints of a bridge on `line` between `t2` and `t3`.
    ///
    /// The far endpoint is pulled back to the first island in between. Return `None` if the
    /// endpoints end up adjacent or if a bridge already runs between them.
    fn plan(
        grid: &GridState,
        orientation: Orientation,
        line: usize,
        t2: usize,
        t3: usize,
    ) -> Option<(Coord, Coord)> {
        let cell = |t: usize| -> Coord {
            match orientation {
                Orientation::Horizontal => (t, line),
                Orientation::Vertical => (line, t),
            }
        };

        let lo: usize = t2.min(t3);
        let mut hi: usize = t2.max(t3);
        if let Some(t) = (lo + 1..hi).find(|t| grid.degree_at(cell(*t)) > 0) {
            hi = t;
        }
        if hi <= lo + 1 {
            debug!("    {:?} -> {:?}: adjacent islands", cell(lo), cell(hi));
            return None;
        }
        if (lo + 1..hi).any(|t| grid.is_bridge(cell(t))) {
            debug!("    {:?} -> {:?}: crossing a bridge", cell(lo), cell(hi));
            return None;
        }
        Some((cell(lo), cell(hi)))
    }

    /// Place a bridge between two planned endpoints.
    ///
    /// Each endpoint gets the multiplicity of the new bridge plus the multiplicity of the bridge
    /// that was running through its cell, if any.
    fn place(
        grid: &mut GridState,
        from: Coord,
        to: Coord,
        multiplicity: usize,
    ) -> Result<BridgeSegment, GridError> {
        let segment: BridgeSegment = BridgeSegment::new(from, to, multiplicity);
        grid.mark_occupied(&segment.interior(), segment.orientation, multiplicity)?;
        for endpoint in [from, to] {
            let absorbed: usize = grid.clear_bridge(endpoint).map_or(0, |b| b.multiplicity);
            grid.accumulate_degree(endpoint, multiplicity + absorbed)?;
        }
        debug!("    Bridge {from:?} -> {to:?} x{multiplicity}");
        Ok(segment)
    }

    /// Draw a coordinate different from `t`, at most `max_span` cells away and inside the grid.
    fn draw_near(&self, t: usize, rng: &mut impl Rng) -> usize {
        let lo: usize = t.saturating_sub(self.settings.max_span).max(1);
        let hi: usize = t
            .saturating_add(self.settings.max_span)
            .min(self.settings.size);
        loop {
            let n: usize = rng.random_range(lo..=hi);
            if n != t {
                return n;
            }
        }
    }
}
