/*
grower.rs

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

//! Grow a connected puzzle.
//!
//! The growth starts from the seed island at `(1, 1)`.
//! Each new island is the far end of a bridge drawn from an island already in the puzzle, so the
//! islands are always connected and the placed bridges are a solution of the generated instance.

use log::{Level, debug, info, log_enabled};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

use super::generation::{Generation, Mode};
use super::grid::{Coord, GridError, GridState};
use super::segment::{BridgeSegment, Direction, SegmentPlanner};
use crate::config::GrowerSettings;

/// First island of every constructive puzzle.
pub const SEED_ISLAND: Coord = (1, 1);

/// [`ConstructiveGrower`] object.
pub struct ConstructiveGrower {
    settings: GrowerSettings,

    planner: SegmentPlanner,

    /// Islands that can still originate a bridge. An island appears once per bridge that ended
    /// on it during growth.
    frontier: Vec<Coord>,

    /// Number of iterations it took to generate the last puzzle.
    pub iteration: usize,

    /// Time when the generation started. Used to compute [`Generation::duration`].
    start: Instant,
}

impl ConstructiveGrower {
    /// Create the object.
    pub fn new(settings: &GrowerSettings) -> Self {
        Self {
            settings: *settings,
            planner: SegmentPlanner::new(settings.max_span),
            frontier: Vec::new(),
            iteration: 0,
            start: Instant::now(),
        }
    }

    /// Generate a puzzle from the given seed.
    ///
    /// # Errors
    ///
    /// A [`GridError`] reveals a broken invariant in the planner; no instance must be produced
    /// from that state.
    pub fn generate(&mut self, seed: u64) -> Result<Generation, GridError> {
        let mut rng: StdRng = StdRng::seed_from_u64(seed);
        let mut grid: GridState = GridState::new(self.settings.size)?;
        let mut segments: Vec<BridgeSegment> = Vec::new();
        let mut bridges: usize = 0;
        let mut attempts: usize = 0;

        self.iteration = 0;
        self.start = Instant::now();
        self.frontier.clear();
        self.frontier.push(SEED_ISLAND);

        while !self.frontier.is_empty() {
            self.iteration += 1;
            let index: usize = rng.random_range(0..self.frontier.len());
            let origin: Coord = self.frontier[index];
            debug!(
                "== Growing from {origin:?} (iteration {}, frontier {})",
                self.iteration,
                self.frontier.len()
            );

            let mut placed: Option<BridgeSegment> = None;
            for direction in Direction::shuffled(&mut rng) {
                attempts += 1;
                placed = self
                    .planner
                    .try_extend(&mut grid, origin, direction, &mut rng)?;
                if placed.is_some() {
                    break;
                }
            }

            match placed {
                // The origin stays in the frontier and can grow again on a later visit
                Some(segment) => {
                    debug!("    Grown {} cells to {:?}", segment.length(), segment.to);
                    bridges += segment.multiplicity;
                    self.frontier.push(segment.to);
                    segments.push(segment);
                }
                None => {
                    debug!("    Back: no direction left for {origin:?}");
                    self.frontier.remove(index);
                }
            }
        }

        let duration: f32 = self.start.elapsed().as_secs_f32();
        info!(
            "Grown {} segments ({bridges} bridges) in {} iterations",
            segments.len(),
            self.iteration
        );
        if log_enabled!(Level::Debug) {
            grid.debug();
        }

        Ok(Generation {
            mode: Mode::Sat,
            seed,
            grid,
            segments,
            bridges,
            attempts,
            stalled: false,
            duration,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::MAX_DEGREE;
    use std::collections::{HashMap, HashSet, VecDeque};

    fn grow(size: usize, max_span: usize, seed: u64) -> Generation {
        ConstructiveGrower::new(&GrowerSettings { size, max_span })
            .generate(seed)
            .unwrap()
    }

    /// Islands reachable from the seed island through the placed segments.
    fn reachable(g: &Generation) -> HashSet<Coord> {
        let mut adjacency: HashMap<Coord, Vec<Coord>> = HashMap::new();
        for s in &g.segments {
            adjacency.entry(s.from).or_default().push(s.to);
            adjacency.entry(s.to).or_default().push(s.from);
        }
        let mut seen: HashSet<Coord> = HashSet::from([SEED_ISLAND]);
        let mut queue: VecDeque<Coord> = VecDeque::from([SEED_ISLAND]);
        while let Some(c) = queue.pop_front() {
            for n in adjacency.get(&c).into_iter().flatten() {
                if seen.insert(*n) {
                    queue.push_back(*n);
                }
            }
        }
        seen
    }

    #[test]
    fn degree_bound() {
        for seed in 0..30 {
            let g = grow(12, 6, seed);
            assert!(g.grid.islands().count() > 1);
            for (x, y, d) in g.grid.islands() {
                assert!(
                    (1..=MAX_DEGREE).contains(&d),
                    "seed {seed}: ({x}, {y}) = {d}"
                );
            }
        }
    }

    #[test]
    fn islands_are_connected() {
        for seed in 0..30 {
            let g = grow(15, 8, seed);
            let reached: HashSet<Coord> = reachable(&g);
            for (x, y, _) in g.grid.islands() {
                assert!(reached.contains(&(x, y)), "seed {seed}: ({x}, {y})");
            }
        }
    }

    #[test]
    fn bridges_do_not_cross() {
        for seed in 0..30 {
            let g = grow(15, 8, seed);
            let mut used: HashSet<Coord> = HashSet::new();
            for s in &g.segments {
                assert!(s.length() >= 2);
                for c in s.interior() {
                    assert!(used.insert(c), "seed {seed}: {c:?} used twice");
                    assert_eq!(g.grid.degree_at(c), 0);
                    assert!(g.grid.is_occupied(c, s.orientation));
                }
            }
        }
    }

    #[test]
    fn segments_match_degrees() {
        for seed in 0..10 {
            let g = grow(20, 10, seed);
            let mut degrees: HashMap<Coord, usize> = HashMap::new();
            for s in &g.segments {
                *degrees.entry(s.from).or_default() += s.multiplicity;
                *degrees.entry(s.to).or_default() += s.multiplicity;
            }
            for (x, y, d) in g.grid.islands() {
                assert_eq!(degrees.get(&(x, y)), Some(&d));
            }
            assert_eq!(g.grid.total_degree(), 2 * g.bridges);
            assert_eq!(
                g.bridges,
                g.segments.iter().map(|s| s.multiplicity).sum::<usize>()
            );
        }
    }

    #[test]
    fn seed_island_is_used() {
        let g = grow(5, 20, 42);
        assert!(g.grid.degree_at(SEED_ISLAND) > 0);
        assert_eq!(g.segments[0].from, SEED_ISLAND);
        assert!(!g.stalled);
        assert_eq!(g.mode, Mode::Sat);
    }

    #[test]
    fn same_seed_same_puzzle() {
        let a = grow(30, 12, 7);
        let b = grow(30, 12, 7);
        assert_eq!(a.segments, b.segments);
        assert_eq!(
            a.grid.islands().collect::<Vec<_>>(),
            b.grid.islands().collect::<Vec<_>>()
        );
    }

    #[test]
    fn frontier_is_drained() {
        let mut grower = ConstructiveGrower::new(&GrowerSettings::default());
        let g = grower.generate(1).unwrap();
        assert!(grower.frontier.is_empty());
        assert!(grower.iteration > g.segments.len());
        assert!(g.attempts >= grower.iteration);
    }
}
