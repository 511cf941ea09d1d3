/*
generation.rs

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

//! Result of a generator run.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::grid::GridState;
use super::segment::BridgeSegment;

/// Generation mode.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Grow a connected puzzle from `(1, 1)`; the instance has a solution.
    #[default]
    Sat,

    /// Scatter short bridges anywhere; the instance most probably has no solution.
    Unsat,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Sat => write!(f, "sat"),
            Mode::Unsat => write!(f, "unsat"),
        }
    }
}

/// Final state of a generator.
#[derive(Debug, Clone)]
pub struct Generation {
    pub mode: Mode,

    /// Seed of the random generator that produced this state.
    pub seed: u64,

    pub grid: GridState,

    /// Placed bridges, in placement order.
    pub segments: Vec<BridgeSegment>,

    /// Number of bridges, counting double bridges twice.
    pub bridges: usize,

    /// Number of placement attempts, successful or not.
    pub attempts: usize,

    /// Whether the saturating generator gave up before reaching its target.
    pub stalled: bool,

    /// Duration in seconds of the generation.
    pub duration: f32,
}
