/*
generator.rs

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

//! Generate random Hashiwokakero instances.
//!
//! Islands sit on a square [`grid::GridState`] and are linked by horizontal or vertical
//! bridges that never cross, each island carrying at most eight bridges.
//!
//! Two generators share the same grid:
//!
//! * [`grower::ConstructiveGrower`] grows a connected puzzle from the `(1, 1)` island by using a
//!   [`segment::SegmentPlanner`].
//!   The placed bridges form a solution, so the instance is satisfiable.
//!
//! * [`scatterer::SaturatingScatterer`] places short independent bridges anywhere on the grid.
//!   The islands are not connected and the instance is most probably unsatisfiable.
//!
//! Both return a [`generation::Generation`] object, which [`instance::Instance`] converts into
//! the facts read by the solver.

pub mod generation;
pub mod grid;
pub mod grower;
pub mod instance;
pub mod scatterer;
pub mod segment;
