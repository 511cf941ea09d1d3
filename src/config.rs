/*
config.rs

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

//! Generation settings and their defaults.
//!
//! The command line is the only source of configuration.
//! [`GrowerSettings`] drives the constructive (`sat`) mode and [`ScatterSettings`] the
//! saturating (`unsat`) mode.
//! Both are validated before any generation starts.

use std::error::Error;
use std::fmt;

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPL-3.0-or-later <https://www.gnu.org/licenses/gpl-3.0.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Maximum number of bridges (counting multiplicity) an island can carry.
pub const MAX_DEGREE: usize = 8;

/// Shortest target span drawn by the segment planner.
pub const MIN_SPAN: usize = 3;

/// Smallest grid on which a bridge (two islands and one interior cell) fits.
pub const MIN_SIZE: usize = 3;

/// Largest grid side. The grid holds `size × size` cells in memory.
pub const MAX_SIZE: usize = 4096;

pub const DEFAULT_SAT_SIZE: usize = 60;
pub const DEFAULT_SAT_MAX_SPAN: usize = 20;

pub const DEFAULT_UNSAT_SIZE: usize = 100;
pub const DEFAULT_UNSAT_MAX_SPAN: usize = 2;
pub const DEFAULT_UNSAT_TARGET: usize = 100_000;
pub const DEFAULT_UNSAT_RETRY_BUDGET: usize = 100_000;

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The grid cannot hold a single bridge.
    GridTooSmall { size: usize },

    /// The grid does not fit in memory.
    GridTooLarge { size: usize },

    /// The span cannot produce a bridge with an interior cell.
    SpanTooSmall { max_span: usize, min: usize },

    /// The span is longer than the largest grid.
    SpanTooLarge { max_span: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::GridTooSmall { size } => {
                write!(f, "grid size {size} is too small (minimum is {MIN_SIZE})")
            }
            ConfigError::GridTooLarge { size } => {
                write!(f, "grid size {size} is too large (maximum is {MAX_SIZE})")
            }
            ConfigError::SpanTooSmall { max_span, min } => {
                write!(f, "maximum span {max_span} is too small (minimum is {min})")
            }
            ConfigError::SpanTooLarge { max_span } => {
                write!(f, "maximum span {max_span} is too large (maximum is {MAX_SIZE})")
            }
        }
    }
}

impl Error for ConfigError {}

/// Check the bounds shared by both generators.
fn check_bounds(size: usize, max_span: usize, min_span: usize) -> Result<(), ConfigError> {
    if size < MIN_SIZE {
        return Err(ConfigError::GridTooSmall { size });
    }
    if size > MAX_SIZE {
        return Err(ConfigError::GridTooLarge { size });
    }
    if max_span < min_span {
        return Err(ConfigError::SpanTooSmall {
            max_span,
            min: min_span,
        });
    }
    if max_span > MAX_SIZE {
        return Err(ConfigError::SpanTooLarge { max_span });
    }
    Ok(())
}

/// Settings for the constructive generator.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GrowerSettings {
    /// Number of cells on each side of the square grid.
    pub size: usize,

    /// Upper bound of the span drawn for horizontal bridges.
    /// Vertical bridges use one cell less, see [`crate::generator::segment`].
    pub max_span: usize,
}

impl Default for GrowerSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_SAT_SIZE,
            max_span: DEFAULT_SAT_MAX_SPAN,
        }
    }
}

impl GrowerSettings {
    /// Verify that the settings can produce a puzzle.
    ///
    /// # Errors
    ///
    /// The vertical span range `[3, max_span - 1]` must not be empty, and the grid must hold at
    /// least one bridge. Neither the size nor the span can exceed [`MAX_SIZE`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_bounds(self.size, self.max_span, MIN_SPAN + 1)
    }
}

/// Settings for the saturating generator.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScatterSettings {
    /// Number of cells on each side of the square grid.
    pub size: usize,

    /// Maximum distance between the two endpoints drawn for a segment.
    pub max_span: usize,

    /// Number of segments to place before stopping.
    pub target_segments: usize,

    /// Number of consecutive failed attempts tolerated since the last placement.
    pub retry_budget: usize,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_UNSAT_SIZE,
            max_span: DEFAULT_UNSAT_MAX_SPAN,
            target_segments: DEFAULT_UNSAT_TARGET,
            retry_budget: DEFAULT_UNSAT_RETRY_BUDGET,
        }
    }
}

impl ScatterSettings {
    /// Verify that the settings can produce a segment.
    ///
    /// # Errors
    ///
    /// Two endpoints closer than two cells never enclose an interior cell.
    /// Neither the size nor the span can exceed [`MAX_SIZE`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_bounds(self.size, self.max_span, 2)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GrowerSettings::default().validate(), Ok(()));
        assert_eq!(ScatterSettings::default().validate(), Ok(()));
    }

    #[test]
    fn grower_rejects_small_values() {
        let settings = GrowerSettings {
            size: 2,
            max_span: 20,
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::GridTooSmall { size: 2 })
        );

        let settings = GrowerSettings {
            size: 10,
            max_span: 3,
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::SpanTooSmall {
                max_span: 3,
                min: 4
            })
        );
    }

    #[test]
    fn scatter_rejects_small_values() {
        let settings = ScatterSettings {
            size: 0,
            ..ScatterSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = ScatterSettings {
            max_span: 1,
            ..ScatterSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::SpanTooSmall {
                max_span: 1,
                min: 2
            })
        );
    }

    #[test]
    fn grower_rejects_large_values() {
        let settings = GrowerSettings {
            size: 1 << 33,
            max_span: 20,
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::GridTooLarge { size: 1 << 33 })
        );

        let settings = GrowerSettings {
            size: MAX_SIZE,
            max_span: MAX_SIZE,
        };
        assert_eq!(settings.validate(), Ok(()));

        let settings = GrowerSettings {
            size: 10,
            max_span: MAX_SIZE + 1,
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::SpanTooLarge {
                max_span: MAX_SIZE + 1
            })
        );
    }

    #[test]
    fn scatter_rejects_large_values() {
        let settings = ScatterSettings {
            size: usize::MAX,
            ..ScatterSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::GridTooLarge { size: usize::MAX })
        );

        let settings = ScatterSettings {
            size: 10,
            max_span: usize::MAX,
            ..ScatterSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ConfigError::SpanTooLarge {
                max_span: usize::MAX
            })
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::GridTooSmall { size: 1 }.to_string(),
            "grid size 1 is too small (minimum is 3)"
        );
        assert_eq!(
            ConfigError::GridTooLarge { size: 5000 }.to_string(),
            "grid size 5000 is too large (maximum is 4096)"
        );
    }
}
