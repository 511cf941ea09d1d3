/*
cli_options.rs

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

//! Process command-line options.
//!
//! Hashigen writes one puzzle instance per run, for testing a Hashiwokakero solver.
//!
//! # Examples
//!
//! Generate a satisfiable 10x10 instance:
//!
//! ```text
//! $ hashigen --size 10 --max-span 6 --seed 3
//! % puzzle with 12 bridges
//! % instance is sat
//! % seed 3
//!
//! start(1, 1).
//! vertex(1, 1, 3). vertex(1, 5, 2).
//! ...
//! ```
//!
//! Generate an instance that is most probably unsatisfiable, and save it as JSON:
//!
//! ```text
//! $ hashigen --mode unsat --size 50 --target 2000 --json --output unsat.json
//! ```
//!
//! Without `--seed`, a random seed is drawn and reported in the instance header, so that the
//! same instance can be produced again.

use clap::Parser;
use log::{debug, info};
use rand::Rng;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::{
    COPYRIGHT_NOTICE, DEFAULT_SAT_MAX_SPAN, DEFAULT_SAT_SIZE, DEFAULT_UNSAT_MAX_SPAN,
    DEFAULT_UNSAT_RETRY_BUDGET, DEFAULT_UNSAT_SIZE, DEFAULT_UNSAT_TARGET, GrowerSettings,
    ScatterSettings,
};
use crate::generator::generation::{Generation, Mode};
use crate::generator::grid::GridError;
use crate::generator::grower::ConstructiveGrower;
use crate::generator::instance::Instance;
use crate::generator::scatterer::SaturatingScatterer;

/// Exit status for invalid settings.
const EXIT_CONFIG: u8 = 2;

/// Exit status for generation and output failures.
const EXIT_FAILURE: u8 = 1;

/// Generate random Hashiwokakero instances for solver testing.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Generation mode
    #[arg(value_enum, short, long, default_value_t = Mode::Sat)]
    mode: Mode,

    /// Number of cells on each side of the grid [default: 60 (sat), 100 (unsat)]
    #[arg(short, long)]
    size: Option<usize>,

    /// Maximum bridge span [default: 20 (sat), 2 (unsat)]
    #[arg(short = 'b', long)]
    max_span: Option<usize>,

    /// Number of bridges to scatter (unsat mode)
    #[arg(short, long, default_value_t = DEFAULT_UNSAT_TARGET)]
    target: usize,

    /// Failed attempts tolerated since the last scattered bridge (unsat mode)
    #[arg(short, long, default_value_t = DEFAULT_UNSAT_RETRY_BUDGET)]
    retry_budget: usize,

    /// Seed of the random generator
    #[arg(long)]
    seed: Option<u64>,

    /// Write the instance to this file instead of the standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the instance as JSON, including the placed bridges
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// Print some statistics on the standard error after generating the instance
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    fn grower_settings(&self) -> GrowerSettings {
        GrowerSettings {
            size: self.size.unwrap_or(DEFAULT_SAT_SIZE),
            max_span: self.max_span.unwrap_or(DEFAULT_SAT_MAX_SPAN),
        }
    }

    fn scatter_settings(&self) -> ScatterSettings {
        ScatterSettings {
            size: self.size.unwrap_or(DEFAULT_UNSAT_SIZE),
            max_span: self.max_span.unwrap_or(DEFAULT_UNSAT_MAX_SPAN),
            target_segments: self.target,
            retry_budget: self.retry_budget,
        }
    }
}

/// Parse and process command-line options, and return the exit status.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    let seed: u64 = match args.seed {
        Some(s) => s,
        None => {
            let s: u64 = rand::rng().random();
            info!("No seed provided, using {s}");
            s
        }
    };

    //
    // Validate the settings and run the generator for the requested mode
    //
    let result: Result<Generation, GridError> = match args.mode {
        Mode::Sat => {
            let settings: GrowerSettings = args.grower_settings();
            if let Err(e) = settings.validate() {
                eprintln!("Error: {e}");
                return EXIT_CONFIG;
            }
            debug!("Constructive generation with {settings:?}");
            ConstructiveGrower::new(&settings).generate(seed)
        }
        Mode::Unsat => {
            let settings: ScatterSettings = args.scatter_settings();
            if let Err(e) = settings.validate() {
                eprintln!("Error: {e}");
                return EXIT_CONFIG;
            }
            debug!("Saturating generation with {settings:?}");
            SaturatingScatterer::new(&settings).generate(seed)
        }
    };

    // A grid error means that the generated puzzle is invalid: never write it
    let instance: Instance = match result.and_then(|g| {
        if args.summary {
            print_summary(&g);
        }
        Instance::from_generation(&g)
    }) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Bug: invalid instance generated with seed {seed}: {e}");
            return EXIT_FAILURE;
        }
    };

    match write_instance(&instance, args.output.as_deref(), args.json) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: cannot write the instance: {e}");
            EXIT_FAILURE
        }
    }
}

/// Write the instance as facts or as JSON, to a file or to the standard output.
fn write_instance(
    instance: &Instance,
    output: Option<&Path>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let text: String = if json {
        instance.to_json()? + "\n"
    } else {
        instance.to_string()
    };

    match output {
        Some(path) => {
            let file: File = File::create(path)?;
            let mut writer: BufWriter<File> = BufWriter::new(file);
            writer.write_all(text.as_bytes())?;
            writer.flush()?;
            debug!("Instance written to {path:?}");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Print statistics about the generation.
fn print_summary(generation: &Generation) {
    eprintln!(
        "
      mode = {}
      seed = {}
   islands = {}
  segments = {}
   bridges = {}
   degrees = {}
  attempts = {}
   stalled = {}
  duration = {}s",
        generation.mode,
        generation.seed,
        generation.grid.islands().count(),
        generation.segments.len(),
        generation.bridges,
        generation.grid.total_degree(),
        generation.attempts,
        generation.stalled,
        generation.duration
    );
}
