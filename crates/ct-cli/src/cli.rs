// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless CT scan simulator")]
pub(crate) struct Cli {
    /// Directory holding saved preferences (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Ignore saved preferences entirely
    #[arg(long, global = true)]
    pub no_prefs: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Run one full 360° scan and print a summary
    Run(RunArgs),
    /// Print the attenuation of a single ray
    Sample(SampleArgs),
    /// Show or save preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

/// Slider overrides shared by `run` and `prefs save`.
#[derive(clap::Args, Debug, Clone, Copy)]
pub(crate) struct SliderArgs {
    /// Scan speed (gantry turns speed × 10 degrees per second)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub speed: Option<u32>,

    /// Object density (attenuation scales by density / 5)
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
    pub density: Option<i32>,
}

#[derive(clap::Args, Debug)]
pub(crate) struct RunArgs {
    #[command(flatten)]
    pub sliders: SliderArgs,

    /// Simulated frame length in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f64,

    /// Stop after this many ticks even if the scan has not completed
    #[arg(long, default_value_t = 1_000_000)]
    pub max_ticks: usize,

    /// Write the sinogram to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Export format for --output
    #[arg(long, value_enum, default_value_t = ExportFormat::Json)]
    pub format: ExportFormat,

    /// Also print the reconstruction log
    #[arg(long)]
    pub show_log: bool,
}

#[derive(clap::Args, Debug)]
pub(crate) struct SampleArgs {
    /// Scan angle in degrees
    #[arg(long)]
    pub angle: f64,

    /// Normalised detector position in [0, 1]
    #[arg(long)]
    pub detector: f64,

    /// Object density (defaults to saved prefs)
    #[arg(long, value_parser = clap::value_parser!(i32).range(0..))]
    pub density: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum PrefsAction {
    /// Print the effective preferences as JSON
    Show,
    /// Merge overrides into the saved preferences
    Save(SliderArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportFormat {
    /// Rows plus reconstruction log as JSON
    Json,
    /// Grayscale PNG of the painted sinogram
    Png,
    /// Grayscale PGM (binary PNM) of the painted sinogram
    Pgm,
}
