//! Command-line argument definitions for the mergeviz CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input, the algorithm and reference
//! language, playback speed, configuration file, trace export and logging
//! verbosity.

use clap::Parser;

use mergeviz::{frame::ReferenceLanguage, trace::Algorithm};
use mergeviz_input::Preset;

/// Command-line arguments for the mergeviz trace player
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Input sequences, inline or as a path to a file holding them
    #[arg(help = "Sequences such as [[1,4,5],[1,3,4],[2,6]], or a path to a file containing them")]
    pub input: Option<String>,

    /// Built-in sample input
    #[arg(long, conflicts_with_all = ["input", "random"])]
    pub preset: Option<Preset>,

    /// Generate a random sample input
    #[arg(long, conflicts_with = "input")]
    pub random: bool,

    /// Seed for `--random`
    #[arg(long, requires = "random")]
    pub seed: Option<u64>,

    /// Merge strategy (sequential, divide-conquer, priority-queue)
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Reference listing whose lines are shown (java, python, golang, javascript)
    #[arg(short, long)]
    pub language: Option<ReferenceLanguage>,

    /// Playback speed multiplier
    #[arg(short, long)]
    pub speed: Option<f64>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path of a JSON file to export the trace to
    #[arg(short, long)]
    pub output: Option<String>,

    /// Play the trace in real time instead of listing every frame
    #[arg(long)]
    pub play: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
