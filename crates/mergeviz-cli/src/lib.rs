//! CLI logic for the mergeviz trace player.
//!
//! Resolves the input, assembles a trace for the selected algorithm and
//! either lists every frame, plays the trace in real time, or both exports
//! and lists it.

pub mod error_adapter;
pub mod report;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path, thread};

use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use mergeviz::{
    MergevizError, Session,
    config::{AppConfig, PlaybackConfig},
};
use mergeviz_input::{Preset, Sequences};

/// Run the mergeviz CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `MergevizError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or invalid input
/// - Trace export errors
pub fn run(args: &Args) -> Result<(), MergevizError> {
    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = apply_overrides(app_config, args);

    let mut session = match resolve_input(args)? {
        Input::Source(source) => Session::from_source(&app_config, &source)?,
        Input::Sequences(sequences) => Session::new(&app_config, sequences),
    };

    info!(
        algorithm = session.algorithm().name(),
        language = session.language().name(),
        frames = session.trace().len();
        "Trace ready"
    );

    if let Some(output) = &args.output {
        fs::write(output, session.export_json()?)?;
        info!(output_file = output.as_str(); "Trace exported successfully");
    }

    if args.play {
        play(&mut session);
    } else {
        let total = session.trace().len();
        for frame in session.trace() {
            print!("{}", report::render_frame(frame, total, session.language()));
        }
    }

    Ok(())
}

/// Command-line selections take precedence over the configuration file.
fn apply_overrides(config: AppConfig, args: &Args) -> AppConfig {
    let playback = config.playback();
    let speed = match args.speed {
        Some(speed) if speed.is_finite() && speed > 0.0 => speed,
        Some(speed) => {
            warn!(speed = speed; "Ignoring invalid speed, keeping the configured one");
            playback.speed()
        }
        None => playback.speed(),
    };
    let playback = PlaybackConfig::new(
        args.algorithm.unwrap_or(playback.algorithm()),
        args.language.unwrap_or(playback.language()),
        speed,
    );
    config.with_playback(playback)
}

enum Input {
    /// Text still to be parsed and validated
    Source(String),
    Sequences(Sequences),
}

fn resolve_input(args: &Args) -> Result<Input, MergevizError> {
    if let Some(preset) = args.preset {
        debug!(preset = preset.name(); "Using preset input");
        return Ok(Input::Sequences(preset.sequences()));
    }

    if args.random {
        let sequences = match args.seed {
            Some(seed) => mergeviz_input::random_sequences(&mut StdRng::seed_from_u64(seed)),
            None => mergeviz_input::random_sequences(&mut rand::rng()),
        };
        info!(sequences:? = sequences; "Generated random input");
        return Ok(Input::Sequences(sequences));
    }

    match &args.input {
        Some(input) if input.trim_start().starts_with('[') => Ok(Input::Source(input.clone())),
        Some(path) => {
            info!(input_path = path.as_str(); "Reading input file");
            Ok(Input::Source(fs::read_to_string(Path::new(path))?))
        }
        None => {
            debug!("No input given, using the example preset");
            Ok(Input::Sequences(Preset::Example.sequences()))
        }
    }
}

/// Prints frames as the playback timer advances until playback pauses at the end.
fn play(session: &mut Session) {
    let total = session.trace().len();
    session.playback_mut().play();
    print!("{}", report::render_frame(session.current_frame(), total, session.language()));

    while session.playback().is_playing() {
        thread::sleep(session.playback().interval());
        if !session.playback_mut().tick() {
            break;
        }
        print!("{}", report::render_frame(session.current_frame(), total, session.language()));
    }
}
