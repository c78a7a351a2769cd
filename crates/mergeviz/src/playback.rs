//! Playback controls for a trace.
//!
//! [`PlaybackController`] is the cursor into a trace: the current frame index,
//! whether playback is running, and the speed multiplier. It only knows the
//! number of frames, never their contents, so a trace can be replaced by
//! calling [`PlaybackController::load`] with the new length.
//!
//! Timing is driven from outside: whoever owns the timer calls
//! [`PlaybackController::tick`] every [`PlaybackController::interval`].

use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Speed multiplier used when none is configured.
pub const DEFAULT_SPEED: f64 = 1.0;

/// Speed multipliers offered to users, slowest first.
pub const SPEED_PRESETS: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

/// Milliseconds between frames at 1x speed.
const BASE_INTERVAL_MS: f64 = 1000.0;

/// Whether the cursor advances on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// Cursor over a trace of `total_frames` frames.
///
/// The index always stays within `[0, total_frames - 1]`; navigation past
/// either end is a no-op.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    current: usize,
    total: usize,
    state: PlaybackState,
    speed: f64,
}

impl PlaybackController {
    /// Create a paused controller at the first frame.
    ///
    /// A trace always holds at least one frame, so a `total_frames` of zero is
    /// treated as one.
    pub fn new(total_frames: usize) -> Self {
        Self {
            current: 0,
            total: total_frames.max(1),
            state: PlaybackState::Paused,
            speed: DEFAULT_SPEED,
        }
    }

    /// Sets the initial speed, see [`PlaybackController::set_speed`].
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.set_speed(speed);
        self
    }

    /// Switch to a new trace: back to the first frame, paused.
    pub fn load(&mut self, total_frames: usize) {
        self.total = total_frames.max(1);
        self.current = 0;
        self.state = PlaybackState::Paused;
        debug!(total_frames = self.total; "Playback loaded");
    }

    pub fn current_frame(&self) -> usize {
        self.current
    }

    pub fn total_frames(&self) -> usize {
        self.total
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_at_start(&self) -> bool {
        self.current == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.current == self.last()
    }

    fn last(&self) -> usize {
        self.total - 1
    }

    /// Start advancing on every tick.
    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    /// Play when paused, pause when playing.
    pub fn toggle(&mut self) {
        self.state = match self.state {
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
        };
    }

    /// Step forward one frame. Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.current += 1;
        true
    }

    /// Step backward one frame. Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.is_at_start() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Return to the first frame and pause.
    pub fn reset(&mut self) {
        self.current = 0;
        self.state = PlaybackState::Paused;
    }

    /// Jump to `index`, clamped into the trace.
    ///
    /// Negative indices clamp to the first frame.
    pub fn seek(&mut self, index: isize) {
        self.current = usize::try_from(index).map_or(0, |index| index.min(self.last()));
    }

    /// Change the speed multiplier.
    ///
    /// Only finite, positive values are accepted; anything else is ignored and
    /// `false` is returned.
    pub fn set_speed(&mut self, speed: f64) -> bool {
        if !speed.is_finite() || speed <= 0.0 {
            warn!(speed = speed; "Ignoring invalid playback speed");
            return false;
        }
        self.speed = speed;
        true
    }

    /// One firing of the playback timer.
    ///
    /// Advances one frame while playing and pauses once the last frame is
    /// reached. Returns whether the cursor moved.
    pub fn tick(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let moved = self.next();
        if self.is_at_end() {
            self.pause();
        }
        moved
    }

    /// Time between two ticks at the current speed.
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(BASE_INTERVAL_MS / self.speed / 1000.0)
    }

    /// Position within the trace, from 0.0 at the first frame to 1.0 at the last.
    pub fn progress(&self) -> f64 {
        if self.total <= 1 {
            1.0
        } else {
            self.current as f64 / self.last() as f64
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Serializable snapshot of a [`PlaybackController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub current_frame: usize,
    pub total_frames: usize,
    pub state: PlaybackState,
    pub speed: f64,
    pub progress: f64,
}

impl From<&PlaybackController> for PlaybackStatus {
    fn from(playback: &PlaybackController) -> Self {
        Self {
            current_frame: playback.current,
            total_frames: playback.total,
            state: playback.state,
            speed: playback.speed,
            progress: playback.progress(),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Command {
        Play,
        Pause,
        Toggle,
        Next,
        Previous,
        Reset,
        Seek(isize),
        Tick,
    }

    fn command_strategy() -> impl Strategy<Value = Command> {
        prop_oneof![
            Just(Command::Play),
            Just(Command::Pause),
            Just(Command::Toggle),
            Just(Command::Next),
            Just(Command::Previous),
            Just(Command::Reset),
            (-50isize..50).prop_map(Command::Seek),
            Just(Command::Tick),
        ]
    }

    fn apply(playback: &mut PlaybackController, command: &Command) {
        match command {
            Command::Play => playback.play(),
            Command::Pause => playback.pause(),
            Command::Toggle => playback.toggle(),
            Command::Next => {
                playback.next();
            }
            Command::Previous => {
                playback.previous();
            }
            Command::Reset => playback.reset(),
            Command::Seek(index) => playback.seek(*index),
            Command::Tick => {
                playback.tick();
            }
        }
    }

    fn check_cursor_stays_in_bounds(total: usize, commands: &[Command]) -> Result<(), TestCaseError> {
        let mut playback = PlaybackController::new(total);
        for command in commands {
            apply(&mut playback, command);
            prop_assert!(playback.current_frame() < playback.total_frames());
            prop_assert!((0.0..=1.0).contains(&playback.progress()));
            if playback.is_at_end() {
                // a tick at the last frame always leaves playback paused
                let mut probe = playback.clone();
                probe.tick();
                prop_assert!(!probe.is_playing());
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn cursor_stays_in_bounds(
            total in 1usize..30,
            commands in prop::collection::vec(command_strategy(), 0..60),
        ) {
            check_cursor_stays_in_bounds(total, &commands)?;
        }
    }
}
