//! Mergeviz - step-by-step traces of k-way merge strategies.
//!
//! Replays sequential folding, divide and conquer, and priority-queue merging
//! over sorted input sequences and records every observable step as a
//! self-contained [`Frame`](mergeviz_core::frame::Frame). A
//! [`PlaybackController`](playback::PlaybackController) then turns the trace
//! into a navigable, timed presentation.

pub mod config;
pub mod export;
pub mod layout;
pub mod playback;
pub mod trace;

mod error;
mod simulate;

pub use mergeviz_core::{color, element, frame, geometry};

pub use error::MergevizError;

use log::{debug, info};

use mergeviz_core::frame::{Frame, ReferenceLanguage};
use mergeviz_input::Sequences;

use config::AppConfig;
use export::TraceDocument;
use playback::PlaybackController;
use trace::{Algorithm, Trace, TraceAssembler};

/// The state of one visualization: selections, input, trace and cursor.
///
/// Changing the algorithm or the input reassembles the trace from scratch
/// and moves the cursor back to the first frame, paused.
///
/// # Examples
///
/// ```
/// use mergeviz::{Session, config::AppConfig, trace::Algorithm};
///
/// let mut session = Session::new(&AppConfig::default(), vec![vec![1, 4, 5], vec![1, 3, 4], vec![2, 6]]);
/// session.set_algorithm(Algorithm::DivideConquer);
///
/// let last = session.trace().len() as isize - 1;
/// session.playback_mut().seek(last);
/// assert_eq!(session.current_frame().result_values(), vec![1, 1, 2, 3, 4, 4, 5, 6]);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    assembler: TraceAssembler,
    algorithm: Algorithm,
    language: ReferenceLanguage,
    sequences: Sequences,
    trace: Trace,
    playback: PlaybackController,
}

impl Session {
    /// Create a session from the configured selections and the given input.
    ///
    /// `sequences` must each be sorted ascending; use [`Session::from_source`]
    /// for unvalidated text.
    pub fn new(config: &AppConfig, sequences: Sequences) -> Self {
        let assembler = TraceAssembler::new(config.layout().clone());
        let algorithm = config.playback().algorithm();
        let trace = assembler.assemble(algorithm, &sequences);
        let playback = PlaybackController::new(trace.len()).with_speed(config.playback().speed());

        Self {
            assembler,
            algorithm,
            language: config.playback().language(),
            sequences,
            trace,
            playback,
        }
    }

    /// Parse and validate `source`, then create a session for it.
    ///
    /// # Errors
    ///
    /// Returns [`MergevizError::Input`] if the text is malformed or violates
    /// an input limit.
    pub fn from_source(config: &AppConfig, source: &str) -> Result<Self, MergevizError> {
        info!("Parsing input");
        let sequences =
            mergeviz_input::parse(source).map_err(|err| MergevizError::new_input_error(err, source))?;
        Ok(Self::new(config, sequences))
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn language(&self) -> ReferenceLanguage {
        self.language
    }

    pub fn sequences(&self) -> &[Vec<i64>] {
        &self.sequences
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackController {
        &mut self.playback
    }

    /// Replace the input and reassemble.
    pub fn set_input(&mut self, sequences: Sequences) {
        self.sequences = sequences;
        self.reassemble();
    }

    /// Select another algorithm and reassemble.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
        self.reassemble();
    }

    /// Select the reference listing; the trace and cursor are kept.
    pub fn set_language(&mut self, language: ReferenceLanguage) {
        debug!(language = language.name(); "Reference language changed");
        self.language = language;
    }

    /// The frame under the cursor.
    pub fn current_frame(&self) -> &Frame {
        self.trace.frame_at(self.playback.current_frame())
    }

    /// Lines of the selected reference listing to highlight for the current frame.
    pub fn highlighted_lines(&self) -> &[u32] {
        self.current_frame().highlighted_lines().get(self.language)
    }

    /// Export the whole trace as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`MergevizError::Export`] if serialization fails.
    pub fn export_json(&self) -> Result<String, MergevizError> {
        TraceDocument::new(&self.trace, &self.sequences, self.language).to_json()
    }

    fn reassemble(&mut self) {
        self.trace = self.assembler.assemble(self.algorithm, &self.sequences);
        self.playback.load(self.trace.len());
    }
}

#[cfg(test)]
mod tests {
    use mergeviz_core::frame::StepKind;

    use crate::config::PlaybackConfig;

    use super::*;

    fn example() -> Sequences {
        vec![vec![1, 4, 5], vec![1, 3, 4], vec![2, 6]]
    }

    #[test]
    fn test_session_uses_config_selections() {
        let config = AppConfig::default().with_playback(PlaybackConfig::new(
            Algorithm::PriorityQueue,
            ReferenceLanguage::Python,
            2.0,
        ));
        let session = Session::new(&config, example());

        assert_eq!(session.algorithm(), Algorithm::PriorityQueue);
        assert_eq!(session.trace().algorithm(), Algorithm::PriorityQueue);
        assert_eq!(session.language(), ReferenceLanguage::Python);
        assert!((session.playback().speed() - 2.0).abs() < f64::EPSILON);
        assert_eq!(session.playback().total_frames(), session.trace().len());
    }

    #[test]
    fn test_changing_algorithm_resets_cursor() {
        let mut session = Session::new(&AppConfig::default(), example());
        session.playback_mut().seek(5);
        session.playback_mut().play();

        session.set_algorithm(Algorithm::DivideConquer);
        assert_eq!(session.playback().current_frame(), 0);
        assert!(!session.playback().is_playing());
        assert_eq!(session.playback().total_frames(), session.trace().len());
        assert_eq!(session.current_frame().step(), StepKind::Init);
    }

    #[test]
    fn test_changing_input_resets_cursor() {
        let mut session = Session::new(&AppConfig::default(), example());
        session.playback_mut().seek(3);

        session.set_input(vec![]);
        assert_eq!(session.trace().len(), 1);
        assert_eq!(session.playback().current_frame(), 0);
        assert_eq!(session.current_frame().step(), StepKind::Empty);
    }

    #[test]
    fn test_changing_language_keeps_cursor() {
        let mut session = Session::new(&AppConfig::default(), example());
        session.playback_mut().seek(0);
        assert_eq!(session.highlighted_lines(), &[3]);

        session.playback_mut().seek(2);
        session.set_language(ReferenceLanguage::JavaScript);
        assert_eq!(session.playback().current_frame(), 2);
        assert_eq!(
            session.highlighted_lines(),
            session.current_frame().highlighted_lines().get(ReferenceLanguage::JavaScript)
        );
    }

    #[test]
    fn test_from_source_keeps_source_on_error() {
        let err = Session::from_source(&AppConfig::default(), "[[2, 1]]").unwrap_err();
        match err {
            MergevizError::Input { err, src } => {
                assert_eq!(err.code(), mergeviz_input::ErrorCode::E101);
                assert_eq!(src, "[[2, 1]]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_export_json() {
        let session = Session::from_source(&AppConfig::default(), "[[1], [0]]").unwrap();
        let json = session.export_json().unwrap();
        assert!(json.contains("\"sequential\""));
        assert!(json.contains("\"frames\""));
    }
}
