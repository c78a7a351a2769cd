//! Trace assembly.
//!
//! A [`Trace`] is the complete, ordered list of frames one simulator emits for
//! one input. [`TraceAssembler`] picks the simulator for an [`Algorithm`],
//! runs it against a fresh layout and hands back the finished trace; frames
//! are numbered by the [`TraceBuilder`] in the order they are pushed.

use std::{fmt, str::FromStr};

use log::{debug, info, trace};
use serde::{Deserialize, Serialize};

use mergeviz_core::frame::{Frame, FrameBuilder};

use crate::{
    config::LayoutConfig,
    layout::LayoutEngine,
    simulate::{self, Context},
};

/// A k-way merge strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    /// Fold the sequences into an accumulator one at a time
    #[default]
    Sequential,
    /// Recursively halve the list of sequences and merge pairwise
    DivideConquer,
    /// Repeatedly take the smallest head from a min-priority queue
    PriorityQueue,
}

impl Algorithm {
    /// Every algorithm, in display order.
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Sequential,
        Algorithm::DivideConquer,
        Algorithm::PriorityQueue,
    ];

    /// Returns the identifier used on the command line and in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Sequential => "sequential",
            Algorithm::DivideConquer => "divide-conquer",
            Algorithm::PriorityQueue => "priority-queue",
        }
    }

    /// Returns a human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Algorithm::Sequential => "Sequential merge",
            Algorithm::DivideConquer => "Divide and conquer",
            Algorithm::PriorityQueue => "Priority queue",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|a| a.name()).collect();
                format!("unknown algorithm `{s}`, expected one of: {}", names.join(", "))
            })
    }
}

/// The ordered frames of one simulation.
///
/// A trace always holds at least one frame, and frame `i` has id `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    algorithm: Algorithm,
    frames: Vec<Frame>,
}

impl Trace {
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; kept alongside [`Trace::len`].
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Returns the frame at `index`, clamped to the last frame.
    pub fn frame_at(&self, index: usize) -> &Frame {
        let last = self.frames.len() - 1;
        &self.frames[index.min(last)]
    }

    pub fn last(&self) -> &Frame {
        self.frame_at(usize::MAX)
    }

    /// Returns the merged values shown by the final frame.
    pub fn final_result(&self) -> Vec<i64> {
        self.last().result_values()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Accumulates frames during one simulation.
#[derive(Debug, Default)]
pub struct TraceBuilder {
    frames: Vec<Frame>,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finishes `frame` with the next free id and appends it.
    ///
    /// Returns the id assigned to the frame.
    pub fn push(&mut self, frame: FrameBuilder) -> usize {
        let id = self.frames.len();
        let frame = frame.build(id);
        trace!(id = id, step = frame.step().name(); "Frame emitted");
        self.frames.push(frame);
        id
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Turns the collected frames into a [`Trace`].
    ///
    /// # Panics
    ///
    /// Panics if no frame was pushed; every simulator emits at least one.
    pub fn finish(self, algorithm: Algorithm) -> Trace {
        assert!(!self.frames.is_empty(), "{algorithm} simulation emitted no frames");
        Trace {
            algorithm,
            frames: self.frames,
        }
    }
}

/// Runs simulators against a shared layout configuration.
///
/// Assembly is deterministic: the same algorithm and input always produce an
/// equal trace, including element ids.
#[derive(Debug, Clone, Default)]
pub struct TraceAssembler {
    layout: LayoutConfig,
}

impl TraceAssembler {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Produces the full trace of `algorithm` merging `sequences`.
    ///
    /// `sequences` must each be sorted ascending. Input with no values at all
    /// yields a single frame.
    pub fn assemble(&self, algorithm: Algorithm, sequences: &[Vec<i64>]) -> Trace {
        let total: usize = sequences.iter().map(Vec::len).sum();
        info!(
            algorithm = algorithm.name(),
            sequences = sequences.len(),
            elements = total;
            "Assembling trace"
        );

        let simulator = simulate::simulator_for(algorithm);
        let mut context = Context::new(sequences, LayoutEngine::new(self.layout.clone()));

        if total == 0 {
            debug!(algorithm = algorithm.name(); "Nothing to merge");
            context.emit(simulator.empty_frame());
        } else {
            simulator.simulate(&mut context);
        }

        let trace = context.finish(algorithm);
        info!(algorithm = algorithm.name(), frames = trace.len(); "Trace assembled");
        trace
    }
}

/// Produces a trace with the default layout.
///
/// # Example
///
/// ```
/// use mergeviz::trace::{Algorithm, generate_trace};
///
/// let trace = generate_trace(Algorithm::PriorityQueue, &[vec![1, 4], vec![2, 3]]);
/// assert_eq!(trace.final_result(), vec![1, 2, 3, 4]);
/// ```
pub fn generate_trace(algorithm: Algorithm, sequences: &[Vec<i64>]) -> Trace {
    TraceAssembler::default().assemble(algorithm, sequences)
}

#[cfg(test)]
mod tests {
    use mergeviz_core::frame::StepKind;

    use super::*;

    #[test]
    fn test_algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>(), Ok(algorithm));
        }
        assert_eq!("Divide-Conquer".parse::<Algorithm>(), Ok(Algorithm::DivideConquer));

        let err = "heap".parse::<Algorithm>().unwrap_err();
        assert!(err.contains("priority-queue"), "{err}");
    }

    #[test]
    fn test_algorithm_serde_names() {
        let json = serde_json::to_string(&Algorithm::DivideConquer).unwrap();
        assert_eq!(json, "\"divide-conquer\"");
    }

    #[test]
    fn test_builder_numbers_frames() {
        let mut builder = TraceBuilder::new();
        assert_eq!(builder.push(FrameBuilder::new(StepKind::Init, "a")), 0);
        assert_eq!(builder.push(FrameBuilder::new(StepKind::Complete, "b")), 1);

        let trace = builder.finish(Algorithm::Sequential);
        let ids: Vec<usize> = trace.iter().map(Frame::id).collect();
        assert_eq!(ids, vec![0, 1]);
        assert_eq!(trace.last().description(), "b");
    }

    #[test]
    #[should_panic(expected = "emitted no frames")]
    fn test_empty_builder_cannot_finish() {
        TraceBuilder::new().finish(Algorithm::Sequential);
    }

    #[test]
    fn test_frame_at_clamps() {
        let trace = generate_trace(Algorithm::Sequential, &[vec![1], vec![2]]);
        assert_eq!(trace.frame_at(trace.len() + 10), trace.last());
        assert_eq!(trace.frame_at(0).step(), StepKind::Init);
    }

    #[test]
    fn test_no_values_yield_single_empty_frame() {
        for algorithm in Algorithm::ALL {
            for input in [vec![], vec![vec![]], vec![vec![], vec![]]] {
                let trace = generate_trace(algorithm, &input);
                assert_eq!(trace.len(), 1, "{algorithm} {input:?}");
                assert_eq!(trace.last().step(), StepKind::Empty);
                assert!(trace.final_result().is_empty());
                assert!(trace.last().elements().is_empty());
            }
        }
    }
}
