//! Merge simulators.
//!
//! Each simulator replays one k-way merge strategy over the input and emits a
//! frame at every observable step. All of them share a [`Context`] holding the
//! immutable input template, the layout engine and the frames emitted so far.
//! Frames are produced by copying the template and tagging the copy, so no
//! frame ever aliases another.

mod divide_conquer;
mod priority_queue;
mod sequential;

use mergeviz_core::{
    element::{Element, ElementId, Tags},
    frame::{FrameBuilder, StepKind},
};

use crate::{
    config::LayoutConfig,
    layout::{InputLayout, LayoutEngine, ResultRow},
    trace::{Algorithm, Trace, TraceBuilder},
};

/// One k-way merge strategy.
pub(crate) trait Simulator {
    /// The only frame of a trace whose input holds no values.
    fn empty_frame(&self) -> FrameBuilder;

    /// Emits every frame for input holding at least one value.
    fn simulate(&self, context: &mut Context<'_>);
}

pub(crate) fn simulator_for(algorithm: Algorithm) -> &'static dyn Simulator {
    match algorithm {
        Algorithm::Sequential => &sequential::Sequential,
        Algorithm::DivideConquer => &divide_conquer::DivideConquer,
        Algorithm::PriorityQueue => &priority_queue::PriorityQueue,
    }
}

/// Shared state of one simulation.
pub(crate) struct Context<'a> {
    sequences: &'a [Vec<i64>],
    layout: LayoutEngine,
    template: InputLayout,
    trace: TraceBuilder,
}

impl<'a> Context<'a> {
    pub fn new(sequences: &'a [Vec<i64>], mut layout: LayoutEngine) -> Self {
        layout.reset();
        let template = layout.layout_sequences(sequences);
        Self {
            sequences,
            layout,
            template,
            trace: TraceBuilder::new(),
        }
    }

    pub fn sequences(&self) -> &'a [Vec<i64>] {
        self.sequences
    }

    pub fn config(&self) -> &LayoutConfig {
        self.layout.config()
    }

    pub fn template(&self) -> &InputLayout {
        &self.template
    }

    /// Id of the input element at `position` of sequence `sequence`.
    pub fn id_of(&self, sequence: usize, position: usize) -> Option<ElementId> {
        self.template.element_at(sequence, position).map(Element::id)
    }

    /// Starts a frame showing every input element tagged by `tag`.
    pub fn frame(&self, step: StepKind, description: impl Into<String>, tag: impl Fn(&Element) -> Tags) -> FrameBuilder {
        let elements = self.template.tagged(tag);
        FrameBuilder::new(step, description).input(&elements, self.template.links())
    }

    /// Lays out `values` on the main result row.
    pub fn result_row(&self, values: &[i64], current: Option<usize>) -> ResultRow {
        self.layout.layout_result(values, self.layout.result_row_y(), current)
    }

    /// Lays out `values` on the row of a merge at recursion `depth`.
    pub fn merge_row(&self, values: &[i64], depth: usize) -> ResultRow {
        self.layout.layout_result(values, self.layout.merge_row_y(depth), None)
    }

    pub fn emit(&mut self, frame: FrameBuilder) -> usize {
        self.trace.push(frame)
    }

    pub fn finish(self, algorithm: Algorithm) -> Trace {
        self.trace.finish(algorithm)
    }
}

/// Attaches a result row to a frame.
pub(crate) fn with_result(frame: FrameBuilder, row: &ResultRow) -> FrameBuilder {
    frame.result(&row.elements, &row.links)
}

/// Merges two ascending slices; on equal values the left one is taken first.
pub(crate) fn merge_two(left: &[i64], right: &[i64]) -> Vec<i64> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        if left[i] <= right[j] {
            merged.push(left[i]);
            i += 1;
        } else {
            merged.push(right[j]);
            j += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    merged
}

/// Formats values as `[1, 4, 5]`.
pub(crate) fn format_list(values: impl IntoIterator<Item = i64>) -> String {
    let items: Vec<String> = values.into_iter().map(|value| value.to_string()).collect();
    format!("[{}]", items.join(", "))
}

/// Formats values as a chain, `1 → 4 → 5`.
pub(crate) fn format_chain(values: &[i64]) -> String {
    let items: Vec<String> = values.iter().map(i64::to_string).collect();
    items.join(" → ")
}

/// Formats a 0-based sequence range as 1-based display numbers.
pub(crate) fn format_range(lo: usize, hi: usize) -> String {
    if lo == hi {
        format!("{}", lo + 1)
    } else {
        format!("{}-{}", lo + 1, hi + 1)
    }
}
