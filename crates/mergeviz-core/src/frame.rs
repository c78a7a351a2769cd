//! Trace frames and their contents.
//!
//! A [`Frame`] is one immutable, self-contained snapshot of an algorithm run:
//! the display state of the input sequences, the display state of the result
//! sequence, the reference-code lines to highlight per
//! [`ReferenceLanguage`], the current variable bindings, and free-floating
//! [`Annotation`]s. Frames own deep copies of all of their elements, so any
//! frame can be rendered without looking at any other frame.
//!
//! Frames are assembled with a [`FrameBuilder`]:
//!
//! ```
//! # use mergeviz_core::frame::{AnnotationKind, Annotation, FrameBuilder, HighlightedLines, StepKind};
//! # use mergeviz_core::geometry::Point;
//! let frame = FrameBuilder::new(StepKind::Init, "Initialise")
//!     .lines(HighlightedLines::uniform(&[3]))
//!     .variable("ans", "null")
//!     .annotation(Annotation::new("start", Point::new(50.0, 30.0), AnnotationKind::Info))
//!     .build(0);
//!
//! assert_eq!(frame.id(), 0);
//! assert_eq!(frame.variables().get("ans").map(String::as_str), Some("null"));
//! ```

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    element::{Element, ElementId, Link},
    geometry::Point,
};

/// Variable name to rendered value, in insertion order.
pub type Variables = IndexMap<String, String>;

/// One of the illustrative source listings shown next to the animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceLanguage {
    #[default]
    Java,
    Python,
    Golang,
    JavaScript,
}

impl ReferenceLanguage {
    /// Every supported reference language, in display order.
    pub const ALL: [ReferenceLanguage; 4] = [Self::Java, Self::Python, Self::Golang, Self::JavaScript];

    /// Returns the lowercase name used in settings files and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Python => "python",
            Self::Golang => "golang",
            Self::JavaScript => "javascript",
        }
    }
}

impl fmt::Display for ReferenceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReferenceLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown reference language `{s}`"))
    }
}

/// Reference-code line numbers (1-based) to highlight, one entry per language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightedLines {
    java: Vec<u32>,
    python: Vec<u32>,
    golang: Vec<u32>,
    javascript: Vec<u32>,
}

impl HighlightedLines {
    /// Creates a mapping with explicit lines for every language.
    pub fn new(java: &[u32], python: &[u32], golang: &[u32], javascript: &[u32]) -> Self {
        Self {
            java: java.to_vec(),
            python: python.to_vec(),
            golang: golang.to_vec(),
            javascript: javascript.to_vec(),
        }
    }

    /// Creates a mapping that highlights the same lines in every language.
    pub fn uniform(lines: &[u32]) -> Self {
        Self::new(lines, lines, lines, lines)
    }

    /// Returns the lines for one language.
    pub fn get(&self, language: ReferenceLanguage) -> &[u32] {
        match language {
            ReferenceLanguage::Java => &self.java,
            ReferenceLanguage::Python => &self.python,
            ReferenceLanguage::Golang => &self.golang,
            ReferenceLanguage::JavaScript => &self.javascript,
        }
    }
}

/// Semantic category of an annotation, used for color coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// General information about the step
    Info,
    /// The outcome of a value comparison
    Compare,
    /// A pointer or queue entry moved
    Move,
    /// A (partial) result was produced
    Result,
}

/// Free-floating text overlay of a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    text: String,
    position: Point,
    kind: AnnotationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<ElementId>,
}

impl Annotation {
    pub fn new(text: impl Into<String>, position: Point, kind: AnnotationKind) -> Self {
        Self {
            text: text.into(),
            position,
            kind,
            target: None,
        }
    }

    /// Anchors the annotation to an element of the same frame (builder style).
    pub fn with_target(mut self, target: ElementId) -> Self {
        self.target = Some(target);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn kind(&self) -> AnnotationKind {
        self.kind
    }

    pub fn target(&self) -> Option<ElementId> {
        self.target
    }
}

/// The operation a frame depicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// Degenerate input, the whole trace is this single frame
    Empty,
    /// Initial layout before any work
    Init,
    /// Sequential: about to merge the accumulator with the next sequence
    BeforeRound,
    /// Two-pointer comparison
    Compare,
    /// One side exhausted, the rest is copied verbatim
    Remainder,
    /// Sequential: the accumulator was replaced by the merged round result
    RoundComplete,
    /// Divide and conquer: a range was split at its midpoint
    Split { depth: usize },
    /// Divide and conquer: the range collapsed to a single sequence
    Leaf { depth: usize },
    /// Divide and conquer: left half finished, descending into the right half
    Interlude { depth: usize },
    /// Divide and conquer: two sub-results were merged
    Merge { depth: usize },
    /// Priority queue: heads of all sequences queued
    InitHeap,
    /// Priority queue: the minimum entry was removed
    Pop,
    /// Priority queue: the successor of the removed entry was queued
    Push,
    /// Priority queue: the removed entry's sequence has no successor
    Exhausted,
    /// The final result
    Complete,
}

impl StepKind {
    /// Short lowercase name, e.g. `merge` or `pop`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Init => "init",
            Self::BeforeRound => "before-round",
            Self::Compare => "compare",
            Self::Remainder => "remainder",
            Self::RoundComplete => "round-complete",
            Self::Split { .. } => "split",
            Self::Leaf { .. } => "leaf",
            Self::Interlude { .. } => "interlude",
            Self::Merge { .. } => "merge",
            Self::InitHeap => "init-heap",
            Self::Pop => "pop",
            Self::Push => "push",
            Self::Exhausted => "exhausted",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Split { depth }
            | Self::Leaf { depth }
            | Self::Interlude { depth }
            | Self::Merge { depth } => write!(f, "{}@{depth}", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// One immutable snapshot of a trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    id: usize,
    step: StepKind,
    description: String,
    elements: Vec<Element>,
    links: Vec<Link>,
    result_elements: Vec<Element>,
    result_links: Vec<Link>,
    highlighted_lines: HighlightedLines,
    variables: Variables,
    annotations: Vec<Annotation>,
}

impl Frame {
    /// Position of this frame in its trace
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn step(&self) -> StepKind {
        self.step
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Input-side elements
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Input-side links
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn result_elements(&self) -> &[Element] {
        &self.result_elements
    }

    pub fn result_links(&self) -> &[Link] {
        &self.result_links
    }

    /// Values of the result sequence, in order.
    pub fn result_values(&self) -> Vec<i64> {
        self.result_elements.iter().map(Element::value).collect()
    }

    pub fn highlighted_lines(&self) -> &HighlightedLines {
        &self.highlighted_lines
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Looks up an element on either side by id.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements
            .iter()
            .chain(&self.result_elements)
            .find(|element| element.id() == id)
    }
}

/// Assembles a [`Frame`] from borrowed parts.
///
/// Elements and links are copied on the way in, so callers are free to keep
/// reusing and retagging the slices they pass.
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    step: StepKind,
    description: String,
    elements: Vec<Element>,
    links: Vec<Link>,
    result_elements: Vec<Element>,
    result_links: Vec<Link>,
    highlighted_lines: HighlightedLines,
    variables: Variables,
    annotations: Vec<Annotation>,
}

impl FrameBuilder {
    pub fn new(step: StepKind, description: impl Into<String>) -> Self {
        Self {
            step,
            description: description.into(),
            elements: Vec::new(),
            links: Vec::new(),
            result_elements: Vec::new(),
            result_links: Vec::new(),
            highlighted_lines: HighlightedLines::default(),
            variables: Variables::new(),
            annotations: Vec::new(),
        }
    }

    /// Sets the input side of the frame.
    pub fn input(mut self, elements: &[Element], links: &[Link]) -> Self {
        self.elements = elements.to_vec();
        self.links = links.to_vec();
        self
    }

    /// Sets the result side of the frame.
    pub fn result(mut self, elements: &[Element], links: &[Link]) -> Self {
        self.result_elements = elements.to_vec();
        self.result_links = links.to_vec();
        self
    }

    pub fn lines(mut self, lines: HighlightedLines) -> Self {
        self.highlighted_lines = lines;
        self
    }

    /// Binds a variable; rebinding keeps the original position.
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn annotations(mut self, annotations: impl IntoIterator<Item = Annotation>) -> Self {
        self.annotations.extend(annotations);
        self
    }

    /// Finishes the frame with the given trace position.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if a link or annotation refers to an element
    /// that is not part of the frame.
    pub fn build(self, id: usize) -> Frame {
        let frame = Frame {
            id,
            step: self.step,
            description: self.description,
            elements: self.elements,
            links: self.links,
            result_elements: self.result_elements,
            result_links: self.result_links,
            highlighted_lines: self.highlighted_lines,
            variables: self.variables,
            annotations: self.annotations,
        };

        if cfg!(debug_assertions) {
            for link in frame.links.iter().chain(&frame.result_links) {
                assert!(
                    frame.element(link.source()).is_some() && frame.element(link.target()).is_some(),
                    "frame {id}: link {} refers to an element outside the frame",
                    link.id()
                );
            }
            for target in frame.annotations.iter().filter_map(Annotation::target) {
                assert!(
                    frame.element(target).is_some(),
                    "frame {id}: annotation targets missing element {target}"
                );
            }
        }

        frame
    }
}
