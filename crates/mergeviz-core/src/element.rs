//! Visualized values and the links between them.
//!
//! An [`Element`] is one value drawn on the canvas, either a node of an
//! input sequence or a node of the (partial) result sequence. Its display
//! state is a set of independent boolean [`Tags`]; [`Element::display_role`]
//! collapses them into the single role a renderer colors by.
//!
//! A [`Link`] is a directed "next" pointer between two elements of the same
//! frame.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::geometry::Point;

/// Identity of an element within one trace.
///
/// Input nodes are numbered by a per-trace counter starting at 1, so the same
/// input always yields the same ids. Result nodes are identified by their
/// position in the result sequence, which keeps a value's identity stable
/// while the partial result grows from frame to frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    /// A node of one of the input sequences
    Node(u32),
    /// The node at the given position of the result sequence
    Result(usize),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(n) => write!(f, "node-{n}"),
            Self::Result(index) => write!(f, "result-{index}"),
        }
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The sequence an element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceRef {
    /// The input sequence at the given index
    Input(usize),
    /// The result sequence
    Result,
}

impl SequenceRef {
    /// Returns the input index, or `None` for the result sequence.
    pub fn input_index(self) -> Option<usize> {
        match self {
            Self::Input(index) => Some(index),
            Self::Result => None,
        }
    }
}

/// Display tags of an element.
///
/// Tags are independent flags; precedence only matters when a single color
/// has to be chosen, see [`Element::display_role`].
///
/// # Examples
///
/// ```
/// # use mergeviz_core::element::Tags;
/// let tags = Tags::default().highlighted().labeled("head");
///
/// assert!(tags.is_highlighted());
/// assert!(!tags.is_current());
/// assert_eq!(tags.label(), Some("head"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Tags {
    highlighted: bool,
    current: bool,
    processed: bool,
    pending: bool,
    merging_left: bool,
    merging_right: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Tags {
    /// Sets the highlighted flag
    pub fn highlighted(mut self) -> Self {
        self.highlighted = true;
        self
    }

    /// Sets the current flag
    pub fn current(mut self) -> Self {
        self.current = true;
        self
    }

    /// Sets the processed flag
    pub fn processed(mut self) -> Self {
        self.processed = true;
        self
    }

    /// Sets the pending flag
    pub fn pending(mut self) -> Self {
        self.pending = true;
        self
    }

    /// Marks the element as part of the left operand of a merge
    pub fn merging_left(mut self) -> Self {
        self.merging_left = true;
        self
    }

    /// Marks the element as part of the right operand of a merge
    pub fn merging_right(mut self) -> Self {
        self.merging_right = true;
        self
    }

    /// Attaches a short label
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn is_current(&self) -> bool {
        self.current
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_merging_left(&self) -> bool {
        self.merging_left
    }

    pub fn is_merging_right(&self) -> bool {
        self.merging_right
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns `true` when no flag is set and there is no label.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// The single display role of an element, in decreasing precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayRole {
    /// The value being acted on right now
    Current,
    /// Part of the left operand of the running merge
    MergeLeft,
    /// Part of the right operand of the running merge
    MergeRight,
    /// Drawn attention to without being acted on
    Highlighted,
    /// An untouched node of the result sequence
    Result,
    /// Already consumed by the algorithm
    Processed,
    /// Not yet reached by the algorithm
    Pending,
    /// No tag applies
    Default,
}

/// A visualized value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    id: ElementId,
    value: i64,
    sequence: SequenceRef,
    position: usize,
    point: Point,
    tags: Tags,
}

impl Element {
    /// Creates an untagged element.
    pub fn new(id: ElementId, value: i64, sequence: SequenceRef, position: usize, point: Point) -> Self {
        Self {
            id,
            value,
            sequence,
            position,
            point,
            tags: Tags::default(),
        }
    }

    /// Replaces the tags of this element (builder style).
    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn sequence(&self) -> SequenceRef {
        self.sequence
    }

    /// Position of the element within its sequence
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn tags_mut(&mut self) -> &mut Tags {
        &mut self.tags
    }

    /// Returns `true` if the element belongs to the input sequence at `index`.
    pub fn is_in_input(&self, index: usize) -> bool {
        self.sequence == SequenceRef::Input(index)
    }

    /// Resolves the tags into one display role.
    ///
    /// Input elements use the precedence current > merge role > highlighted >
    /// processed > pending > default. Result elements are [`DisplayRole::Result`]
    /// unless they are current or highlighted.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mergeviz_core::element::{DisplayRole, Element, ElementId, SequenceRef, Tags};
    /// # use mergeviz_core::geometry::Point;
    /// let element = Element::new(ElementId::Node(1), 4, SequenceRef::Input(0), 0, Point::default())
    ///     .with_tags(Tags::default().processed().merging_left());
    ///
    /// assert_eq!(element.display_role(), DisplayRole::MergeLeft);
    /// ```
    pub fn display_role(&self) -> DisplayRole {
        let tags = &self.tags;
        if tags.current {
            return DisplayRole::Current;
        }
        if self.sequence == SequenceRef::Result {
            return if tags.highlighted {
                DisplayRole::Highlighted
            } else {
                DisplayRole::Result
            };
        }
        if tags.merging_left {
            DisplayRole::MergeLeft
        } else if tags.merging_right {
            DisplayRole::MergeRight
        } else if tags.highlighted {
            DisplayRole::Highlighted
        } else if tags.processed {
            DisplayRole::Processed
        } else if tags.pending {
            DisplayRole::Pending
        } else {
            DisplayRole::Default
        }
    }
}

/// A directed "next" pointer between two elements of the same frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    source: ElementId,
    target: ElementId,
    highlighted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Link {
    /// Creates an unhighlighted, unlabeled link.
    pub fn new(source: ElementId, target: ElementId) -> Self {
        Self {
            source,
            target,
            highlighted: false,
            label: None,
        }
    }

    /// Sets the highlight flag (builder style).
    pub fn with_highlight(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    /// Attaches a label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn source(&self) -> ElementId {
        self.source
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Stable identifier derived from both endpoints, e.g. `edge-node-1-node-2`.
    pub fn id(&self) -> String {
        format!("edge-{}-{}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_element(tags: Tags) -> Element {
        Element::new(ElementId::Node(1), 5, SequenceRef::Input(0), 0, Point::default()).with_tags(tags)
    }

    fn result_element(tags: Tags) -> Element {
        Element::new(ElementId::Result(0), 5, SequenceRef::Result, 0, Point::default()).with_tags(tags)
    }

    #[test]
    fn test_element_id_display() {
        assert_eq!(ElementId::Node(3).to_string(), "node-3");
        assert_eq!(ElementId::Result(0).to_string(), "result-0");
    }

    #[test]
    fn test_element_id_serializes_as_string() {
        let json = serde_json::to_string(&ElementId::Node(7)).unwrap();
        assert_eq!(json, "\"node-7\"");
    }

    #[test]
    fn test_display_role_precedence() {
        let everything = Tags::default()
            .current()
            .merging_left()
            .merging_right()
            .highlighted()
            .processed()
            .pending();
        assert_eq!(input_element(everything).display_role(), DisplayRole::Current);

        let merge = Tags::default().merging_right().highlighted().processed();
        assert_eq!(input_element(merge).display_role(), DisplayRole::MergeRight);

        let highlighted = Tags::default().highlighted().processed().pending();
        assert_eq!(input_element(highlighted).display_role(), DisplayRole::Highlighted);

        let processed = Tags::default().processed().pending();
        assert_eq!(input_element(processed).display_role(), DisplayRole::Processed);

        assert_eq!(input_element(Tags::default().pending()).display_role(), DisplayRole::Pending);
        assert_eq!(input_element(Tags::default()).display_role(), DisplayRole::Default);
    }

    #[test]
    fn test_result_display_role() {
        assert_eq!(result_element(Tags::default()).display_role(), DisplayRole::Result);
        assert_eq!(
            result_element(Tags::default().processed()).display_role(),
            DisplayRole::Result
        );
        assert_eq!(
            result_element(Tags::default().highlighted()).display_role(),
            DisplayRole::Highlighted
        );
        assert_eq!(
            result_element(Tags::default().current().highlighted()).display_role(),
            DisplayRole::Current
        );
    }

    #[test]
    fn test_tags_mutation_is_local() {
        let original = input_element(Tags::default());
        let mut copy = original.clone();
        *copy.tags_mut() = Tags::default().highlighted();

        assert!(copy.tags().is_highlighted());
        assert!(original.tags().is_plain());
    }

    #[test]
    fn test_sequence_ref_input_index() {
        assert_eq!(SequenceRef::Input(2).input_index(), Some(2));
        assert_eq!(SequenceRef::Result.input_index(), None);
    }

    #[test]
    fn test_link_id() {
        let link = Link::new(ElementId::Node(1), ElementId::Node(2)).with_label("next");
        assert_eq!(link.id(), "edge-node-1-node-2");
        assert_eq!(link.label(), Some("next"));
        assert!(!link.is_highlighted());
    }
}
