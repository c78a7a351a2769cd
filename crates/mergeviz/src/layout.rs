//! Layout engine for trace frames.
//!
//! Assigns canvas coordinates to every input value once per trace, producing
//! an immutable [`InputLayout`] template. Simulators never mutate the
//! template; each frame materializes a freshly tagged copy through
//! [`InputLayout::tagged`].
//!
//! The result sequence is laid out separately, on a single row whose vertical
//! position is chosen by the caller (nested merges use one row per recursion
//! depth).

use mergeviz_core::{
    element::{Element, ElementId, Link, SequenceRef, Tags},
    geometry::Point,
};

use crate::config::LayoutConfig;

/// Per-trace generator of input element ids.
///
/// Ids start at `node-1` and are handed out in layout order, so the same
/// input always receives the same ids.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Returns a fresh id.
    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId::Node(self.next);
        self.next += 1;
        id
    }

    /// Restarts numbering from `node-1`.
    pub fn reset(&mut self) {
        self.next = 1;
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Positioned, untagged elements and links of every input sequence.
#[derive(Debug, Clone, Default)]
pub struct InputLayout {
    elements: Vec<Element>,
    links: Vec<Link>,
    /// Index into `elements` of the first value of each sequence
    offsets: Vec<usize>,
}

impl InputLayout {
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element at `position` of input sequence `sequence`.
    pub fn element_at(&self, sequence: usize, position: usize) -> Option<&Element> {
        let start = *self.offsets.get(sequence)?;
        self.elements
            .get(start + position)
            .filter(|element| element.is_in_input(sequence))
    }

    /// Materializes a tagged copy of the template.
    ///
    /// `tag` is called once per element and its result replaces the element's
    /// tags in the copy; the template itself is left untouched.
    pub fn tagged(&self, tag: impl Fn(&Element) -> Tags) -> Vec<Element> {
        self.elements
            .iter()
            .map(|element| element.clone().with_tags(tag(element)))
            .collect()
    }
}

/// Elements and links of one result row.
#[derive(Debug, Clone, Default)]
pub struct ResultRow {
    pub elements: Vec<Element>,
    pub links: Vec<Link>,
}

/// Computes element coordinates from a [`LayoutConfig`].
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    config: LayoutConfig,
    ids: IdGenerator,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            ids: IdGenerator::new(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Restarts id numbering; called at the start of every simulation.
    pub fn reset(&mut self) {
        self.ids.reset();
    }

    /// Lays out every input sequence as one row.
    ///
    /// Value `n` of sequence `m` is placed at
    /// `origin + (n * node_spacing, m * row_spacing)`, and every adjacent pair
    /// within a sequence is joined by a link. Empty sequences produce nothing.
    pub fn layout_sequences(&mut self, sequences: &[Vec<i64>]) -> InputLayout {
        let origin = self.config.origin();
        let mut layout = InputLayout::default();

        for (index, sequence) in sequences.iter().enumerate() {
            layout.offsets.push(layout.elements.len());
            let mut previous: Option<ElementId> = None;

            for (position, &value) in sequence.iter().enumerate() {
                let id = self.ids.next_id();
                let point = origin.grid_offset(
                    position,
                    self.config.node_spacing(),
                    index,
                    self.config.row_spacing(),
                );
                layout
                    .elements
                    .push(Element::new(id, value, SequenceRef::Input(index), position, point));

                if let Some(previous) = previous {
                    layout.links.push(Link::new(previous, id));
                }
                previous = Some(id);
            }
        }

        layout
    }

    /// Lays out result values on the row at height `y`.
    ///
    /// The element at `current`, if any, is tagged current and highlighted.
    pub fn layout_result(&self, values: &[i64], y: f32, current: Option<usize>) -> ResultRow {
        let origin = Point::new(self.config.result_origin_x(), y);

        let elements: Vec<Element> = values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let point = origin.grid_offset(index, self.config.result_spacing(), 0, 0.0);
                let element = Element::new(ElementId::Result(index), value, SequenceRef::Result, index, point);
                if current == Some(index) {
                    element.with_tags(Tags::default().current().highlighted())
                } else {
                    element
                }
            })
            .collect();

        let links = elements
            .windows(2)
            .map(|pair| Link::new(pair[0].id(), pair[1].id()))
            .collect();

        ResultRow { elements, links }
    }

    /// Height of the main result row.
    pub fn result_row_y(&self) -> f32 {
        self.config.result_row_y()
    }

    /// Height of the result row for a merge at recursion `depth`.
    pub fn merge_row_y(&self, depth: usize) -> f32 {
        self.config.merge_row_y() + depth as f32 * self.config.merge_depth_step()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}
