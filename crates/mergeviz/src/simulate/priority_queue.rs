//! Priority queue merge: keep the head of every sequence in a min-heap and
//! repeatedly move the smallest entry to the result, queueing its successor.

use std::{cmp::Reverse, collections::BinaryHeap};

use log::debug;

use mergeviz_core::{
    element::{Element, Tags},
    frame::{Annotation, AnnotationKind, FrameBuilder, HighlightedLines, StepKind},
    geometry::Point,
};

use super::{Context, Simulator, format_chain, format_list, with_result};

pub(crate) struct PriorityQueue;

/// A queued value. Entries order by value, then by sequence index, so equal
/// values leave the queue in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct HeapEntry {
    value: i64,
    sequence: usize,
    position: usize,
}

#[derive(Debug, Default)]
struct MinHeap {
    heap: BinaryHeap<Reverse<HeapEntry>>,
}

impl MinHeap {
    fn push(&mut self, entry: HeapEntry) {
        self.heap.push(Reverse(entry));
    }

    fn pop(&mut self) -> Option<HeapEntry> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    /// Queued entries in the order they would be popped.
    fn sorted(&self) -> Vec<HeapEntry> {
        let mut entries: Vec<HeapEntry> = self.heap.iter().map(|Reverse(entry)| *entry).collect();
        entries.sort_unstable();
        entries
    }

    fn contains(&self, element: &Element) -> bool {
        self.heap.iter().any(|Reverse(entry)| {
            element.is_in_input(entry.sequence) && element.position() == entry.position
        })
    }

    fn describe(&self) -> String {
        format_list(self.sorted().into_iter().map(|entry| entry.value))
    }
}

/// Per-sequence count of values already moved to the result.
struct Consumed(Vec<usize>);

impl Consumed {
    fn contains(&self, element: &Element) -> bool {
        element
            .sequence()
            .input_index()
            .is_some_and(|index| element.position() < self.0[index])
    }
}

impl Simulator for PriorityQueue {
    fn empty_frame(&self) -> FrameBuilder {
        FrameBuilder::new(StepKind::Empty, "Input is empty, returning an empty list")
            .lines(HighlightedLines::new(
                &[3, 4, 5, 6, 7],
                &[4, 5, 6, 7],
                &[5, 6, 7, 8],
                &[3, 4, 5],
            ))
            .variable("heap", "[]")
    }

    fn simulate(&self, context: &mut Context<'_>) {
        let sequences = context.sequences();
        let config = context.config().clone();
        let origin = config.origin();
        let row_y = |sequence: usize| origin.y() + sequence as f32 * config.row_spacing();
        let column_x = |position: usize| origin.x() + position as f32 * config.node_spacing();

        let init = context
            .frame(StepKind::Init, "Initialise: create an empty min-heap (priority queue)", |_| Tags::default())
            .lines(HighlightedLines::new(&[3, 4, 5], &[4], &[5], &[3]))
            .variable("heap", "[]")
            .annotation(Annotation::new(
                "Priority queue",
                Point::new(50.0, 30.0),
                AnnotationKind::Info,
            ));
        context.emit(init);

        let mut heap = MinHeap::default();
        let mut annotations = Vec::new();
        for (sequence, values) in sequences.iter().enumerate() {
            if let (Some(&value), Some(id)) = (values.first(), context.id_of(sequence, 0)) {
                heap.push(HeapEntry {
                    value,
                    sequence,
                    position: 0,
                });
                annotations.push(
                    Annotation::new("enqueue", Point::new(origin.x() - 30.0, row_y(sequence)), AnnotationKind::Move)
                        .with_target(id),
                );
            }
        }

        let frame = context
            .frame(
                StepKind::InitHeap,
                format!("Push the head of every non-empty sequence into the heap: {}", heap.describe()),
                |element| {
                    if heap.contains(element) {
                        Tags::default().highlighted()
                    } else {
                        Tags::default().pending()
                    }
                },
            )
            .lines(HighlightedLines::new(
                &[6, 7, 8, 9],
                &[5, 6, 7, 8],
                &[6, 7, 8, 9],
                &[4, 5],
            ))
            .variable("heap", heap.describe())
            .annotations(annotations);
        context.emit(frame);

        let mut consumed = Consumed(vec![0; sequences.len()]);
        let mut result: Vec<i64> = Vec::new();

        while let Some(min) = heap.pop() {
            result.push(min.value);
            consumed.0[min.sequence] = min.position + 1;

            let tag = |element: &Element| {
                if element.is_in_input(min.sequence) && element.position() == min.position {
                    Tags::default().current()
                } else if heap.contains(element) {
                    Tags::default().highlighted()
                } else if consumed.contains(element) {
                    Tags::default().processed()
                } else {
                    Tags::default().pending()
                }
            };

            let row = context.result_row(&result, Some(result.len() - 1));
            let mut frame = context
                .frame(
                    StepKind::Pop,
                    format!(
                        "Pop the minimum {} (sequence {}) from the heap and append it to the result",
                        min.value,
                        min.sequence + 1
                    ),
                    tag,
                )
                .lines(HighlightedLines::new(&[12, 13, 14], &[12, 13, 14], &[14, 15, 16], &[8, 9, 10]))
                .variable("heap", heap.describe())
                .variable("min", min.value.to_string())
                .variable("result", format_list(result.iter().copied()));
            if let Some(id) = context.id_of(min.sequence, min.position) {
                let position = Point::new(column_x(min.position) + 40.0, row_y(min.sequence) - 25.0);
                frame = frame.annotation(
                    Annotation::new(format!("pop {}", min.value), position, AnnotationKind::Move).with_target(id),
                );
            }
            context.emit(with_result(frame, &row));

            let next_position = min.position + 1;
            if let Some(&next) = sequences[min.sequence].get(next_position) {
                heap.push(HeapEntry {
                    value: next,
                    sequence: min.sequence,
                    position: next_position,
                });

                let row = context.result_row(&result, None);
                let mut frame = context
                    .frame(
                        StepKind::Push,
                        format!(
                            "Push the next value {next} of sequence {} into the heap",
                            min.sequence + 1
                        ),
                        |element| {
                            if heap.contains(element) {
                                Tags::default().highlighted()
                            } else if consumed.contains(element) {
                                Tags::default().processed()
                            } else {
                                Tags::default().pending()
                            }
                        },
                    )
                    .lines(HighlightedLines::new(&[15, 16, 17], &[15, 16, 17], &[17, 18, 19], &[11, 12]))
                    .variable("heap", heap.describe())
                    .variable("next", next.to_string());
                if let Some(id) = context.id_of(min.sequence, next_position) {
                    let position = Point::new(column_x(next_position) - 30.0, row_y(min.sequence));
                    frame = frame.annotation(
                        Annotation::new(format!("push {next}"), position, AnnotationKind::Move).with_target(id),
                    );
                }
                context.emit(with_result(frame, &row));
            } else if !heap.is_empty() {
                let remaining = heap.len();
                let row = context.result_row(&result, None);
                let frame = context
                    .frame(
                        StepKind::Exhausted,
                        format!(
                            "Sequence {} is exhausted, {remaining} {} left in the heap",
                            min.sequence + 1,
                            if remaining == 1 { "entry" } else { "entries" }
                        ),
                        |element| {
                            if heap.contains(element) {
                                Tags::default().highlighted()
                            } else if consumed.contains(element) {
                                Tags::default().processed()
                            } else {
                                Tags::default().pending()
                            }
                        },
                    )
                    .lines(HighlightedLines::new(&[15], &[15], &[17], &[11]))
                    .variable("heap", heap.describe())
                    .annotation(Annotation::new(
                        format!("sequence {} done", min.sequence + 1),
                        Point::new(column_x(sequences[min.sequence].len()), row_y(min.sequence)),
                        AnnotationKind::Info,
                    ));
                context.emit(with_result(frame, &row));
            }
        }
        debug!(sequences = context.sequences().len(), pops = result.len(); "Heap drained");

        let row = context.result_row(&result, None);
        let frame = context
            .frame(
                StepKind::Complete,
                format!("Merge complete! Result: {}", format_chain(&result)),
                |_| Tags::default().processed(),
            )
            .lines(HighlightedLines::new(&[19], &[19], &[21], &[14]))
            .variable("result", format_list(result.iter().copied()))
            .annotation(Annotation::new(
                "Merge complete!",
                Point::new(
                    config.result_origin_x() + result.len() as f32 * 40.0,
                    config.result_row_y() - 20.0,
                ),
                AnnotationKind::Result,
            ));
        context.emit(with_result(frame, &row));
    }
}

#[cfg(test)]
mod tests {
    use mergeviz_core::frame::Frame;

    use crate::trace::{Algorithm, generate_trace};

    use super::*;

    fn count(frames: &[Frame], step: StepKind) -> usize {
        frames.iter().filter(|frame| frame.step() == step).count()
    }

    #[test]
    fn test_heap_orders_by_value_then_sequence() {
        let mut heap = MinHeap::default();
        heap.push(HeapEntry { value: 3, sequence: 0, position: 1 });
        heap.push(HeapEntry { value: 1, sequence: 2, position: 0 });
        heap.push(HeapEntry { value: 1, sequence: 1, position: 0 });

        assert_eq!(heap.len(), 3);
        let popped: Vec<(i64, usize)> = std::iter::from_fn(|| heap.pop())
            .map(|entry| (entry.value, entry.sequence))
            .collect();
        assert_eq!(popped, vec![(1, 1), (1, 2), (3, 0)]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_one_pop_per_value() {
        let trace = generate_trace(Algorithm::PriorityQueue, &[vec![1, 4, 5], vec![1, 3, 4], vec![2, 6]]);

        assert_eq!(count(trace.frames(), StepKind::Pop), 8);
        // every value but the three sequence heads is pushed after a pop
        assert_eq!(count(trace.frames(), StepKind::Push), 5);
        // the last sequence to run dry leaves the heap empty
        assert_eq!(count(trace.frames(), StepKind::Exhausted), 2);
        assert_eq!(trace.get(1).unwrap().step(), StepKind::InitHeap);
        assert_eq!(trace.final_result(), vec![1, 1, 2, 3, 4, 4, 5, 6]);
    }

    #[test]
    fn test_equal_heads_pop_in_sequence_order() {
        let trace = generate_trace(Algorithm::PriorityQueue, &[vec![1, 4, 5], vec![1, 3, 4], vec![2, 6]]);
        let pops: Vec<&Frame> = trace.iter().filter(|f| f.step() == StepKind::Pop).collect();

        let popped_from = |frame: &Frame| {
            frame
                .elements()
                .iter()
                .find(|e| e.tags().is_current())
                .and_then(|e| e.sequence().input_index())
        };
        assert_eq!(popped_from(pops[0]), Some(0));
        assert_eq!(popped_from(pops[1]), Some(1));
    }

    #[test]
    fn test_init_heap_frame() {
        let trace = generate_trace(Algorithm::PriorityQueue, &[vec![5], vec![], vec![2, 9]]);
        let init_heap = trace.get(1).unwrap();

        assert_eq!(init_heap.variables().get("heap").map(String::as_str), Some("[2, 5]"));
        assert_eq!(init_heap.annotations().len(), 2);
        let queued: Vec<i64> = init_heap
            .elements()
            .iter()
            .filter(|e| e.tags().is_highlighted())
            .map(Element::value)
            .collect();
        assert_eq!(queued, vec![5, 2]);
    }

    #[test]
    fn test_pop_frame_content() {
        let trace = generate_trace(Algorithm::PriorityQueue, &[vec![1, 3], vec![2]]);
        let second_pop = trace.iter().filter(|f| f.step() == StepKind::Pop).nth(1).unwrap();

        assert_eq!(second_pop.variables().get("min").map(String::as_str), Some("2"));
        assert_eq!(second_pop.variables().get("result").map(String::as_str), Some("[1, 2]"));
        assert_eq!(second_pop.variables().get("heap").map(String::as_str), Some("[3]"));

        let first = second_pop.elements().iter().find(|e| e.value() == 1).unwrap();
        assert!(first.tags().is_processed());
        let queued = second_pop.elements().iter().find(|e| e.value() == 3).unwrap();
        assert!(queued.tags().is_highlighted());
        assert!(second_pop.result_elements()[1].tags().is_current());
    }
}
