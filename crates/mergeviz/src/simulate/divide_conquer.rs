//! Divide and conquer: split the list of sequences at its midpoint, solve both
//! halves recursively and merge the two results pairwise.

use std::ops::RangeInclusive;

use log::debug;

use mergeviz_core::{
    element::{Element, Tags},
    frame::{Annotation, AnnotationKind, FrameBuilder, HighlightedLines, StepKind},
    geometry::Point,
};

use super::{Context, Simulator, format_chain, format_list, format_range, merge_two, with_result};

pub(crate) struct DivideConquer;

fn in_range(element: &Element, range: &RangeInclusive<usize>) -> bool {
    element
        .sequence()
        .input_index()
        .is_some_and(|index| range.contains(&index))
}

impl DivideConquer {
    /// Merges sequences `lo..=hi`, emitting frames on the way down and up.
    ///
    /// An inverted range (`lo > hi`) holds no sequences and yields an empty
    /// result without emitting a frame.
    fn solve(&self, context: &mut Context<'_>, lo: usize, hi: usize, depth: usize) -> Vec<i64> {
        if lo > hi {
            return Vec::new();
        }

        let config = context.config().clone();
        let origin = config.origin();
        let sequences = context.sequences();

        if lo == hi {
            let leaf = &sequences[lo];
            let mut frame = context
                .frame(
                    StepKind::Leaf { depth },
                    format!(
                        "Only sequence {} {} is left in this range, return it as is",
                        lo + 1,
                        format_list(leaf.iter().copied())
                    ),
                    |element| {
                        if element.is_in_input(lo) {
                            Tags::default().highlighted()
                        } else {
                            Tags::default()
                        }
                    },
                )
                .lines(HighlightedLines::new(&[6], &[8], &[5], &[3]))
                .variable("l", lo.to_string())
                .variable("r", hi.to_string())
                .variable("depth", depth.to_string());
            if let Some(head) = context.id_of(lo, 0) {
                let position = Point::new(origin.x(), origin.y() + lo as f32 * config.row_spacing() - 20.0);
                frame = frame.annotation(Annotation::new("leaf", position, AnnotationKind::Info).with_target(head));
            }
            context.emit(frame);
            return leaf.clone();
        }

        let mid = lo + (hi - lo) / 2;
        let left_range = lo..=mid;
        let right_range = mid + 1..=hi;

        let frame = context
            .frame(
                StepKind::Split { depth },
                format!(
                    "Split sequences {} at mid = {mid}: left half {}, right half {}",
                    format_range(lo, hi),
                    format_range(lo, mid),
                    format_range(mid + 1, hi)
                ),
                |element| {
                    if in_range(element, &left_range) {
                        Tags::default().merging_left()
                    } else if in_range(element, &right_range) {
                        Tags::default().merging_right()
                    } else {
                        Tags::default()
                    }
                },
            )
            .lines(HighlightedLines::new(
                &[7, 8, 9, 10, 11],
                &[9, 10, 11, 12, 13],
                &[6, 7, 8, 9, 10],
                &[4, 5, 6, 7, 8],
            ))
            .variable("l", lo.to_string())
            .variable("r", hi.to_string())
            .variable("mid", mid.to_string())
            .variable("depth", depth.to_string())
            .annotation(Annotation::new(
                format!("mid = {mid}"),
                Point::new(origin.x() + 300.0, origin.y() + mid as f32 * config.row_spacing()),
                AnnotationKind::Info,
            ));
        context.emit(frame);

        let left = self.solve(context, lo, mid, depth + 1);

        let row = context.merge_row(&left, depth + 1);
        let frame = context
            .frame(
                StepKind::Interlude { depth },
                format!(
                    "Left half {} merged into {}, now solve the right half {}",
                    format_range(lo, mid),
                    format_list(left.iter().copied()),
                    format_range(mid + 1, hi)
                ),
                |element| {
                    if in_range(element, &left_range) {
                        Tags::default().processed()
                    } else if in_range(element, &right_range) {
                        Tags::default().merging_right()
                    } else {
                        Tags::default()
                    }
                },
            )
            .lines(HighlightedLines::new(&[9], &[11], &[8], &[6]))
            .variable("left", format_list(left.iter().copied()))
            .variable("depth", depth.to_string());
        context.emit(with_result(frame, &row));

        let right = self.solve(context, mid + 1, hi, depth + 1);
        let merged = merge_two(&left, &right);

        let whole = lo..=hi;
        let row = context.merge_row(&merged, depth);
        let frame = context
            .frame(
                StepKind::Merge { depth },
                format!(
                    "Merge {} and {} into {}",
                    format_list(left.iter().copied()),
                    format_list(right.iter().copied()),
                    format_list(merged.iter().copied())
                ),
                |element| {
                    if in_range(element, &whole) {
                        Tags::default().processed()
                    } else {
                        Tags::default()
                    }
                },
            )
            .lines(HighlightedLines::new(
                &[8, 9, 10, 11],
                &[10, 11, 12, 13],
                &[7, 8, 9, 10],
                &[5, 6, 7, 8],
            ))
            .variable("left", format_list(left.iter().copied()))
            .variable("right", format_list(right.iter().copied()))
            .variable("merged", format_list(merged.iter().copied()))
            .variable("depth", depth.to_string())
            .annotation(Annotation::new(
                format!("merge at depth {depth}"),
                Point::new(
                    config.result_origin_x() + merged.len() as f32 * 35.0,
                    config.merge_row_y() + depth as f32 * config.merge_depth_step() - 20.0,
                ),
                AnnotationKind::Result,
            ));
        context.emit(with_result(frame, &row));

        merged
    }
}

impl Simulator for DivideConquer {
    fn empty_frame(&self) -> FrameBuilder {
        FrameBuilder::new(StepKind::Empty, "Input is empty, returning an empty list")
            .lines(HighlightedLines::new(&[3], &[3, 4], &[2], &[2]))
    }

    fn simulate(&self, context: &mut Context<'_>) {
        let count = context.sequences().len();
        let config = context.config().clone();

        let init = context
            .frame(
                StepKind::Init,
                format!("Initialise: merge {count} sorted sequences by divide and conquer"),
                |_| Tags::default(),
            )
            .lines(HighlightedLines::new(&[2, 3], &[2, 3], &[2], &[2]))
            .variable("l", "0")
            .variable("r", (count - 1).to_string())
            .annotation(Annotation::new(
                "Divide and conquer",
                Point::new(50.0, 30.0),
                AnnotationKind::Info,
            ));
        context.emit(init);

        let result = self.solve(context, 0, count - 1, 0);
        debug!(sequences = count, values = result.len(); "Divide and conquer finished");

        let row = context.result_row(&result, None);
        let frame = context
            .frame(
                StepKind::Complete,
                format!("Merge complete! Result: {}", format_chain(&result)),
                |_| Tags::default().processed(),
            )
            .lines(HighlightedLines::new(&[3], &[5], &[2], &[2]))
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
