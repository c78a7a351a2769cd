//! Sequential merge: fold every sequence into an accumulator, one round per
//! sequence, with a classic two-pointer merge inside each round.

use log::debug;

use mergeviz_core::{
    element::{Element, ElementId, Tags},
    frame::{Annotation, AnnotationKind, FrameBuilder, HighlightedLines, StepKind},
    geometry::Point,
};

use super::{Context, Simulator, format_chain, format_list, with_result};

pub(crate) struct Sequential;

/// A value of the accumulator together with the input element it came from.
#[derive(Debug, Clone, Copy)]
struct Entry {
    value: i64,
    origin: ElementId,
}

fn values(entries: &[Entry]) -> Vec<i64> {
    entries.iter().map(|entry| entry.value).collect()
}

/// Sequences already folded into the accumulator are the left operand, the
/// sequence of this round is the right operand and the rest wait their turn.
fn round_tags(element: &Element, round: usize) -> Tags {
    match element.sequence().input_index() {
        Some(index) if index < round => Tags::default().processed().merging_left(),
        Some(index) if index == round => Tags::default().merging_right(),
        _ => Tags::default().pending(),
    }
}

fn folded_tags(element: &Element, round: usize) -> Tags {
    match element.sequence().input_index() {
        Some(index) if index <= round => Tags::default().processed(),
        _ => Tags::default().pending(),
    }
}

impl Simulator for Sequential {
    fn empty_frame(&self) -> FrameBuilder {
        FrameBuilder::new(StepKind::Empty, "Input is empty, returning an empty list")
            .lines(HighlightedLines::uniform(&[3, 4]))
            .variable("ans", "null")
    }

    fn simulate(&self, context: &mut Context<'_>) {
        let sequences = context.sequences();
        let config = context.config().clone();
        let origin = config.origin();

        let init = context
            .frame(
                StepKind::Init,
                format!("Initialise: merge {} sorted sequences one at a time into ans", sequences.len()),
                |_| Tags::default(),
            )
            .lines(HighlightedLines::new(&[3], &[3], &[3], &[2]))
            .variable("ans", "null")
            .variable("i", "0")
            .annotation(Annotation::new(
                "Sequential merge",
                Point::new(50.0, 30.0),
                AnnotationKind::Info,
            ));
        context.emit(init);

        let mut acc: Vec<Entry> = Vec::new();

        for round in 0..sequences.len() {
            let sequence: Vec<Entry> = context
                .template()
                .elements()
                .iter()
                .filter(|element| element.is_in_input(round))
                .map(|element| Entry {
                    value: element.value(),
                    origin: element.id(),
                })
                .collect();
            let number = round + 1;

            // Before the round
            let description = if acc.is_empty() {
                format!(
                    "Round {number}: ans is empty, take sequence {number} {}",
                    format_list(values(&sequence))
                )
            } else {
                format!(
                    "Round {number}: merge ans {} with sequence {number} {}",
                    format_list(values(&acc)),
                    format_list(values(&sequence))
                )
            };
            let mut row = context.result_row(&values(&acc), None);
            for element in &mut row.elements {
                *element.tags_mut() = Tags::default().merging_left();
            }
            let mut frame = context
                .frame(StepKind::BeforeRound, description, |element| round_tags(element, round))
                .lines(HighlightedLines::new(&[4, 5], &[4, 5], &[4, 5], &[3, 4]))
                .variable("ans", ans_value(&acc))
                .variable("i", round.to_string());
            frame = with_result(frame, &row);
            if let Some(head) = sequence.first() {
                let y = origin.y() + round as f32 * config.row_spacing();
                frame = frame.annotation(
                    Annotation::new(format!("merge list {number}"), Point::new(origin.x() - 70.0, y), AnnotationKind::Info)
                        .with_target(head.origin),
                );
            }
            context.emit(frame);

            // Two-pointer merge of acc and the current sequence
            let mut merged: Vec<Entry> = Vec::with_capacity(acc.len() + sequence.len());
            let (mut left, mut right) = (0, 0);

            while left < acc.len() && right < sequence.len() {
                let a = acc[left];
                let b = sequence[right];
                let take_left = a.value <= b.value;
                let taken = if take_left { a } else { b };
                merged.push(taken);

                let consumed = right;
                let tag = |element: &Element| {
                    let mut tags = if element.id() == a.origin {
                        Tags::default().highlighted().labeled("aPtr")
                    } else if element.id() == b.origin {
                        Tags::default().highlighted().labeled("bPtr")
                    } else if element.is_in_input(round) && element.position() < consumed {
                        Tags::default().processed().merging_right()
                    } else {
                        round_tags(element, round)
                    };
                    if element.id() == taken.origin {
                        tags = tags.current();
                    }
                    tags
                };

                let (description, lines, relation) = if take_left {
                    (
                        format!("Compare {} and {}: {} is not larger, take it from ans", a.value, b.value, a.value),
                        HighlightedLines::new(&[16, 17, 18], &[14, 15, 16], &[16, 17, 18], &[14, 15, 16]),
                        "≤",
                    )
                } else {
                    (
                        format!("Compare {} and {}: {} is smaller, take it from sequence {number}", a.value, b.value, b.value),
                        HighlightedLines::new(&[19, 20, 21], &[17, 18, 19], &[19, 20, 21], &[17, 18, 19]),
                        ">",
                    )
                };

                let row = context.result_row(&values(&merged), Some(merged.len() - 1));
                let frame = context
                    .frame(StepKind::Compare, description, tag)
                    .lines(lines)
                    .variable("aPtr.val", a.value.to_string())
                    .variable("bPtr.val", b.value.to_string())
                    .variable("merged", format_list(values(&merged)))
                    .annotation(Annotation::new(
                        format!("{} {relation} {}", a.value, b.value),
                        Point::new(config.result_origin_x() + 200.0, config.result_row_y() - 50.0),
                        AnnotationKind::Compare,
                    ));
                context.emit(with_result(frame, &row));

                if take_left {
                    left += 1;
                } else {
                    right += 1;
                }
            }

            // Whatever is left on one side is appended as a block
            let (rest, source) = if left < acc.len() {
                (&acc[left..], "ans".to_string())
            } else {
                (&sequence[right..], format!("sequence {number}"))
            };
            if !rest.is_empty() {
                let appended: Vec<ElementId> = rest.iter().map(|entry| entry.origin).collect();
                merged.extend_from_slice(rest);

                let description = format!(
                    "Append the remaining {} {} {} from {source}",
                    rest.len(),
                    if rest.len() == 1 { "value" } else { "values" },
                    format_list(values(rest)),
                );
                let row = context.result_row(&values(&merged), None);
                let frame = context
                    .frame(StepKind::Remainder, description, |element| {
                        let tags = folded_tags(element, round);
                        if appended.contains(&element.id()) {
                            tags.highlighted()
                        } else {
                            tags
                        }
                    })
                    .lines(HighlightedLines::new(&[24], &[21], &[27, 28, 29, 30, 31], &[22]))
                    .variable("merged", format_list(values(&merged)));
                context.emit(with_result(frame, &row));
            }

            acc = merged;

            let row = context.result_row(&values(&acc), None);
            let frame = context
                .frame(
                    StepKind::RoundComplete,
                    format!("Round {number} complete: ans = {}", format_list(values(&acc))),
                    |element| folded_tags(element, round),
                )
                .lines(HighlightedLines::new(&[5], &[5], &[4], &[4]))
                .variable("ans", ans_value(&acc))
                .variable("i", round.to_string());
            context.emit(with_result(frame, &row));
        }

        let result = values(&acc);
        debug!(rounds = context.sequences().len(), values = result.len(); "Sequential fold finished");
        let row = context.result_row(&result, None);
        let frame = context
            .frame(
                StepKind::Complete,
                format!("Merge complete! Result: {}", format_chain(&result)),
                |_| Tags::default().processed(),
            )
            .lines(HighlightedLines::new(&[6], &[6], &[6], &[5]))
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

fn ans_value(acc: &[Entry]) -> String {
    if acc.is_empty() {
        "null".to_string()
    } else {
        format_list(values(acc))
    }
}
