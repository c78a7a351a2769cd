//! Integration tests for trace assembly and playback
//!
//! These tests exercise the public API the way a renderer would: assemble a
//! trace, walk it with a playback controller and read frames.

use mergeviz::{
    Session,
    config::{AppConfig, LayoutConfig},
    element::{Element, ElementId, Tags},
    frame::{FrameBuilder, StepKind},
    layout::LayoutEngine,
    playback::PlaybackController,
    trace::{Algorithm, TraceAssembler, generate_trace},
};

fn example() -> Vec<Vec<i64>> {
    vec![vec![1, 4, 5], vec![1, 3, 4], vec![2, 6]]
}

#[test]
fn test_example_merges_identically_for_every_algorithm() {
    for algorithm in Algorithm::ALL {
        let trace = generate_trace(algorithm, &example());
        assert_eq!(
            trace.final_result(),
            vec![1, 1, 2, 3, 4, 4, 5, 6],
            "{algorithm} produced the wrong result"
        );
        assert_eq!(trace.last().step(), StepKind::Complete);
    }
}

#[test]
fn test_divide_conquer_merges_two_single_sequences_at_depth_one() {
    let trace = generate_trace(Algorithm::DivideConquer, &example());

    let nested = trace
        .iter()
        .find(|frame| frame.step() == StepKind::Merge { depth: 1 })
        .expect("no merge at depth 1");
    assert_eq!(nested.variables().get("left").map(String::as_str), Some("[1, 4, 5]"));
    assert_eq!(nested.variables().get("right").map(String::as_str), Some("[1, 3, 4]"));
}

#[test]
fn test_priority_queue_pops_once_per_value() {
    let trace = generate_trace(Algorithm::PriorityQueue, &example());

    let pops = trace.iter().filter(|frame| frame.step() == StepKind::Pop).count();
    assert_eq!(pops, 8);

    // every pop is followed by a push, an exhausted step or the final frame
    for pair in trace.frames().windows(2) {
        if pair[0].step() == StepKind::Pop {
            assert!(
                matches!(
                    pair[1].step(),
                    StepKind::Push | StepKind::Exhausted | StepKind::Complete
                ),
                "pop at frame {} is followed by {}",
                pair[0].id(),
                pair[1].step()
            );
        }
    }
}

#[test]
fn test_frame_ids_are_positions() {
    for algorithm in Algorithm::ALL {
        let trace = generate_trace(algorithm, &example());
        for (index, frame) in trace.iter().enumerate() {
            assert_eq!(frame.id(), index);
        }
    }
}

#[test]
fn test_assembly_is_reproducible() {
    let assembler = TraceAssembler::default();
    for algorithm in Algorithm::ALL {
        let first = assembler.assemble(algorithm, &example());
        let second = assembler.assemble(algorithm, &example());
        assert_eq!(first, second, "{algorithm} is not deterministic");
    }
}

#[test]
fn test_tagged_copies_leave_template_untouched() {
    let mut engine = LayoutEngine::new(LayoutConfig::default());
    let template = engine.layout_sequences(&example());

    let mut first: Vec<Element> = template.tagged(|_| Tags::default().processed());
    let second: Vec<Element> = template.tagged(|_| Tags::default().pending());
    for element in &mut first {
        *element.tags_mut() = Tags::default().current().highlighted();
    }

    assert!(template.elements().iter().all(|element| element.tags().is_plain()));
    assert!(second.iter().all(|element| element.tags().is_pending()));
    assert!(second.iter().all(|element| !element.tags().is_current()));
}

#[test]
fn test_built_frames_ignore_later_retagging() {
    let mut engine = LayoutEngine::new(LayoutConfig::default());
    let template = engine.layout_sequences(&example());

    let mut elements = template.tagged(|_| Tags::default().pending());
    let before = FrameBuilder::new(StepKind::Init, "before")
        .input(&elements, template.links())
        .build(0);
    for element in &mut elements {
        *element.tags_mut() = Tags::default().processed();
    }
    let after = FrameBuilder::new(StepKind::Complete, "after")
        .input(&elements, template.links())
        .build(1);

    assert!(before.elements().iter().all(|element| element.tags().is_pending()));
    assert!(after.elements().iter().all(|element| element.tags().is_processed()));
}

#[test]
fn test_links_stay_inside_their_frame() {
    for algorithm in Algorithm::ALL {
        let trace = generate_trace(algorithm, &example());
        for frame in &trace {
            for link in frame.links().iter().chain(frame.result_links()) {
                assert!(frame.element(link.source()).is_some());
                assert!(frame.element(link.target()).is_some());
            }
        }
    }
}

#[test]
fn test_input_ids_start_at_one_for_every_trace() {
    let first = generate_trace(Algorithm::Sequential, &example());
    let second = generate_trace(Algorithm::PriorityQueue, &example());

    assert_eq!(first.get(0).unwrap().elements()[0].id(), ElementId::Node(1));
    assert_eq!(second.get(0).unwrap().elements()[0].id(), ElementId::Node(1));
}

#[test]
fn test_degenerate_inputs() {
    for algorithm in Algorithm::ALL {
        for input in [vec![], vec![vec![]]] {
            let trace = generate_trace(algorithm, &input);
            assert!(!trace.is_empty());
            assert!(trace.final_result().is_empty());
        }
    }
}

#[test]
fn test_playback_boundaries() {
    let trace = generate_trace(Algorithm::Sequential, &example());
    let total = trace.len();
    let mut playback = PlaybackController::new(total);

    playback.seek(total as isize + 5);
    assert_eq!(playback.current_frame(), total - 1);

    assert!(!playback.next());
    assert_eq!(playback.current_frame(), total - 1);

    playback.seek(-5);
    assert_eq!(playback.current_frame(), 0);
}

#[test]
fn test_playing_a_session_to_the_end() {
    let mut session = Session::new(&AppConfig::default(), example());
    session.playback_mut().play();

    let mut ticks = 0;
    while session.playback_mut().tick() {
        ticks += 1;
    }

    assert_eq!(ticks, session.trace().len() - 1);
    assert!(!session.playback().is_playing());
    assert_eq!(session.current_frame().result_values(), vec![1, 1, 2, 3, 4, 4, 5, 6]);
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn sorted_sequence_strategy() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(-100i64..100, 0..6).prop_map(|mut values| {
            values.sort_unstable();
            values
        })
    }

    fn sequences_strategy() -> impl Strategy<Value = Vec<Vec<i64>>> {
        prop::collection::vec(sorted_sequence_strategy(), 0..6)
    }

    fn check_final_result_is_sorted_concatenation(
        algorithm: Algorithm,
        sequences: &[Vec<i64>],
    ) -> Result<(), TestCaseError> {
        let trace = generate_trace(algorithm, sequences);

        let mut expected: Vec<i64> = sequences.iter().flatten().copied().collect();
        expected.sort_unstable();
        prop_assert_eq!(trace.final_result(), expected);
        Ok(())
    }

    fn check_frame_structure(algorithm: Algorithm, sequences: &[Vec<i64>]) -> Result<(), TestCaseError> {
        let trace = generate_trace(algorithm, sequences);
        let total: usize = sequences.iter().map(Vec::len).sum();

        prop_assert!(!trace.is_empty());
        for (index, frame) in trace.iter().enumerate() {
            prop_assert_eq!(frame.id(), index);
            // the whole input is shown in every frame
            prop_assert_eq!(frame.elements().len(), total);
        }
        if algorithm == Algorithm::PriorityQueue {
            let pops = trace.iter().filter(|frame| frame.step() == StepKind::Pop).count();
            prop_assert_eq!(pops, total);
        }
        Ok(())
    }

    fn algorithm_strategy() -> impl Strategy<Value = Algorithm> {
        prop::sample::select(Algorithm::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn final_result_is_sorted_concatenation(
            algorithm in algorithm_strategy(),
            sequences in sequences_strategy(),
        ) {
            check_final_result_is_sorted_concatenation(algorithm, &sequences)?;
        }

        #[test]
        fn frame_structure(
            algorithm in algorithm_strategy(),
            sequences in sequences_strategy(),
        ) {
            check_frame_structure(algorithm, &sequences)?;
        }
    }
}
