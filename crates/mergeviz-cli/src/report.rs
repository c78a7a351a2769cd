//! Plain-text rendering of frames for the terminal.
//!
//! Each input value is printed with a one-character marker for its display
//! role: `*` current, `<` left operand, `>` right operand, `^` highlighted,
//! `+` processed, `~` pending. Unmarked values have no role.

use std::fmt::Write;

use mergeviz::{
    element::{DisplayRole, Element},
    frame::{Frame, ReferenceLanguage},
};

fn marker(role: DisplayRole) -> &'static str {
    match role {
        DisplayRole::Current => "*",
        DisplayRole::MergeLeft => "<",
        DisplayRole::MergeRight => ">",
        DisplayRole::Highlighted => "^",
        DisplayRole::Processed => "+",
        DisplayRole::Pending => "~",
        DisplayRole::Result | DisplayRole::Default => "",
    }
}

fn render_values<'a>(elements: impl IntoIterator<Item = &'a Element>) -> String {
    let values: Vec<String> = elements
        .into_iter()
        .map(|element| format!("{}{}", element.value(), marker(element.display_role())))
        .collect();
    values.join(" ")
}

/// Renders one frame as a short block of text.
pub fn render_frame(frame: &Frame, total: usize, language: ReferenceLanguage) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}/{total}] {}: {}", frame.id() + 1, frame.step(), frame.description());

    let mut index = 0;
    loop {
        let row: Vec<&Element> = frame
            .elements()
            .iter()
            .filter(|element| element.is_in_input(index))
            .collect();
        if row.is_empty() && !frame.elements().iter().any(|e| e.sequence().input_index() > Some(index)) {
            break;
        }
        let _ = writeln!(out, "  list {:<3} {}", index + 1, render_values(row));
        index += 1;
    }

    if !frame.result_elements().is_empty() {
        let _ = writeln!(out, "  result   {}", render_values(frame.result_elements()));
    }

    if !frame.variables().is_empty() {
        let variables: Vec<String> = frame
            .variables()
            .iter()
            .map(|(name, value)| format!("{name} = {value}"))
            .collect();
        let _ = writeln!(out, "  vars     {}", variables.join(", "));
    }

    let lines: Vec<String> = frame
        .highlighted_lines()
        .get(language)
        .iter()
        .map(u32::to_string)
        .collect();
    if !lines.is_empty() {
        let _ = writeln!(out, "  {:<8} {}", language.name(), lines.join(", "));
    }

    out
}

#[cfg(test)]
mod tests {
    use mergeviz::trace::{Algorithm, generate_trace};

    use super::*;

    #[test]
    fn test_render_compare_frame() {
        let trace = generate_trace(Algorithm::Sequential, &[vec![2], vec![1]]);
        let compare = trace.iter().find(|f| f.step().name() == "compare").unwrap();

        let text = render_frame(compare, trace.len(), ReferenceLanguage::Python);
        assert!(text.starts_with(&format!("[{}/{}] compare: ", compare.id() + 1, trace.len())));
        assert!(text.contains("  list 1   2^"), "{text}");
        assert!(text.contains("  list 2   1*"), "{text}");
        assert!(text.contains("  result   1*"), "{text}");
        assert!(text.contains("aPtr.val = 2"), "{text}");
        assert!(text.contains("python   17, 18, 19"), "{text}");
    }

    #[test]
    fn test_render_keeps_empty_lists() {
        let trace = generate_trace(Algorithm::PriorityQueue, &[vec![], vec![3]]);
        let text = render_frame(trace.get(0).unwrap(), trace.len(), ReferenceLanguage::Java);

        assert!(text.contains("  list 1   \n"), "{text}");
        assert!(text.contains("  list 2   3"), "{text}");
    }

    #[test]
    fn test_render_empty_frame() {
        let trace = generate_trace(Algorithm::DivideConquer, &[]);
        let text = render_frame(trace.last(), trace.len(), ReferenceLanguage::Golang);

        assert!(text.starts_with("[1/1] empty: Input is empty"), "{text}");
        assert!(!text.contains("  list "), "{text}");
        assert!(text.contains("golang   2"), "{text}");
    }
}
