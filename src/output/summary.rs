use crate::analyzer::SizeSummary;

/// Text block for the summary panel, labels in first-seen order.
pub fn summary_text(summary: &SizeSummary) -> String {
    let mut text = String::from("Page Size Summary:\n\n");
    for (label, count) in summary {
        text.push_str(&format!("{}: {} pages\n", label, count));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_labels_in_order_with_counts() {
        let mut summary = SizeSummary::new();
        summary.insert("Letter (Print on: Letter)".to_string(), 1);
        summary.insert("A4 (Print on: A4)".to_string(), 3);

        let text = summary_text(&summary);
        assert_eq!(
            text,
            "Page Size Summary:\n\nLetter (Print on: Letter): 1 pages\nA4 (Print on: A4): 3 pages\n"
        );
    }

    #[test]
    fn empty_summary_is_just_the_heading() {
        let text = summary_text(&SizeSummary::new());
        assert_eq!(text, "Page Size Summary:\n\n");
    }
}
