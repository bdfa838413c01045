//! Multi-subject academic report text.
//!
//! Layout (every line ends with `\n`):
//!
//! ```text
//! Academic Report
//! -------------------
//! Subject: Calculus I
//!   E1 - Exam 1: score 8.5 (weight 2)
//!   E2 - Exam 2: score - (weight 2)
//!   Final average: 8.50 | Status: In progress
//!
//! ```
//!
//! Scores and weights use Rust's shortest round-trip float formatting;
//! averages always show two decimals. No locale is involved.

use super::evaluation::evaluate;
use crate::model::subject::Subject;

pub const REPORT_TITLE: &str = "Academic Report";
const REPORT_RULE: &str = "-------------------";
/// Stands in for a missing score or average.
pub const MISSING_VALUE: &str = "-";

/// Renders subjects in input order, each section followed by a blank line.
pub fn build_report(subjects: &[Subject]) -> String {
    let mut out = String::new();
    push_line(&mut out, REPORT_TITLE);
    push_line(&mut out, REPORT_RULE);

    for subject in subjects {
        let evaluation = evaluate(subject);
        push_line(&mut out, &format!("Subject: {}", subject.name));
        for assessment in &subject.assessments {
            let score = assessment
                .score
                .map_or_else(|| MISSING_VALUE.to_string(), |score| score.to_string());
            push_line(
                &mut out,
                &format!(
                    "  {} - {}: score {} (weight {})",
                    assessment.id.code(),
                    assessment.description,
                    score,
                    assessment.weight
                ),
            );
        }
        let average = evaluation
            .average
            .map_or_else(|| MISSING_VALUE.to_string(), |average| format!("{average:.2}"));
        push_line(
            &mut out,
            &format!(
                "  Final average: {average} | Status: {}",
                evaluation.status.label()
            ),
        );
        out.push('\n');
    }

    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
