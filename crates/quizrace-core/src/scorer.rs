//! Scoring of answered problem sets.

use crate::model::{Outcome, Problem};

/// Tally the correct replies in `problems`.
///
/// A problem counts when a reply was recorded and equals the expected answer
/// exactly. Unanswered problems still count toward the total.
pub fn score(problems: &[Problem]) -> Outcome {
    let correct = problems.iter().filter(|p| p.is_correct()).count();
    Outcome {
        correct,
        total: problems.len(),
    }
}
