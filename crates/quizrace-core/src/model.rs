//! Core data model types for quizrace.
//!
//! These are the values that flow between the loader, the input arbiter,
//! the scorer, and the session driver. None of them are global: a session
//! owns its problem set and deadline and hands them to each stage in turn.

use std::fmt;
use std::time::Duration;

use tokio::time::Instant;

/// A single question with its recorded answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// The question shown to the user.
    pub prompt: String,
    /// The answer a reply must match exactly.
    pub expected_answer: String,
    /// The trimmed reply, if one was captured before the deadline.
    pub user_answer: Option<String>,
}

impl Problem {
    /// Create an unanswered problem.
    pub fn new(prompt: impl Into<String>, expected_answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            expected_answer: expected_answer.into(),
            user_answer: None,
        }
    }

    /// Whether a reply was recorded and matches the expected answer exactly.
    pub fn is_correct(&self) -> bool {
        self.user_answer.as_deref() == Some(self.expected_answer.as_str())
    }

    /// Whether a reply was recorded at all.
    pub fn is_answered(&self) -> bool {
        self.user_answer.is_some()
    }
}

/// An ordered collection of problems.
///
/// Presentation order is storage order. The length is fixed once built;
/// callers only get mutable access through a slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemSet {
    problems: Vec<Problem>,
}

impl ProblemSet {
    pub fn new(problems: Vec<Problem>) -> Self {
        Self { problems }
    }

    /// Build a set from `(prompt, expected_answer)` pairs.
    pub fn from_pairs<I, P, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (P, A)>,
        P: Into<String>,
        A: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(prompt, answer)| Problem::new(prompt, answer))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn problems_mut(&mut self) -> &mut [Problem] {
        &mut self.problems
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Problem> {
        self.problems.iter()
    }
}

/// The instant after which no further answers are accepted.
///
/// Computed once per session and copied into every per-question race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

/// Longest limit a deadline honours; larger limits are clamped to it.
pub const MAX_TIME_LIMIT: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

impl Deadline {
    /// A deadline `limit` from now, clamped to [`MAX_TIME_LIMIT`].
    pub fn after(limit: Duration) -> Self {
        let now = Instant::now();
        let at = now.checked_add(limit.min(MAX_TIME_LIMIT)).unwrap_or(now);
        Self { at }
    }

    /// A deadline `secs` seconds from now. Zero or negative means "already due".
    pub fn from_secs(secs: i64) -> Self {
        Self::after(Duration::from_secs(secs.max(0).unsigned_abs()))
    }

    pub fn instant(&self) -> Instant {
        self.at
    }

    pub fn has_elapsed(&self) -> bool {
        Instant::now() >= self.at
    }

    pub fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}

/// Why the ask phase stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminationReason {
    /// Every problem received a reply before the deadline.
    Completed,
    /// The deadline won a race; later problems were never asked.
    TimedOut,
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationReason::Completed => write!(f, "completed"),
            TerminationReason::TimedOut => write!(f, "timed out"),
        }
    }
}

/// The tally of a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Outcome {
    pub correct: usize,
    pub total: usize,
}

impl Outcome {
    /// Fraction of problems answered correctly, `0.0` for an empty set.
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You got {} of {} problems correct.",
            self.correct, self.total
        )
    }
}
