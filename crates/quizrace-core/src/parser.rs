//! CSV problem set loader.
//!
//! Loads problem sets from two-column CSV files (`question,answer`, no
//! header row) and validates them.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Problem, ProblemSet};

/// Parse a problems file into a `ProblemSet`.
pub fn load_problems(path: &Path) -> Result<ProblemSet> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open problems file: {}", path.display()))?;

    parse_problems_reader(file, path)
}

/// Parse CSV text into a `ProblemSet` (useful for testing).
pub fn parse_problems_str(content: &str, source_path: &Path) -> Result<ProblemSet> {
    parse_problems_reader(content.as_bytes(), source_path)
}

fn parse_problems_reader<R: Read>(reader: R, source_path: &Path) -> Result<ProblemSet> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(reader);

    let mut problems = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record
            .with_context(|| format!("failed to parse CSV: {}", source_path.display()))?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 1);

        anyhow::ensure!(
            record.len() == 2,
            "{}:{}: expected 2 columns (question, answer), found {}",
            source_path.display(),
            line,
            record.len()
        );

        problems.push(Problem::new(&record[0], &record[1]));
    }

    tracing::debug!(
        "loaded {} problems from {}",
        problems.len(),
        source_path.display()
    );

    Ok(ProblemSet::new(problems))
}

/// A warning from problem set validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based position of the problem (if applicable).
    pub problem: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a problem set for common authoring mistakes.
pub fn validate_problem_set(set: &ProblemSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.is_empty() {
        warnings.push(ValidationWarning {
            problem: None,
            message: "problem set is empty".into(),
        });
        return warnings;
    }

    let mut seen_prompts = HashSet::new();
    for (index, problem) in set.iter().enumerate() {
        let position = Some(index + 1);

        if problem.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                problem: position,
                message: "question is empty".into(),
            });
        } else if !seen_prompts.insert(problem.prompt.as_str()) {
            warnings.push(ValidationWarning {
                problem: position,
                message: format!("duplicate question: {}", problem.prompt),
            });
        }

        // Replies are trimmed before comparison, so padding makes a problem unwinnable.
        if problem.expected_answer.is_empty() {
            warnings.push(ValidationWarning {
                problem: position,
                message: "expected answer is empty".into(),
            });
        } else if problem.expected_answer.trim() != problem.expected_answer {
            warnings.push(ValidationWarning {
                problem: position,
                message: format!(
                    "expected answer {:?} has surrounding whitespace and can never match",
                    problem.expected_answer
                ),
            });
        }
    }

    warnings
}
