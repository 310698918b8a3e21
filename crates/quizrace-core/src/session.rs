//! Session driver.
//!
//! Asks for a start confirmation, creates the session deadline, hands the
//! problems to the input arbiter, and scores whatever was answered. A timeout
//! is not an error: both termination reasons reach the same reporting step.

use std::time::Duration;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::time::Instant;

use crate::arbiter::{write_line, InputArbiter};
use crate::config::QuizConfig;
use crate::model::{Deadline, Outcome, ProblemSet, TerminationReason};
use crate::parser::load_problems;
use crate::scorer::score;

/// One timed run over a problem set.
#[derive(Debug, Clone)]
pub struct Session {
    problems: ProblemSet,
    time_limit: Duration,
    confirm_token: String,
}

/// How a session ended.
#[derive(Debug)]
pub enum SessionReport {
    /// The user did not confirm the start; nothing was asked or scored.
    Declined,
    /// The timed portion ran and was scored.
    Finished(FinishedSession),
}

/// Results of a session that ran its timed portion.
#[derive(Debug)]
pub struct FinishedSession {
    pub reason: TerminationReason,
    pub outcome: Outcome,
    /// The problems with every reply that was captured.
    pub problems: ProblemSet,
    /// Time spent in the timed portion.
    pub elapsed: Duration,
    /// Time left on the deadline when the ask phase stopped.
    pub remaining: Duration,
}

impl Session {
    pub fn new(problems: ProblemSet, time_limit: Duration) -> Self {
        Self {
            problems,
            time_limit,
            confirm_token: "Y".to_string(),
        }
    }

    /// Load the configured problems file and build a session from it.
    pub fn from_config(config: &QuizConfig) -> Result<Self> {
        let problems = load_problems(&config.problems_path)?;
        let time_limit = Duration::from_secs(config.time_limit_secs.max(0).unsigned_abs());
        Ok(Self::new(problems, time_limit).with_confirm_token(config.confirm_token.clone()))
    }

    /// Replace the reply that starts the timed portion.
    pub fn with_confirm_token(mut self, token: impl Into<String>) -> Self {
        self.confirm_token = token.into();
        self
    }

    pub fn problems(&self) -> &ProblemSet {
        &self.problems
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Run the session, reading replies from `input` and writing to `out`.
    ///
    /// Input faults during the timed portion abort the session without a score.
    pub async fn run<R, W>(mut self, input: R, out: &mut W) -> Result<SessionReport>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
    {
        write_line(
            out,
            &format!(
                "Current time limit is {} seconds, start the quiz? (Y/n)",
                self.time_limit.as_secs()
            ),
        )
        .await?;

        let mut arbiter = InputArbiter::new(input);
        let reply = arbiter.read_line_untimed().await?;
        if reply.as_deref().map(str::trim) != Some(self.confirm_token.as_str()) {
            tracing::info!("quiz not started");
            return Ok(SessionReport::Declined);
        }

        tracing::info!(
            "starting quiz: {} problems, {}s limit",
            self.problems.len(),
            self.time_limit.as_secs()
        );

        let started = Instant::now();
        let deadline = Deadline::after(self.time_limit);
        let reason = arbiter
            .ask_all(self.problems.problems_mut(), deadline, out)
            .await?;
        let elapsed = started.elapsed();
        let remaining = deadline.remaining();

        if arbiter.has_orphan() {
            tracing::debug!("leaving an abandoned read behind");
        }

        let outcome = score(self.problems.problems());
        write_line(out, &outcome.to_string()).await?;

        tracing::info!(
            "quiz {reason} after {:.1}s: {}/{} correct",
            elapsed.as_secs_f64(),
            outcome.correct,
            outcome.total
        );

        Ok(SessionReport::Finished(FinishedSession {
            reason,
            outcome,
            problems: self.problems,
            elapsed,
            remaining,
        }))
    }
}
