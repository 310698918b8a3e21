//! quizrace-core: problem loading, deadline-aware input, and scoring.
//!
//! This crate holds the data model and the three stages a quiz session runs
//! through: the CSV loader, the input arbiter that races each reply against
//! the session deadline, and the scorer.

pub mod arbiter;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod scorer;
pub mod session;

pub use arbiter::InputArbiter;
pub use config::{load_config_from, QuizConfig};
pub use error::InputError;
pub use model::{Deadline, Outcome, Problem, ProblemSet, TerminationReason};
pub use session::{FinishedSession, Session, SessionReport};
