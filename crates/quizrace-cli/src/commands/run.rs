//! The `quizrace run` command.

use std::path::PathBuf;

use anyhow::Result;
use tokio::io::BufReader;

use quizrace_core::config::load_config_from;
use quizrace_core::session::{FinishedSession, Session, SessionReport};

pub async fn execute(
    problems_path: Option<PathBuf>,
    time_limit: Option<i64>,
    config_path: Option<PathBuf>,
    review: bool,
) -> Result<()> {
    // Load config
    let mut config = load_config_from(config_path.as_deref())?;
    config.apply_overrides(problems_path, time_limit);

    // Load problems before anything is asked
    let session = Session::from_config(&config)?;
    if session.problems().is_empty() {
        eprintln!(
            "Warning: {} contains no problems.",
            config.problems_path.display()
        );
    }

    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();

    match session.run(input, &mut stdout).await? {
        SessionReport::Declined => {}
        SessionReport::Finished(finished) => {
            if review {
                print_review(&finished);
            }
        }
    }

    Ok(())
}

fn print_review(finished: &FinishedSession) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Expected", "Your answer", "Result"]);

    for (index, problem) in finished.problems.iter().enumerate() {
        let result = if !problem.is_answered() {
            "not reached"
        } else if problem.is_correct() {
            "OK"
        } else {
            "WRONG"
        };
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&problem.prompt),
            Cell::new(&problem.expected_answer),
            Cell::new(problem.user_answer.as_deref().unwrap_or("-")),
            Cell::new(result),
        ]);
    }

    eprintln!("\n{table}");
    eprintln!(
        "Quiz {} in {:.1}s with {:.1}s left ({:.0}% correct)",
        finished.reason,
        finished.elapsed.as_secs_f64(),
        finished.remaining.as_secs_f64(),
        finished.outcome.ratio() * 100.0
    );
}
