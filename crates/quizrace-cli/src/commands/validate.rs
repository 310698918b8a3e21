//! The `quizrace validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(problems_path: PathBuf) -> Result<()> {
    let set = quizrace_core::parser::load_problems(&problems_path)?;

    println!(
        "Problem set: {} ({} problems)",
        problems_path.display(),
        set.len()
    );

    let warnings = quizrace_core::parser::validate_problem_set(&set);
    for w in &warnings {
        let prefix = w
            .problem
            .map(|n| format!("  [#{n}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All problems valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
