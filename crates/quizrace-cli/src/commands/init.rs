//! The `quizrace init` command.

use std::path::Path;

use anyhow::{Context, Result};

use quizrace_core::config::{QuizConfig, LOCAL_CONFIG_FILE};

pub fn execute() -> Result<()> {
    // Create quizrace.toml
    if Path::new(LOCAL_CONFIG_FILE).exists() {
        println!("{LOCAL_CONFIG_FILE} already exists, skipping.");
    } else {
        let body = toml::to_string(&QuizConfig::default())
            .context("failed to render default config")?;
        std::fs::write(LOCAL_CONFIG_FILE, format!("{CONFIG_HEADER}{body}"))?;
        println!("Created {LOCAL_CONFIG_FILE}");
    }

    // Create sample problems file
    let problems_path = Path::new("problems.csv");
    if problems_path.exists() {
        println!("problems.csv already exists, skipping.");
    } else {
        std::fs::write(problems_path, SAMPLE_PROBLEMS)?;
        println!("Created problems.csv");
    }

    println!("\nNext steps:");
    println!("  1. Edit problems.csv with your own question,answer rows");
    println!("  2. Run: quizrace validate");
    println!("  3. Run: quizrace run --time-limit 60");

    Ok(())
}

const CONFIG_HEADER: &str = "# quizrace configuration\n\n";

const SAMPLE_PROBLEMS: &str = "5+5,10
7+3,10
1+1,2
8+3,11
1+2,3
8+6,14
3+1,4
1+4,5
5+1,6
2+3,5
3+3,6
2+4,6
5+2,7
\"what 2+2, sir?\",4
";
