//! Quiz configuration.
//!
//! Values are layered: built-in defaults, then a TOML file, then environment
//! variables, then command-line flags applied by the caller through
//! [`QuizConfig::apply_overrides`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the config file looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = "quizrace.toml";

/// Top-level quizrace configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// CSV file with one `question,answer` pair per row.
    #[serde(default = "default_problems_path")]
    pub problems_path: PathBuf,
    /// Time allowed for the whole quiz, in seconds. Zero or less ends it at once.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: i64,
    /// Reply that starts the timed portion.
    #[serde(default = "default_confirm_token")]
    pub confirm_token: String,
}

fn default_problems_path() -> PathBuf {
    PathBuf::from("./problems.csv")
}
fn default_time_limit() -> i64 {
    30
}
fn default_confirm_token() -> String {
    "Y".to_string()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            problems_path: default_problems_path(),
            time_limit_secs: default_time_limit(),
            confirm_token: default_confirm_token(),
        }
    }
}

impl QuizConfig {
    /// Apply command-line overrides on top of the loaded values.
    pub fn apply_overrides(
        &mut self,
        problems_path: Option<PathBuf>,
        time_limit_secs: Option<i64>,
    ) {
        if let Some(path) = problems_path {
            self.problems_path = path;
        }
        if let Some(secs) = time_limit_secs {
            self.time_limit_secs = secs;
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `quizrace.toml` in the current directory
/// 2. `~/.config/quizrace/config.toml`
///
/// Environment variable overrides: `QUIZRACE_PROBLEMS_PATH`, `QUIZRACE_TIME_LIMIT`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => QuizConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    Ok(config)
}

fn apply_env_overrides<F>(config: &mut QuizConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup("QUIZRACE_PROBLEMS_PATH") {
        config.problems_path = PathBuf::from(path);
    }

    if let Some(secs) = lookup("QUIZRACE_TIME_LIMIT") {
        config.time_limit_secs = secs
            .trim()
            .parse()
            .with_context(|| format!("invalid QUIZRACE_TIME_LIMIT: '{secs}'"))?;
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizrace"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config() {
        let config = QuizConfig::default();
        assert_eq!(config.problems_path, PathBuf::from("./problems.csv"));
        assert_eq!(config.time_limit_secs, 30);
        assert_eq!(config.confirm_token, "Y");
    }

    #[test]
    fn parse_partial_config() {
        let config: QuizConfig = toml::from_str("time_limit_secs = 90\n").unwrap();
        assert_eq!(config.time_limit_secs, 90);
        assert_eq!(config.problems_path, PathBuf::from("./problems.csv"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("no/such/quizrace.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "problems_path = \"capitals.csv\"\ntime_limit_secs = -1\nconfirm_token = \"go\"\n",
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.problems_path, PathBuf::from("capitals.csv"));
        assert_eq!(config.time_limit_secs, -1);
        assert_eq!(config.confirm_token, "go");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "time_limit_secs = \"soon\"").unwrap();

        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn env_overrides() {
        let env: HashMap<&str, &str> = [
            ("QUIZRACE_PROBLEMS_PATH", "env.csv"),
            ("QUIZRACE_TIME_LIMIT", " 45 "),
        ]
        .into_iter()
        .collect();

        let mut config = QuizConfig::default();
        apply_env_overrides(&mut config, |name| env.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.problems_path, PathBuf::from("env.csv"));
        assert_eq!(config.time_limit_secs, 45);
    }

    #[test]
    fn invalid_env_time_limit() {
        let mut config = QuizConfig::default();
        let err = apply_env_overrides(&mut config, |name| {
            (name == "QUIZRACE_TIME_LIMIT").then(|| "half a minute".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("invalid QUIZRACE_TIME_LIMIT"));
    }

    #[test]
    fn flag_overrides_win() {
        let mut config = QuizConfig::default();
        config.apply_overrides(Some(PathBuf::from("flags.csv")), Some(5));
        assert_eq!(config.problems_path, PathBuf::from("flags.csv"));
        assert_eq!(config.time_limit_secs, 5);

        config.apply_overrides(None, None);
        assert_eq!(config.time_limit_secs, 5);
    }
}
