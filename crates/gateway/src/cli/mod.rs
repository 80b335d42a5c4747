pub mod config;
pub mod doctor;
pub mod practice;

use clap::{Parser, Subcommand};

/// Interview Practice Partner: mock interviews with an adaptive AI interviewer.
#[derive(Debug, Parser)]
#[command(name = "ipp", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the HTTP server (default when no subcommand is given).
    Serve,
    /// Run diagnostic checks against the current configuration.
    Doctor,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Practice an interview in the terminal.
    Practice {
        /// Role to interview for, e.g. "Backend Developer".
        #[arg(long)]
        role: String,
        /// Experience level (defaults to `interview.default_experience_level`).
        #[arg(long)]
        experience: Option<String>,
        /// Path to a PDF or DOCX resume.
        #[arg(long)]
        resume: Option<String>,
    },
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

// ── Config loading helper ─────────────────────────────────────────────

/// Load the configuration from the path in `IPP_CONFIG` (or `config.toml`
/// by default). A missing file means all defaults. Returns the parsed
/// [`Config`](ipp_domain::config::Config) and the path that was used.
pub fn load_config() -> anyhow::Result<(ipp_domain::config::Config, String)> {
    let config_path = std::env::var("IPP_CONFIG").unwrap_or_else(|_| "config.toml".into());
    let config = load_config_from(&config_path)?;
    Ok((config, config_path))
}

pub fn load_config_from(config_path: &str) -> anyhow::Result<ipp_domain::config::Config> {
    if !std::path::Path::new(config_path).exists() {
        return Ok(ipp_domain::config::Config::default());
    }
    let raw = std::fs::read_to_string(config_path)
        .map_err(|e| anyhow::anyhow!("reading {config_path}: {e}"))?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {config_path}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let config = load_config_from(path.to_str().unwrap()).unwrap();
        assert_eq!(config.interview.max_questions, 15);
    }

    #[test]
    fn file_overrides_are_applied() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[interview]\nmax_questions = 5\n\n[llm]\nkind = \"openai_compat\"\nbase_url = \"http://localhost:11434/v1\"\nmodel = \"llama3\""
        )
        .unwrap();

        let config = load_config_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.interview.max_questions, 5);
        assert_eq!(config.llm.model, "llama3");
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[interview\nmax_questions = ").unwrap();
        let err = load_config_from(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("parsing"));
    }

    #[test]
    fn practice_requires_role() {
        assert!(Cli::try_parse_from(["ipp", "practice"]).is_err());
        let cli = Cli::try_parse_from(["ipp", "practice", "--role", "QA Engineer"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Practice { ref role, experience: None, resume: None }) if role == "QA Engineer"
        ));
    }
}
