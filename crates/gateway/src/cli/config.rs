use ipp_domain::config::{Config, ConfigSeverity};

/// Print every config issue. Returns `false` when any of them is an error.
pub fn validate(config: &Config, config_path: &str) -> bool {
    let issues = config.validate();

    if issues.is_empty() {
        println!("Config OK ({config_path})");
        return true;
    }

    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();
    let warning_count = issues.len() - error_count;

    for issue in &issues {
        println!("{issue}");
    }
    println!("\n{error_count} error(s), {warning_count} warning(s) in {config_path}");

    error_count == 0
}

/// Render the resolved config (all defaults filled in) as TOML.
pub fn show(config: &Config) -> anyhow::Result<String> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_show() {
        let rendered = show(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.server.port, 8000);
        assert_eq!(parsed.interview.max_questions, 15);
        assert_eq!(parsed.llm.credentials.len(), 3);
    }

    #[test]
    fn validate_fails_on_zero_max_questions() {
        let mut config = Config::default();
        config.interview.max_questions = 0;
        assert!(!validate(&config, "test.toml"));
    }

    #[test]
    fn warnings_alone_still_validate() {
        let mut config = Config::default();
        config.server.cors.allowed_origins = vec!["*".into()];
        assert!(validate(&config, "test.toml"));
    }
}
