use ipp_domain::config::{Config, ConfigSeverity, CredentialSource, ProviderKind};

#[test]
fn empty_file_yields_full_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.interview.max_questions, 15);
    assert_eq!(config.llm.kind, ProviderKind::Google);
    assert_eq!(config.voice.stt_model, "whisper-1");
    assert!(config.observability.otlp_endpoint.is_none());
}

#[test]
fn default_config_has_no_errors() {
    let issues = Config::default().validate();
    assert!(
        issues.iter().all(|i| i.severity != ConfigSeverity::Error),
        "unexpected errors: {issues:?}"
    );
}

#[test]
fn default_cors_allows_only_localhost() {
    let config = Config::default();
    assert!(config
        .server
        .cors
        .allowed_origins
        .contains(&"http://localhost:*".to_string()));
    assert!(config
        .server
        .cors
        .allowed_origins
        .contains(&"http://127.0.0.1:*".to_string()));
}

#[test]
fn zero_max_questions_is_an_error() {
    let toml_str = r#"
[interview]
max_questions = 0
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.field == "interview.max_questions" && i.severity == ConfigSeverity::Error));
}

#[test]
fn missing_credentials_is_only_a_warning() {
    let toml_str = r#"
[llm]
credentials = []
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    let issue = config
        .validate()
        .into_iter()
        .find(|i| i.field == "llm.credentials")
        .expect("credentials warning");
    assert_eq!(issue.severity, ConfigSeverity::Warning);
}

#[test]
fn half_keychain_source_is_rejected() {
    let mut config = Config::default();
    config.llm.credentials = vec![CredentialSource {
        service: Some("ipp".into()),
        ..CredentialSource::default()
    }];
    let issues = config.validate();
    assert!(issues
        .iter()
        .any(|i| i.field == "llm.credentials[0]" && i.severity == ConfigSeverity::Error));
}

#[test]
fn cors_wildcard_warns() {
    let toml_str = r#"
[server.cors]
allowed_origins = ["*"]
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    let issues = config.validate();
    assert!(issues.iter().any(|i| i.field == "server.cors.allowed_origins"
        && i.severity == ConfigSeverity::Warning));
}

#[test]
fn display_tags_severity() {
    let mut config = Config::default();
    config.server.port = 0;
    let rendered: Vec<String> = config.validate().iter().map(|i| i.to_string()).collect();
    assert!(rendered
        .iter()
        .any(|line| line == "[ERROR] server.port: port must be greater than 0"));
}
