use ipp_domain::config::{Config, ConfigSeverity};
use ipp_providers::resolve_credential;

/// Run all diagnostic checks and print a summary.
///
/// Returns `true` when every check passes.
pub fn run(config: &Config, config_path: &str) -> bool {
    println!("ipp doctor");
    println!("==========\n");

    let mut all_passed = true;

    check_config_file(config_path);
    check_config_validation(config, &mut all_passed);
    check_credentials(config, &mut all_passed);
    check_voice(config);
    check_static_dir(config);

    println!();
    if all_passed {
        println!("All checks passed.");
    } else {
        println!("Some checks failed. Review the output above.");
    }

    all_passed
}

// ── Individual checks ─────────────────────────────────────────────────

fn check_config_file(config_path: &str) {
    let exists = std::path::Path::new(config_path).exists();
    // A missing file is fine: every setting has a default.
    print_check(
        "Config file",
        true,
        if exists {
            config_path.to_owned()
        } else {
            format!("{config_path} not found (using defaults)")
        },
    );
}

fn check_config_validation(config: &Config, all_passed: &mut bool) {
    let issues = config.validate();
    let error_count = issues
        .iter()
        .filter(|e| e.severity == ConfigSeverity::Error)
        .count();

    if issues.is_empty() {
        print_check("Config validation", true, "no issues".into());
        return;
    }

    print_check(
        "Config validation",
        error_count == 0,
        format!("{} issue(s) ({error_count} error(s))", issues.len()),
    );
    for issue in &issues {
        println!("      {issue}");
    }
    if error_count > 0 {
        *all_passed = false;
    }
}

fn check_credentials(config: &Config, all_passed: &mut bool) {
    let mut resolved = 0;
    for (i, source) in config.llm.credentials.iter().enumerate() {
        match resolve_credential(source) {
            Ok(_) => {
                resolved += 1;
                println!("      credential {i}: {} (ok)", source.describe());
            }
            Err(e) => println!("      credential {i}: {} ({e})", source.describe()),
        }
    }

    let ok = resolved > 0;
    print_check(
        "LLM credentials",
        ok,
        format!(
            "{resolved} of {} source(s) resolved for {} ({})",
            config.llm.credentials.len(),
            config.llm.id,
            config.llm.model
        ),
    );
    if !ok {
        *all_passed = false;
    }
}

fn check_voice(config: &Config) {
    let env = &config.voice.api_key_env;
    let set = std::env::var(env).map(|v| !v.trim().is_empty()).unwrap_or(false);
    print_check(
        "Voice (optional)",
        true,
        if set {
            format!("{env} set, transcription and speech enabled")
        } else {
            format!("{env} not set, voice endpoints return empty results")
        },
    );
}

fn check_static_dir(config: &Config) {
    let dir = &config.server.static_dir;
    print_check(
        "Front end (optional)",
        true,
        if dir.exists() {
            format!("{} served under /app", dir.display())
        } else {
            format!("{} not found, /app disabled", dir.display())
        },
    );
}

// ── Formatting helper ─────────────────────────────────────────────────

fn print_check(name: &str, passed: bool, detail: String) {
    let status = if passed { "PASS" } else { "FAIL" };
    println!("  [{status}] {name}: {detail}");
}
