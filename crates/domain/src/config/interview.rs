use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Interview flow
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// Number of answered questions after which the interview concludes.
    #[serde(default = "d_15")]
    pub max_questions: u32,
    /// Experience level used when a start request omits one.
    #[serde(default = "d_junior")]
    pub default_experience_level: String,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            max_questions: d_15(),
            default_experience_level: d_junior(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Persona heuristics
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Phrase lists and thresholds for persona classification.
///
/// Phrases are matched as case-insensitive substrings of the trimmed
/// message. Word counts are whitespace token counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Out-of-scope, manipulative, or gibberish markers.
    #[serde(default = "d_edge_phrases")]
    pub edge_phrases: Vec<String>,
    /// Tokens that keep a very short reply from counting as edge.
    #[serde(default = "d_short_reply_tokens")]
    pub short_reply_tokens: Vec<String>,
    /// Replies shorter than this many words are edge unless they contain a
    /// short reply token.
    #[serde(default = "d_3")]
    pub min_words: usize,
    #[serde(default = "d_confused_phrases")]
    pub confused_phrases: Vec<String>,
    /// Off-topic markers that make a long answer chatty.
    #[serde(default = "d_rambling_markers")]
    pub rambling_markers: Vec<String>,
    #[serde(default)]
    pub pattern: TersePatternConfig,
    /// Answers in `(efficient_min_exclusive, efficient_max]` words are efficient.
    #[serde(default = "d_5")]
    pub efficient_min_exclusive: usize,
    #[serde(default = "d_25")]
    pub efficient_max: usize,
    /// Answers above this many words are always chatty.
    #[serde(default = "d_100")]
    pub chatty_words: usize,
    /// Answers above this many words are chatty when they ramble.
    #[serde(default = "d_60")]
    pub rambling_words: usize,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            edge_phrases: d_edge_phrases(),
            short_reply_tokens: d_short_reply_tokens(),
            min_words: d_3(),
            confused_phrases: d_confused_phrases(),
            rambling_markers: d_rambling_markers(),
            pattern: TersePatternConfig::default(),
            efficient_min_exclusive: d_5(),
            efficient_max: d_25(),
            chatty_words: d_100(),
            rambling_words: d_60(),
        }
    }
}

/// Detects a sustained run of terse answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TersePatternConfig {
    /// Only messages of at most this many words are checked.
    #[serde(default = "d_5")]
    pub max_message_words: usize,
    /// How many trailing history turns (any speaker) to inspect.
    #[serde(default = "d_6")]
    pub history_window: usize,
    /// Minimum user turns inside the window; fewer skips the rule.
    #[serde(default = "d_2")]
    pub min_user_turns: usize,
    /// Average user-turn word count must be strictly below this.
    #[serde(default = "d_8f")]
    pub avg_words_below: f64,
}

impl Default for TersePatternConfig {
    fn default() -> Self {
        Self {
            max_message_words: d_5(),
            history_window: d_6(),
            min_user_turns: d_2(),
            avg_words_below: d_8f(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_15() -> u32 {
    15
}
fn d_junior() -> String {
    "Junior".into()
}
fn d_2() -> usize {
    2
}
fn d_3() -> usize {
    3
}
fn d_5() -> usize {
    5
}
fn d_6() -> usize {
    6
}
fn d_8f() -> f64 {
    8.0
}
fn d_25() -> usize {
    25
}
fn d_60() -> usize {
    60
}
fn d_100() -> usize {
    100
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn d_edge_phrases() -> Vec<String> {
    strings(&[
        "make me ceo",
        "give me job",
        "hire me now",
        "your weights",
        "your model",
        "banana",
        "asdfgh",
        "blah blah",
        "random gibberish",
    ])
}
fn d_short_reply_tokens() -> Vec<String> {
    strings(&["yes", "no", "okay", "sure"])
}
fn d_confused_phrases() -> Vec<String> {
    strings(&[
        "i don't know",
        "not sure",
        "what do you mean",
        "don't understand",
        "confused",
        "unclear",
        "help",
        "what is",
        "explain",
    ])
}
fn d_rambling_markers() -> Vec<String> {
    strings(&["by the way", "also", "speaking of", "reminds me", "funny story"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interview_defaults() {
        let cfg = InterviewConfig::default();
        assert_eq!(cfg.max_questions, 15);
        assert_eq!(cfg.default_experience_level, "Junior");
    }

    #[test]
    fn persona_partial_override_keeps_other_defaults() {
        let toml_str = r#"
            edge_phrases = ["pineapple"]

            [pattern]
            history_window = 4
        "#;
        let cfg: PersonaConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.edge_phrases, vec!["pineapple".to_string()]);
        assert_eq!(cfg.pattern.history_window, 4);
        assert_eq!(cfg.pattern.min_user_turns, 2);
        assert_eq!(cfg.short_reply_tokens.len(), 4);
        assert_eq!(cfg.chatty_words, 100);
    }
}
