use ipp_domain::config::PersonaConfig;
use ipp_domain::persona::Persona;
use ipp_domain::turn::Turn;

/// The latest user message, pre-normalized once for every rule.
#[derive(Debug, Clone)]
pub struct Utterance<'a> {
    pub raw: &'a str,
    /// Lower-cased and trimmed; used for phrase matching.
    pub normalized: String,
    /// Whitespace-separated tokens of the raw message.
    pub word_count: usize,
}

impl<'a> Utterance<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            normalized: raw.trim().to_lowercase(),
            word_count: raw.split_whitespace().count(),
        }
    }

    fn contains_any(&self, phrases: &[String]) -> bool {
        phrases
            .iter()
            .any(|p| !p.is_empty() && self.normalized.contains(p.as_str()))
    }
}

pub type Predicate = fn(&PersonaConfig, &Utterance<'_>, &[Turn]) -> bool;

/// One entry of the decision list: when `predicate` holds, the answer is
/// labelled `label`.
pub struct PersonaRule {
    pub name: &'static str,
    pub label: Persona,
    pub predicate: Predicate,
}

impl std::fmt::Debug for PersonaRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonaRule")
            .field("name", &self.name)
            .field("label", &self.label)
            .finish()
    }
}

/// Decision list in priority order. The first matching rule wins; an answer
/// matching none is [`Persona::Normal`].
pub fn default_rules() -> Vec<PersonaRule> {
    vec![
        PersonaRule {
            name: "edge_phrase",
            label: Persona::Edge,
            predicate: edge_phrase,
        },
        PersonaRule {
            name: "edge_too_short",
            label: Persona::Edge,
            predicate: edge_too_short,
        },
        PersonaRule {
            name: "confused_phrase",
            label: Persona::Confused,
            predicate: confused_phrase,
        },
        PersonaRule {
            name: "confused_terse_pattern",
            label: Persona::Confused,
            predicate: terse_pattern,
        },
        PersonaRule {
            name: "efficient_length",
            label: Persona::Efficient,
            predicate: efficient_length,
        },
        PersonaRule {
            name: "chatty_length",
            label: Persona::Chatty,
            predicate: chatty_length,
        },
        PersonaRule {
            name: "chatty_rambling",
            label: Persona::Chatty,
            predicate: chatty_rambling,
        },
    ]
}

const DEFAULT_RULE: &str = "default";

fn edge_phrase(cfg: &PersonaConfig, u: &Utterance<'_>, _: &[Turn]) -> bool {
    u.contains_any(&cfg.edge_phrases)
}

// Token presence is a substring test, so "know" counts as containing "no".
fn edge_too_short(cfg: &PersonaConfig, u: &Utterance<'_>, _: &[Turn]) -> bool {
    u.word_count < cfg.min_words && !u.contains_any(&cfg.short_reply_tokens)
}

fn confused_phrase(cfg: &PersonaConfig, u: &Utterance<'_>, _: &[Turn]) -> bool {
    u.contains_any(&cfg.confused_phrases)
}

fn terse_pattern(cfg: &PersonaConfig, u: &Utterance<'_>, history: &[Turn]) -> bool {
    let p = &cfg.pattern;
    if u.word_count > p.max_message_words {
        return false;
    }
    let start = history.len().saturating_sub(p.history_window);
    let counts: Vec<usize> = history[start..]
        .iter()
        .filter(|t| t.is_user())
        .map(Turn::word_count)
        .collect();
    if counts.len() < p.min_user_turns.max(1) {
        return false;
    }
    let avg = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
    avg < p.avg_words_below
}

fn efficient_length(cfg: &PersonaConfig, u: &Utterance<'_>, _: &[Turn]) -> bool {
    u.word_count > cfg.efficient_min_exclusive && u.word_count <= cfg.efficient_max
}

fn chatty_length(cfg: &PersonaConfig, u: &Utterance<'_>, _: &[Turn]) -> bool {
    u.word_count > cfg.chatty_words
}

fn chatty_rambling(cfg: &PersonaConfig, u: &Utterance<'_>, _: &[Turn]) -> bool {
    u.word_count > cfg.rambling_words && u.contains_any(&cfg.rambling_markers)
}

/// Outcome of a classification, including which rule fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub persona: Persona,
    pub rule: &'static str,
    pub word_count: usize,
}

/// Deterministic persona classifier. Holds only configuration; performs no
/// I/O and keeps no state between calls.
#[derive(Debug)]
pub struct PersonaClassifier {
    config: PersonaConfig,
    rules: Vec<PersonaRule>,
}

impl Default for PersonaClassifier {
    fn default() -> Self {
        Self::new(PersonaConfig::default())
    }
}

impl PersonaClassifier {
    /// Phrase lists are lower-cased here so they match the normalized
    /// message whatever case the config used.
    pub fn new(mut config: PersonaConfig) -> Self {
        for list in [
            &mut config.edge_phrases,
            &mut config.short_reply_tokens,
            &mut config.confused_phrases,
            &mut config.rambling_markers,
        ] {
            for phrase in list.iter_mut() {
                *phrase = phrase.trim().to_lowercase();
            }
        }
        Self {
            config,
            rules: default_rules(),
        }
    }

    pub fn rules(&self) -> &[PersonaRule] {
        &self.rules
    }

    /// Label the latest answer. `history` must already include it.
    pub fn classify(&self, message: &str, history: &[Turn]) -> Persona {
        self.classify_with_rule(message, history).persona
    }

    pub fn classify_with_rule(&self, message: &str, history: &[Turn]) -> Classification {
        let utterance = Utterance::new(message);
        let hit = self
            .rules
            .iter()
            .find(|rule| (rule.predicate)(&self.config, &utterance, history));

        let classification = match hit {
            Some(rule) => Classification {
                persona: rule.label,
                rule: rule.name,
                word_count: utterance.word_count,
            },
            None => Classification {
                persona: Persona::Normal,
                rule: DEFAULT_RULE,
                word_count: utterance.word_count,
            },
        };
        tracing::debug!(
            persona = %classification.persona,
            rule = classification.rule,
            word_count = classification.word_count,
            "persona classified"
        );
        classification
    }
}
