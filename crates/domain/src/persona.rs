use serde::{Deserialize, Serialize};

/// Coarse behavioral classification of the candidate's latest answer.
///
/// Recomputed every turn; never stored on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Confused,
    Efficient,
    Chatty,
    Edge,
    Normal,
}

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::Confused,
        Persona::Efficient,
        Persona::Chatty,
        Persona::Edge,
        Persona::Normal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Confused => "confused",
            Persona::Efficient => "efficient",
            Persona::Chatty => "chatty",
            Persona::Edge => "edge",
            Persona::Normal => "normal",
        }
    }

    /// Parse a label, falling back to [`Persona::Normal`] for anything
    /// unrecognized.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "confused" => Persona::Confused,
            "efficient" => Persona::Efficient,
            "chatty" => Persona::Chatty,
            "edge" => Persona::Edge,
            _ => Persona::Normal,
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_roundtrip() {
        for p in Persona::ALL {
            assert_eq!(Persona::from_label(p.as_str()), p);
        }
    }

    #[test]
    fn unknown_label_is_normal() {
        assert_eq!(Persona::from_label("grumpy"), Persona::Normal);
        assert_eq!(Persona::from_label(""), Persona::Normal);
    }

    #[test]
    fn label_parse_is_case_insensitive() {
        assert_eq!(Persona::from_label("  CHATTY "), Persona::Chatty);
    }
}
