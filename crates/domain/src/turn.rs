use serde::{Deserialize, Serialize};

/// Who authored a turn.
///
/// Serialized as `"model"` / `"user"`; `"interviewer"` is accepted as an
/// alias for the model side when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    #[serde(alias = "interviewer")]
    Model,
    User,
}

impl Speaker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Model => "model",
            Speaker::User => "user",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in an interview transcript. Position is append order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(rename = "role")]
    pub speaker: Speaker,
    pub content: String,
}

impl Turn {
    pub fn model(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Model,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }

    /// Whitespace-separated token count of the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

/// Render a transcript as `speaker: content` lines.
pub fn render_transcript(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.speaker, t.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_joins_lines_in_order() {
        let turns = vec![Turn::model("Hi, tell me about yourself."), Turn::user("I build APIs.")];
        assert_eq!(
            render_transcript(&turns),
            "model: Hi, tell me about yourself.\nuser: I build APIs."
        );
    }

    #[test]
    fn render_empty_transcript() {
        assert_eq!(render_transcript(&[]), "");
    }

    #[test]
    fn turn_serializes_with_role_field() {
        let json = serde_json::to_value(Turn::user("hello")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn interviewer_alias_reads_as_model() {
        let turn: Turn =
            serde_json::from_str(r#"{"role":"interviewer","content":"Welcome"}"#).unwrap();
        assert_eq!(turn.speaker, Speaker::Model);
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        assert_eq!(Turn::user("  I   like  Rust \n").word_count(), 3);
        assert_eq!(Turn::user("").word_count(), 0);
    }
}
