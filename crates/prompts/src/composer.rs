use ipp_domain::persona::Persona;
use ipp_domain::turn::{render_transcript, Turn};
use ipp_persona::instruction_for;

use crate::templates;

/// Facts the system instruction is built from.
///
/// `question_number` is 1-based. `persona` is `None` for the opening turn.
#[derive(Debug, Clone)]
pub struct SystemContext<'a> {
    pub role: &'a str,
    pub experience_level: &'a str,
    pub question_number: u32,
    pub max_questions: u32,
    pub resume: Option<&'a str>,
    pub persona: Option<Persona>,
}

/// Stateless prompt builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    /// Build the system instruction: base template, then the resume block
    /// (omitted when empty), then the persona block.
    pub fn system_instruction(&self, ctx: &SystemContext<'_>) -> String {
        let mut out = templates::system(
            ctx.role,
            ctx.experience_level,
            ctx.question_number,
            ctx.max_questions,
        );

        if let Some(resume) = ctx.resume.filter(|r| !r.trim().is_empty()) {
            out.push_str(&templates::resume_block(resume));
        }

        if let Some(persona) = ctx.persona {
            out.push_str(&templates::persona_block(
                &persona.as_str().to_uppercase(),
                instruction_for(persona),
            ));
        }

        out
    }

    pub fn initial_prompt(&self, role: &str) -> String {
        templates::initial_question(role)
    }

    pub fn next_question_prompt(&self, history: &[Turn]) -> String {
        templates::next_question(&render_transcript(history))
    }

    pub fn feedback_prompt(&self, history: &[Turn]) -> String {
        templates::feedback(&render_transcript(history))
    }
}
