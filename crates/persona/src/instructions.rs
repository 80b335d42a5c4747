use ipp_domain::persona::Persona;

const CONFUSED: &str = "The candidate seems unsure or stuck.
- Make the next question simpler
- Give a little more context before asking
- Stay supportive and encouraging
- Rephrase if they are stuck on the same question";

const EFFICIENT: &str = "The candidate answers concisely.
- Keep questions short and direct
- Skip lengthy explanations
- Keep the pace brisk
- Respect their time";

const CHATTY: &str = "The candidate is giving long or off-topic answers.
- Briefly acknowledge what they said
- Summarize the one point that matters
- Redirect to a narrow, specific question
- Set a clear boundary, e.g. \"Let's focus on...\"";

const EDGE: &str = "The candidate's reply was irrelevant, nonsensical, or inappropriate.
- Set a polite boundary
- Say what you can and cannot help with
- Bring the conversation back to the interview
- Example: \"I can't do that, but I can help you practice for this role. Let's continue...\"";

const NORMAL: &str = "The candidate is answering normally.
- Continue the usual interview flow
- Ask a follow-up if the answer lacks depth
- Move on when the answer is complete";

/// Interviewer guidance for a detected persona.
pub fn instruction_for(persona: Persona) -> &'static str {
    match persona {
        Persona::Confused => CONFUSED,
        Persona::Efficient => EFFICIENT,
        Persona::Chatty => CHATTY,
        Persona::Edge => EDGE,
        Persona::Normal => NORMAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_label_has_distinct_guidance() {
        let fragments: Vec<&str> = Persona::ALL.iter().map(|p| instruction_for(*p)).collect();
        for (i, a) in fragments.iter().enumerate() {
            assert!(!a.is_empty());
            for b in &fragments[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unknown_label_gets_normal_guidance() {
        assert_eq!(instruction_for(Persona::from_label("grumpy")), NORMAL);
    }

    #[test]
    fn edge_guidance_redirects() {
        assert!(instruction_for(Persona::Edge).contains("help you practice for this role"));
    }
}
