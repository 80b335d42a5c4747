//! `ipp practice`: run a mock interview in the terminal.
//!
//! Uses the same [`Interviewer`](crate::runtime::Interviewer) as the HTTP
//! API. Each line typed is one answer; `/feedback` asks for the review at
//! any point and `/quit` ends the session.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use ipp_domain::config::Config;
use ipp_media::{DocumentExtractor, ResumeExtractor, UNSUPPORTED_FORMAT};
use rustyline::error::ReadlineError;

use crate::bootstrap;
use crate::runtime::Interviewer;

pub async fn practice(
    config: Arc<Config>,
    role: String,
    experience: Option<String>,
    resume: Option<String>,
) -> anyhow::Result<()> {
    bootstrap::check_config(&config)?;
    let interviewer = bootstrap::interviewer_from_config(&config)?;

    let resume_text = resume.as_deref().map(read_resume).transpose()?;
    let experience =
        experience.unwrap_or_else(|| config.interview.default_experience_level.clone());

    eprintln!("Mock interview: {role} ({experience})");
    eprintln!(
        "{} questions. Type /feedback for a review, /quit or Ctrl+D to leave.",
        config.interview.max_questions
    );
    eprintln!();

    let started = interviewer.start(&role, &experience, resume_text).await?;
    println!("interviewer> {}\n", started.greeting);

    let mut rl = rustyline::DefaultEditor::new()?;
    loop {
        match rl.readline("you> ") {
            Ok(line) => {
                let answer = line.trim();
                if answer.is_empty() {
                    continue;
                }
                rl.add_history_entry(answer).ok();

                match answer {
                    "/quit" | "/exit" => break,
                    "/feedback" => {
                        print_feedback(&interviewer, &started.session_id).await?;
                        continue;
                    }
                    "/help" => {
                        eprintln!("Commands:");
                        eprintln!("  /feedback   Review your answers so far");
                        eprintln!("  /quit       Leave the interview");
                        continue;
                    }
                    _ => {}
                }

                let turn = interviewer.advance(&started.session_id, answer).await?;
                println!("interviewer> {}\n", turn.message);
                if turn.terminal {
                    print_feedback(&interviewer, &started.session_id).await?;
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("(Use Ctrl+D or /quit to leave)");
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("\x1B[31mreadline error: {e}\x1B[0m");
                break;
            }
        }
    }

    eprintln!("Good luck with the real one!");
    Ok(())
}

async fn print_feedback(interviewer: &Interviewer, session_id: &str) -> anyhow::Result<()> {
    eprintln!("\x1B[2m(preparing feedback...)\x1B[0m");
    let feedback = interviewer.feedback(session_id).await?;
    println!("feedback>\n{feedback}\n");
    Ok(())
}

fn read_resume(path: &str) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading resume {path}"))?;
    let filename = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path);

    let text = DocumentExtractor.extract(&bytes, filename);
    if text == UNSUPPORTED_FORMAT {
        anyhow::bail!("{path}: {UNSUPPORTED_FORMAT}");
    }
    if text.is_empty() {
        eprintln!("warning: no text could be extracted from {path}, continuing without a resume");
        return Ok(String::new());
    }
    eprintln!("Loaded resume ({} characters)", text.len());
    Ok(text)
}
