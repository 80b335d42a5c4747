//! Prompt assembly for the interviewer model.
//!
//! Pure string formatting: [`PromptComposer`] combines the fixed templates
//! with session facts, persona guidance, and the rendered transcript.

pub mod composer;
pub mod templates;

pub use composer::{PromptComposer, SystemContext};
