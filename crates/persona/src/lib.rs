//! Candidate persona detection.
//!
//! [`PersonaClassifier`] maps the latest answer plus the conversation so far
//! to one [`Persona`](ipp_domain::persona::Persona) label using an ordered
//! list of rules. [`instruction_for`] turns a label into the prompt fragment
//! that tells the interviewer how to adapt.

pub mod classifier;
pub mod instructions;

pub use classifier::{default_rules, Classification, PersonaClassifier, PersonaRule, Utterance};
pub use instructions::instruction_for;
