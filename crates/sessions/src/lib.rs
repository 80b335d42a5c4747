//! Interview session state and storage.
//!
//! An [`InterviewSession`] is one mock interview: its fixed context (role,
//! experience level, resume), the append-only transcript, the answered
//! question counter and the active/terminal phase. Sessions live in a
//! [`SessionStore`]; the default [`InMemorySessionStore`] keeps them for the
//! life of the process.

pub mod session;
pub mod store;

pub use session::{InterviewSession, SessionPhase};
pub use store::{InMemorySessionStore, SessionStore};
