//! Interview runtime: the per-session state machine and its concurrency
//! control.

pub mod interview;
pub mod session_lock;

pub use interview::{InterviewError, Interviewer, StartOutcome, TurnOutcome};
pub use session_lock::{LockClosed, SessionLockMap};
