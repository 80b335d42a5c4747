//! Shared types for the interview practice service: configuration,
//! conversation turns, persona labels, structured trace events, and the
//! common error type.

pub mod config;
pub mod error;
pub mod persona;
pub mod trace;
pub mod turn;
