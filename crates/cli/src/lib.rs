//! Session context, interactive shell and text rendering for the `psyscan`
//! binary.

pub mod exit_codes;
pub mod render;
pub mod session;
pub mod shell;

pub use session::{Session, SessionError};
