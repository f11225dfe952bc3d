//! Quiz session subsystem.
//!
//! Split in two layers:
//!
//! - [`state`] — the pure session state machine ([`QuizSession`]): cursor,
//!   score, completion. No timing, no I/O.
//! - [`runner`] — the async orchestrator ([`SessionRunner`]): wires the
//!   session to speech input/output and the score store, and exposes the
//!   command/event channel interface the front-end drives.

pub mod runner;
pub mod state;

pub use runner::{SessionCommand, SessionEvent, SessionRunner};
pub use state::{Advance, AnswerFeedback, QuizSession};
