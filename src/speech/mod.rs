//! Voice interaction — recognition, listening state machine, synthesis.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  SpeechRecognizer (trait)      SpeechSynthesizer (trait)  │
//! │        │                              │                   │
//! │        ▼                              ▼                   │
//! │  ListenController             speak(text) — fire & forget │
//! │   start() ─▶ ListenHandle                                 │
//! │   stop()       │                                          │
//! │                ▼                                          │
//! │          ListenOutcome ─▶ parse_spoken_answer ─▶ i64?     │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The quiz never touches audio hardware directly: both capabilities are
//! traits so hosts without speech support plug in the `Unavailable*`
//! implementations and the feature degrades to a user-visible message.

pub mod listen;
pub mod recognizer;
pub mod synthesis;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use listen::{ListenController, ListenError, ListenHandle, ListenOutcome};
pub use recognizer::{
    RecognitionAlternative, RecognitionEvent, RecognitionStream, SpeechError, SpeechRecognizer,
    UnavailableRecognizer,
};
pub use synthesis::{LogSynthesizer, SpeechSynthesizer, UnavailableSynthesizer};

#[cfg(test)]
pub use recognizer::MockRecognizer;
#[cfg(test)]
pub use synthesis::RecordingSynthesizer;

// ---------------------------------------------------------------------------
// parse_spoken_answer
// ---------------------------------------------------------------------------

/// Derive a numeric answer from a transcript.
///
/// A plain integer (optionally signed) parses directly; otherwise all
/// non-digit characters are stripped and the remainder parsed, so spoken
/// noise around the number is tolerated. An empty remainder yields `None`,
/// which downstream scoring treats as an ordinary wrong answer.
///
/// # Examples
///
/// ```
/// use voicemath::speech::parse_spoken_answer;
///
/// assert_eq!(parse_spoken_answer("12"), Some(12));
/// assert_eq!(parse_spoken_answer("-3"), Some(-3));
/// assert_eq!(parse_spoken_answer("the answer is 42"), Some(42));
/// assert_eq!(parse_spoken_answer("no idea"), None);
/// ```
pub fn parse_spoken_answer(transcript: &str) -> Option<i64> {
    let trimmed = transcript.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
