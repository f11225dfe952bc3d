//! Speech-recognition capability trait and event types.
//!
//! # Overview
//!
//! [`SpeechRecognizer`] is the seam between the quiz engine and whatever
//! speech capability the host environment provides. It is object-safe and
//! `Send + Sync` so it can be held behind an `Arc<dyn SpeechRecognizer>`.
//!
//! A recognizer session is a stream of [`RecognitionEvent`]s, each carrying
//! a ranked list of transcript alternatives. The consumer
//! ([`ListenController`](crate::speech::ListenController)) uses only the top
//! alternative of the first final event.
//!
//! [`UnavailableRecognizer`] is the production fallback for hosts without a
//! speech capability — every start attempt reports
//! [`SpeechError::CapabilityUnavailable`] so the feature degrades instead of
//! crashing.
//!
//! [`MockRecognizer`] (under `#[cfg(test)]`) replays scripted events for
//! unit-testing the listening state machine without any audio hardware.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

/// All errors the speech subsystem can surface.
///
/// None of these are fatal: the caller disables or retries the voice feature
/// and the quiz continues with typed answers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// The host environment has no speech-recognition or synthesis support.
    #[error("Speech is not supported in this environment")]
    CapabilityUnavailable,

    /// Microphone access was refused. Surfaced on the same channel as
    /// [`CapabilityUnavailable`] rather than thrown uncaught.
    #[error("Microphone access was denied")]
    PermissionDenied,

    /// A transient recognition failure (no speech detected, network issue…).
    /// Listening resets to idle; the caller may retry.
    #[error("Recognition failed: {0}")]
    Recognition(String),
}

// ---------------------------------------------------------------------------
// Recognition events
// ---------------------------------------------------------------------------

/// One ranked transcript candidate inside a recognition event.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionAlternative {
    /// Transcript text for this candidate.
    pub text: String,
    /// Recognizer confidence in `[0.0, 1.0]`.
    pub confidence: f32,
}

/// One event emitted by a recognition session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionEvent {
    /// Candidates ordered best-first.
    pub alternatives: Vec<RecognitionAlternative>,
    /// `true` for the final result of an utterance; interim events carry
    /// partial text and are ignored by the quiz.
    pub is_final: bool,
}

impl RecognitionEvent {
    /// Build a final event with a single alternative at full confidence.
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            alternatives: vec![RecognitionAlternative {
                text: text.into(),
                confidence: 1.0,
            }],
            is_final: true,
        }
    }

    /// The best-ranked transcript, if any alternative is present.
    pub fn top_alternative(&self) -> Option<&str> {
        self.alternatives.first().map(|a| a.text.as_str())
    }
}

/// Receiving half of a recognition session's event stream.
///
/// The stream closing without a final event means the utterance ended with
/// no usable result.
pub type RecognitionStream = mpsc::Receiver<RecognitionEvent>;

// ---------------------------------------------------------------------------
// SpeechRecognizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to a host speech-recognition
/// capability.
///
/// # Contract
///
/// - `start` requests microphone access and begins one capture session for
///   the given BCP-47 language tag (e.g. `"en-US"`).
/// - Capability and permission failures are returned from `start` itself so
///   the caller never transitions to listening.
/// - Dropping the returned stream ends the session.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Begin one recognition session and return its event stream.
    async fn start(&self, language: &str) -> Result<RecognitionStream, SpeechError>;
}

// Compile-time assertion: Box<dyn SpeechRecognizer> must be constructible.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechRecognizer>) {}
};

// ---------------------------------------------------------------------------
// UnavailableRecognizer
// ---------------------------------------------------------------------------

/// Fallback recognizer for hosts without a speech capability.
///
/// Every start attempt fails with [`SpeechError::CapabilityUnavailable`],
/// which the session runner surfaces as a user-visible message while the
/// rest of the quiz keeps working.
#[derive(Debug, Default)]
pub struct UnavailableRecognizer;

#[async_trait]
impl SpeechRecognizer for UnavailableRecognizer {
    async fn start(&self, _language: &str) -> Result<RecognitionStream, SpeechError> {
        Err(SpeechError::CapabilityUnavailable)
    }
}

// ---------------------------------------------------------------------------
// MockRecognizer (test double)
// ---------------------------------------------------------------------------

/// Scripted recognizer for unit tests.
///
/// Replays a fixed script on every `start` call:
/// - `Ok(events)` — the events are sent into the stream, then it closes.
/// - `Err(e)`     — `start` fails immediately with `e`.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    script: Result<Vec<RecognitionEvent>, SpeechError>,
    /// When `true` the stream stays open and never yields — used to
    /// exercise the listening timeout.
    hang: bool,
}

#[cfg(test)]
impl MockRecognizer {
    /// Recognizer that yields one final transcript.
    pub fn final_transcript(text: impl Into<String>) -> Self {
        Self {
            script: Ok(vec![RecognitionEvent::final_text(text)]),
            hang: false,
        }
    }

    /// Recognizer that replays an arbitrary event script.
    pub fn with_events(events: Vec<RecognitionEvent>) -> Self {
        Self {
            script: Ok(events),
            hang: false,
        }
    }

    /// Recognizer whose `start` fails with the given error.
    pub fn failing(error: SpeechError) -> Self {
        Self {
            script: Err(error),
            hang: false,
        }
    }

    /// Recognizer that starts successfully but never produces an event.
    pub fn silent() -> Self {
        Self {
            script: Ok(Vec::new()),
            hang: true,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    async fn start(&self, _language: &str) -> Result<RecognitionStream, SpeechError> {
        let events = self.script.clone()?;
        let (tx, rx) = mpsc::channel(8);

        let hang = self.hang;
        tokio::spawn(async move {
            for event in events {
                if tx.send(event).await.is_err() {
                    return;
                }
            }
            if hang {
                // Keep the sender alive so the stream never closes.
                std::future::pending::<()>().await;
            }
        });

        Ok(rx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_alternative_prefers_first_entry() {
        let event = RecognitionEvent {
            alternatives: vec![
                RecognitionAlternative {
                    text: "twelve".into(),
                    confidence: 0.9,
                },
                RecognitionAlternative {
                    text: "twelfth".into(),
                    confidence: 0.4,
                },
            ],
            is_final: true,
        };
        assert_eq!(event.top_alternative(), Some("twelve"));
    }

    #[test]
    fn top_alternative_empty_event_is_none() {
        let event = RecognitionEvent {
            alternatives: Vec::new(),
            is_final: true,
        };
        assert_eq!(event.top_alternative(), None);
    }

    #[tokio::test]
    async fn unavailable_recognizer_reports_capability_error() {
        let rec = UnavailableRecognizer;
        let err = rec.start("en-US").await.unwrap_err();
        assert_eq!(err, SpeechError::CapabilityUnavailable);
    }

    #[tokio::test]
    async fn mock_recognizer_replays_script() {
        let rec = MockRecognizer::final_transcript("42");
        let mut stream = rec.start("en-US").await.expect("start");

        let event = stream.recv().await.expect("one event");
        assert!(event.is_final);
        assert_eq!(event.top_alternative(), Some("42"));
        assert!(stream.recv().await.is_none(), "stream should close");
    }

    #[tokio::test]
    async fn mock_recognizer_failing_propagates_error() {
        let rec = MockRecognizer::failing(SpeechError::PermissionDenied);
        assert_eq!(
            rec.start("en-US").await.unwrap_err(),
            SpeechError::PermissionDenied
        );
    }
}
