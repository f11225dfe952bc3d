//! Speech synthesis — speaking question prompts aloud.
//!
//! Speaking is fire-and-forget: no completion callback is tracked. The only
//! failure mode is a host without a synthesis capability, surfaced as
//! [`SpeechError::CapabilityUnavailable`] so the front-end can show a
//! message instead of crashing.

use super::recognizer::SpeechError;

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to a host text-to-speech capability.
pub trait SpeechSynthesizer: Send + Sync {
    /// Queue `text` for speaking. Returns as soon as the utterance is
    /// queued; completion is not tracked.
    ///
    /// # Errors
    ///
    /// [`SpeechError::CapabilityUnavailable`] when the host has no synthesis
    /// support.
    fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SpeechSynthesizer>) {}
};

// ---------------------------------------------------------------------------
// LogSynthesizer
// ---------------------------------------------------------------------------

/// Synthesizer for headless hosts: "speaks" by logging the utterance.
///
/// Used by the terminal front-end so prompts remain visible without any
/// audio hardware.
#[derive(Debug, Default)]
pub struct LogSynthesizer;

impl SpeechSynthesizer for LogSynthesizer {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        log::info!("speak: {text}");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// UnavailableSynthesizer
// ---------------------------------------------------------------------------

/// Synthesizer for hosts without text-to-speech support.
#[derive(Debug, Default)]
pub struct UnavailableSynthesizer;

impl SpeechSynthesizer for UnavailableSynthesizer {
    fn speak(&self, _text: &str) -> Result<(), SpeechError> {
        Err(SpeechError::CapabilityUnavailable)
    }
}

// ---------------------------------------------------------------------------
// RecordingSynthesizer (test double)
// ---------------------------------------------------------------------------

/// Test synthesizer that records every spoken utterance.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSynthesizer {
    spoken: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingSynthesizer {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, text: &str) -> Result<(), SpeechError> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_synthesizer_accepts_text() {
        assert!(LogSynthesizer.speak("What is 7 + 5?").is_ok());
    }

    #[test]
    fn unavailable_synthesizer_reports_capability_error() {
        assert_eq!(
            UnavailableSynthesizer.speak("anything").unwrap_err(),
            SpeechError::CapabilityUnavailable
        );
    }

    #[test]
    fn recording_synthesizer_captures_utterances() {
        let synth = RecordingSynthesizer::default();
        synth.speak("one").unwrap();
        synth.speak("two").unwrap();
        assert_eq!(synth.spoken(), vec!["one".to_string(), "two".to_string()]);
    }
}
