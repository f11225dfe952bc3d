//! Listening state machine over a [`SpeechRecognizer`].
//!
//! # Design
//!
//! The controller turns the callback-driven recognition flow into one
//! explicit async operation:
//!
//! ```text
//! ListenController::start()
//!   ├─ Err(Busy)                    another session is active
//!   ├─ Err(Speech(…))               capability / permission failure,
//!   │                               state stays Idle
//!   └─ Ok(ListenHandle) ── wait() ──▶ ListenOutcome
//!         Transcript(text)   first final event's top alternative
//!         TimedOut           no final event within the timeout
//!         Cancelled          ListenController::stop() before a result
//!         Failed(err)        stream ended without a final result
//! ```
//!
//! Exactly one outcome is delivered per session. `stop()` cancels the
//! pending timeout along with the session, so no stale timer can fire into
//! a later session.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use voicemath::speech::{ListenController, ListenOutcome, UnavailableRecognizer};
//!
//! # async fn example() {
//! let controller = ListenController::new(
//!     Arc::new(UnavailableRecognizer),
//!     "en-US".into(),
//!     Duration::from_secs(5),
//! );
//!
//! match controller.start().await {
//!     Ok(handle) => match handle.wait().await {
//!         ListenOutcome::Transcript(text) => println!("heard: {text}"),
//!         other => println!("no answer: {other:?}"),
//!     },
//!     Err(e) => eprintln!("voice input unavailable: {e}"),
//! }
//! # }
//! ```

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::recognizer::{RecognitionStream, SpeechError, SpeechRecognizer};

// ---------------------------------------------------------------------------
// ListenError / ListenOutcome
// ---------------------------------------------------------------------------

/// Errors returned by [`ListenController::start`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListenError {
    /// A listening session is already active. Overlapping starts are
    /// rejected rather than queued or restarted.
    #[error("Already listening")]
    Busy,

    /// The recognizer refused to start (capability or permission).
    #[error(transparent)]
    Speech(#[from] SpeechError),
}

/// The single resolved result of one listening session.
#[derive(Debug, Clone, PartialEq)]
pub enum ListenOutcome {
    /// Top alternative of the first final recognition event.
    Transcript(String),
    /// The timeout elapsed before any final event arrived.
    TimedOut,
    /// [`ListenController::stop`] was called before a result.
    Cancelled,
    /// The session ended with a recoverable error.
    Failed(SpeechError),
}

// ---------------------------------------------------------------------------
// ListenController
// ---------------------------------------------------------------------------

/// Drives one listening session at a time over a shared recognizer.
///
/// The active entry in the slot doubles as the state flag (`Some` =
/// Listening) and as the cancellation channel for [`stop`](Self::stop).
pub struct ListenController {
    recognizer: Arc<dyn SpeechRecognizer>,
    language: String,
    timeout: Duration,
    slot: Arc<Mutex<Slot>>,
}

/// Active-session bookkeeping.
///
/// Entries are tagged with a generation so a finished session's cleanup
/// releases only its own entry. Without the tag, a session started right
/// after `stop()` could be evicted by its predecessor's late cleanup.
#[derive(Debug, Default)]
struct Slot {
    next_generation: u64,
    active: Option<(u64, oneshot::Sender<()>)>,
}

impl Slot {
    fn release(&mut self, generation: u64) {
        if matches!(self.active, Some((g, _)) if g == generation) {
            self.active = None;
        }
    }
}

impl ListenController {
    /// Create a controller for the given recognizer and language tag.
    ///
    /// `timeout` bounds every session; the default configuration auto-stops
    /// after 5 seconds.
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, language: String, timeout: Duration) -> Self {
        Self {
            recognizer,
            language,
            timeout,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Start a listening session.
    ///
    /// # Errors
    ///
    /// - [`ListenError::Busy`] — a session is already active.
    /// - [`ListenError::Speech`] — the recognizer failed to start; the
    ///   controller stays idle.
    pub async fn start(&self) -> Result<ListenHandle, ListenError> {
        let (cancel_tx, cancel_rx) = oneshot::channel();

        // Claim the slot before awaiting the recognizer so a second start
        // during microphone acquisition is rejected, not interleaved.
        let generation = {
            let mut slot = self.slot.lock().unwrap();
            if slot.active.is_some() {
                return Err(ListenError::Busy);
            }
            let generation = slot.next_generation;
            slot.next_generation += 1;
            slot.active = Some((generation, cancel_tx));
            generation
        };

        let stream = match self.recognizer.start(&self.language).await {
            Ok(stream) => stream,
            Err(e) => {
                self.slot.lock().unwrap().release(generation);
                return Err(ListenError::Speech(e));
            }
        };

        log::debug!("listen: session started (timeout {:?})", self.timeout);

        let slot = Arc::clone(&self.slot);
        let timeout = self.timeout;
        let task = tokio::spawn(async move {
            let outcome = listen_loop(stream, timeout, cancel_rx).await;
            // Release only this session's entry; a successor may already
            // hold the slot.
            slot.lock().unwrap().release(generation);
            log::debug!("listen: session ended → {outcome:?}");
            outcome
        });

        Ok(ListenHandle { task })
    }

    /// Stop the active session, if any. The pending handle resolves to
    /// [`ListenOutcome::Cancelled`]; the auto-timeout is cancelled with it.
    pub fn stop(&self) {
        if let Some((_, cancel)) = self.slot.lock().unwrap().active.take() {
            let _ = cancel.send(());
        }
    }

    /// `true` while a session is active.
    pub fn is_listening(&self) -> bool {
        self.slot.lock().unwrap().active.is_some()
    }
}

/// Consume the event stream until a final result, cancellation, or timeout.
async fn listen_loop(
    mut stream: RecognitionStream,
    timeout: Duration,
    mut cancel_rx: oneshot::Receiver<()>,
) -> ListenOutcome {
    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => return ListenOutcome::TimedOut,
            _ = &mut cancel_rx => return ListenOutcome::Cancelled,
            event = stream.recv() => match event {
                None => {
                    return ListenOutcome::Failed(SpeechError::Recognition(
                        "recognition ended before a final result".into(),
                    ));
                }
                Some(event) if event.is_final => {
                    return match event.top_alternative() {
                        Some(text) => ListenOutcome::Transcript(text.to_string()),
                        None => ListenOutcome::Failed(SpeechError::Recognition(
                            "final result carried no alternatives".into(),
                        )),
                    };
                }
                // Interim events carry partial text — keep waiting.
                Some(_) => {}
            },
        }
    }
}

// ---------------------------------------------------------------------------
// ListenHandle
// ---------------------------------------------------------------------------

/// Handle to one in-flight listening session.
#[derive(Debug)]
pub struct ListenHandle {
    task: JoinHandle<ListenOutcome>,
}

impl ListenHandle {
    /// Wait for the session's single outcome.
    pub async fn wait(self) -> ListenOutcome {
        self.task.await.unwrap_or_else(|e| {
            ListenOutcome::Failed(SpeechError::Recognition(format!(
                "listen task failed: {e}"
            )))
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
