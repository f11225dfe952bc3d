//! Session runner — drives the question → listen → score → advance loop.
//!
//! [`SessionRunner`] owns the [`QuizSession`] and responds to
//! [`SessionCommand`]s received over a `tokio::sync::mpsc` channel, emitting
//! [`SessionEvent`]s for the front-end to render.
//!
//! # Flow
//!
//! ```text
//! SessionCommand::StartListening
//!   └─▶ ListenController::start()
//!         ├─ Err → Error event (capability / permission / busy)
//!         └─ Ok  → ListeningStarted; outcome forwarded back in
//!               ├─ Transcript → TranscriptReceived → score path
//!               ├─ TimedOut / Cancelled → ListeningStopped
//!               └─ Failed → Error event
//!
//! SessionCommand::SubmitText ──▶ score path
//!
//! score path:
//!   submit → Answered { correct, correct_answer, … }
//!   sleep(feedback_delay)                      (2 s by default)
//!   advance → QuestionChanged │ SessionComplete (high score + profile
//!                                               persisted on completion)
//! ```
//!
//! All transitions happen on discrete events; the runner is the single
//! mutator of the session, so no locking is needed around it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::question::{self, Difficulty, QuizKind};
use crate::speech::{
    parse_spoken_answer, ListenController, ListenOutcome, SpeechRecognizer, SpeechSynthesizer,
};
use crate::store::ScoreStore;

use super::state::{Advance, QuizSession};

/// Message for voice commands arriving while `speech.enabled` is off.
const SPEECH_DISABLED: &str = "Voice features are disabled";

// ---------------------------------------------------------------------------
// SessionCommand / SessionEvent
// ---------------------------------------------------------------------------

/// Commands accepted by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Speak the current question prompt (fire-and-forget).
    SpeakPrompt,
    /// Start a voice listening session for the current question.
    StartListening,
    /// Stop the active listening session, if any.
    StopListening,
    /// Submit a typed answer.
    SubmitText(String),
    /// Manual forward navigation (never affects score).
    NextQuestion,
    /// Manual backward navigation (never affects score).
    PrevQuestion,
    /// Return to a fresh session with newly generated questions.
    Reset,
}

/// Events emitted by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A listening session is active; the microphone is live.
    ListeningStarted,
    /// Listening ended without a transcript (timeout or explicit stop).
    ListeningStopped,
    /// A transcript was recognized and is about to be scored.
    TranscriptReceived { transcript: String },
    /// An answer was scored. `correct_answer` feeds the
    /// "The answer was N" message on a miss.
    Answered {
        correct: bool,
        correct_answer: i64,
        score: u32,
        wrong: u32,
    },
    /// The cursor moved to another question (advance or navigation).
    QuestionChanged {
        index: usize,
        total: usize,
        prompt: String,
    },
    /// The batch is exhausted. `new_high_score` is `true` when this
    /// session improved the persisted high score.
    SessionComplete {
        score: u32,
        wrong: u32,
        high_score: u32,
        new_high_score: bool,
    },
    /// The session was reset to a fresh batch.
    SessionReset,
    /// A recoverable error to display. Nothing is fatal.
    Error { message: String },
}

// ---------------------------------------------------------------------------
// SessionRunner
// ---------------------------------------------------------------------------

/// Drives one quiz session end to end.
///
/// Create with [`SessionRunner::new`], then call [`run`](Self::run) inside a
/// tokio task.
pub struct SessionRunner {
    session: QuizSession,
    listener: ListenController,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    store: Arc<dyn ScoreStore>,
    difficulty: Difficulty,
    question_count: usize,
    feedback_delay: Duration,
    speech_enabled: bool,
    started_at: Instant,
    /// Listen outcomes spawned but not yet received back.
    pending_listens: usize,
}

impl SessionRunner {
    /// Create a runner for one quiz variant.
    ///
    /// # Arguments
    ///
    /// * `kind`        — quiz variant; selects the generator and the high
    ///   score key.
    /// * `config`      — batch size, feedback delay, difficulty, speech
    ///   language and timeout.
    /// * `recognizer`  — host speech-recognition capability.
    /// * `synthesizer` — host text-to-speech capability.
    /// * `store`       — externally-owned persistence for scores and stats.
    pub fn new(
        kind: QuizKind,
        config: &AppConfig,
        recognizer: Arc<dyn SpeechRecognizer>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        store: Arc<dyn ScoreStore>,
    ) -> Self {
        let mut rng = rand::thread_rng();
        let questions = question::batch(
            &mut rng,
            kind,
            config.quiz.difficulty,
            config.quiz.question_count.max(1),
        );

        let listener = ListenController::new(
            recognizer,
            config.speech.language.clone(),
            Duration::from_secs(config.speech.listen_timeout_secs),
        );

        Self {
            session: QuizSession::new(kind, questions),
            listener,
            synthesizer,
            store,
            difficulty: config.quiz.difficulty,
            question_count: config.quiz.question_count.max(1),
            feedback_delay: Duration::from_millis(config.quiz.feedback_delay_ms),
            speech_enabled: config.speech.enabled,
            started_at: Instant::now(),
            pending_listens: 0,
        }
    }

    /// Prompt of the question the session currently points at.
    pub fn current_prompt(&self) -> String {
        self.session.current_question().prompt.clone()
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run the runner until `cmd_rx` is closed.
    ///
    /// In-flight listening outcomes are drained before returning so no
    /// recognized answer is lost at shutdown.
    pub async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<SessionCommand>,
        event_tx: mpsc::Sender<SessionEvent>,
    ) {
        let (outcome_tx, mut outcome_rx) = mpsc::channel::<ListenOutcome>(4);

        loop {
            tokio::select! {
                Some(outcome) = outcome_rx.recv(), if self.pending_listens > 0 => {
                    self.pending_listens -= 1;
                    self.handle_outcome(outcome, &event_tx).await;
                }
                cmd = cmd_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd, &event_tx, &outcome_tx).await,
                    None => break,
                },
            }
        }

        // Drain any outcome still in flight.
        while self.pending_listens > 0 {
            match outcome_rx.recv().await {
                Some(outcome) => {
                    self.pending_listens -= 1;
                    self.handle_outcome(outcome, &event_tx).await;
                }
                None => break,
            }
        }

        log::info!("session: command channel closed, runner shutting down");
    }

    // -----------------------------------------------------------------------
    // Command handling
    // -----------------------------------------------------------------------

    async fn handle_command(
        &mut self,
        cmd: SessionCommand,
        events: &mpsc::Sender<SessionEvent>,
        outcomes: &mpsc::Sender<ListenOutcome>,
    ) {
        log::debug!("session: command {cmd:?}");

        match cmd {
            SessionCommand::SpeakPrompt => {
                if !self.speech_enabled {
                    self.emit(events, SessionEvent::Error {
                        message: SPEECH_DISABLED.into(),
                    })
                    .await;
                } else if let Err(e) = self.synthesizer.speak(&self.current_prompt()) {
                    self.emit(events, SessionEvent::Error {
                        message: e.to_string(),
                    })
                    .await;
                }
            }

            SessionCommand::StartListening => {
                if !self.speech_enabled {
                    self.emit(events, SessionEvent::Error {
                        message: SPEECH_DISABLED.into(),
                    })
                    .await;
                    return;
                }
                match self.listener.start().await {
                    Ok(handle) => {
                        self.pending_listens += 1;
                        self.emit(events, SessionEvent::ListeningStarted).await;

                        let tx = outcomes.clone();
                        tokio::spawn(async move {
                            let _ = tx.send(handle.wait().await).await;
                        });
                    }
                    Err(e) => {
                        self.emit(events, SessionEvent::Error {
                            message: e.to_string(),
                        })
                        .await;
                    }
                }
            }

            SessionCommand::StopListening => {
                self.listener.stop();
            }

            SessionCommand::SubmitText(text) => {
                self.score_answer(parse_spoken_answer(&text), events).await;
            }

            SessionCommand::NextQuestion => {
                if self.session.go_next() {
                    self.on_question_changed(events).await;
                }
            }

            SessionCommand::PrevQuestion => {
                if self.session.go_prev() {
                    self.on_question_changed(events).await;
                }
            }

            SessionCommand::Reset => {
                // ThreadRng is !Send; scope it so it drops before any await.
                let questions = {
                    let mut rng = rand::thread_rng();
                    question::batch(
                        &mut rng,
                        self.session.kind(),
                        self.difficulty,
                        self.question_count,
                    )
                };
                self.session.reset(questions);
                self.started_at = Instant::now();

                self.emit(events, SessionEvent::SessionReset).await;
                self.on_question_changed(events).await;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Listening outcomes
    // -----------------------------------------------------------------------

    async fn handle_outcome(
        &mut self,
        outcome: ListenOutcome,
        events: &mpsc::Sender<SessionEvent>,
    ) {
        match outcome {
            ListenOutcome::Transcript(transcript) => {
                self.emit(events, SessionEvent::TranscriptReceived {
                    transcript: transcript.clone(),
                })
                .await;
                self.score_answer(parse_spoken_answer(&transcript), events)
                    .await;
            }
            ListenOutcome::TimedOut | ListenOutcome::Cancelled => {
                self.emit(events, SessionEvent::ListeningStopped).await;
            }
            ListenOutcome::Failed(e) => {
                self.emit(events, SessionEvent::Error {
                    message: e.to_string(),
                })
                .await;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Scoring and advancing
    // -----------------------------------------------------------------------

    /// Score an answer, show feedback for the configured delay, then
    /// advance or complete.
    async fn score_answer(&mut self, answer: Option<i64>, events: &mpsc::Sender<SessionEvent>) {
        let Some(feedback) = self.session.submit(answer) else {
            self.emit(events, SessionEvent::Error {
                message: "Session is complete — reset to play again".into(),
            })
            .await;
            return;
        };

        // Any in-flight listening targets a question that is about to
        // change; stop it.
        self.listener.stop();

        self.emit(events, SessionEvent::Answered {
            correct: feedback.correct,
            correct_answer: feedback.correct_answer,
            score: feedback.score,
            wrong: feedback.wrong,
        })
        .await;

        // Let the user read the feedback before the next prompt appears.
        tokio::time::sleep(self.feedback_delay).await;

        match self.session.advance() {
            Advance::Next(_) => self.on_question_changed(events).await,
            Advance::Complete => self.on_complete(events).await,
        }
    }

    async fn on_question_changed(&mut self, events: &mpsc::Sender<SessionEvent>) {
        // A question change invalidates any in-flight listening.
        self.listener.stop();

        let (index, total) = self.session.progress();
        let prompt = self.current_prompt();
        self.emit(events, SessionEvent::QuestionChanged {
            index,
            total,
            prompt,
        })
        .await;
    }

    async fn on_complete(&mut self, events: &mpsc::Sender<SessionEvent>) {
        let score = self.session.score();
        let key = self.session.kind().storage_key();

        // Persistence failures are logged, never fatal: the session result
        // is still reported to the user.
        let new_high_score = self
            .store
            .record_high_score(key, score)
            .unwrap_or_else(|e| {
                log::warn!("session: failed to record high score: {e}");
                false
            });
        let high_score = self.store.high_score(key).unwrap_or(score);

        match self.store.profile() {
            Ok(mut stats) => {
                stats.record_session(score, self.started_at.elapsed().as_secs());
                if let Err(e) = self.store.save_profile(&stats) {
                    log::warn!("session: failed to save profile stats: {e}");
                }
            }
            Err(e) => log::warn!("session: failed to load profile stats: {e}"),
        }

        self.emit(events, SessionEvent::SessionComplete {
            score,
            wrong: self.session.wrong(),
            high_score,
            new_high_score,
        })
        .await;
    }

    async fn emit(&self, events: &mpsc::Sender<SessionEvent>, event: SessionEvent) {
        let _ = events.send(event).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
