//! VoiceMath — a voice-driven math and logic quiz engine.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ front-end (src/main.rs terminal UI, or any host)             │
//! │     │ SessionCommand                     ▲ SessionEvent      │
//! │     ▼                                    │                   │
//! │ session::SessionRunner ── session::QuizSession (state)       │
//! │     │                │                                       │
//! │     │                └── question::batch (arithmetic /       │
//! │     │                                     sequence puzzles)  │
//! │     ├── speech::ListenController ── SpeechRecognizer (trait) │
//! │     ├── speech::SpeechSynthesizer (trait)                    │
//! │     └── store::ScoreStore (trait) ── JsonStore / MemoryStore │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is front-end agnostic: everything flows through the
//! [`session::SessionRunner`] command/event channels, and the speech and
//! persistence capabilities are traits so hosts plug in what they have.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//! use voicemath::config::AppConfig;
//! use voicemath::question::QuizKind;
//! use voicemath::session::{SessionCommand, SessionRunner};
//! use voicemath::speech::{LogSynthesizer, UnavailableRecognizer};
//! use voicemath::store::MemoryStore;
//!
//! # async fn example() {
//! let runner = SessionRunner::new(
//!     QuizKind::Math,
//!     &AppConfig::default(),
//!     Arc::new(UnavailableRecognizer),
//!     Arc::new(LogSynthesizer),
//!     Arc::new(MemoryStore::default()),
//! );
//!
//! let (cmd_tx, cmd_rx) = mpsc::channel(16);
//! let (event_tx, mut event_rx) = mpsc::channel(32);
//! tokio::spawn(runner.run(cmd_rx, event_tx));
//!
//! cmd_tx.send(SessionCommand::SubmitText("42".into())).await.unwrap();
//! while let Some(event) = event_rx.recv().await {
//!     println!("{event:?}");
//! }
//! # }
//! ```

pub mod config;
pub mod leaderboard;
pub mod question;
pub mod session;
pub mod speech;
pub mod store;
