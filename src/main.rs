//! Application entry point — VoiceMath terminal front-end.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Open the JSON score store (degrades to in-memory on failure).
//! 4. Pick the quiz variant from the command line (`math` | `logic`).
//! 5. Build the speech capabilities (no host recognizer here, so voice
//!    input degrades to a message; synthesis logs the utterance).
//! 6. Spawn the [`SessionRunner`] on the tokio runtime.
//! 7. Read commands from stdin and print events until the session ends.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use voicemath::{
    config::{AppConfig, AppPaths},
    leaderboard,
    question::QuizKind,
    session::{SessionCommand, SessionEvent, SessionRunner},
    speech::{LogSynthesizer, SpeechRecognizer, SpeechSynthesizer, UnavailableRecognizer},
    store::{JsonStore, MemoryStore, ScoreStore},
};

// ---------------------------------------------------------------------------
// Store setup
// ---------------------------------------------------------------------------

/// Open the on-disk store, falling back to a volatile in-memory store so the
/// quiz still runs when the data directory is unusable.
fn open_store(paths: &AppPaths) -> Arc<dyn ScoreStore> {
    match JsonStore::open(paths.scores_file.clone()) {
        Ok(store) => {
            log::info!("Score store: {}", paths.scores_file.display());
            Arc::new(store)
        }
        Err(e) => {
            log::warn!(
                "Could not open score store ({}): {e}. Scores will not persist.",
                paths.scores_file.display()
            );
            Arc::new(MemoryStore::default())
        }
    }
}

// ---------------------------------------------------------------------------
// Command parsing
// ---------------------------------------------------------------------------

/// Map one stdin line to a session command. Anything that is not a known
/// keyword is submitted as a typed answer.
fn parse_line(line: &str) -> Option<SessionCommand> {
    match line.trim() {
        "" => None,
        "listen" | "l" => Some(SessionCommand::StartListening),
        "stop" => Some(SessionCommand::StopListening),
        "say" => Some(SessionCommand::SpeakPrompt),
        "next" | "n" => Some(SessionCommand::NextQuestion),
        "prev" | "p" => Some(SessionCommand::PrevQuestion),
        "reset" | "r" => Some(SessionCommand::Reset),
        answer => Some(SessionCommand::SubmitText(answer.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Event rendering
// ---------------------------------------------------------------------------

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::ListeningStarted => println!("(listening...)"),
        SessionEvent::ListeningStopped => println!("(stopped listening)"),
        SessionEvent::TranscriptReceived { transcript } => {
            println!("heard: {transcript:?}");
        }
        SessionEvent::Answered {
            correct,
            correct_answer,
            score,
            wrong,
        } => {
            if *correct {
                println!("Correct! (score {score}, wrong {wrong})");
            } else {
                println!("The answer was {correct_answer}. (score {score}, wrong {wrong})");
            }
        }
        SessionEvent::QuestionChanged {
            index,
            total,
            prompt,
        } => {
            println!("[{}/{total}] {prompt}", index + 1);
        }
        SessionEvent::SessionComplete {
            score,
            wrong,
            high_score,
            new_high_score,
        } => {
            println!("Session complete: {score} correct, {wrong} wrong.");
            if *new_high_score {
                println!("New high score: {high_score}!");
            } else {
                println!("High score: {high_score}");
            }
        }
        SessionEvent::SessionReset => println!("(new session)"),
        SessionEvent::Error { message } => println!("! {message}"),
    }
}

fn print_leaderboard(store: &dyn ScoreStore, kind: QuizKind) {
    println!("--- Leaderboard ---");
    for (rank, entry) in leaderboard::demo_entries().iter().enumerate() {
        println!(
            "{:>2}. {:<14} {:>4} pts  ({} solved)",
            rank + 1,
            entry.username,
            entry.score,
            entry.solved
        );
    }

    let name = store
        .username()
        .ok()
        .flatten()
        .unwrap_or_else(|| "You".to_string());
    match store.high_score(kind.storage_key()) {
        Ok(high) => println!("    {name}: best {high} ({})", kind.title()),
        Err(e) => log::warn!("Could not read high score: {e}"),
    }
}

fn print_stats(store: &dyn ScoreStore) {
    match store.profile() {
        Ok(stats) => {
            println!("--- Your stats ---");
            println!("Quizzes taken:  {}", stats.quizzes_taken);
            println!("Total correct:  {}", stats.total_correct);
            println!("High score:     {}", stats.high_score);
            println!("Practice time:  {} s", stats.practice_time_secs);
        }
        Err(e) => println!("! Could not read stats: {e}"),
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("VoiceMath starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Score store
    let paths = AppPaths::new();
    let store = open_store(&paths);

    // 4. Quiz variant
    let kind = match std::env::args().nth(1).as_deref() {
        Some("logic") => QuizKind::Logic,
        Some("math") | None => QuizKind::Math,
        Some(other) => {
            anyhow::bail!("unknown quiz variant {other:?} (expected \"math\" or \"logic\")");
        }
    };

    // 5. Speech capabilities. There is no terminal speech recognizer, so
    //    voice input reports its unavailability; "listen" demonstrates the
    //    degraded path.
    let recognizer: Arc<dyn SpeechRecognizer> = Arc::new(UnavailableRecognizer);
    let synthesizer: Arc<dyn SpeechSynthesizer> = Arc::new(LogSynthesizer);

    // 6. Session runner
    let runner = SessionRunner::new(
        kind,
        &config,
        recognizer,
        synthesizer,
        Arc::clone(&store),
    );
    let first_prompt = runner.current_prompt();

    let (cmd_tx, cmd_rx) = mpsc::channel::<SessionCommand>(16);
    let (event_tx, mut event_rx) = mpsc::channel::<SessionEvent>(32);
    let runner_task = tokio::spawn(runner.run(cmd_rx, event_tx));

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&event);
        }
    });

    // 7. Command loop
    println!("{}", kind.title());
    if config.speech.enabled {
        println!(
            "Commands: answer | listen | stop | say | next | prev | reset | board | stats | name <you> | quit"
        );
    } else {
        println!("Commands: answer | next | prev | reset | board | stats | name <you> | quit");
    }
    println!("[1/{}] {first_prompt}", config.quiz.question_count.max(1));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "quit" | "q" => break,
            "board" => print_leaderboard(store.as_ref(), kind),
            "stats" => print_stats(store.as_ref()),
            other if other.starts_with("name ") => {
                let name = other["name ".len()..].trim().to_string();
                match store.set_username(Some(name.clone())) {
                    Ok(()) => println!("Hello, {name}!"),
                    Err(e) => println!("! Could not save username: {e}"),
                }
            }
            other => {
                if let Some(cmd) = parse_line(other) {
                    if cmd_tx.send(cmd).await.is_err() {
                        break;
                    }
                }
            }
        }
    }

    // Closing the command channel lets the runner drain and exit.
    drop(cmd_tx);
    let _ = runner_task.await;
    let _ = printer.await;

    log::info!("VoiceMath shut down");
    Ok(())
}
