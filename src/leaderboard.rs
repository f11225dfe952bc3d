//! Leaderboard entries and the built-in demo board.
//!
//! There is no backend service, so the board shown next to the user's own
//! stats is a fixed set of demo entries. The user's profile row is rendered
//! separately by the front-end from [`ProfileStats`](crate::store::ProfileStats).

use serde::Serialize;

/// One row on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// Display name.
    pub username: String,
    /// Total points.
    pub score: u32,
    /// Questions solved.
    pub solved: u32,
}

/// The built-in demo leaderboard, ordered best-first.
pub fn demo_entries() -> Vec<LeaderboardEntry> {
    [
        ("MathWhiz", 980, 45),
        ("NumberNinja", 850, 38),
        ("QuizMaster", 720, 32),
        ("VoiceGenius", 690, 30),
        ("MathExplorer", 650, 28),
    ]
    .into_iter()
    .map(|(username, score, solved)| LeaderboardEntry {
        username: username.to_string(),
        score,
        solved,
    })
    .collect()
}

/// The top `n` demo entries, best-first.
pub fn top(n: usize) -> Vec<LeaderboardEntry> {
    let mut entries = demo_entries();
    entries.truncate(n);
    entries
}
