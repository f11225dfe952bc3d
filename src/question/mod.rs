//! Question generation for the math and logic quizzes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                batch(kind, …)                    │
//! │                      │                           │
//! │       ┌──────────────┴──────────────┐            │
//! │       ▼                             ▼            │
//! │  arithmetic::generate       sequence::generate   │
//! │  "What is 7 + 5?"           "3, 7, 11, ?, 19"    │
//! │       │                             │            │
//! │       └──────────────┬──────────────┘            │
//! │                      ▼                           │
//! │        Vec<Question { id, prompt, answer }>      │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! Generation is infallible: every call yields exactly `count` questions
//! whose `answer` is computed with exact `i64` arithmetic from the operands
//! embedded in the prompt.
//!
//! # Quick start
//!
//! ```
//! use voicemath::question::{arithmetic, Difficulty};
//!
//! let mut rng = rand::thread_rng();
//! let batch = arithmetic::generate(&mut rng, Difficulty::Easy, 10);
//! assert_eq!(batch.len(), 10);
//! ```

pub mod arithmetic;
pub mod sequence;

use rand::Rng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Question
// ---------------------------------------------------------------------------

/// A single quiz question. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Position of the question inside its batch (0-based).
    pub id: u32,
    /// Human-readable prompt, also sent to speech synthesis.
    pub prompt: String,
    /// The exact integer answer.
    pub answer: i64,
}

// ---------------------------------------------------------------------------
// Op
// ---------------------------------------------------------------------------

/// Arithmetic operations used by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
}

impl Op {
    /// The symbol embedded in the question prompt.
    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
        }
    }

    /// Apply the operation with exact integer arithmetic.
    ///
    /// Operands stay within the difficulty ranges (≤ 100), so no overflow
    /// handling is needed.
    pub fn apply(self, a: i64, b: i64) -> i64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
        }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// Controls the operand magnitude and the operation set for arithmetic
/// questions.
///
/// | Variant | Operand range | Operations      |
/// |---------|---------------|-----------------|
/// | Easy    | 1–10          | add only        |
/// | Medium  | 1–50          | add, sub, mul   |
/// | Hard    | 1–100         | add, sub, mul   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Inclusive bounds for operand magnitude.
    pub fn operand_range(self) -> (i64, i64) {
        match self {
            Difficulty::Easy => (1, 10),
            Difficulty::Medium => (1, 50),
            Difficulty::Hard => (1, 100),
        }
    }

    /// Operations available at this difficulty. Easy sticks to addition so
    /// young players never see negative answers.
    pub fn ops(self) -> &'static [Op] {
        match self {
            Difficulty::Easy => &[Op::Add],
            Difficulty::Medium | Difficulty::Hard => &[Op::Add, Op::Sub, Op::Mul],
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

// ---------------------------------------------------------------------------
// QuizKind
// ---------------------------------------------------------------------------

/// Which quiz variant a session runs. Each variant has its own persisted
/// high score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizKind {
    /// Arithmetic questions ("What is 7 + 5?").
    Math,
    /// Sequence-completion puzzles ("3, 7, 11, ?, 19").
    Logic,
}

impl QuizKind {
    /// Store key under which this variant's high score is persisted.
    pub fn storage_key(self) -> &'static str {
        match self {
            QuizKind::Math => "quiz-high-score",
            QuizKind::Logic => "logical-high-score",
        }
    }

    /// Display title for the front-end.
    pub fn title(self) -> &'static str {
        match self {
            QuizKind::Math => "Math Quiz",
            QuizKind::Logic => "Logical Reasoning Quiz",
        }
    }
}

// ---------------------------------------------------------------------------
// batch
// ---------------------------------------------------------------------------

/// Generate a full question batch for one session of `kind`.
///
/// `difficulty` only affects [`QuizKind::Math`]; sequence puzzles take no
/// parameter.
pub fn batch<R: Rng>(
    rng: &mut R,
    kind: QuizKind,
    difficulty: Difficulty,
    count: usize,
) -> Vec<Question> {
    match kind {
        QuizKind::Math => arithmetic::generate(rng, difficulty, count),
        QuizKind::Logic => sequence::generate(rng, count),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
