//! Arithmetic question generator.
//!
//! Operands are drawn uniformly from the difficulty's inclusive range and
//! the operation from the difficulty's operation set (easy: addition only).
//! The answer is computed exactly from the same operands that appear in the
//! prompt, so the prompt is always self-consistent.

use rand::Rng;

use super::{Difficulty, Question};

/// Generate a single arithmetic question with the given batch id.
pub fn question<R: Rng>(rng: &mut R, difficulty: Difficulty, id: u32) -> Question {
    let (lo, hi) = difficulty.operand_range();
    let a = rng.gen_range(lo..=hi);
    let b = rng.gen_range(lo..=hi);
    let ops = difficulty.ops();
    let op = ops[rng.gen_range(0..ops.len())];

    Question {
        id,
        prompt: format!("What is {a} {} {b}?", op.symbol()),
        answer: op.apply(a, b),
    }
}

/// Generate an eager batch of `count` arithmetic questions.
pub fn generate<R: Rng>(rng: &mut R, difficulty: Difficulty, count: usize) -> Vec<Question> {
    (0..count)
        .map(|id| question(rng, difficulty, id as u32))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
