//! Quiz session state machine.
//!
//! ```text
//! InProgress ──submit──▶ (score / wrong counted)
//!            ──advance─▶ next question
//!            ──advance─▶ Complete        (last question answered)
//!            ──next/prev─▶ InProgress    (navigation, score untouched)
//! Complete   ──reset───▶ InProgress      (fresh question batch)
//! ```
//!
//! The session only counts answers and moves the cursor; timing (the
//! feedback delay) and persistence (high score, profile stats) belong to
//! the [`runner`](crate::session::runner).

use crate::question::{Question, QuizKind};

// ---------------------------------------------------------------------------
// AnswerFeedback / Advance
// ---------------------------------------------------------------------------

/// Result of scoring one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    /// Whether the submission matched exactly.
    pub correct: bool,
    /// The question's answer, for the "The answer was N" message.
    pub correct_answer: i64,
    /// Score after this submission.
    pub score: u32,
    /// Wrong count after this submission.
    pub wrong: u32,
}

/// Result of advancing past an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the question at this index.
    Next(usize),
    /// The list is exhausted; the session is complete.
    Complete,
}

// ---------------------------------------------------------------------------
// QuizSession
// ---------------------------------------------------------------------------

/// One run through a fixed batch of questions.
///
/// Invariant: `current < questions.len()` while the session is in progress.
/// All mutation goes through the methods below.
#[derive(Debug, Clone)]
pub struct QuizSession {
    kind: QuizKind,
    questions: Vec<Question>,
    current: usize,
    score: u32,
    wrong: u32,
    completed: bool,
}

impl QuizSession {
    /// Start a session over a freshly generated batch.
    ///
    /// The batch must be non-empty; generators always produce at least one
    /// question.
    pub fn new(kind: QuizKind, questions: Vec<Question>) -> Self {
        debug_assert!(!questions.is_empty(), "question batch must be non-empty");
        Self {
            kind,
            questions,
            current: 0,
            score: 0,
            wrong: 0,
            completed: false,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn kind(&self) -> QuizKind {
        self.kind
    }

    /// The question the cursor points at.
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// `(current index, batch length)` for progress display.
    pub fn progress(&self) -> (usize, usize) {
        (self.current, self.questions.len())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Score a candidate answer against the current question.
    ///
    /// `None` (no parsable number in the submission) naturally fails the
    /// equality check and counts as wrong. The cursor does not move —
    /// callers [`advance`](Self::advance) after showing feedback.
    ///
    /// Returns `None` when the session is already complete.
    pub fn submit(&mut self, answer: Option<i64>) -> Option<AnswerFeedback> {
        if self.completed {
            return None;
        }

        let correct_answer = self.current_question().answer;
        let correct = answer == Some(correct_answer);
        if correct {
            self.score += 1;
        } else {
            self.wrong += 1;
        }

        Some(AnswerFeedback {
            correct,
            correct_answer,
            score: self.score,
            wrong: self.wrong,
        })
    }

    /// Move past the current question: to the next one, or to completion
    /// when the batch is exhausted.
    pub fn advance(&mut self) -> Advance {
        if self.completed {
            return Advance::Complete;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            Advance::Next(self.current)
        } else {
            self.completed = true;
            Advance::Complete
        }
    }

    /// Manual forward navigation. Clamps at the last question; never
    /// affects score. Returns `true` when the cursor moved.
    pub fn go_next(&mut self) -> bool {
        if !self.completed && self.current + 1 < self.questions.len() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Manual backward navigation. Clamps at the first question; never
    /// affects score. Returns `true` when the cursor moved.
    pub fn go_prev(&mut self) -> bool {
        if !self.completed && self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Return to the initial in-progress state over a fresh batch.
    pub fn reset(&mut self, questions: Vec<Question>) {
        debug_assert!(!questions.is_empty(), "question batch must be non-empty");
        self.questions = questions;
        self.current = 0;
        self.score = 0;
        self.wrong = 0;
        self.completed = false;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::Question;

    fn fixed_questions(answers: &[i64]) -> Vec<Question> {
        answers
            .iter()
            .enumerate()
            .map(|(i, &answer)| Question {
                id: i as u32,
                prompt: format!("What is question {i}?"),
                answer,
            })
            .collect()
    }

    fn session(answers: &[i64]) -> QuizSession {
        QuizSession::new(QuizKind::Math, fixed_questions(answers))
    }

    #[test]
    fn correct_answer_increments_score_only() {
        let mut s = session(&[12, 5]);
        let fb = s.submit(Some(12)).expect("in progress");

        assert!(fb.correct);
        assert_eq!(fb.score, 1);
        assert_eq!(fb.wrong, 0);
        assert_eq!(s.score(), 1);
        assert_eq!(s.wrong(), 0);
    }

    #[test]
    fn wrong_answer_increments_wrong_only_and_reports_answer() {
        let mut s = session(&[12]);
        let fb = s.submit(Some(13)).expect("in progress");

        assert!(!fb.correct);
        assert_eq!(fb.correct_answer, 12, "for the 'The answer was 12' message");
        assert_eq!(fb.score, 0);
        assert_eq!(fb.wrong, 1);
    }

    #[test]
    fn unparsable_answer_counts_as_wrong() {
        let mut s = session(&[12]);
        let fb = s.submit(None).expect("in progress");
        assert!(!fb.correct);
        assert_eq!(s.wrong(), 1);
    }

    #[test]
    fn submit_does_not_move_the_cursor() {
        let mut s = session(&[1, 2]);
        s.submit(Some(1));
        assert_eq!(s.progress().0, 0);

        assert_eq!(s.advance(), Advance::Next(1));
        assert_eq!(s.current_question().answer, 2);
    }

    #[test]
    fn advancing_past_the_last_question_completes() {
        let mut s = session(&[1, 2]);
        s.submit(Some(1));
        s.advance();
        s.submit(Some(2));

        assert_eq!(s.advance(), Advance::Complete);
        assert!(s.is_complete());
        assert_eq!(s.score(), 2);
    }

    #[test]
    fn submit_after_completion_is_rejected() {
        let mut s = session(&[1]);
        s.submit(Some(1));
        s.advance();

        assert!(s.submit(Some(1)).is_none());
        assert_eq!(s.score(), 1, "score is frozen after completion");
    }

    #[test]
    fn navigation_clamps_and_never_scores() {
        let mut s = session(&[1, 2, 3]);

        assert!(!s.go_prev(), "already at the first question");
        assert!(s.go_next());
        assert!(s.go_next());
        assert!(!s.go_next(), "already at the last question");
        assert_eq!(s.progress().0, 2);

        assert!(s.go_prev());
        assert_eq!(s.progress().0, 1);

        assert_eq!(s.score(), 0);
        assert_eq!(s.wrong(), 0);
    }

    #[test]
    fn navigation_retargets_submission() {
        let mut s = session(&[1, 2]);
        s.go_next();
        let fb = s.submit(Some(2)).expect("in progress");
        assert!(fb.correct, "submission scores against the navigated-to question");
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut s = session(&[1]);
        s.submit(Some(9));
        s.advance();
        assert!(s.is_complete());

        s.reset(fixed_questions(&[4, 5]));
        assert!(!s.is_complete());
        assert_eq!(s.progress(), (0, 2));
        assert_eq!(s.score(), 0);
        assert_eq!(s.wrong(), 0);
    }

    #[test]
    fn cursor_stays_in_bounds_while_in_progress() {
        let mut s = session(&[1, 2, 3]);
        for _ in 0..10 {
            s.go_next();
        }
        let (idx, len) = s.progress();
        assert!(idx < len);
    }
}
