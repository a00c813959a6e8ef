//! Quiz data model and the per-attempt session state machine.
//!
//! A quiz attempt is a linear scan over an ordered question list with a single
//! monotonically increasing cursor and an accumulating score. There is no
//! backtracking, no skipping and no retry of a question.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single multiple-choice question.
///
/// Invariant (enforced by the synthesizer at construction time):
/// `answer` equals exactly one element of `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

/// An ordered sequence of questions, validated at synthesis time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// State-machine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// An operation was applied in a state that does not admit it, e.g. an
    /// answer submitted after completion or against a missing session.
    #[error("invalid quiz state: {0}")]
    InvalidState(&'static str),
}

/// Result of a single answer submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub correct: bool,
    /// The expected answer text, returned for display either way.
    pub correct_answer: String,
}

/// What the session currently presents: the question awaiting an answer, or
/// the final score once the cursor has passed the last question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    Question {
        question: QuizQuestion,
        /// Zero-based position of the question within the quiz.
        index: usize,
        total: usize,
    },
    Complete {
        score: usize,
        total: usize,
    },
}

/// One user's quiz attempt: the quiz, a cursor and a running score.
///
/// `submit_answer` is the only mutator. The cursor only moves forward, one
/// question per submission, regardless of correctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    quiz: Quiz,
    current_question_index: usize,
    score: usize,
}

impl QuizSession {
    /// Begin a new attempt at the given quiz.
    pub fn start(quiz: Quiz) -> Self {
        Self {
            quiz,
            current_question_index: 0,
            score: 0,
        }
    }

    /// The question awaiting an answer, or the completion summary. Pure read.
    pub fn current_question(&self) -> Progress {
        let total = self.quiz.len();
        match self.quiz.questions.get(self.current_question_index) {
            Some(question) => Progress::Question {
                question: question.clone(),
                index: self.current_question_index,
                total,
            },
            None => Progress::Complete {
                score: self.score,
                total,
            },
        }
    }

    /// Check `user_answer` against the current question and advance.
    ///
    /// Correctness is exact string equality: case-sensitive, no trimming. An
    /// empty answer is simply unequal to any real answer. The cursor advances
    /// whether or not the answer was correct. Fails closed with
    /// `QuizError::InvalidState` once the quiz is complete, without touching
    /// score or cursor.
    pub fn submit_answer(&mut self, user_answer: &str) -> Result<AnswerOutcome, QuizError> {
        let question = self
            .quiz
            .questions
            .get(self.current_question_index)
            .ok_or(QuizError::InvalidState("quiz is already complete"))?;

        let correct = user_answer == question.answer;
        let correct_answer = question.answer.clone();

        if correct {
            self.score += 1;
        }
        self.current_question_index += 1;

        Ok(AnswerOutcome {
            correct,
            correct_answer,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.current_question_index >= self.quiz.len()
    }

    /// Final `(score, total)`. Only valid once the attempt is complete.
    pub fn summary(&self) -> Result<(usize, usize), QuizError> {
        if !self.is_complete() {
            return Err(QuizError::InvalidState("quiz is not complete"));
        }
        Ok((self.score, self.quiz.len()))
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn question_count(&self) -> usize {
        self.quiz.len()
    }
}
