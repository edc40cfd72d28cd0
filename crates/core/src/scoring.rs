//! Answer evaluation.

use crate::model::Question;

/// Returns true when `answer` matches the question's correct answer.
#[must_use]
pub fn evaluate(question: &Question, answer: bool) -> bool {
    question.correct_answer() == answer
}
