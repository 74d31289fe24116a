//! Attempt scoring.
//!
//! Rolls per-question correctness up into a percentage and a pass/fail
//! decision. The threshold is classroom policy and lives outside the
//! generator contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::evaluator::is_answer_correct;
use crate::model::PracticeQuestion;

/// Minimum percentage for an attempt to pass.
pub const PASS_THRESHOLD_PERCENT: f64 = 70.0;

/// Outcome of grading one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub question_id: String,
    /// Raw submission, `None` if the student skipped the question.
    pub submitted: Option<String>,
    pub correct: bool,
}

/// Aggregate score for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptScore {
    pub correct: usize,
    pub total: usize,
    /// `correct / total × 100`, rounded to one decimal.
    pub percent: f64,
    pub passed: bool,
    pub outcomes: Vec<QuestionOutcome>,
}

impl AttemptScore {
    /// Grade `responses` (question id → raw answer) with the default threshold.
    pub fn compute(questions: &[PracticeQuestion], responses: &BTreeMap<String, String>) -> Self {
        Self::compute_with_threshold(questions, responses, PASS_THRESHOLD_PERCENT)
    }

    /// Grade `responses` against a custom pass threshold.
    ///
    /// Missing responses count as incorrect. An empty question set scores
    /// zero and never passes.
    pub fn compute_with_threshold(
        questions: &[PracticeQuestion],
        responses: &BTreeMap<String, String>,
        threshold: f64,
    ) -> Self {
        let outcomes: Vec<QuestionOutcome> = questions
            .iter()
            .map(|q| {
                let submitted = responses.get(&q.id).cloned();
                let correct = submitted
                    .as_deref()
                    .is_some_and(|raw| is_answer_correct(q, raw));
                QuestionOutcome {
                    question_id: q.id.clone(),
                    submitted,
                    correct,
                }
            })
            .collect();

        let total = outcomes.len();
        let correct = outcomes.iter().filter(|o| o.correct).count();
        let percent = score_percent(correct, total);

        Self {
            correct,
            total,
            percent,
            passed: total > 0 && percent >= threshold,
            outcomes,
        }
    }

    /// Ids of questions answered incorrectly or skipped.
    pub fn missed(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.correct)
            .map(|o| o.question_id.as_str())
            .collect()
    }
}

/// Percentage of `correct` out of `total`, rounded to one decimal.
pub fn score_percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (correct as f64 / total as f64 * 1000.0).round() / 10.0
}
