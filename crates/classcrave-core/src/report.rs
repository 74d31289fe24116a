//! Attempt reports with JSON persistence and attempt-to-attempt comparison.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::PracticeQuestion;
use crate::parser::Assignment;
use crate::scoring::AttemptScore;

/// A graded attempt at one assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the attempt was graded.
    pub created_at: DateTime<Utc>,
    pub assignment: AssignmentSummary,
    /// Student identifier, if the caller supplied one.
    #[serde(default)]
    pub student_id: Option<String>,
    /// Seed the question set was generated from.
    pub seed: String,
    /// Per-question detail, in question order.
    pub results: Vec<QuestionResult>,
    pub score: ScoreSummary,
}

/// Summary of an assignment (without the full configuration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentSummary {
    pub id: String,
    pub title: String,
    pub template_id: String,
    pub question_count: usize,
}

/// One graded question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub prompt: String,
    pub expected: String,
    pub submitted: Option<String>,
    pub correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub correct: usize,
    pub total: usize,
    pub percent: f64,
    pub passed: bool,
}

impl AttemptReport {
    /// Assemble a report from a graded attempt.
    pub fn new(
        assignment: &Assignment,
        seed: &str,
        student_id: Option<String>,
        questions: &[PracticeQuestion],
        score: &AttemptScore,
    ) -> Self {
        let results = questions
            .iter()
            .zip(&score.outcomes)
            .map(|(q, outcome)| QuestionResult {
                question_id: q.id.clone(),
                prompt: q.prompt.clone(),
                expected: q.answer.to_string(),
                submitted: outcome.submitted.clone(),
                correct: outcome.correct,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            assignment: AssignmentSummary {
                id: assignment.id.clone(),
                title: assignment.title.clone(),
                template_id: assignment.config.template_id.clone(),
                question_count: questions.len(),
            },
            student_id,
            seed: seed.to_string(),
            results,
            score: ScoreSummary {
                correct: score.correct,
                total: score.total,
                percent: score.percent,
                passed: score.passed,
            },
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: AttemptReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.assignment.title));
        md.push_str(&format!(
            "**Score:** {}/{} ({:.1}%), {}\n\n",
            self.score.correct,
            self.score.total,
            self.score.percent,
            if self.score.passed { "passed" } else { "not passed" }
        ));
        md.push_str("| # | Question | Expected | Submitted | |\n");
        md.push_str("|---|----------|----------|-----------|---|\n");
        for r in &self.results {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                r.question_id,
                r.prompt.replace('|', "\\|"),
                r.expected,
                r.submitted.as_deref().unwrap_or("-").replace('|', "\\|"),
                if r.correct { "✓" } else { "✗" }
            ));
        }

        md
    }

    /// Compare this attempt against an earlier one.
    ///
    /// Question ids are only comparable when both attempts used the same
    /// assignment and seed; otherwise only the score delta is meaningful.
    pub fn compare(&self, previous: &AttemptReport) -> AttemptComparison {
        let same_questions =
            self.assignment.id == previous.assignment.id && self.seed == previous.seed;

        let mut newly_correct = Vec::new();
        let mut newly_incorrect = Vec::new();
        if same_questions {
            let before: BTreeMap<&str, bool> = previous
                .results
                .iter()
                .map(|r| (r.question_id.as_str(), r.correct))
                .collect();
            for r in &self.results {
                match before.get(r.question_id.as_str()) {
                    Some(false) if r.correct => newly_correct.push(r.question_id.clone()),
                    Some(true) if !r.correct => newly_incorrect.push(r.question_id.clone()),
                    _ => {}
                }
            }
        }

        AttemptComparison {
            same_questions,
            previous_percent: previous.score.percent,
            current_percent: self.score.percent,
            delta: self.score.percent - previous.score.percent,
            newly_correct,
            newly_incorrect,
        }
    }
}

/// Result of comparing two attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptComparison {
    /// Whether both attempts answered the same generated questions.
    pub same_questions: bool,
    pub previous_percent: f64,
    pub current_percent: f64,
    pub delta: f64,
    pub newly_correct: Vec<String>,
    pub newly_incorrect: Vec<String>,
}

impl AttemptComparison {
    /// Format the comparison as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = format!(
            "**Summary:** {:.1}% -> {:.1}% ({:+.1}%)\n\n",
            self.previous_percent, self.current_percent, self.delta
        );

        if !self.same_questions {
            md.push_str("_Attempts used different question sets; per-question changes omitted._\n");
            return md;
        }

        if !self.newly_correct.is_empty() {
            md.push_str(&format!(
                "### Now correct\n\n{}\n\n",
                self.newly_correct.join(", ")
            ));
        }
        if !self.newly_incorrect.is_empty() {
            md.push_str(&format!(
                "### Now incorrect\n\n{}\n",
                self.newly_incorrect.join(", ")
            ));
        }

        md
    }

    pub fn improved(&self) -> bool {
        self.delta > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PracticeAssignmentConfig;
    use crate::generator::create_practice_questions;

    fn assignment() -> Assignment {
        Assignment {
            id: "asg-1".into(),
            title: "Addition".into(),
            description: String::new(),
            config: PracticeAssignmentConfig {
                question_count: Some(5.0),
                ..PracticeAssignmentConfig::for_template("math-addition-facts")
            },
        }
    }

    fn graded(seed: &str, correct_upto: usize) -> AttemptReport {
        let assignment = assignment();
        let questions = create_practice_questions(&assignment.config, seed);
        let responses: BTreeMap<String, String> = questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let answer = if i < correct_upto {
                    q.answer.to_string()
                } else {
                    "-1".to_string()
                };
                (q.id.clone(), answer)
            })
            .collect();
        let score = AttemptScore::compute(&questions, &responses);
        AttemptReport::new(&assignment, seed, Some("stu-1".into()), &questions, &score)
    }

    #[test]
    fn report_reflects_score() {
        let report = graded("seed", 4);
        assert_eq!(report.results.len(), 5);
        assert_eq!(report.score.correct, 4);
        assert_eq!(report.score.percent, 80.0);
        assert!(report.score.passed);
        assert!(!report.results[4].correct);
        assert_eq!(report.assignment.template_id, "math-addition-facts");
    }

    #[test]
    fn json_roundtrip() {
        let report = graded("seed", 5);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = AttemptReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.seed, "seed");
        assert_eq!(loaded.results.len(), 5);
    }

    #[test]
    fn load_missing_file_fails() {
        assert!(AttemptReport::load_json(Path::new("no/such/report.json")).is_err());
    }

    #[test]
    fn compare_same_seed_tracks_questions() {
        let first = graded("seed", 2);
        let second = graded("seed", 4);
        let cmp = second.compare(&first);
        assert!(cmp.same_questions);
        assert!(cmp.improved());
        assert_eq!(cmp.newly_correct, vec!["3", "4"]);
        assert!(cmp.newly_incorrect.is_empty());
        assert!(cmp.to_markdown().contains("Now correct"));
    }

    #[test]
    fn compare_different_seed_only_reports_delta() {
        let first = graded("seed-a", 5);
        let second = graded("seed-b", 3);
        let cmp = second.compare(&first);
        assert!(!cmp.same_questions);
        assert_eq!(cmp.delta, -40.0);
        assert!(cmp.newly_incorrect.is_empty());
        assert!(cmp.to_markdown().contains("different question sets"));
    }

    #[test]
    fn markdown_lists_questions() {
        let md = graded("seed", 3).to_markdown();
        assert!(md.contains("## Addition"));
        assert!(md.contains("3/5 (60.0%)"));
        assert!(md.contains("not passed"));
    }
}
