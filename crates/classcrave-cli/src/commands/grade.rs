//! The `classcrave grade` command.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use classcrave_core::report::AttemptReport;
use classcrave_core::scoring::AttemptScore;

use crate::config::load_config_from;

pub fn execute(
    assignment_path: PathBuf,
    seed: String,
    answers_path: PathBuf,
    student: Option<String>,
    prior_attempts: u32,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let (assignment, questions) = super::load_practice_set(&assignment_path, &seed, &config)?;

    let policy = assignment.config.attempt_policy;
    anyhow::ensure!(
        policy.allows_attempt(prior_attempts),
        "assignment '{}' has attempt policy '{policy}' and {prior_attempts} attempt(s) already completed",
        assignment.id
    );

    let responses = read_responses(&answers_path)?;
    let unknown = responses
        .keys()
        .filter(|id| !questions.iter().any(|q| &q.id == *id))
        .count();
    if unknown > 0 {
        tracing::warn!(count = unknown, "ignoring answers for unknown question ids");
    }

    let score = AttemptScore::compute_with_threshold(&questions, &responses, config.pass_threshold);
    let report = AttemptReport::new(&assignment, &seed, student, &questions, &score);

    print_summary(&report);

    let output = output.unwrap_or_else(|| config.output_dir.clone());
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S%3f");
    let path = output.join(format!("attempt-{}-{timestamp}.json", assignment.id));
    report.save_json(&path)?;
    eprintln!("Report saved to: {}", path.display());

    Ok(())
}

/// Read a JSON object of question id to answer.
///
/// Non-string values are kept in their JSON spelling so numbers and point
/// arrays can be submitted unquoted. `null` means the question was skipped.
fn read_responses(path: &Path) -> Result<BTreeMap<String, String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers: {}", path.display()))?;
    let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("answers must be a JSON object: {}", path.display()))?;

    Ok(raw
        .into_iter()
        .filter_map(|(id, value)| {
            let answer = match value {
                serde_json::Value::Null => return None,
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            Some((id, answer))
        })
        .collect())
}

fn print_summary(report: &AttemptReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Expected", "Submitted", "Result"]);

    for r in &report.results {
        table.add_row(vec![
            Cell::new(&r.question_id),
            Cell::new(&r.prompt),
            Cell::new(&r.expected),
            Cell::new(r.submitted.as_deref().unwrap_or("-")),
            Cell::new(if r.correct { "OK" } else { "MISS" }),
        ]);
    }

    println!("{}", report.assignment.title);
    println!("{table}");
    println!(
        "Score: {}/{} ({:.1}%) {}",
        report.score.correct,
        report.score.total,
        report.score.percent,
        if report.score.passed { "PASSED" } else { "NOT PASSED" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responses_accept_strings_numbers_and_points() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(
            &path,
            r#"{"1": "12", "2": 7, "3": null, "4": [{"x":0,"y":1},{"x":1,"y":3}]}"#,
        )
        .unwrap();

        let responses = read_responses(&path).unwrap();
        assert_eq!(responses["1"], "12");
        assert_eq!(responses["2"], "7");
        assert!(!responses.contains_key("3"));
        assert_eq!(responses["4"], r#"[{"x":0,"y":1},{"x":1,"y":3}]"#);
    }

    #[test]
    fn responses_must_be_an_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(read_responses(&path).is_err());
    }
}
