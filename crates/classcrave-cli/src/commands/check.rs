//! The `classcrave check` command.

use std::path::PathBuf;

use anyhow::Result;

use classcrave_core::is_answer_correct;

use crate::config::load_config_from;

/// Exit code for an answer that was graded incorrect.
const EXIT_INCORRECT: i32 = 2;

pub fn execute(
    assignment_path: PathBuf,
    seed: String,
    question_id: String,
    answer: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let (assignment, questions) = super::load_practice_set(&assignment_path, &seed, &config)?;

    let Some(question) = questions.iter().find(|q| q.id == question_id.trim()) else {
        anyhow::bail!(
            "question '{}' not found in {} ({} questions)",
            question_id,
            assignment.id,
            questions.len()
        );
    };

    println!("{}", question.prompt);
    if is_answer_correct(question, &answer) {
        println!("correct");
    } else {
        println!("incorrect");
        std::process::exit(EXIT_INCORRECT);
    }

    Ok(())
}
