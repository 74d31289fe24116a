pub mod check;
pub mod compare;
pub mod generate;
pub mod grade;
pub mod init;
pub mod templates;
pub mod validate;

use std::path::Path;

use anyhow::Result;

use classcrave_core::generator::create_practice_questions_or;
use classcrave_core::model::PracticeQuestion;
use classcrave_core::parser::{self, Assignment};

use crate::config::ClassCraveConfig;

/// Load an assignment and rebuild its practice set for `seed`.
pub(crate) fn load_practice_set(
    assignment_path: &Path,
    seed: &str,
    config: &ClassCraveConfig,
) -> Result<(Assignment, Vec<PracticeQuestion>)> {
    let assignment = parser::parse_assignment(assignment_path)?;
    let fallback = config.fallback_template()?;
    let questions = create_practice_questions_or(&assignment.config, seed, fallback);
    Ok((assignment, questions))
}
