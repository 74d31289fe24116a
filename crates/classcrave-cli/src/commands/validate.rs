//! The `classcrave validate` command.

use std::path::PathBuf;

use anyhow::Result;

use classcrave_core::generator::create_practice_questions;
use classcrave_core::parser;

pub fn execute(assignment_path: PathBuf) -> Result<()> {
    let assignments = parser::load_assignments(&assignment_path)?;
    let warnings = parser::validate_assignments(&assignments);

    for assignment in &assignments {
        let count = create_practice_questions(&assignment.config, "validate").len();
        println!(
            "Assignment: {} [{}] ({} questions)",
            assignment.title, assignment.config.template_id, count
        );

        for w in warnings
            .iter()
            .filter(|w| w.assignment_id.as_deref() == Some(assignment.id.as_str()))
        {
            println!("  [{}] WARNING: {}", assignment.id, w.message);
        }
    }

    if warnings.is_empty() {
        println!("All assignments valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
