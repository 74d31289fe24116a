//! The `classcrave compare` command.

use std::path::PathBuf;

use anyhow::Result;

use classcrave_core::report::AttemptReport;

pub fn execute(previous_path: PathBuf, current_path: PathBuf, format: String) -> Result<()> {
    let previous = AttemptReport::load_json(&previous_path)?;
    let current = AttemptReport::load_json(&current_path)?;

    let comparison = current.compare(&previous);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", comparison.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&comparison)?);
        }
        _ => {
            println!(
                "Score: {:.1}% -> {:.1}% ({:+.1}%)",
                comparison.previous_percent, comparison.current_percent, comparison.delta
            );

            if !comparison.same_questions {
                println!("Attempts used different question sets.");
                return Ok(());
            }
            if !comparison.newly_correct.is_empty() {
                println!("Now correct: {}", comparison.newly_correct.join(", "));
            }
            if !comparison.newly_incorrect.is_empty() {
                println!("Now incorrect: {}", comparison.newly_incorrect.join(", "));
            }
        }
    }

    Ok(())
}
