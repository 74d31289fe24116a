//! The `classcrave generate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use classcrave_core::seed::fresh_seed;

use crate::config::load_config_from;

pub fn execute(
    assignment_path: PathBuf,
    seed: Option<String>,
    format: String,
    show_answers: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let seed = seed.unwrap_or_else(|| {
        let seed = fresh_seed();
        eprintln!("Using fresh seed: {seed}");
        seed
    });

    let (assignment, questions) = super::load_practice_set(&assignment_path, &seed, &config)?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }
        "text" => {
            println!(
                "{} ({} questions, seed {seed})",
                assignment.title,
                questions.len()
            );

            let mut table = Table::new();
            if show_answers {
                table.set_header(vec!["#", "Question", "Answer"]);
            } else {
                table.set_header(vec!["#", "Question"]);
            }
            for q in &questions {
                let mut row = vec![Cell::new(&q.id), Cell::new(&q.prompt)];
                if show_answers {
                    row.push(Cell::new(q.answer.to_string()));
                }
                table.add_row(row);
            }
            println!("{table}");
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
