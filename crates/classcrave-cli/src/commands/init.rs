//! The `classcrave init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("classcrave.toml").exists() {
        println!("classcrave.toml already exists, skipping.");
    } else {
        std::fs::write("classcrave.toml", SAMPLE_CONFIG)?;
        println!("Created classcrave.toml");
    }

    std::fs::create_dir_all("assignments")?;
    let example_path = Path::new("assignments/example.toml");
    if example_path.exists() {
        println!("assignments/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ASSIGNMENT)?;
        println!("Created assignments/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: classcrave validate --assignment assignments/example.toml");
    println!("  2. Run: classcrave generate --assignment assignments/example.toml --seed demo");
    println!("  3. Run: classcrave grade --assignment assignments/example.toml --seed demo --answers answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# classcrave configuration

# Template used when an assignment names one that does not exist.
default_template = "math-addition-facts"

# Minimum percentage for an attempt to pass.
pass_threshold = 70.0

# Where `classcrave grade` writes attempt reports.
output_dir = "./classcrave-results"
"#;

const EXAMPLE_ASSIGNMENT: &str = r#"[assignment]
id = "example"
title = "Multiplication Facts"
description = "Times tables from 1 to 12"
template_id = "math-multiplication-facts"
subject = "math"
grade_level = 3
question_count = 12
table_min = 1
table_max = 12
multiplicand_min = 1
multiplicand_max = 12
attempt_policy = "unlimited"
"#;
