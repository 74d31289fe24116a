//! TOML assignment file parser.
//!
//! Loads assignments from TOML files and directories, and validates them.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{
    lenient_number, lenient_policy, lenient_template_id, lenient_text, AttemptPolicy,
    PracticeAssignmentConfig, MAX_DECIMAL_PLACES, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT,
};
use crate::template::TemplateId;

/// A named assignment: identity plus the configuration it generates from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub config: PracticeAssignmentConfig,
}

/// Intermediate TOML structure for parsing assignment files.
#[derive(Debug, Deserialize)]
struct TomlAssignmentFile {
    assignment: TomlAssignment,
}

#[derive(Debug, Deserialize)]
struct TomlAssignment {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(deserialize_with = "lenient_template_id")]
    template_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    subject: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    grade_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    question_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    number_range_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    number_range_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    table_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    table_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    multiplicand_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    multiplicand_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    denominator_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    denominator_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    decimal_places: Option<f64>,
    #[serde(default, deserialize_with = "lenient_policy")]
    attempt_policy: AttemptPolicy,
}

/// Parse a single TOML file into an `Assignment`.
pub fn parse_assignment(path: &Path) -> Result<Assignment> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read assignment file: {}", path.display()))?;

    parse_assignment_str(&content, path)
}

/// Parse a TOML string into an `Assignment` (useful for testing).
pub fn parse_assignment_str(content: &str, source_path: &Path) -> Result<Assignment> {
    let parsed: TomlAssignmentFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    let a = parsed.assignment;

    Ok(Assignment {
        id: a.id,
        title: a.title,
        description: a.description,
        config: PracticeAssignmentConfig {
            template_id: a.template_id,
            subject: a.subject,
            grade_level: a.grade_level,
            question_count: a.question_count,
            number_range_min: a.number_range_min,
            number_range_max: a.number_range_max,
            table_min: a.table_min,
            table_max: a.table_max,
            multiplicand_min: a.multiplicand_min,
            multiplicand_max: a.multiplicand_max,
            denominator_min: a.denominator_min,
            denominator_max: a.denominator_max,
            decimal_places: a.decimal_places,
            attempt_policy: a.attempt_policy,
        },
    })
}

/// Recursively load all `.toml` assignment files from a directory.
pub fn load_assignment_directory(dir: &Path) -> Result<Vec<Assignment>> {
    let mut assignments = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            assignments.extend(load_assignment_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_assignment(&path) {
                Ok(assignment) => assignments.push(assignment),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(assignments)
}

/// Load one file, or every assignment under a directory.
pub fn load_assignments(path: &Path) -> Result<Vec<Assignment>> {
    if path.is_dir() {
        load_assignment_directory(path)
    } else {
        Ok(vec![parse_assignment(path)?])
    }
}

/// A warning from assignment validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The assignment ID (if applicable).
    pub assignment_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate one assignment for values that will be normalized at generation time.
pub fn validate_assignment(assignment: &Assignment) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let config = &assignment.config;
    let mut warn = |message: String| {
        warnings.push(ValidationWarning {
            assignment_id: Some(assignment.id.clone()),
            message,
        })
    };

    if config.template_id.parse::<TemplateId>().is_err() {
        warn(format!(
            "unknown template '{}', no questions will be generated",
            config.template_id
        ));
    }

    match config.question_count {
        None => warn(format!(
            "question_count missing, defaulting to {}",
            config.effective_question_count()
        )),
        Some(n) if n < MIN_QUESTION_COUNT as f64 || n > MAX_QUESTION_COUNT as f64 => warn(format!(
            "question_count {n} outside {MIN_QUESTION_COUNT}..={MAX_QUESTION_COUNT}, clamped to {}",
            config.effective_question_count()
        )),
        _ => {}
    }

    let pairs = [
        ("number_range", config.number_range_min, config.number_range_max),
        ("table", config.table_min, config.table_max),
        ("multiplicand", config.multiplicand_min, config.multiplicand_max),
        ("denominator", config.denominator_min, config.denominator_max),
    ];
    for (name, min, max) in pairs {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                warn(format!(
                    "{name}_min ({min}) is greater than {name}_max ({max}), bounds will be swapped"
                ));
            }
        }
    }

    if let Some(places) = config.decimal_places {
        if !(0.0..=MAX_DECIMAL_PLACES as f64).contains(&places) {
            warn(format!(
                "decimal_places {places} outside 0..={MAX_DECIMAL_PLACES}, clamped"
            ));
        }
    }

    if assignment.title.trim().is_empty() {
        warn("title is empty".into());
    }

    warnings
}

/// Validate a batch of assignments, including duplicate ids across files.
pub fn validate_assignments(assignments: &[Assignment]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = std::collections::HashSet::new();
    for assignment in assignments {
        if !seen_ids.insert(&assignment.id) {
            warnings.push(ValidationWarning {
                assignment_id: Some(assignment.id.clone()),
                message: format!("duplicate assignment ID: {}", assignment.id),
            });
        }
    }

    for assignment in assignments {
        warnings.extend(validate_assignment(assignment));
    }

    warnings
}
