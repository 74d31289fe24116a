//! Practice question data model.
//!
//! Questions are built once per generation pass and never mutated. They
//! serialize with camelCase keys so the web client can consume them as-is.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One generated practice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeQuestion {
    /// 1-based position within the generated set.
    pub id: String,
    /// Text shown to the student.
    pub prompt: String,
    /// Canonical correct answer.
    pub answer: Answer,
    /// Other string forms that also count as correct.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub accepted_answers: Vec<String>,
    /// How the answer is entered, which selects the grading rules.
    pub input_mode: InputMode,
    /// Line and window for graph-based questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphSpec>,
}

impl PracticeQuestion {
    /// The canonical answer followed by every accepted alternative.
    pub fn answer_forms(&self) -> Vec<String> {
        std::iter::once(self.answer.to_string())
            .chain(self.accepted_answers.iter().cloned())
            .collect()
    }
}

/// A canonical answer: numeric for arithmetic, text for equations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Number(f64),
    Text(String),
}

impl Answer {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Answer::Number(n) => Some(*n),
            Answer::Text(_) => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Number(n) => f.write_str(&format_number(*n)),
            Answer::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Answer {
    fn from(n: i64) -> Self {
        Answer::Number(n as f64)
    }
}

impl From<f64> for Answer {
    fn from(n: f64) -> Self {
        Answer::Number(n)
    }
}

impl From<String> for Answer {
    fn from(s: String) -> Self {
        Answer::Text(s)
    }
}

/// Answer entry style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    Numeric,
    Text,
    /// A slope-intercept equation such as `y = 2x + 3`.
    Equation,
    /// A JSON array of two `{x, y}` points on the line.
    GraphTwoPoints,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputMode::Numeric => write!(f, "numeric"),
            InputMode::Text => write!(f, "text"),
            InputMode::Equation => write!(f, "equation"),
            InputMode::GraphTwoPoints => write!(f, "graph-two-points"),
        }
    }
}

/// The relation `y = slope·x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSpec {
    pub slope: f64,
    pub intercept: f64,
}

impl LineSpec {
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for LineSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x_term = if self.slope == 1.0 {
            "x".to_string()
        } else if self.slope == -1.0 {
            "-x".to_string()
        } else {
            format!("{}x", format_number(self.slope))
        };
        if self.intercept > 0.0 {
            write!(f, "y = {x_term} + {}", format_number(self.intercept))
        } else if self.intercept < 0.0 {
            write!(f, "y = {x_term} - {}", format_number(-self.intercept))
        } else {
            write!(f, "y = {x_term}")
        }
    }
}

/// A line plus the coordinate window it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSpec {
    pub line: LineSpec,
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl GraphSpec {
    /// A square window `[-half, half]` on both axes.
    pub fn centered(line: LineSpec, half: f64) -> Self {
        Self {
            line,
            min_x: -half,
            max_x: half,
            min_y: -half,
            max_y: half,
        }
    }
}

/// A plotted point, as submitted for graph questions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Round `value` to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    let rounded = (value * factor).round() / factor;
    // Avoid printing "-0".
    rounded + 0.0
}

/// Shortest decimal rendering of `n` (`3`, `0.75`, `-2.5`).
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{n}")
}
