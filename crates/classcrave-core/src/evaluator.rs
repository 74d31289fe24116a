//! Answer grading.
//!
//! Submissions are untrusted client input. Every function here is total:
//! malformed or partial input is graded `false`, never an error.

use crate::model::{InputMode, LineSpec, Point, PracticeQuestion};

/// Largest deviation still accepted for numeric answers.
pub const NUMERIC_TOLERANCE: f64 = 0.001;
/// Largest distance from the line still accepted for plotted points.
pub const GRAPH_TOLERANCE: f64 = 0.0001;

/// Decide whether `submitted` answers `question` correctly.
pub fn is_answer_correct(question: &PracticeQuestion, submitted: &str) -> bool {
    match question.input_mode {
        InputMode::Numeric | InputMode::Text => matches_accepted(question, submitted),
        InputMode::Equation => question
            .graph
            .is_some_and(|graph| equation_matches(submitted, &graph.line)),
        InputMode::GraphTwoPoints => question
            .graph
            .is_some_and(|graph| points_match(&parse_points(submitted), &graph.line)),
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Parse a finite number, rejecting `inf`/`NaN` spellings.
fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn matches_accepted(question: &PracticeQuestion, submitted: &str) -> bool {
    let submitted = normalize(submitted);
    if submitted.is_empty() {
        return false;
    }

    let forms: Vec<String> = question
        .answer_forms()
        .iter()
        .map(|form| normalize(form))
        .collect();
    if forms.iter().any(|form| *form == submitted) {
        return true;
    }

    let Some(value) = parse_number(&submitted) else {
        return false;
    };
    forms
        .iter()
        .filter_map(|form| parse_number(form))
        .any(|expected| (value - expected).abs() < NUMERIC_TOLERANCE)
}

/// Parse `y = mx + b` into `(m, b)`.
///
/// Whitespace and case are ignored. A bare `x` has slope 1, `-x` slope -1,
/// and a missing constant is 0. Anything else returns `None`.
pub fn parse_slope_intercept(raw: &str) -> Option<LineSpec> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    let rhs = compact.strip_prefix("y=")?;

    let (coefficient, constant) = rhs.split_once('x')?;
    if constant.contains('x') {
        return None;
    }

    let slope = match coefficient {
        "" | "+" => 1.0,
        "-" => -1.0,
        c => parse_number(c)?,
    };
    let intercept = match constant {
        "" => 0.0,
        c if c.starts_with('+') || c.starts_with('-') => parse_number(c)?,
        _ => return None,
    };

    Some(LineSpec { slope, intercept })
}

fn equation_matches(submitted: &str, line: &LineSpec) -> bool {
    parse_slope_intercept(submitted)
        .is_some_and(|parsed| parsed.slope == line.slope && parsed.intercept == line.intercept)
}

/// Decode a JSON array of `{x, y}` points; malformed input yields no points.
pub fn parse_points(raw: &str) -> Vec<Point> {
    serde_json::from_str::<Vec<Point>>(raw).unwrap_or_default()
}

fn points_match(points: &[Point], line: &LineSpec) -> bool {
    let [a, b] = points else {
        return false;
    };
    // Two points on a non-vertical line never share an x coordinate.
    if a.x == b.x {
        return false;
    }
    [a, b]
        .iter()
        .all(|p| p.x.is_finite() && (p.y - line.y_at(p.x)).abs() <= GRAPH_TOLERANCE)
}
