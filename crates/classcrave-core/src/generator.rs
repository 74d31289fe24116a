//! Deterministic practice-set generation.
//!
//! Each question is derived only from `(seed, template, index, salt)`, so a
//! set can be rebuilt at grading time instead of being stored.

use crate::config::PracticeAssignmentConfig;
use crate::model::{round_to, Answer, GraphSpec, InputMode, LineSpec, PracticeQuestion};
use crate::seed::QuestionDraws;
use crate::template::{IntRange, Template, TemplateId, GRAPH_WINDOW};

/// Generate the practice set described by `config` for `seed`.
///
/// Returns exactly `config.effective_question_count()` questions, or an empty
/// vector when the template id is unknown.
pub fn create_practice_questions(
    config: &PracticeAssignmentConfig,
    seed: &str,
) -> Vec<PracticeQuestion> {
    let Some(template) = Template::from_config(config) else {
        tracing::warn!(
            "unknown practice template '{}', no questions generated",
            config.template_id
        );
        return Vec::new();
    };
    generate(&template, seed, config.effective_question_count())
}

/// Generate with `fallback` in place of an unknown template id.
pub fn create_practice_questions_or(
    config: &PracticeAssignmentConfig,
    seed: &str,
    fallback: TemplateId,
) -> Vec<PracticeQuestion> {
    let template = Template::from_config(config).unwrap_or_else(|| {
        tracing::warn!(
            "unknown practice template '{}', falling back to {}",
            config.template_id,
            fallback
        );
        Template::for_id(fallback, config)
    });
    generate(&template, seed, config.effective_question_count())
}

/// Generate `count` questions from an already-normalized template.
pub fn generate(template: &Template, seed: &str, count: usize) -> Vec<PracticeQuestion> {
    let id = template.id();
    let questions: Vec<PracticeQuestion> = (0..count)
        .map(|index| build_question(template, QuestionDraws::new(seed, id.as_str(), index)))
        .collect();
    tracing::debug!(template = %id, count = questions.len(), "generated practice set");
    questions
}

/// Raw parts of a question before it is numbered.
struct Draft {
    prompt: String,
    answer: Answer,
    accepted_answers: Vec<String>,
    input_mode: InputMode,
    graph: Option<GraphSpec>,
}

impl Draft {
    fn numeric(prompt: String, answer: impl Into<Answer>) -> Self {
        Self {
            prompt,
            answer: answer.into(),
            accepted_answers: Vec::new(),
            input_mode: InputMode::Numeric,
            graph: None,
        }
    }

    fn accepting(mut self, forms: Vec<String>) -> Self {
        self.accepted_answers = forms;
        self
    }
}

fn build_question(template: &Template, draws: QuestionDraws<'_>) -> PracticeQuestion {
    let draft = match *template {
        Template::AdditionFacts { operands } | Template::MultiDigitAddition { operands } => {
            addition(draws, operands)
        }
        Template::SubtractionFacts { operands } | Template::MultiDigitSubtraction { operands } => {
            subtraction(draws, operands)
        }
        Template::MultiplicationFacts {
            table,
            multiplicand,
        } => multiplication(draws, table, multiplicand),
        Template::MultiDigitMultiplication {
            operands,
            multiplier,
        } => multiplication(draws, operands, multiplier),
        Template::DivisionFacts { divisor, quotient } => division(draws, divisor, quotient),
        Template::FractionAddition {
            denominator,
            decimal_places,
        } => fraction_addition(draws, denominator, decimal_places),
        Template::DecimalOperations {
            operands,
            decimal_places,
        } => decimal_operation(draws, operands, decimal_places),
        Template::EquivalentRatios { terms, multiplier } => equivalent_ratio(draws, terms, multiplier),
        Template::LinearEquations {
            solution,
            coefficient,
        } => linear_equation(draws, solution, coefficient),
        Template::SlopeIntercept { slope, intercept } => slope_intercept(draws, slope, intercept),
        Template::GraphLinear { slope, intercept } => graph_linear(draws, slope, intercept),
    };

    PracticeQuestion {
        id: (draws.index() + 1).to_string(),
        prompt: draft.prompt,
        answer: draft.answer,
        accepted_answers: draft.accepted_answers,
        input_mode: draft.input_mode,
        graph: draft.graph,
    }
}

fn addition(draws: QuestionDraws<'_>, operands: IntRange) -> Draft {
    let a = draws.int("left", operands.min, operands.max);
    let b = draws.int("right", operands.min, operands.max);
    Draft::numeric(format!("{a} + {b} = ?"), a + b)
}

fn subtraction(draws: QuestionDraws<'_>, operands: IntRange) -> Draft {
    let a = draws.int("left", operands.min, operands.max);
    let b = draws.int("right", operands.min, operands.max);
    let (a, b) = if a < b { (b, a) } else { (a, b) };
    Draft::numeric(format!("{a} - {b} = ?"), a - b)
}

fn multiplication(draws: QuestionDraws<'_>, left: IntRange, right: IntRange) -> Draft {
    let a = draws.int("left", left.min, left.max);
    let b = draws.int("right", right.min, right.max);
    Draft::numeric(format!("{a} × {b} = ?"), a * b)
}

fn division(draws: QuestionDraws<'_>, divisor: IntRange, quotient: IntRange) -> Draft {
    let d = draws.int("divisor", divisor.min, divisor.max).max(1);
    let q = draws.int("quotient", quotient.min, quotient.max);
    Draft::numeric(format!("{} ÷ {d} = ?", d * q), q)
}

fn rounding_hint(places: u32) -> String {
    match places {
        0 => "Round to the nearest whole number.".to_string(),
        1 => "Round to 1 decimal place.".to_string(),
        n => format!("Round to {n} decimal places."),
    }
}

fn fraction_addition(draws: QuestionDraws<'_>, denominator: IntRange, places: u32) -> Draft {
    let d = draws.int("denominator", denominator.min, denominator.max).max(2);
    // A collapsed range (e.g. d = 2) always yields its single value.
    let a = draws.int("numerator-a", 1, d - 1);
    let b = draws.int("numerator-b", 1, d - a);
    let sum = a + b;

    let mut forms = vec![format!("{sum}/{d}")];
    let divisor = gcd(sum, d);
    if divisor > 1 && d / divisor > 1 {
        forms.push(format!("{}/{}", sum / divisor, d / divisor));
    }
    if sum == d {
        forms.push("1".to_string());
    }

    Draft::numeric(
        format!(
            "{a}/{d} + {b}/{d} = ? Write your answer as a decimal. {}",
            rounding_hint(places)
        ),
        round_to(sum as f64 / d as f64, places),
    )
    .accepting(forms)
}

fn decimal_operation(draws: QuestionDraws<'_>, operands: IntRange, places: u32) -> Draft {
    let x = draws.int("left", operands.min * 10, operands.max * 10);
    let y = draws.int("right", operands.min * 10, operands.max * 10);
    let tenths = |n: i64| format!("{:.1}", n as f64 / 10.0);

    let (prompt, exact) = match draws.choice("operation", 3) {
        0 => (format!("{} + {} = ?", tenths(x), tenths(y)), (x + y) as f64 / 10.0),
        1 => {
            let (x, y) = if x < y { (y, x) } else { (x, y) };
            (format!("{} - {} = ?", tenths(x), tenths(y)), (x - y) as f64 / 10.0)
        }
        _ => {
            let y = y.max(1);
            (format!("{} ÷ {} = ?", tenths(x), tenths(y)), x as f64 / y as f64)
        }
    };

    Draft::numeric(
        format!("{prompt} {}", rounding_hint(places)),
        round_to(exact, places),
    )
}

fn equivalent_ratio(draws: QuestionDraws<'_>, terms: IntRange, multiplier: IntRange) -> Draft {
    let a = draws.int("antecedent", terms.min, terms.max);
    let b = draws.int("consequent", terms.min, terms.max);
    let m = draws.int("multiplier", multiplier.min, multiplier.max);
    let (prompt, answer) = if draws.choice("missing", 2) == 0 {
        (format!("Find the missing term: {a}:{b} = ?:{}", b * m), a * m)
    } else {
        (format!("Find the missing term: {a}:{b} = {}:?", a * m), b * m)
    };
    Draft::numeric(prompt, answer)
}

fn linear_equation(draws: QuestionDraws<'_>, solution: IntRange, coefficient: IntRange) -> Draft {
    let x = draws.int("solution", solution.min, solution.max);
    let a = draws.int("coefficient", coefficient.min, coefficient.max).max(1);
    let b = draws.int("constant", solution.min, solution.max);
    let c = a * x + b;

    let left = LineSpec {
        slope: a as f64,
        intercept: b as f64,
    }
    .to_string();
    // "y = 3x + 5" -> "3x + 5"
    let left = left.trim_start_matches("y = ");

    Draft::numeric(format!("Solve for x: {left} = {c}"), x)
        .accepting(vec![format!("x={x}"), format!("x = {x}")])
}

fn draw_line(draws: QuestionDraws<'_>, slope: IntRange, intercept: IntRange) -> LineSpec {
    let m = match draws.int("slope", slope.min, slope.max) {
        // A horizontal line has no x term to write or grade.
        0 => 1,
        m => m,
    };
    let b = draws.int("intercept", intercept.min, intercept.max);
    LineSpec {
        slope: m as f64,
        intercept: b as f64,
    }
}

fn compact(equation: &str) -> String {
    equation.chars().filter(|c| !c.is_whitespace()).collect()
}

fn slope_intercept(draws: QuestionDraws<'_>, slope: IntRange, intercept: IntRange) -> Draft {
    let line = draw_line(draws, slope, intercept);
    let x1 = draws.int("x1", -3, 0);
    let x2 = x1 + draws.int("gap", 1, 3);
    let point = |x: i64| format!("({x}, {})", line.y_at(x as f64));
    let equation = line.to_string();

    Draft {
        prompt: format!(
            "Write the equation of the line through {} and {} in slope-intercept form (y = mx + b).",
            point(x1),
            point(x2)
        ),
        answer: Answer::Text(equation.clone()),
        accepted_answers: vec![compact(&equation)],
        input_mode: InputMode::Equation,
        graph: Some(GraphSpec::centered(line, GRAPH_WINDOW as f64)),
    }
}

fn graph_linear(draws: QuestionDraws<'_>, slope: IntRange, intercept: IntRange) -> Draft {
    let line = draw_line(draws, slope, intercept);
    Draft {
        prompt: format!("Plot two points on the line {line}."),
        answer: Answer::Text(line.to_string()),
        accepted_answers: Vec::new(),
        input_mode: InputMode::GraphTwoPoints,
        graph: Some(GraphSpec::centered(line, GRAPH_WINDOW as f64)),
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(template: &str, count: f64) -> PracticeAssignmentConfig {
        PracticeAssignmentConfig {
            question_count: Some(count),
            ..PracticeAssignmentConfig::for_template(template)
        }
    }

    /// Split "a op b = ?" prompts into their operands.
    fn operands(prompt: &str) -> (String, String, String) {
        let tokens: Vec<&str> = prompt.split_whitespace().collect();
        (tokens[0].into(), tokens[1].into(), tokens[2].into())
    }

    #[test]
    fn count_matches_clamped_question_count_for_every_template() {
        for id in TemplateId::ALL {
            for (requested, expected) in [(1.0, 5), (12.0, 12), (99.0, 60)] {
                let questions = create_practice_questions(&config(id.as_str(), requested), "s");
                assert_eq!(questions.len(), expected, "{id} with {requested}");
            }
        }
    }

    #[test]
    fn ids_are_ordinal_positions() {
        let questions = create_practice_questions(&config("math-addition-facts", 8.0), "ids");
        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);
    }

    #[test]
    fn same_seed_same_sequence() {
        for id in TemplateId::ALL {
            let c = config(id.as_str(), 20.0);
            assert_eq!(
                create_practice_questions(&c, "repeat-me"),
                create_practice_questions(&c, "repeat-me")
            );
        }
    }

    #[test]
    fn different_seeds_differ() {
        let c = config("math-multi-digit-addition", 20.0);
        assert_ne!(
            create_practice_questions(&c, "seed-a"),
            create_practice_questions(&c, "seed-b")
        );
    }

    #[test]
    fn non_string_template_id_yields_nothing() {
        let config: PracticeAssignmentConfig =
            serde_json::from_str(r#"{"templateId": null, "questionCount": 5}"#).unwrap();
        assert!(create_practice_questions(&config, "seed").is_empty());
        let questions =
            create_practice_questions_or(&config, "seed", TemplateId::MultiplicationFacts);
        assert_eq!(questions.len(), 5);
    }

    #[test]
    fn unknown_template_yields_nothing() {
        assert!(create_practice_questions(&config("math-topology", 10.0), "s").is_empty());
    }

    #[test]
    fn fallback_template_is_used_for_unknown_ids() {
        let questions =
            create_practice_questions_or(&config("math-topology", 6.0), "s", TemplateId::DEFAULT);
        assert_eq!(questions.len(), 6);
        assert!(questions.iter().all(|q| q.prompt.contains(" + ")));
    }

    #[test]
    fn subtraction_is_never_negative() {
        for seed in ["a", "b", "c", "d"] {
            for q in create_practice_questions(&config("math-subtraction-facts", 60.0), seed) {
                let (a, _, b) = operands(&q.prompt);
                let (a, b): (i64, i64) = (a.parse().unwrap(), b.parse().unwrap());
                assert!(a >= b);
                assert_eq!(q.answer, Answer::from(a - b));
                assert!(q.answer.as_f64().unwrap() >= 0.0);
            }
        }
    }

    #[test]
    fn multiplication_answers_are_products() {
        let mut c = config("math-multi-digit-multiplication", 30.0);
        c.number_range_min = Some(10.0);
        c.number_range_max = Some(99.0);
        for q in create_practice_questions(&c, "mult") {
            let (a, op, b) = operands(&q.prompt);
            assert_eq!(op, "×");
            let (a, b): (i64, i64) = (a.parse().unwrap(), b.parse().unwrap());
            assert!((10..=99).contains(&a));
            assert!((2..=9).contains(&b));
            assert_eq!(q.answer, Answer::from(a * b));
        }
    }

    #[test]
    fn fractions_never_exceed_one() {
        for q in create_practice_questions(&config("math-fraction-addition", 60.0), "frac") {
            let answer = q.answer.as_f64().unwrap();
            assert!(answer > 0.0 && answer <= 1.0, "{}", q.prompt);
            assert!(!q.accepted_answers.is_empty());
        }
    }

    #[test]
    fn collapsed_fraction_range_returns_single_value() {
        let mut c = config("math-fraction-addition", 5.0);
        c.denominator_min = Some(2.0);
        c.denominator_max = Some(2.0);
        for q in create_practice_questions(&c, "half") {
            assert!(q.prompt.starts_with("1/2 + 1/2 = ?"));
            assert_eq!(q.answer, Answer::Number(1.0));
            assert!(q.accepted_answers.contains(&"2/2".to_string()));
            assert!(q.accepted_answers.contains(&"1".to_string()));
        }
    }

    #[test]
    fn decimal_answers_respect_places() {
        let mut c = config("math-decimal-operations", 60.0);
        c.decimal_places = Some(1.0);
        for q in create_practice_questions(&c, "dec") {
            let answer = q.answer.as_f64().unwrap();
            assert_eq!(round_to(answer, 1), answer);
            assert!(answer >= 0.0);
            assert!(q.prompt.contains("Round to 1 decimal place."));
        }
    }

    #[test]
    fn ratio_answers_complete_the_proportion() {
        for q in create_practice_questions(&config("math-equivalent-ratios", 40.0), "ratio") {
            let body = q.prompt.trim_start_matches("Find the missing term: ");
            let (left, right) = body.split_once(" = ").unwrap();
            let (a, b) = left.split_once(':').unwrap();
            let (c, d) = right.split_once(':').unwrap();
            let (a, b): (f64, f64) = (a.parse().unwrap(), b.parse().unwrap());
            let answer = q.answer.as_f64().unwrap();
            let (c, d) = match (c, d) {
                ("?", d) => (answer, d.parse::<f64>().unwrap()),
                (c, _) => (c.parse::<f64>().unwrap(), answer),
            };
            assert_eq!(a * d, b * c, "{}", q.prompt);
        }
    }

    #[test]
    fn linear_equations_have_integer_solutions() {
        for q in create_practice_questions(&config("math-linear-equations", 30.0), "lin") {
            let x = q.answer.as_f64().unwrap();
            assert_eq!(x.fract(), 0.0);
            assert!(q.accepted_answers.contains(&format!("x={x}")));
        }
    }

    #[test]
    fn graph_questions_carry_nonzero_slope() {
        for id in ["math-slope-intercept", "math-graph-linear"] {
            for q in create_practice_questions(&config(id, 40.0), "graph") {
                let graph = q.graph.expect("graph questions carry a line");
                assert_ne!(graph.line.slope, 0.0);
                assert_eq!(q.answer, Answer::Text(graph.line.to_string()));
            }
        }
    }

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(4, 8), 4);
        assert_eq!(gcd(7, 12), 1);
        assert_eq!(gcd(0, 5), 5);
    }
}
