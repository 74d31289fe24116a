//! Question families and their normalized parameters.
//!
//! `TemplateId` is the closed set of families a configuration may name.
//! `Template` pairs a family with the ranges it actually draws from, after
//! defaults, clamping, and min/max swapping have been applied.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::PracticeAssignmentConfig;
use crate::error::PracticeError;

/// Coordinate window used by graph questions, on both axes.
pub const GRAPH_WINDOW: i64 = 10;

/// Identifier of a question family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TemplateId {
    #[serde(rename = "math-addition-facts")]
    AdditionFacts,
    #[serde(rename = "math-subtraction-facts")]
    SubtractionFacts,
    #[serde(rename = "math-multiplication-facts")]
    MultiplicationFacts,
    #[serde(rename = "math-division-facts")]
    DivisionFacts,
    #[serde(rename = "math-multi-digit-addition")]
    MultiDigitAddition,
    #[serde(rename = "math-multi-digit-subtraction")]
    MultiDigitSubtraction,
    #[serde(rename = "math-multi-digit-multiplication")]
    MultiDigitMultiplication,
    #[serde(rename = "math-fraction-addition")]
    FractionAddition,
    #[serde(rename = "math-decimal-operations")]
    DecimalOperations,
    #[serde(rename = "math-equivalent-ratios")]
    EquivalentRatios,
    #[serde(rename = "math-linear-equations")]
    LinearEquations,
    #[serde(rename = "math-slope-intercept")]
    SlopeIntercept,
    #[serde(rename = "math-graph-linear")]
    GraphLinear,
}

impl TemplateId {
    /// Family used by callers when a configuration names an unknown template.
    pub const DEFAULT: TemplateId = TemplateId::AdditionFacts;

    /// Every known family, in catalogue order.
    pub const ALL: [TemplateId; 13] = [
        TemplateId::AdditionFacts,
        TemplateId::SubtractionFacts,
        TemplateId::MultiplicationFacts,
        TemplateId::DivisionFacts,
        TemplateId::MultiDigitAddition,
        TemplateId::MultiDigitSubtraction,
        TemplateId::MultiDigitMultiplication,
        TemplateId::FractionAddition,
        TemplateId::DecimalOperations,
        TemplateId::EquivalentRatios,
        TemplateId::LinearEquations,
        TemplateId::SlopeIntercept,
        TemplateId::GraphLinear,
    ];

    /// The wire identifier, e.g. `math-division-facts`.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::AdditionFacts => "math-addition-facts",
            TemplateId::SubtractionFacts => "math-subtraction-facts",
            TemplateId::MultiplicationFacts => "math-multiplication-facts",
            TemplateId::DivisionFacts => "math-division-facts",
            TemplateId::MultiDigitAddition => "math-multi-digit-addition",
            TemplateId::MultiDigitSubtraction => "math-multi-digit-subtraction",
            TemplateId::MultiDigitMultiplication => "math-multi-digit-multiplication",
            TemplateId::FractionAddition => "math-fraction-addition",
            TemplateId::DecimalOperations => "math-decimal-operations",
            TemplateId::EquivalentRatios => "math-equivalent-ratios",
            TemplateId::LinearEquations => "math-linear-equations",
            TemplateId::SlopeIntercept => "math-slope-intercept",
            TemplateId::GraphLinear => "math-graph-linear",
        }
    }

    /// Short description shown in template listings.
    pub fn title(self) -> &'static str {
        match self {
            TemplateId::AdditionFacts => "Addition facts",
            TemplateId::SubtractionFacts => "Subtraction facts",
            TemplateId::MultiplicationFacts => "Multiplication facts",
            TemplateId::DivisionFacts => "Division facts",
            TemplateId::MultiDigitAddition => "Multi-digit addition",
            TemplateId::MultiDigitSubtraction => "Multi-digit subtraction",
            TemplateId::MultiDigitMultiplication => "Multi-digit multiplication",
            TemplateId::FractionAddition => "Adding fractions with a common denominator",
            TemplateId::DecimalOperations => "Decimal operations",
            TemplateId::EquivalentRatios => "Equivalent ratios",
            TemplateId::LinearEquations => "Solving linear equations",
            TemplateId::SlopeIntercept => "Writing slope-intercept equations",
            TemplateId::GraphLinear => "Graphing linear equations",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = PracticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PracticeError::UnknownTemplate(wanted.to_string()))
    }
}

/// An inclusive integer range with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

impl IntRange {
    /// Build a range, swapping the bounds if they are inverted.
    pub fn new(a: i64, b: i64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Resolve configured bounds against a default and a sane outer limit.
    ///
    /// Missing or non-finite values take the default bound. Present values
    /// are truncated and clamped into `limits` (an out-of-range value becomes
    /// the nearest limit, not the default), and the result is swapped if
    /// inverted.
    pub fn resolve(min: Option<f64>, max: Option<f64>, default: IntRange, limits: IntRange) -> Self {
        let pick = |value: Option<f64>, fallback: i64| -> i64 {
            match value {
                Some(v) if v.is_finite() => {
                    (v.trunc().clamp(limits.min as f64, limits.max as f64)) as i64
                }
                _ => fallback,
            }
        };
        IntRange::new(pick(min, default.min), pick(max, default.max))
    }

    /// Raise the lower bound (and the upper, if needed) to at least `floor`.
    pub fn at_least(self, floor: i64) -> Self {
        IntRange::new(self.min.max(floor), self.max.max(floor))
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

const NUMBER_LIMITS: IntRange = IntRange {
    min: -1_000_000,
    max: 1_000_000,
};
const TABLE_LIMITS: IntRange = IntRange { min: 0, max: 100 };
const DENOMINATOR_LIMITS: IntRange = IntRange { min: 2, max: 100 };
const GRAPH_LIMITS: IntRange = IntRange {
    min: -GRAPH_WINDOW,
    max: GRAPH_WINDOW,
};

/// A question family together with the normalized ranges it draws from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Template {
    /// `a + b` with both operands from `operands`.
    AdditionFacts { operands: IntRange },
    /// `a − b` with operands swapped so the difference is non-negative.
    SubtractionFacts { operands: IntRange },
    MultiplicationFacts {
        table: IntRange,
        multiplicand: IntRange,
    },
    /// `(divisor × quotient) ÷ divisor`, so there is never a remainder.
    DivisionFacts {
        divisor: IntRange,
        quotient: IntRange,
    },
    MultiDigitAddition { operands: IntRange },
    MultiDigitSubtraction { operands: IntRange },
    MultiDigitMultiplication {
        operands: IntRange,
        multiplier: IntRange,
    },
    FractionAddition {
        denominator: IntRange,
        decimal_places: u32,
    },
    /// Operands are drawn in whole units from `operands` and expressed in tenths.
    DecimalOperations {
        operands: IntRange,
        decimal_places: u32,
    },
    EquivalentRatios {
        terms: IntRange,
        multiplier: IntRange,
    },
    /// Solve `a·x + b = c` for an integer `x`.
    LinearEquations {
        solution: IntRange,
        coefficient: IntRange,
    },
    SlopeIntercept { slope: IntRange, intercept: IntRange },
    GraphLinear { slope: IntRange, intercept: IntRange },
}

impl Template {
    /// Normalize `config` for its template, or `None` if the id is unknown.
    pub fn from_config(config: &PracticeAssignmentConfig) -> Option<Self> {
        let id = config.template_id.parse::<TemplateId>().ok()?;
        Some(Self::for_id(id, config))
    }

    /// Normalize `config` for a known family, ignoring its `template_id`.
    pub fn for_id(id: TemplateId, config: &PracticeAssignmentConfig) -> Self {
        let numbers = |default: IntRange| {
            IntRange::resolve(
                config.number_range_min,
                config.number_range_max,
                default,
                NUMBER_LIMITS,
            )
        };
        let table = |default: IntRange| {
            IntRange::resolve(config.table_min, config.table_max, default, TABLE_LIMITS)
        };
        let multiplicand = |default: IntRange, limits: IntRange| {
            IntRange::resolve(
                config.multiplicand_min,
                config.multiplicand_max,
                default,
                limits,
            )
        };
        let graph_intercept = IntRange::resolve(
            config.number_range_min,
            config.number_range_max,
            IntRange::new(-5, 5),
            GRAPH_LIMITS,
        );
        let graph_slope = multiplicand(IntRange::new(-4, 4), GRAPH_LIMITS);

        match id {
            TemplateId::AdditionFacts => Template::AdditionFacts {
                operands: numbers(IntRange::new(0, 10)),
            },
            TemplateId::SubtractionFacts => Template::SubtractionFacts {
                operands: numbers(IntRange::new(0, 20)),
            },
            TemplateId::MultiplicationFacts => Template::MultiplicationFacts {
                table: table(IntRange::new(1, 12)),
                multiplicand: multiplicand(IntRange::new(1, 12), TABLE_LIMITS),
            },
            TemplateId::DivisionFacts => Template::DivisionFacts {
                divisor: table(IntRange::new(1, 12)).at_least(1),
                quotient: multiplicand(IntRange::new(1, 12), TABLE_LIMITS),
            },
            TemplateId::MultiDigitAddition => Template::MultiDigitAddition {
                operands: numbers(IntRange::new(100, 999)),
            },
            TemplateId::MultiDigitSubtraction => Template::MultiDigitSubtraction {
                operands: numbers(IntRange::new(100, 999)),
            },
            TemplateId::MultiDigitMultiplication => Template::MultiDigitMultiplication {
                operands: numbers(IntRange::new(10, 99)),
                multiplier: multiplicand(IntRange::new(2, 9), TABLE_LIMITS),
            },
            TemplateId::FractionAddition => Template::FractionAddition {
                denominator: IntRange::resolve(
                    config.denominator_min,
                    config.denominator_max,
                    IntRange::new(2, 12),
                    DENOMINATOR_LIMITS,
                ),
                decimal_places: config.effective_decimal_places(2),
            },
            TemplateId::DecimalOperations => Template::DecimalOperations {
                operands: numbers(IntRange::new(1, 20)).at_least(0),
                decimal_places: config.effective_decimal_places(2),
            },
            TemplateId::EquivalentRatios => Template::EquivalentRatios {
                terms: numbers(IntRange::new(1, 10)).at_least(1),
                multiplier: multiplicand(IntRange::new(2, 10), TABLE_LIMITS).at_least(1),
            },
            TemplateId::LinearEquations => Template::LinearEquations {
                solution: numbers(IntRange::new(-10, 10)),
                coefficient: multiplicand(IntRange::new(2, 9), TABLE_LIMITS).at_least(1),
            },
            TemplateId::SlopeIntercept => Template::SlopeIntercept {
                slope: graph_slope,
                intercept: graph_intercept,
            },
            TemplateId::GraphLinear => Template::GraphLinear {
                slope: graph_slope,
                intercept: graph_intercept,
            },
        }
    }

    pub fn id(&self) -> TemplateId {
        match self {
            Template::AdditionFacts { .. } => TemplateId::AdditionFacts,
            Template::SubtractionFacts { .. } => TemplateId::SubtractionFacts,
            Template::MultiplicationFacts { .. } => TemplateId::MultiplicationFacts,
            Template::DivisionFacts { .. } => TemplateId::DivisionFacts,
            Template::MultiDigitAddition { .. } => TemplateId::MultiDigitAddition,
            Template::MultiDigitSubtraction { .. } => TemplateId::MultiDigitSubtraction,
            Template::MultiDigitMultiplication { .. } => TemplateId::MultiDigitMultiplication,
            Template::FractionAddition { .. } => TemplateId::FractionAddition,
            Template::DecimalOperations { .. } => TemplateId::DecimalOperations,
            Template::EquivalentRatios { .. } => TemplateId::EquivalentRatios,
            Template::LinearEquations { .. } => TemplateId::LinearEquations,
            Template::SlopeIntercept { .. } => TemplateId::SlopeIntercept,
            Template::GraphLinear { .. } => TemplateId::GraphLinear,
        }
    }
}
