//! classcrave-core: deterministic practice-question generation and grading.
//!
//! This crate turns an assignment configuration plus a seed string into a
//! reproducible sequence of practice questions, and decides whether a
//! submitted answer satisfies a question. Everything here is pure and
//! synchronous; persistence belongs to the caller.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;
pub mod seed;
pub mod template;

pub use evaluator::is_answer_correct;
pub use generator::create_practice_questions;
