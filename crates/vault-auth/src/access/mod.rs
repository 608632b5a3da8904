//! File access evaluation.

pub mod evaluator;

pub use evaluator::{AccessDecision, AccessEvaluator, AccessSource};
