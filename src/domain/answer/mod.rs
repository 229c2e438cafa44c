//! Answer generation over retrieved passages

mod generator;

pub use generator::{AnswerGenerator, AnswerResult};

#[cfg(test)]
pub use generator::MockAnswerGenerator;
