//! Boss Brain - Adaptive boss combat with LLM-advised attack weights

pub mod brain;
pub mod combat;
pub mod core;
pub mod llm;
pub mod tactics;
