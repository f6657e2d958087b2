//! quizforge-core — Question generation, text normalization, and answer scoring.
//!
//! This crate holds the knowledge base model, the lexicon-backed text
//! normalizer, the in-memory question store, and the keyword-coverage
//! evaluator. Everything else in quizforge calls in through [`engine::QuizEngine`].

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod knowledge;
pub mod model;
pub mod normalizer;
pub mod store;

pub use config::QuizforgeConfig;
pub use engine::QuizEngine;
pub use error::QuizError;
pub use model::{EvaluationResult, KnowledgeBase, ProblemEntry, Question, StrategyEntry};
pub use normalizer::{LanguageModel, ModelSource, Normalizer};
