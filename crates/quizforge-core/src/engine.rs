//! Quiz engine facade.
//!
//! Owns the knowledge base (through the generator), the normalizer (through
//! the evaluator), and the question store. This is the surface the HTTP layer
//! and the CLI call into.

use crate::config::QuizforgeConfig;
use crate::error::QuizError;
use crate::evaluator::AnswerEvaluator;
use crate::generator::QuestionGenerator;
use crate::knowledge::load_knowledge_base;
use crate::model::{EvaluationResult, KnowledgeBase, ProblemEntry, Question};
use crate::normalizer::Normalizer;
use crate::store::QuestionStore;

/// Upper bound on questions generated by one `generate_questions` call.
/// Larger counts are clamped to it, the same way non-positive counts are
/// raised to one.
pub const MAX_QUESTIONS_PER_REQUEST: i64 = 100;

/// The central quiz engine.
#[derive(Debug)]
pub struct QuizEngine {
    generator: QuestionGenerator,
    evaluator: AnswerEvaluator,
    store: QuestionStore,
}

impl QuizEngine {
    pub fn new(kb: KnowledgeBase, normalizer: Normalizer) -> Self {
        Self {
            generator: QuestionGenerator::new(kb),
            evaluator: AnswerEvaluator::new(normalizer),
            store: QuestionStore::new(),
        }
    }

    /// Build an engine from configuration: load the knowledge base and pick a
    /// language model from the configured fallback chain.
    pub fn from_config(config: &QuizforgeConfig) -> Result<Self, QuizError> {
        let kb = load_knowledge_base(&config.knowledge_base)?;
        let normalizer = Normalizer::with_fallback(
            &config.normalizer.language,
            &config.normalizer.model_sources(),
        );

        tracing::info!(
            "loaded {} problems from {} (language model '{}')",
            kb.len(),
            config.knowledge_base.display(),
            normalizer.model().name()
        );

        Ok(Self::new(kb, normalizer))
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        self.generator.knowledge_base()
    }

    pub fn normalizer(&self) -> &Normalizer {
        self.evaluator.normalizer()
    }

    /// Number of questions generated so far.
    pub fn question_count(&self) -> usize {
        self.store.len()
    }

    pub fn question(&self, question_id: &str) -> Option<Question> {
        self.store.get(question_id)
    }

    /// Generate a single question.
    pub fn generate(
        &self,
        allowed_problems: Option<&[String]>,
        seed: Option<i64>,
    ) -> Result<Question, QuizError> {
        self.generator.generate(&self.store, allowed_problems, seed)
    }

    /// Generate `count` questions, clamped to `1..=MAX_QUESTIONS_PER_REQUEST`.
    /// Each call draws a new id and a new selection; with a seed every
    /// selection is the same.
    pub fn generate_questions(
        &self,
        count: i64,
        allowed_problems: Option<&[String]>,
        seed: Option<i64>,
    ) -> Result<Vec<Question>, QuizError> {
        (0..count.clamp(1, MAX_QUESTIONS_PER_REQUEST))
            .map(|_| self.generate(allowed_problems, seed))
            .collect()
    }

    /// The answer template (if any) followed by every named strategy.
    pub fn reference_answers(&self, question_id: &str) -> Result<Vec<String>, QuizError> {
        let question = self.lookup(question_id)?;
        let Some(problem) = self.knowledge_base().get(&question.problem_key) else {
            return Ok(Vec::new());
        };

        Ok(std::iter::once(&problem.answer_template)
            .chain(problem.strategies.iter().map(|s| &s.name))
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .collect())
    }

    /// Score `answer_text` against the question's problem.
    pub fn evaluate(&self, question_id: &str, answer_text: &str) -> Result<EvaluationResult, QuizError> {
        let question = self.lookup(question_id)?;
        let result = match self.knowledge_base().get(&question.problem_key) {
            Some(problem) => self
                .evaluator
                .evaluate(&question.problem_key, problem, answer_text),
            None => self.evaluator.evaluate(
                &question.problem_key,
                &ProblemEntry::default(),
                answer_text,
            ),
        };
        Ok(result)
    }

    fn lookup(&self, question_id: &str) -> Result<Question, QuizError> {
        self.store
            .get(question_id)
            .ok_or_else(|| QuizError::NotFound(question_id.to_string()))
    }
}
