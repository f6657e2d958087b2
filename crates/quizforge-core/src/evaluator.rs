//! Answer scoring.
//!
//! An answer is scored against every strategy of its problem by keyword
//! coverage: the share of the strategy's normalized keyword tokens that also
//! appear in the normalized answer, times 100. Mentioning the strategy's name
//! adds a fixed bonus. The best strategy wins; ties go to the strategy
//! declared first.

use std::collections::BTreeSet;

use crate::model::{EvaluationResult, ProblemEntry};
use crate::normalizer::Normalizer;

/// Bonus added when the answer mentions the strategy's name.
pub const NAME_BONUS: f64 = 5.0;

/// Upper bound for any score.
pub const MAX_SCORE: f64 = 100.0;

/// Score of a single strategy against an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyScore {
    pub name: String,
    /// Coverage plus bonus, clamped to [`MAX_SCORE`]. Not rounded.
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Scores answers with a normalizer.
#[derive(Debug, Clone)]
pub struct AnswerEvaluator {
    normalizer: Normalizer,
}

impl AnswerEvaluator {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Score every strategy of `problem` that has at least one keyword token,
    /// in declaration order.
    pub fn score_strategies(&self, problem: &ProblemEntry, answer: &str) -> Vec<StrategyScore> {
        let user_tokens = self.normalizer.tokenize_set(answer);

        problem
            .strategies
            .iter()
            .filter_map(|strategy| {
                let keyword_tokens: BTreeSet<String> = strategy
                    .keywords
                    .iter()
                    .flat_map(|phrase| self.normalizer.tokenize_set(phrase))
                    .collect();

                if keyword_tokens.is_empty() {
                    return None;
                }

                let matched: Vec<String> = keyword_tokens
                    .intersection(&user_tokens)
                    .cloned()
                    .collect();
                let missing: Vec<String> =
                    keyword_tokens.difference(&user_tokens).cloned().collect();

                let mut score = matched.len() as f64 / keyword_tokens.len() as f64 * 100.0;

                let name_tokens = self.normalizer.tokenize_set(&strategy.name);
                if !name_tokens.is_disjoint(&user_tokens) {
                    score += NAME_BONUS;
                }

                Some(StrategyScore {
                    name: strategy.name.clone(),
                    score: score.min(MAX_SCORE),
                    matched,
                    missing,
                })
            })
            .collect()
    }

    /// Evaluate `answer` against `problem` and keep the best strategy.
    pub fn evaluate(&self, problem_key: &str, problem: &ProblemEntry, answer: &str) -> EvaluationResult {
        let mut best: Option<StrategyScore> = None;
        let mut best_score = 0.0;

        for candidate in self.score_strategies(problem, answer) {
            // Strict comparison: the first strategy to reach a score keeps it.
            if candidate.score > best_score {
                best_score = candidate.score;
                best = Some(candidate);
            }
        }

        let (best_match_name, matched_keywords, missing_keywords) = match best {
            Some(s) => (s.name, s.matched, s.missing),
            None => (String::new(), Vec::new(), Vec::new()),
        };

        tracing::debug!(
            "scored answer for '{problem_key}': {best_score:.1} (best match '{best_match_name}')"
        );

        EvaluationResult {
            score: round_one_decimal(best_score),
            matched_keywords,
            missing_keywords,
            problem_key: problem_key.to_string(),
            best_match_name,
            explanation: problem.answer_template.clone(),
        }
    }
}

/// Round to one decimal place, half-way cases to even.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
