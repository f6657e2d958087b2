//! Core data model types for quizforge.
//!
//! The knowledge base types mirror the on-disk JSON document; `Question` and
//! `EvaluationResult` are what the engine hands back to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A problem in the knowledge base.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemEntry {
    /// Human-readable display name.
    #[serde(default, alias = "label_ro")]
    pub label: String,
    /// Concrete instances a question can be asked about (e.g. "n=8").
    #[serde(default)]
    pub instances: Vec<String>,
    /// Reference explanation returned with every evaluation.
    #[serde(default, alias = "answer_template_ro")]
    pub answer_template: String,
    /// Accepted solving strategies, in declaration order.
    #[serde(default)]
    pub strategies: Vec<StrategyEntry>,
}

impl ProblemEntry {
    /// Label used when rendering questions. Falls back to the problem key.
    pub fn display_label<'a>(&'a self, key: &'a str) -> &'a str {
        if self.label.trim().is_empty() {
            key
        } else {
            &self.label
        }
    }
}

/// A named strategy and the keyword phrases that describe it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyEntry {
    #[serde(default)]
    pub name: String,
    /// Free-text phrases; each is normalized independently.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// The loaded knowledge base, keyed by problem identifier.
///
/// Keys iterate in sorted order, so candidate pools built from it are stable
/// across runs regardless of the document's key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    problems: BTreeMap<String, ProblemEntry>,
}

impl KnowledgeBase {
    pub fn new(problems: BTreeMap<String, ProblemEntry>) -> Self {
        Self { problems }
    }

    pub fn get(&self, key: &str) -> Option<&ProblemEntry> {
        self.problems.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.problems.contains_key(key)
    }

    /// Problem keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.problems.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProblemEntry)> {
        self.problems.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

impl FromIterator<(String, ProblemEntry)> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = (String, ProblemEntry)>>(iter: I) -> Self {
        Self {
            problems: iter.into_iter().collect(),
        }
    }
}

/// A generated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier (UUID v4), never reused.
    pub id: String,
    /// Key of the problem this question was built from.
    pub problem_key: String,
    /// The chosen instance, or empty if the problem has none.
    pub instance: String,
    /// Fully rendered prompt.
    pub text: String,
}

/// Outcome of scoring one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// 0.0–100.0, rounded to one decimal.
    pub score: f64,
    /// Keyword tokens of the best strategy found in the answer, sorted.
    pub matched_keywords: Vec<String>,
    /// Keyword tokens of the best strategy absent from the answer, sorted.
    pub missing_keywords: Vec<String>,
    pub problem_key: String,
    /// Name of the winning strategy; empty if nothing scored.
    pub best_match_name: String,
    /// The problem's answer template, independent of the winning strategy.
    pub explanation: String,
}
